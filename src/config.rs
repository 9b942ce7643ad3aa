use std::sync::Arc;

use anyhow::{Context, Result};
use mongodb::Client;

use crate::auth::TokenService;
use crate::payments::StripeProvider;
use crate::schemas::AppState;
use crate::store::mongo;

/// Initialize application configuration and state.
///
/// A missing signing key or provider key is fatal here, before the server
/// starts accepting requests.
pub async fn initialize_app_state() -> Result<AppState> {
    // Load configuration
    dotenvy::dotenv().ok();
    let mongodb_uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database_name =
        std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "stayease".to_string());
    let token_secret =
        std::env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET must be set")?;
    let stripe_secret =
        std::env::var("STRIPE_SECRET_KEY").context("STRIPE_SECRET_KEY must be set")?;

    // Connect to the document store
    tracing::info!("Connecting to document store: {}", mongodb_uri);
    let client = Client::with_uri_str(&mongodb_uri).await?;
    let db = client.database(&database_name);

    Ok(AppState::new(
        mongo::store_handles(&db),
        TokenService::new(&token_secret),
        Arc::new(StripeProvider::new(stripe_secret)),
    ))
}
