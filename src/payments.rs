//! Payment-intent creation against the external provider.
//!
//! The provider is an opaque collaborator: we hand it an amount in minor
//! units and get back a client secret for the browser to complete the
//! charge. Nothing about the intent is persisted here; completed payments
//! land in the payment ledger via `POST /payments`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Currency for every intent; the application only bills in USD.
pub const INTENT_CURRENCY: &str = "usd";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("payment provider response missing client secret")]
    MissingClientSecret,
}

/// Opaque remote call returning a client secret.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, PaymentError>;
}

/// Stripe-compatible REST client (`POST /v1/payment_intents`).
pub struct StripeProvider {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeProvider {
    pub fn new(secret_key: String) -> Self {
        Self::with_base_url(secret_key, "https://api.stripe.com".to_string())
    }

    pub fn with_base_url(secret_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            base_url,
        }
    }
}

#[derive(Deserialize)]
struct IntentResponse {
    client_secret: Option<String>,
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, PaymentError> {
        debug!(amount_minor, currency, "creating payment intent");
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];
        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;
        let intent: IntentResponse = response.json().await?;
        intent
            .client_secret
            .ok_or(PaymentError::MissingClientSecret)
    }
}
