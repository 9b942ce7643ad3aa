//! Identity tokens and role gating.
//!
//! Every gated route is guarded in two stages: the [`AuthClaims`] extractor
//! verifies the bearer token (401 on failure), and [`RoleGuard::require`]
//! checks the stored role for the claims email (403 on mismatch). The role
//! check is exact-match: an admin does not pass a member gate.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use model::entities::user::Role;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::schemas::AppState;
use crate::store::UserDirectory;

/// Token validity window: 30 days.
const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: u64,
    pub exp: u64,
}

/// Signs and verifies identity tokens (HS256).
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token binding the email (and display name) to later requests.
    pub fn issue(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = jsonwebtoken::get_current_timestamp();
        let claims = AuthClaims {
            email: email.to_string(),
            name,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token and return its claims. Any failure collapses into
    /// `Unauthorized`; callers get no detail about why the token was bad.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, AppError> {
        decode::<AuthClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| {
                debug!("token verification failed: {}", err);
                AppError::Unauthorized
            })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
        state.tokens.verify(token)
    }
}

/// Role gate backed by the user directory.
///
/// Must run strictly after token verification; it trusts the email in the
/// claims and only consults the stored role.
#[derive(Clone)]
pub struct RoleGuard {
    users: Arc<dyn UserDirectory>,
}

impl RoleGuard {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn require(&self, claims: &AuthClaims, role: Role) -> Result<(), AppError> {
        let user = self.users.find_by_email(&claims.email).await?;
        match user {
            Some(ref record) if record.role == role => Ok(()),
            _ => {
                debug!(email = %claims.email, required = role.as_str(), "role gate rejected");
                Err(AppError::Forbidden(format!(
                    "Forbidden Access! {} Only Actions!",
                    role.title()
                )))
            }
        }
    }
}
