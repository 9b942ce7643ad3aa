use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::payments::PaymentError;
use crate::schemas::ErrorResponse;
use crate::store::StoreError;

/// Application-level error taxonomy mapped onto HTTP statuses.
///
/// Domain misses (duplicate agreement, unknown coupon code) are not errors
/// here; those are answered as 200 with a domain message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed, or expired bearer token.
    #[error("Unauthorized access!!")]
    Unauthorized,
    /// Valid token, but the stored role does not match the required one.
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    /// Token signing failed; verification failures map to `Unauthorized`.
    #[error("failed to issue token: {0}")]
    TokenIssue(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            Self::Payment(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PAYMENT_ERROR"),
            Self::TokenIssue(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        } else {
            warn!("request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
