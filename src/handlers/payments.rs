use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use model::entities::payment::Payment;
use model::entities::user::Role;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::payments::INTENT_CURRENCY;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a payment intent
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Amount in whole currency units; converted to minor units for the
    /// provider. Not validated locally.
    pub price: i64,
}

/// Client secret issued by the payment provider
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Request body for recording a completed payment
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub email: String,
    pub rent: i64,
    pub month: String,
    pub transaction_id: String,
}

/// Payment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub email: String,
    pub rent: i64,
    pub month: String,
    pub transaction_id: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            email: payment.email,
            rent: payment.rent,
            month: payment.month,
            transaction_id: payment.transaction_id,
        }
    }
}

/// Create a payment intent with the external provider (member only)
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    request_body = PaymentIntentRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Intent created", body = ApiResponse<PaymentIntentResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Member role required", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(price = request.price))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<ApiResponse<PaymentIntentResponse>>, AppError> {
    state.guard.require(&claims, Role::Member).await?;
    // Minor-unit conversion; the provider expects cents.
    let amount_minor = request.price * 100;
    let client_secret = state
        .payment_provider
        .create_intent(amount_minor, INTENT_CURRENCY)
        .await?;
    Ok(Json(ApiResponse {
        data: PaymentIntentResponse { client_secret },
        message: "Payment intent created successfully".to_string(),
        success: true,
    }))
}

/// Record a completed payment (member only)
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = RecordPaymentRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Payment recorded", body = ApiResponse<PaymentResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Member role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(email = %request.email))]
pub async fn record_payment(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), AppError> {
    state.guard.require(&claims, Role::Member).await?;
    let payment = Payment {
        id: Some(ObjectId::new()),
        email: request.email,
        rent: request.rent,
        month: request.month,
        transaction_id: request.transaction_id,
    };
    state.stores.payments.record(&payment).await?;
    info!(email = %payment.email, month = %payment.month, "payment recorded");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: payment.into(),
            message: "Payment recorded successfully".to_string(),
            success: true,
        }),
    ))
}

/// Payment history for an email (member only)
#[utoipa::path(
    get,
    path = "/payment-history/{email}",
    tag = "payments",
    params(("email" = String, Path, description = "Payer email")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "History retrieved", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Member role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims))]
pub async fn payment_history(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, AppError> {
    state.guard.require(&claims, Role::Member).await?;
    let history = state.stores.payments.history_for(&email).await?;
    Ok(Json(ApiResponse {
        data: history.into_iter().map(PaymentResponse::from).collect(),
        message: "Payment history retrieved successfully".to_string(),
        success: true,
    }))
}
