use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use model::entities::agreement::Agreement;
use model::entities::user::Role;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, UpdateSummary};
use crate::workflow::{NewAgreement, PendingAgreement, ResolveOutcome, SubmitOutcome};

/// Request body for submitting a rental agreement
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgreementRequest {
    pub user_name: String,
    pub user_email: String,
    pub apartment_id: String,
    pub apartment_no: i32,
    pub floor_no: i32,
    pub block_name: String,
    pub rent: i64,
}

/// Agreement response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgreementResponse {
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub apartment_id: String,
    pub apartment_no: i32,
    pub floor_no: i32,
    pub block_name: String,
    pub rent: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_date: Option<String>,
    /// Creation instant derived from the agreement identifier; present on
    /// the pending list only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_date: Option<String>,
}

impl From<Agreement> for AgreementResponse {
    fn from(agreement: Agreement) -> Self {
        Self {
            id: agreement.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            user_name: agreement.user_name,
            user_email: agreement.user_email,
            apartment_id: agreement.apartment_id,
            apartment_no: agreement.apartment_no,
            floor_no: agreement.floor_no,
            block_name: agreement.block_name,
            rent: agreement.rent,
            status: agreement.status.as_str().to_string(),
            accept_date: agreement.accept_date,
            request_date: None,
        }
    }
}

impl From<PendingAgreement> for AgreementResponse {
    fn from(pending: PendingAgreement) -> Self {
        let mut response = Self::from(pending.agreement);
        response.request_date = Some(pending.request_date);
        response
    }
}

/// Admin decision on a pending agreement
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgreementDecisionRequest {
    /// Agreement identifier (hex ObjectId)
    pub id: String,
    /// `accept` accepts; anything else rejects
    pub action: String,
    pub apartment_id: String,
    pub user_email: String,
}

/// Submit a rental agreement request
#[utoipa::path(
    post,
    path = "/agreements",
    tag = "agreements",
    request_body = CreateAgreementRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Agreement submitted", body = ApiResponse<AgreementResponse>),
        (status = 200, description = "An agreement already exists for this email", body = ApiResponse<AgreementResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, _claims, request), fields(email = %request.user_email))]
pub async fn create_agreement(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Json(request): Json<CreateAgreementRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Option<AgreementResponse>>>), AppError> {
    let outcome = state
        .workflow
        .submit(NewAgreement {
            user_name: request.user_name,
            user_email: request.user_email,
            apartment_id: request.apartment_id,
            apartment_no: request.apartment_no,
            floor_no: request.floor_no,
            block_name: request.block_name,
            rent: request.rent,
        })
        .await?;

    match outcome {
        SubmitOutcome::Submitted(agreement) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse {
                data: Some(agreement.into()),
                message: "Agreement submitted successfully".to_string(),
                success: true,
            }),
        )),
        // Domain conflict, answered as 200 with a message rather than an
        // HTTP error.
        SubmitOutcome::AlreadyRequested => Ok((
            StatusCode::OK,
            Json(ApiResponse {
                data: None,
                message: "You already have an active agreement!".to_string(),
                success: false,
            }),
        )),
    }
}

/// List pending agreements (admin only)
#[utoipa::path(
    get,
    path = "/agreements",
    tag = "agreements",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Pending agreements retrieved", body = ApiResponse<Vec<AgreementResponse>>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims))]
pub async fn list_pending_agreements(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<ApiResponse<Vec<AgreementResponse>>>, AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let pending = state.workflow.list_pending().await?;
    Ok(Json(ApiResponse {
        data: pending.into_iter().map(AgreementResponse::from).collect(),
        message: "Agreements retrieved successfully".to_string(),
        success: true,
    }))
}

/// Accept or reject a pending agreement (admin only)
#[utoipa::path(
    post,
    path = "/manage-agreement-request",
    tag = "agreements",
    request_body = AgreementDecisionRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Agreement resolved", body = ApiResponse<UpdateSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(agreement = %request.id, action = %request.action))]
pub async fn manage_agreement(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<AgreementDecisionRequest>,
) -> Result<Json<ApiResponse<UpdateSummary>>, AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let outcome = state
        .workflow
        .resolve(
            &request.id,
            &request.action,
            &request.apartment_id,
            &request.user_email,
        )
        .await?;

    let (modified, message) = match outcome {
        ResolveOutcome::Accepted { role_updates } => {
            (role_updates, "Agreement accepted".to_string())
        }
        ResolveOutcome::Rejected => (0, "Agreement rejected".to_string()),
    };
    Ok(Json(ApiResponse {
        data: UpdateSummary { modified },
        message,
        success: true,
    }))
}

/// Fetch the agreement for an email (member only)
#[utoipa::path(
    get,
    path = "/agreement/{email}",
    tag = "agreements",
    params(("email" = String, Path, description = "Owner email")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Agreement retrieved", body = ApiResponse<AgreementResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Member role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims))]
pub async fn get_agreement_by_email(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<Option<AgreementResponse>>>, AppError> {
    state.guard.require(&claims, Role::Member).await?;
    let agreement = state.stores.agreements.find_by_email(&email).await?;
    Ok(Json(ApiResponse {
        data: agreement.map(AgreementResponse::from),
        message: "Agreement retrieved successfully".to_string(),
        success: true,
    }))
}
