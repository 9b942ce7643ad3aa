use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use model::entities::coupon::Coupon;
use model::entities::user::Role;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, UpdateSummary};

/// Request body for creating a coupon
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: String,
    pub discount: i64,
    pub description: String,
}

/// Coupon response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: String,
    pub code: String,
    pub discount: i64,
    pub description: String,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            code: coupon.code,
            discount: coupon.discount,
            description: coupon.description,
        }
    }
}

/// Request body for validating a coupon code
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    pub code: String,
}

/// Create a coupon (admin only)
#[utoipa::path(
    post,
    path = "/coupons",
    tag = "coupons",
    request_body = CreateCouponRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Coupon created", body = ApiResponse<CouponResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(code = %request.code))]
pub async fn create_coupon(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<CreateCouponRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CouponResponse>>), AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let coupon = Coupon {
        id: Some(ObjectId::new()),
        code: request.code,
        discount: request.discount,
        description: request.description,
    };
    state.stores.coupons.insert(&coupon).await?;
    info!(code = %coupon.code, "coupon created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: coupon.into(),
            message: "Coupon created successfully".to_string(),
            success: true,
        }),
    ))
}

/// List all coupons
#[utoipa::path(
    get,
    path = "/all-coupons",
    tag = "coupons",
    responses(
        (status = 200, description = "Coupons retrieved", body = ApiResponse<Vec<CouponResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_coupons(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CouponResponse>>>, AppError> {
    let coupons = state.stores.coupons.list().await?;
    Ok(Json(ApiResponse {
        data: coupons.into_iter().map(CouponResponse::from).collect(),
        message: "Coupons retrieved successfully".to_string(),
        success: true,
    }))
}

/// Delete a coupon (admin only)
///
/// Served on GET, matching the route shape the frontend already calls.
#[utoipa::path(
    get,
    path = "/delete-coupon/{id}",
    tag = "coupons",
    params(("id" = String, Path, description = "Coupon identifier")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Coupon deleted", body = ApiResponse<UpdateSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims))]
pub async fn delete_coupon(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UpdateSummary>>, AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let deleted = state.stores.coupons.delete(&id).await?;
    info!(%id, deleted, "coupon deleted");
    Ok(Json(ApiResponse {
        data: UpdateSummary { modified: deleted },
        message: "Coupon deleted successfully".to_string(),
        success: true,
    }))
}

/// Validate a coupon code (member only)
///
/// A miss is a domain-level answer, not an HTTP error: 200 with an
/// "Invalid Coupon" message and no data.
#[utoipa::path(
    post,
    path = "/validate-coupons",
    tag = "coupons",
    request_body = ValidateCouponRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Validation result", body = ApiResponse<CouponResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Member role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(code = %request.code))]
pub async fn validate_coupon(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<ValidateCouponRequest>,
) -> Result<Json<ApiResponse<Option<CouponResponse>>>, AppError> {
    state.guard.require(&claims, Role::Member).await?;
    match state.stores.coupons.find_by_code(&request.code).await? {
        Some(coupon) => Ok(Json(ApiResponse {
            data: Some(coupon.into()),
            message: "Coupon is valid".to_string(),
            success: true,
        })),
        None => {
            debug!("coupon miss");
            Ok(Json(ApiResponse {
                data: None,
                message: "Invalid Coupon".to_string(),
                success: false,
            }))
        }
    }
}
