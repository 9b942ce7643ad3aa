use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use model::entities::review::Review;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for posting a review
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub comment: String,
}

/// Review response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub comment: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: review.name,
            email: review.email,
            rating: review.rating,
            comment: review.comment,
        }
    }
}

/// Post a review (any signed-in user)
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateReviewRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Review posted", body = ApiResponse<ReviewResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, _claims, request), fields(email = %request.email))]
pub async fn create_review(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    let review = Review {
        id: Some(ObjectId::new()),
        name: request.name,
        email: request.email,
        rating: request.rating,
        comment: request.comment,
    };
    state.stores.reviews.insert(&review).await?;
    info!(email = %review.email, "review posted");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: review.into(),
            message: "Review posted successfully".to_string(),
            success: true,
        }),
    ))
}

/// List all reviews
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "reviews",
    responses(
        (status = 200, description = "Reviews retrieved", body = ApiResponse<Vec<ReviewResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ReviewResponse>>>, AppError> {
    let reviews = state.stores.reviews.list().await?;
    Ok(Json(ApiResponse {
        data: reviews.into_iter().map(ReviewResponse::from).collect(),
        message: "Reviews retrieved successfully".to_string(),
        success: true,
    }))
}
