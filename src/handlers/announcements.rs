use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use model::entities::announcement::Announcement;
use model::entities::user::Role;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for posting an announcement
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub description: String,
}

/// Announcement response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: announcement.title,
            description: announcement.description,
        }
    }
}

/// Post an announcement (admin only)
#[utoipa::path(
    post,
    path = "/announcements",
    tag = "announcements",
    request_body = CreateAnnouncementRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Announcement posted", body = ApiResponse<AnnouncementResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request))]
pub async fn create_announcement(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AnnouncementResponse>>), AppError> {
    state.guard.require(&claims, Role::Admin).await?;
    let announcement = Announcement {
        id: Some(ObjectId::new()),
        title: request.title,
        description: request.description,
    };
    state.stores.announcements.insert(&announcement).await?;
    info!(title = %announcement.title, "announcement posted");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: announcement.into(),
            message: "Announcement posted successfully".to_string(),
            success: true,
        }),
    ))
}

/// List all announcements
#[utoipa::path(
    get,
    path = "/announcements",
    tag = "announcements",
    responses(
        (status = 200, description = "Announcements retrieved", body = ApiResponse<Vec<AnnouncementResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AnnouncementResponse>>>, AppError> {
    let announcements = state.stores.announcements.list().await?;
    Ok(Json(ApiResponse {
        data: announcements
            .into_iter()
            .map(AnnouncementResponse::from)
            .collect(),
        message: "Announcements retrieved successfully".to_string(),
        success: true,
    }))
}
