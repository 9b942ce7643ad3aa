use axum::extract::State;
use axum::response::Json;
use model::entities::apartment::ApartmentStatus;
use model::entities::user::Role;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::auth::AuthClaims;
use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};

const STATS_CACHE_KEY: &str = "admin-stats";

/// Aggregate counts for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_room: u64,
    pub available_room: u64,
    pub total_user: u64,
    pub total_member: u64,
}

/// Aggregate counts for the admin dashboard (admin only)
#[utoipa::path(
    get,
    path = "/admin-stats",
    tag = "apartments",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Stats retrieved", body = ApiResponse<AdminStats>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims))]
pub async fn admin_stats(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<ApiResponse<AdminStats>>, AppError> {
    state.guard.require(&claims, Role::Admin).await?;

    if let Some(CachedData::Stats(stats)) = state.cache.get(STATS_CACHE_KEY).await {
        debug!("stats served from cache");
        return Ok(Json(respond(stats)));
    }

    let stats = AdminStats {
        total_room: state.stores.apartments.count().await?,
        available_room: state
            .stores
            .apartments
            .count_by_status(ApartmentStatus::Available)
            .await?,
        total_user: state.stores.users.count().await?,
        total_member: state.stores.users.count_by_role(Role::Member).await?,
    };
    state
        .cache
        .insert(STATS_CACHE_KEY.to_string(), CachedData::Stats(stats.clone()))
        .await;
    Ok(Json(respond(stats)))
}

fn respond(stats: AdminStats) -> ApiResponse<AdminStats> {
    ApiResponse {
        data: stats,
        message: "Stats retrieved successfully".to_string(),
        success: true,
    }
}
