use axum::extract::{Query, State};
use axum::response::Json;
use model::entities::apartment::Apartment;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Number of apartments shown on the featured strip.
const FEATURED_LIMIT: i64 = 6;

/// Apartment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentResponse {
    pub id: String,
    pub apartment_no: i32,
    pub floor_no: i32,
    pub block_name: String,
    pub apartment_image: String,
    pub rent: i64,
    pub status: String,
}

impl From<Apartment> for ApartmentResponse {
    fn from(apartment: Apartment) -> Self {
        Self {
            id: apartment.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            apartment_no: apartment.apartment_no,
            floor_no: apartment.floor_no,
            block_name: apartment.block_name,
            apartment_image: apartment.apartment_image,
            rent: apartment.rent,
            status: apartment.status.as_str().to_string(),
        }
    }
}

/// Inclusive rent range; omitting a bound leaves that side open
#[derive(Debug, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    /// Lower rent bound (inclusive)
    pub min_price: Option<i64>,
    /// Upper rent bound (inclusive)
    pub max_price: Option<i64>,
}

fn to_responses(apartments: Vec<Apartment>) -> Vec<ApartmentResponse> {
    apartments.into_iter().map(ApartmentResponse::from).collect()
}

/// List the full apartment catalog
#[utoipa::path(
    get,
    path = "/apartments",
    tag = "apartments",
    responses(
        (status = 200, description = "Apartments retrieved", body = ApiResponse<Vec<ApartmentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_apartments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApartmentResponse>>>, AppError> {
    let apartments = state.stores.apartments.list().await?;
    debug!(count = apartments.len(), "apartments listed");
    Ok(Json(ApiResponse {
        data: to_responses(apartments),
        message: "Apartments retrieved successfully".to_string(),
        success: true,
    }))
}

/// Top apartments by descending rent
#[utoipa::path(
    get,
    path = "/featured-apartments",
    tag = "apartments",
    responses(
        (status = 200, description = "Featured apartments retrieved", body = ApiResponse<Vec<ApartmentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn featured_apartments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApartmentResponse>>>, AppError> {
    let apartments = state.stores.apartments.featured(FEATURED_LIMIT).await?;
    Ok(Json(ApiResponse {
        data: to_responses(apartments),
        message: "Featured apartments retrieved successfully".to_string(),
        success: true,
    }))
}

/// Search apartments by rent range, ascending by rent
#[utoipa::path(
    get,
    path = "/apartments-price",
    tag = "apartments",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Matching apartments retrieved", body = ApiResponse<Vec<ApartmentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_apartments_by_price(
    State(state): State<AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ApartmentResponse>>>, AppError> {
    let apartments = state
        .stores
        .apartments
        .search_by_rent(query.min_price, query.max_price)
        .await?;
    debug!(count = apartments.len(), "price search completed");
    Ok(Json(ApiResponse {
        data: to_responses(apartments),
        message: "Apartments retrieved successfully".to_string(),
        success: true,
    }))
}
