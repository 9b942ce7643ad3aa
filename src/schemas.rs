use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::auth::{RoleGuard, TokenService};
use crate::handlers::stats::AdminStats;
use crate::payments::PaymentProvider;
use crate::store::StoreHandles;
use crate::workflow::AgreementWorkflow;

/// Application state shared across handlers.
///
/// Store handles are opened once at startup and injected here; the guard
/// and workflow components hold clones of the handles they need.
#[derive(Clone)]
pub struct AppState {
    /// Dependency-injected store handles.
    pub stores: StoreHandles,
    /// Token signer/verifier.
    pub tokens: TokenService,
    /// Role gate backed by the user directory.
    pub guard: RoleGuard,
    /// Agreement state machine.
    pub workflow: AgreementWorkflow,
    /// External payment-intent provider.
    pub payment_provider: Arc<dyn PaymentProvider>,
    /// Cache for aggregate queries.
    pub cache: Cache<String, CachedData>,
}

impl AppState {
    pub fn new(
        stores: StoreHandles,
        tokens: TokenService,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        let guard = RoleGuard::new(stores.users.clone());
        let workflow = AgreementWorkflow::new(
            stores.agreements.clone(),
            stores.apartments.clone(),
            stores.users.clone(),
        );
        let cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(60))
            .build();
        Self {
            stores,
            tokens,
            guard,
            workflow,
            payment_provider,
            cache,
        }
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Stats(AdminStats),
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Outcome of an update or delete, as reported by the store
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateSummary {
    /// Number of records modified or deleted
    pub modified: u64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Document store connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::issue_token,
        crate::handlers::users::create_user,
        crate::handlers::users::get_user_role,
        crate::handlers::users::list_members,
        crate::handlers::users::remove_member,
        crate::handlers::apartments::list_apartments,
        crate::handlers::apartments::featured_apartments,
        crate::handlers::apartments::search_apartments_by_price,
        crate::handlers::stats::admin_stats,
        crate::handlers::agreements::create_agreement,
        crate::handlers::agreements::list_pending_agreements,
        crate::handlers::agreements::manage_agreement,
        crate::handlers::agreements::get_agreement_by_email,
        crate::handlers::coupons::create_coupon,
        crate::handlers::coupons::list_coupons,
        crate::handlers::coupons::delete_coupon,
        crate::handlers::coupons::validate_coupon,
        crate::handlers::announcements::create_announcement,
        crate::handlers::announcements::list_announcements,
        crate::handlers::reviews::create_review,
        crate::handlers::reviews::list_reviews,
        crate::handlers::payments::create_payment_intent,
        crate::handlers::payments::record_payment,
        crate::handlers::payments::payment_history,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            UpdateSummary,
            ApiResponse<crate::handlers::users::TokenResponse>,
            ApiResponse<crate::handlers::users::UserResponse>,
            ApiResponse<Vec<crate::handlers::users::UserResponse>>,
            ApiResponse<crate::handlers::users::RoleResponse>,
            ApiResponse<UpdateSummary>,
            ApiResponse<Vec<crate::handlers::apartments::ApartmentResponse>>,
            ApiResponse<crate::handlers::stats::AdminStats>,
            ApiResponse<crate::handlers::agreements::AgreementResponse>,
            ApiResponse<Vec<crate::handlers::agreements::AgreementResponse>>,
            ApiResponse<crate::handlers::coupons::CouponResponse>,
            ApiResponse<Vec<crate::handlers::coupons::CouponResponse>>,
            ApiResponse<crate::handlers::announcements::AnnouncementResponse>,
            ApiResponse<Vec<crate::handlers::announcements::AnnouncementResponse>>,
            ApiResponse<crate::handlers::reviews::ReviewResponse>,
            ApiResponse<Vec<crate::handlers::reviews::ReviewResponse>>,
            ApiResponse<crate::handlers::payments::PaymentIntentResponse>,
            ApiResponse<crate::handlers::payments::PaymentResponse>,
            ApiResponse<Vec<crate::handlers::payments::PaymentResponse>>,
            crate::handlers::users::TokenRequest,
            crate::handlers::users::TokenResponse,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::users::RemoveMemberRequest,
            crate::handlers::users::RoleResponse,
            crate::handlers::apartments::ApartmentResponse,
            crate::handlers::stats::AdminStats,
            crate::handlers::agreements::CreateAgreementRequest,
            crate::handlers::agreements::AgreementResponse,
            crate::handlers::agreements::AgreementDecisionRequest,
            crate::handlers::coupons::CreateCouponRequest,
            crate::handlers::coupons::CouponResponse,
            crate::handlers::coupons::ValidateCouponRequest,
            crate::handlers::announcements::CreateAnnouncementRequest,
            crate::handlers::announcements::AnnouncementResponse,
            crate::handlers::reviews::CreateReviewRequest,
            crate::handlers::reviews::ReviewResponse,
            crate::handlers::payments::PaymentIntentRequest,
            crate::handlers::payments::PaymentIntentResponse,
            crate::handlers::payments::RecordPaymentRequest,
            crate::handlers::payments::PaymentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Sign-in, tokens and role management"),
        (name = "apartments", description = "Apartment catalog endpoints"),
        (name = "agreements", description = "Rental agreement workflow"),
        (name = "coupons", description = "Discount coupon endpoints"),
        (name = "announcements", description = "Building announcements"),
        (name = "reviews", description = "Resident reviews"),
        (name = "payments", description = "Rent payments and payment intents"),
    ),
    info(
        title = "StayEase API",
        description = "Apartment rental management backend: catalog, agreements, members, coupons and payments",
        version = "0.1.0",
        contact(
            name = "StayEase Team",
            email = "contact@stayease.app"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token security scheme referenced by gated routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
