use crate::handlers::{
    agreements::{
        create_agreement, get_agreement_by_email, list_pending_agreements, manage_agreement,
    },
    announcements::{create_announcement, list_announcements},
    apartments::{featured_apartments, list_apartments, search_apartments_by_price},
    coupons::{create_coupon, delete_coupon, list_coupons, validate_coupon},
    health::{greeting, health_check},
    payments::{create_payment_intent, payment_history, record_payment},
    reviews::{create_review, list_reviews},
    stats::admin_stats,
    users::{create_user, get_user_role, issue_token, list_members, remove_member},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, patch, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing and health
        .route("/", get(greeting))
        .route("/health", get(health_check))
        // Sign-in and users
        .route("/jwt", post(issue_token))
        .route("/users", post(create_user))
        .route("/users/role/:email", get(get_user_role))
        .route("/members", get(list_members))
        .route("/remove-members", patch(remove_member))
        // Apartment catalog
        .route("/apartments", get(list_apartments))
        .route("/featured-apartments", get(featured_apartments))
        .route("/apartments-price", get(search_apartments_by_price))
        .route("/admin-stats", get(admin_stats))
        // Agreement workflow
        .route(
            "/agreements",
            post(create_agreement).get(list_pending_agreements),
        )
        .route("/manage-agreement-request", post(manage_agreement))
        .route("/agreement/:email", get(get_agreement_by_email))
        // Coupons
        .route("/coupons", post(create_coupon))
        .route("/all-coupons", get(list_coupons))
        // Deletion on GET is kept for compatibility with the deployed
        // frontend.
        .route("/delete-coupon/:id", get(delete_coupon))
        .route("/validate-coupons", post(validate_coupon))
        // Announcements and reviews
        .route(
            "/announcements",
            post(create_announcement).get(list_announcements),
        )
        .route("/reviews", post(create_review).get(list_reviews))
        // Payments
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(record_payment))
        .route("/payment-history/:email", get(payment_history))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
