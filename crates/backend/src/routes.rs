use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All API routes of the application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D410 Customer / Supplier Insights
        .route(
            "/api/d410/:role/insights",
            post(handlers::d410_partner_insights::get_insights),
        )
        .route(
            "/api/d410/:role/details",
            post(handlers::d410_partner_insights::get_details),
        )
        .route(
            "/api/d410/link_options",
            get(handlers::d410_partner_insights::get_link_options),
        )
        .route(
            "/api/d410/settings",
            get(handlers::d410_partner_insights::get_settings),
        )
        .route(
            "/api/d410/testdata",
            post(handlers::d410_partner_insights::seed_testdata),
        )
}
