//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::services::vosi::{AVAILABILITY_PATH, CAPABILITIES_PATH, OBJOBSSAP_PATH, OBSLOCTAP_PATH};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(OBJOBSSAP_PATH, get(handlers::objobssap_query))
        .route(OBSLOCTAP_PATH, get(handlers::obsloctap_query))
        .route(AVAILABILITY_PATH, get(handlers::availability))
        .route(CAPABILITIES_PATH, get(handlers::capabilities))
        .route("/health", get(handlers::health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
