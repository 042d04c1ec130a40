//! Route definitions for the Nutrition Tracker API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod body_composition;
mod health;
mod intake;
mod reference;

pub use body_composition::body_composition_routes;
pub use intake::intake_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let http = state.config().http.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(http.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(http.request_timeout_secs)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Nutrition Tracker API v1" }))
        .route("/reference-values", get(reference::get_reference_values))
        .nest("/body-composition", body_composition::body_composition_routes())
        .nest("/intake", intake::intake_routes())
}
