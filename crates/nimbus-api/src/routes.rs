//! API route definitions.

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{data, health, refresh};
use crate::middleware;
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/cron", get(refresh::trigger_refresh))
        .route("/api/data", get(data::read_snapshot))
        .route("/health", get(health::health))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
