//! API route definitions
//!
//! - POST /health_analyze - questionnaire in, report fragments out
//! - GET  /health         - liveness

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::state::AppState;

/// Create all API routes
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health_analyze", post(handlers::health_analyze))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
