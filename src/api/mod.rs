//! REST API module using Axum
//!
//! Serves the health-analysis endpoint and a liveness probe behind CORS,
//! request tracing and a body size limit.

pub mod envelope;
pub mod handlers;
mod routes;
mod state;

pub use envelope::ApiError;
pub use handlers::{AnalysisResponse, HealthResponse};
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::{defaults, ServerConfig};

/// Build the CORS layer from the configured origins.
///
/// `*` anywhere in the list allows every origin. Entries that are not valid
/// header values are skipped with a warning.
fn build_cors_layer(server: &ServerConfig) -> CorsLayer {
    let origin = if server
        .cors_origins
        .iter()
        .any(|o| o.trim() == defaults::CORS_ANY_ORIGIN)
    {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = server
            .cors_origins
            .iter()
            .filter_map(|o| match o.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "CORS: ignoring invalid origin");
                    None
                }
            })
            .collect();
        tracing::info!(origins = ?server.cors_origins, "CORS: allowing configured origins");
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the complete application router.
pub fn create_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server);
    let max_body = state.config.server.max_body_bytes;

    routes::api_routes(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
