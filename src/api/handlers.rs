//! API route handlers

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use super::envelope::ApiError;
use super::state::AppState;
use crate::metrics::MetricGroup;
use crate::profile::HealthRequest;

/// Successful `POST /health_analyze` body.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub creative: String,
    pub metrics: Vec<MetricGroup>,
    pub metrics_html: String,
    pub footer: String,
}

/// Liveness body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// POST /health_analyze
///
/// The body is read as JSON whatever the content type says. The analysis
/// runs on its own task so a dropped connection cannot cut off the email.
pub async fn health_analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let request: HealthRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, bytes = body.len(), "Rejected unreadable request body");
        ApiError::bad_request("invalid JSON body")
    })?;

    let analyzer = state.analyzer.clone();
    let outcome = tokio::spawn(async move { analyzer.analyze(request).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Analysis task failed");
            ApiError::internal("analysis failed")
        })?;

    let sections = outcome.sections;
    Ok(Json(AnalysisResponse {
        analysis: sections.summary,
        creative: sections.creative,
        metrics: outcome.metrics,
        metrics_html: sections.metrics,
        footer: sections.footer,
    }))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}
