//! Shared fixtures for integration tests: scripted completion backends and
//! recording mailers, wired into an in-process app.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use tower::ServiceExt;

use health_insight::config::ServiceConfig;
use health_insight::llm::{LlmBackend, LlmError};
use health_insight::mail::{MailError, Mailer};
use health_insight::metrics::SECTION_MARKER;
use health_insight::{create_app, AppState};

pub const SUMMARY_TEXT: &str = "Fatigue is common among adults in Malaysia.\nSleep debt is a leading factor.";
pub const CREATIVE_TEXT: &str = "🥗 Eat broccoli - reduces inflammation\n🚶 Walk after dinner";
pub const METRICS_TEXT: &str = "### Sleep\nQuality: 70%\nDuration: 60%\n\n### Energy\n- Morning: 45%\n- Afternoon: unknown";

/// Answers summary, creative and metrics prompts with fixed text and records
/// every call.
#[derive(Default)]
pub struct ScriptedBackend {
    pub calls: Mutex<Vec<(String, f32)>>,
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));

        // Creative runs hottest with the default config
        let answer = if prompt.contains(SECTION_MARKER) {
            METRICS_TEXT
        } else if temperature > 0.8 {
            CREATIVE_TEXT
        } else {
            SUMMARY_TEXT
        };
        Ok(answer.to_string())
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

/// Fails every completion as if the quota were exhausted.
pub struct RateLimitedBackend;

#[async_trait]
impl LlmBackend for RateLimitedBackend {
    async fn complete(&self, _prompt: &str, _temperature: f32) -> Result<String, LlmError> {
        Err(LlmError::RateLimited)
    }

    fn backend_name(&self) -> &'static str {
        "rate-limited"
    }
}

/// Keeps every report it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_report(&self, subject: &str, html: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), html.to_string()));
        Ok(())
    }

    fn mailer_name(&self) -> &'static str {
        "recording"
    }
}

/// Rejects every report.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_report(&self, _subject: &str, _html: &str) -> Result<(), MailError> {
        let err = "not-an-address".parse::<lettre::Address>().unwrap_err();
        Err(MailError::Address(err))
    }

    fn mailer_name(&self) -> &'static str {
        "failing"
    }
}

pub fn app(llm: Arc<dyn LlmBackend>, mailer: Arc<dyn Mailer>) -> Router {
    create_app(AppState::new(
        Arc::new(ServiceConfig::default()),
        llm,
        mailer,
    ))
}

pub fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/health_analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}
