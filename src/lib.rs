//! health-insight: questionnaire-driven health reports
//!
//! A small HTTP service that turns a personal-health questionnaire into a
//! localized report: narrative summary, creative habit suggestions and a
//! percentage metrics chart, produced by a chat-completions model, rendered
//! to HTML, emailed and returned as JSON.
//!
//! ## Architecture
//!
//! - **Metrics**: tolerant extractor from model text to `MetricGroup`s, never fails
//! - **Locale**: one template table per language (prompts, headings, fallbacks)
//! - **Profile**: request payload, age computation, defaults
//! - **LLM**: `LlmBackend` trait with an OpenAI-compatible HTTP backend
//! - **Report**: HTML fragment and email rendering
//! - **Mail**: `Mailer` trait with SMTP delivery
//! - **Analysis**: per-request orchestration
//! - **API**: axum router and handlers

pub mod analysis;
pub mod api;
pub mod config;
pub mod llm;
pub mod locale;
pub mod mail;
pub mod metrics;
pub mod profile;
pub mod report;

// Re-export the extractor surface
pub use metrics::{extract, extract_with, ExtractorOptions, Indicator, MetricGroup};

// Re-export service building blocks
pub use analysis::{AnalysisOutcome, HealthAnalyzer};
pub use api::{create_app, AppState};
pub use config::ServiceConfig;
pub use llm::{LlmBackend, LlmError};
pub use locale::Language;
pub use mail::{MailError, Mailer};
pub use profile::HealthRequest;
