//! LLM Backend Module
//!
//! Provides a unified interface for text-completion backends.
//!
//! ## Architecture
//!
//! - **OpenAiBackend**: any OpenAI-compatible `/chat/completions` endpoint over HTTPS
//! - **UnconfiguredBackend**: stands in when no API key is set, so the service still
//!   starts and every report falls back to placeholders and default metrics
//!
//! Errors are typed so callers can tell an auth problem from a quota problem
//! from a network blip, even though the HTTP caller only ever sees placeholder text.

mod openai;

pub use openai::OpenAiBackend;

use async_trait::async_trait;

/// Unified trait for completion backends
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Complete a single user prompt at the given sampling temperature
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Completion failures, by kind.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("credentials rejected ({0})")]
    Unauthorized(reqwest::StatusCode),
    #[error("rate limited or quota exhausted")]
    RateLimited,
    #[error("api failure ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response did not contain any answer")]
    EmptyAnswer,
    #[error("no completion backend configured")]
    NotConfigured,
}

impl LlmError {
    /// Short stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Network(_) => "network",
            LlmError::Unauthorized(_) => "auth",
            LlmError::RateLimited => "rate_limit",
            LlmError::Api { .. } => "api",
            LlmError::EmptyAnswer => "empty",
            LlmError::NotConfigured => "not_configured",
        }
    }
}

/// Backend used when no API key is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredBackend;

#[async_trait]
impl LlmBackend for UnconfiguredBackend {
    async fn complete(&self, _prompt: &str, _temperature: f32) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }

    fn backend_name(&self) -> &'static str {
        "unconfigured"
    }
}
