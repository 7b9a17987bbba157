//! OpenAI-compatible chat-completions backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{LlmBackend, LlmError};
use crate::config::LlmConfig;

/// Longest error body kept in [`LlmError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for `{base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl OpenAiBackend {
    pub fn new(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: api_key.into(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let payload = ChatRequest::new(&self.model, prompt, temperature, self.max_tokens);
        let started = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LlmError::Unauthorized(status));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimited),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status,
                    body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                });
            }
            _ => {}
        }

        let body: ChatResponse = response.json().await?;
        let answer = body.first_answer().ok_or(LlmError::EmptyAnswer)?;

        tracing::debug!(
            model = %self.model,
            temperature,
            latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            chars = answer.len(),
            "Completion received"
        );
        Ok(answer)
    }

    fn backend_name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, prompt: &'a str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model,
            temperature,
            max_tokens,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice that has any.
    fn first_answer(self) -> Option<String> {
        self.choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .find(|answer| !answer.is_empty())
    }
}
