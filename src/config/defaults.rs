//! System-wide default constants.
//!
//! Centralises the values used when neither the config file nor the
//! environment sets them. Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:5000";

/// Largest accepted request body (bytes). The questionnaire is a few hundred bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Wildcard origin for CORS.
pub const CORS_ANY_ORIGIN: &str = "*";

// ============================================================================
// Completion API
// ============================================================================

pub const LLM_BASE_URL: &str = "https://api.openai.com/v1";

pub const LLM_MODEL: &str = "gpt-3.5-turbo";

/// HTTP timeout for one completion call (seconds).
pub const LLM_TIMEOUT_SECS: u64 = 30;

/// Completion length cap (tokens).
pub const LLM_MAX_TOKENS: u32 = 800;

/// Narrative summary: factual, moderately varied.
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

/// Creative suggestions: more varied.
pub const CREATIVE_TEMPERATURE: f32 = 0.9;

/// Metrics block: keep the format stable.
pub const METRICS_TEMPERATURE: f32 = 0.5;

/// Sampling temperature range accepted by OpenAI-compatible APIs.
pub const MAX_TEMPERATURE: f32 = 2.0;

// ============================================================================
// SMTP
// ============================================================================

pub const SMTP_HOST: &str = "smtp.gmail.com";

/// STARTTLS submission port.
pub const SMTP_PORT: u16 = 587;

/// SMTP connection timeout (seconds).
pub const SMTP_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Environment
// ============================================================================

pub const ENV_CONFIG_PATH: &str = "HEALTH_INSIGHT_CONFIG";
pub const ENV_SERVER_ADDR: &str = "HEALTH_INSIGHT_ADDR";
pub const ENV_PORT: &str = "PORT";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_SMTP_USERNAME: &str = "SMTP_USERNAME";
pub const ENV_SMTP_PASSWORD: &str = "SMTP_PASSWORD";
pub const ENV_SMTP_RECIPIENT: &str = "SMTP_RECIPIENT";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "health_insight.toml";
