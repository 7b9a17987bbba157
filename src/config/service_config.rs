//! Service configuration types, loading and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::defaults;
use crate::metrics::{ExtractorOptions, DEFAULT_INDICATOR_VALUE, MAX_INDICATOR_VALUE};

// ============================================================================
// Root
// ============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub smtp: SmtpConfig,
    pub metrics: MetricsConfig,
}

impl ServiceConfig {
    /// Load, apply environment overrides and validate.
    ///
    /// An explicit path must load; the implicit search order falls back to
    /// defaults with a warning, like a missing file.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => {
                let config = Self::load_from_file(path)?;
                info!(path = %path.display(), "Loaded service config");
                config
            }
            None => Self::search(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// `$HEALTH_INSIGHT_CONFIG`, then `./health_insight.toml`, then defaults.
    fn search() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::ENV_CONFIG_PATH) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded service config from {}", defaults::ENV_CONFIG_PATH);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::ENV_CONFIG_PATH);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::ENV_CONFIG_PATH);
            }
        }

        // 2. Check the working directory
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded service config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Parse a TOML file. Unknown keys are logged as warnings, never fatal.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse TOML text. Used by `load_from_file` and tests.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }
        toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))
    }

    /// Serialize the current config to a TOML string. Secrets are never written.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Apply environment overrides through `lookup`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(addr) = get(defaults::ENV_SERVER_ADDR) {
            self.server.addr = addr;
        } else if let Some(port) = get(defaults::ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.addr = format!("0.0.0.0:{p}"),
                Err(_) => warn!(port = %port, "Ignoring invalid {}", defaults::ENV_PORT),
            }
        }

        if let Some(key) = get(defaults::ENV_OPENAI_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get(defaults::ENV_OPENAI_BASE_URL) {
            self.llm.base_url = url;
        }
        if let Some(model) = get(defaults::ENV_OPENAI_MODEL) {
            self.llm.model = model;
        }

        if let Some(user) = get(defaults::ENV_SMTP_USERNAME) {
            self.smtp.username = user;
        }
        if let Some(password) = get(defaults::ENV_SMTP_PASSWORD) {
            self.smtp.password = Some(password);
        }
        if let Some(recipient) = get(defaults::ENV_SMTP_RECIPIENT) {
            self.smtp.recipient = Some(recipient);
        }
    }

    /// Validate every section, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match self.server.addr.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {}
            _ => errors.push(format!(
                "server.addr: '{}' must be HOST:PORT",
                self.server.addr
            )),
        }
        if self.server.max_body_bytes == 0 {
            errors.push("server.max_body_bytes: must be > 0".to_string());
        }
        if self.server.cors_origins.iter().any(|o| o.trim().is_empty()) {
            errors.push("server.cors_origins: entries must not be empty".to_string());
        }

        if self.llm.model.trim().is_empty() {
            errors.push("llm.model: must not be empty".to_string());
        }
        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://") {
            errors.push(format!(
                "llm.base_url: '{}' must start with http:// or https://",
                self.llm.base_url
            ));
        }
        if self.llm.timeout_secs == 0 {
            errors.push("llm.timeout_secs: must be > 0".to_string());
        }
        if self.llm.max_tokens == 0 {
            errors.push("llm.max_tokens: must be > 0".to_string());
        }
        for (name, t) in [
            ("llm.summary_temperature", self.llm.summary_temperature),
            ("llm.creative_temperature", self.llm.creative_temperature),
            ("llm.metrics_temperature", self.llm.metrics_temperature),
        ] {
            if !(0.0..=defaults::MAX_TEMPERATURE).contains(&t) {
                errors.push(format!(
                    "{name}: {t} must be within 0.0..={}",
                    defaults::MAX_TEMPERATURE
                ));
            }
        }

        if self.smtp.enabled {
            if self.smtp.host.trim().is_empty() {
                errors.push("smtp.host: must not be empty when smtp is enabled".to_string());
            }
            if self.smtp.port == 0 {
                errors.push("smtp.port: must be > 0".to_string());
            }
        }

        if self.metrics.missing_value > MAX_INDICATOR_VALUE {
            errors.push(format!(
                "metrics.missing_value: {} must be <= {MAX_INDICATOR_VALUE}",
                self.metrics.missing_value
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// `[server]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    /// Allowed CORS origins; `"*"` allows any.
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: defaults::SERVER_ADDR.to_string(),
            cors_origins: vec![defaults::CORS_ANY_ORIGIN.to_string()],
            max_body_bytes: defaults::MAX_BODY_BYTES,
        }
    }
}

/// `[llm]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub summary_temperature: f32,
    pub creative_temperature: f32,
    pub metrics_temperature: f32,
    /// From `OPENAI_API_KEY` only.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LLM_BASE_URL.to_string(),
            model: defaults::LLM_MODEL.to_string(),
            timeout_secs: defaults::LLM_TIMEOUT_SECS,
            max_tokens: defaults::LLM_MAX_TOKENS,
            summary_temperature: defaults::SUMMARY_TEMPERATURE,
            creative_temperature: defaults::CREATIVE_TEMPERATURE,
            metrics_temperature: defaults::METRICS_TEMPERATURE,
            api_key: None,
        }
    }
}

/// `[smtp]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    /// Login, sender and (unless `recipient` is set) recipient mailbox.
    pub username: String,
    pub recipient: Option<String>,
    /// From `SMTP_PASSWORD` only.
    #[serde(skip)]
    pub password: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: defaults::SMTP_HOST.to_string(),
            port: defaults::SMTP_PORT,
            timeout_secs: defaults::SMTP_TIMEOUT_SECS,
            username: String::new(),
            recipient: None,
            password: None,
        }
    }
}

impl SmtpConfig {
    /// Enabled and carrying everything needed to log in.
    pub fn is_usable(&self) -> bool {
        self.enabled
            && !self.host.trim().is_empty()
            && !self.username.trim().is_empty()
            && self.password.is_some()
    }

    /// Where reports are delivered.
    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.username)
    }
}

/// `[metrics]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Value substituted for missing or unusable indicator numbers.
    pub missing_value: u8,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            missing_value: DEFAULT_INDICATOR_VALUE,
        }
    }
}

impl MetricsConfig {
    pub fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions::with_missing_value(self.missing_value)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.addr, "0.0.0.0:5000");
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.metrics.missing_value, 50);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ServiceConfig::from_toml_str(
            r#"
[llm]
model = "gpt-4o-mini"

[metrics]
missing_value = 65
"#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, defaults::LLM_BASE_URL);
        assert_eq!(config.metrics.extractor_options().missing_value, 65);
        assert_eq!(config.server.addr, defaults::SERVER_ADDR);
    }

    #[test]
    fn test_secrets_are_not_read_from_file() {
        let config = ServiceConfig::from_toml_str("[llm]\napi_key = \"sk-file\"\n").unwrap();
        assert_eq!(config.llm.api_key, None);
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let mut config = ServiceConfig::default();
        config.llm.api_key = Some("sk-secret".into());
        config.smtp.password = Some("hunter2".into());
        let toml = config.to_toml().unwrap();
        assert!(!toml.contains("sk-secret"));
        assert!(!toml.contains("hunter2"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config.apply_env(env(&[
            ("OPENAI_API_KEY", "sk-env"),
            ("SMTP_USERNAME", "reports@example.com"),
            ("SMTP_PASSWORD", "pw"),
            ("PORT", "8081"),
        ]));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.server.addr, "0.0.0.0:8081");
        assert!(config.smtp.is_usable());
        assert_eq!(config.smtp.recipient(), "reports@example.com");
    }

    #[test]
    fn test_explicit_addr_beats_port() {
        let mut config = ServiceConfig::default();
        config.apply_env(env(&[("HEALTH_INSIGHT_ADDR", "127.0.0.1:9000"), ("PORT", "8081")]));
        assert_eq!(config.server.addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_empty_and_invalid_env_values_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_env(env(&[("OPENAI_API_KEY", "  "), ("PORT", "eighty")]));
        assert_eq!(config.llm.api_key, None);
        assert_eq!(config.server.addr, defaults::SERVER_ADDR);
    }

    #[test]
    fn test_smtp_not_usable_without_password() {
        let mut config = ServiceConfig::default();
        config.smtp.username = "reports@example.com".into();
        assert!(!config.smtp.is_usable());
        config.smtp.password = Some("pw".into());
        config.smtp.enabled = false;
        assert!(!config.smtp.is_usable());
    }

    #[test]
    fn test_validation_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.server.addr = "nowhere".into();
        config.llm.model = " ".into();
        config.llm.creative_temperature = 3.5;
        config.metrics.missing_value = 120;
        config.smtp.port = 0;

        let err = config.validate().unwrap_err();
        let ConfigError::Validation(errors) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(err.to_string().contains("llm.creative_temperature"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = ServiceConfig::from_toml_str("[server\naddr = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        std::fs::write(&path, "[server]\naddr = \"127.0.0.1:7000\"\n").unwrap();

        let config = ServiceConfig::load_from_file(&path).unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:7000");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = ServiceConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_, _)));
    }
}
