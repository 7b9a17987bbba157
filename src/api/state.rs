//! Shared state for API handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::analysis::HealthAnalyzer;
use crate::config::ServiceConfig;
use crate::llm::{LlmBackend, OpenAiBackend, UnconfiguredBackend};
use crate::mail::{build_mailer, Mailer};

/// Immutable per-process state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub analyzer: Arc<HealthAnalyzer>,
}

impl AppState {
    /// Wire explicit backends; used by tests and embedders.
    pub fn new(
        config: Arc<ServiceConfig>,
        llm: Arc<dyn LlmBackend>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let analyzer = Arc::new(HealthAnalyzer::new(Arc::clone(&config), llm, mailer));
        Self { config, analyzer }
    }

    /// Build the production backends the config describes.
    pub fn from_config(config: Arc<ServiceConfig>) -> Result<Self> {
        let llm: Arc<dyn LlmBackend> = match config.llm.api_key.as_deref() {
            Some(key) => {
                let backend = OpenAiBackend::new(&config.llm, key)
                    .context("Failed to build completion client")?;
                info!(
                    endpoint = backend.endpoint(),
                    model = %config.llm.model,
                    "Completion backend ready"
                );
                Arc::new(backend)
            }
            None => {
                warn!("OPENAI_API_KEY not set, every completion will use placeholder text");
                Arc::new(UnconfiguredBackend)
            }
        };

        let mailer = build_mailer(&config.smtp).context("Failed to build SMTP mailer")?;
        info!(mailer = mailer.mailer_name(), "Mailer ready");

        Ok(Self::new(config, llm, mailer))
    }
}
