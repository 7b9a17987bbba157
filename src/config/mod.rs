//! Service Configuration Module
//!
//! Provides the service configuration loaded from a TOML file plus
//! environment overrides.
//!
//! ## Loading Order
//!
//! 1. `--config PATH` on the command line (errors are fatal)
//! 2. `HEALTH_INSIGHT_CONFIG` environment variable (path to TOML file)
//! 3. `health_insight.toml` in the current working directory
//! 4. Built-in defaults
//!
//! Secrets never live in the file. `OPENAI_API_KEY` and `SMTP_PASSWORD` are
//! read from the environment, along with a few deployment overrides.
//!
//! ## Usage
//!
//! Build once in `main()` and hand an `Arc<ServiceConfig>` to whatever needs it:
//!
//! ```ignore
//! let config = Arc::new(ServiceConfig::load(args.config.as_deref())?);
//! let state = AppState::from_config(Arc::clone(&config))?;
//! ```

pub mod defaults;
mod service_config;
pub mod validation;

pub use service_config::*;
