//! Report delivery by email.
//!
//! [`Mailer`] is the seam; [`SmtpMailer`] delivers over STARTTLS and
//! [`DisabledMailer`] stands in when SMTP is switched off or lacks credentials.

mod smtp;

pub use smtp::SmtpMailer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SmtpConfig;

/// Sends a rendered HTML report.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_report(&self, subject: &str, html: &str) -> Result<(), MailError>;

    /// Get the mailer name for logging
    fn mailer_name(&self) -> &'static str;

    /// Whether an accepted report actually leaves the process.
    fn delivers(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Drops every report after logging it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_report(&self, subject: &str, html: &str) -> Result<(), MailError> {
        tracing::debug!(subject, bytes = html.len(), "SMTP disabled, report not emailed");
        Ok(())
    }

    fn mailer_name(&self) -> &'static str {
        "disabled"
    }

    fn delivers(&self) -> bool {
        false
    }
}

/// Pick the mailer the config allows.
pub fn build_mailer(config: &SmtpConfig) -> Result<Arc<dyn Mailer>, MailError> {
    if !config.is_usable() {
        if config.enabled {
            tracing::warn!(
                host = %config.host,
                "SMTP enabled but username or SMTP_PASSWORD missing, reports will not be emailed"
            );
        }
        return Ok(Arc::new(DisabledMailer));
    }

    Ok(Arc::new(SmtpMailer::from_config(config)?))
}
