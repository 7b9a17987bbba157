//! SMTP delivery via lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailError, Mailer};
use crate::config::SmtpConfig;

/// STARTTLS relay with login credentials; sends from the login mailbox.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config.username.parse()?;
        let to: Mailbox = config.recipient().parse()?;

        let credentials = Credentials::new(
            config.username.clone(),
            config.password.clone().unwrap_or_default(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport, from, to })
    }

    fn build_message(&self, subject: &str, html: &str) -> Result<Message, MailError> {
        Ok(Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_report(&self, subject: &str, html: &str) -> Result<(), MailError> {
        let message = self.build_message(subject, html)?;
        let response = self.transport.send(message).await?;
        tracing::info!(
            to = %self.to,
            code = %response.code(),
            "Report emailed"
        );
        Ok(())
    }

    fn mailer_name(&self) -> &'static str {
        "smtp"
    }
}
