//! SMTP mail transport.
//!
//! lettre's blocking `SmtpTransport` runs on the blocking pool so the
//! request task is never held up by the SMTP round trip.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use wl_core::errors::DomainError;
use wl_core::services::{EmailMessage, Mailer};
use wl_shared::MailConfig;

/// Mailer backed by an SMTP relay
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

fn send_blocking(config: &MailConfig, message: EmailMessage) -> Result<(), String> {
    let from = format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .map_err(|e| format!("bad sender address: {e}"))?;
    let to = message
        .to
        .parse()
        .map_err(|e| format!("bad recipient address: {e}"))?;

    let email = Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(message.body)
        .map_err(|e| e.to_string())?;

    let mut builder = SmtpTransport::builder_dangerous(&config.smtp_host).port(config.smtp_port);
    if !config.smtp_email.is_empty() {
        builder = builder.credentials(Credentials::new(
            config.smtp_email.clone(),
            config.smtp_password.clone(),
        ));
    }

    builder.build().send(&email).map_err(|e| e.to_string())?;
    Ok(())
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        debug!(to = %message.to, subject = %message.subject, "sending email");

        let config = self.config.clone();
        let result = tokio::task::spawn_blocking(move || send_blocking(&config, message))
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?;

        result.map_err(|e| DomainError::upstream("mail", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_recipient_reported_before_transport() {
        let config = MailConfig::default();
        let message = EmailMessage {
            to: "not an address".to_string(),
            subject: "x".to_string(),
            body: "y".to_string(),
        };
        let err = send_blocking(&config, message).unwrap_err();
        assert!(err.contains("recipient"));
    }
}
