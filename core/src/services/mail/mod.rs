//! Outbound mail port.
//!
//! The auth flows send plain-text messages (password reset, email
//! confirmation) through this trait. The storage crate provides the SMTP
//! implementation.

pub mod mock;

pub use mock::MockMailer;

use async_trait::async_trait;

use crate::errors::DomainError;

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Sends email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError>;
}
