//! Mock mailer for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::{EmailMessage, Mailer};

/// Mock mailer collecting sent messages in memory
#[derive(Clone)]
pub struct MockMailer {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: false,
        }
    }

    /// A mailer whose every send fails upstream
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    /// Messages sent so far, in send order
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::upstream("mail", "Email could not be sent"));
        }
        self.sent.write().await.push(message);
        Ok(())
    }
}
