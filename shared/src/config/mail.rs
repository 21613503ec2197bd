//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse_or};

/// SMTP transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_email: String,

    /// SMTP password
    pub smtp_password: String,

    /// Sender address used in the `From` header
    pub from_email: String,

    /// Sender display name
    pub from_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("localhost"),
            smtp_port: 1025,
            smtp_email: String::new(),
            smtp_password: String::new(),
            from_email: String::from("noreply@worklane.dev"),
            from_name: String::from("Worklane"),
        }
    }
}

impl MailConfig {
    /// Load from `SMTP_HOST`, `SMTP_PORT`, `SMTP_EMAIL`, `SMTP_PASSWORD`,
    /// `FROM_EMAIL`, `FROM_NAME`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            smtp_host: env_or("SMTP_HOST", &defaults.smtp_host),
            smtp_port: env_parse_or("SMTP_PORT", defaults.smtp_port),
            smtp_email: env_or("SMTP_EMAIL", ""),
            smtp_password: env_or("SMTP_PASSWORD", ""),
            from_email: env_or("FROM_EMAIL", &defaults.from_email),
            from_name: env_or("FROM_NAME", &defaults.from_name),
        }
    }
}
