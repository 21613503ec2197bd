//! Configuration module
//!
//! Configuration is read from the environment exactly once at process start
//! (`AppConfig::from_env`) and handed to component constructors. Business
//! logic never reads environment variables directly.

pub mod auth;
pub mod database;
pub mod environment;
pub mod geocode;
pub mod mail;
pub mod server;
pub mod upload;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use geocode::GeocoderConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use upload::UploadConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Runtime environment (development/production)
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Document store configuration
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT + cookie)
    pub auth: AuthConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Geocoding provider configuration
    pub geocoder: GeocoderConfig,

    /// File upload configuration
    pub upload: UploadConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            mail: MailConfig::from_env(),
            geocoder: GeocoderConfig::from_env(),
            upload: UploadConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
            geocoder: GeocoderConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

/// Read an environment variable, falling back to a default
pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable, falling back to a default on
/// absence or parse failure
pub(crate) fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
