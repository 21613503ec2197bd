//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse_or};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT and session-cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT signing secret (HS256)
    pub jwt_secret: String,

    /// Session token lifetime in minutes
    pub jwt_expire_minutes: i64,

    /// Cookie lifetime in days
    pub cookie_expire_days: i64,

    /// bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Whether `Authorization: Bearer` extraction is accepted in addition to
    /// the session cookie
    pub allow_bearer: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            jwt_expire_minutes: 30 * 24 * 60, // 30 days
            cookie_expire_days: 30,
            bcrypt_cost: 10,
            allow_bearer: false,
        }
    }
}

impl AuthConfig {
    /// Load from `JWT_SECRET`, `JWT_EXPIRE_MINUTES`, `JWT_COOKIE_EXPIRE_DAYS`,
    /// `BCRYPT_COST` and `AUTH_ALLOW_BEARER`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: env_or("JWT_SECRET", DEFAULT_SECRET),
            jwt_expire_minutes: env_parse_or("JWT_EXPIRE_MINUTES", defaults.jwt_expire_minutes),
            cookie_expire_days: env_parse_or("JWT_COOKIE_EXPIRE_DAYS", defaults.cookie_expire_days),
            bcrypt_cost: env_parse_or("BCRYPT_COST", defaults.bcrypt_cost),
            allow_bearer: env_parse_or("AUTH_ALLOW_BEARER", false),
        }
    }

    /// Check if using the default secret (warn at startup in production)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}
