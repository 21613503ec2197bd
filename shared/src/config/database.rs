//! Document store configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// MongoDB connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection string
    pub uri: String,

    /// Database name
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::from("mongodb://localhost:27017"),
            database: String::from("worklane"),
        }
    }
}

impl DatabaseConfig {
    /// Load from `MONGODB_URI` / `MONGODB_DB`
    pub fn from_env() -> Self {
        Self {
            uri: env_or("MONGODB_URI", "mongodb://localhost:27017"),
            database: env_or("MONGODB_DB", "worklane"),
        }
    }
}
