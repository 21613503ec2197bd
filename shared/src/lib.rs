//! Shared utilities and common types for the Worklane server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (environment-driven, built once at startup)
//! - Response envelope and pagination types
//! - Utility functions (slug derivation, validation regexes)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, GeocoderConfig, MailConfig, ServerConfig,
    UploadConfig,
};
pub use types::{ApiResponse, ErrorBody, ListResponse, PageLink, PageWindow, PaginationLinks};
pub use utils::{slug, validation};
