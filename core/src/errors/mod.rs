//! Domain-specific error types and error handling.
//!
//! Every fallible operation in the core crate returns `DomainResult`. The
//! API layer owns the single translation from `DomainError` to an HTTP
//! status and response envelope; services never build response bodies.

use serde::Serialize;
use thiserror::Error;

/// A single schema-validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field the constraint applies to
    pub field: String,
    /// Human-readable constraint message
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Session-token errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed payload, wrong issuer or past expiry.
    /// Deliberately a single variant: callers must not be able to tell the
    /// cases apart.
    #[error("Invalid token")]
    Invalid,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Aggregated schema-validation failure listing every violation
    #[error("{}", format_violations(.violations))]
    Validation { violations: Vec<Violation> },

    /// Missing or invalid credentials/session
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (wrong role, or not the owner)
    #[error("{0}")]
    Forbidden(String),

    /// Entity id did not resolve
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness constraint violation
    #[error("{0}")]
    Duplicate(String),

    /// External collaborator failure (geocoder, mail transport, store)
    #[error("{service} error: {message}")]
    Upstream { service: String, message: String },

    /// Invariant breakage inside the process
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Single-violation validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            violations: vec![Violation::new(field, message)],
        }
    }

    /// Validation error carrying a bare message (no specific field)
    pub fn validation_msg(message: impl Into<String>) -> Self {
        DomainError::Validation {
            violations: vec![Violation::new("", message)],
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound(resource.into())
    }

    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal(message.into())
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type DomainResult<T> = Result<T, DomainError>;
