//! API response envelope types
//!
//! Every successful response is wrapped in `{ success, data }`; list
//! endpoints add `count` (records in the current page) and `pagination`.
//! Errors render as `{ message, stack? }` where the stack is only populated
//! outside production.

use serde::{Deserialize, Serialize};

use super::pagination::PaginationLinks;

/// Standard single-object response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Response data
    pub data: T,

    /// Optional human-readable message (e.g. "logged out")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Attach a message to the response
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// List response wrapper produced by the query translation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Number of records in the current page
    pub count: usize,

    /// Links to neighboring pages, when they exist
    pub pagination: PaginationLinks,

    /// The page of records
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Create a list response from a page of records and its links
    pub fn new(data: Vec<T>, pagination: PaginationLinks) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,

    /// Debug rendering of the error, omitted in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorBody {
    /// Create an error body without a stack
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Attach the debug rendering (development only)
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
