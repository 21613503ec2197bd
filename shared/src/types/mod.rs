//! Common type definitions shared across crates

pub mod pagination;
pub mod response;

pub use pagination::{PageLink, PageWindow, PaginationLinks};
pub use response::{ApiResponse, ErrorBody, ListResponse};
