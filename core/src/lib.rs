//! # Worklane Core
//!
//! Core business logic and domain layer for the Worklane backend.
//! This crate contains domain entities, the typed schema-validation pass,
//! the query translator for list endpoints, repository interfaces with
//! in-memory mocks, business services, and error types.

pub mod domain;
pub mod errors;
pub mod query;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
