//! Worklane HTTP API.
//!
//! Thin HTTP layer over the core services: routing, session extraction,
//! role checks and the single error-to-status translation. All business
//! rules live in `wl_core`.

pub mod dto;
pub mod errors;
pub mod middleware;
pub mod routes;

pub use routes::configure_api;
