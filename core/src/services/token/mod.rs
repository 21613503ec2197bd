//! Session-token issuance and verification

mod service;

pub use service::{Claims, TokenService};
