//! Authentication and account flows

mod one_time;
mod service;

pub use one_time::sha256_hex;
pub use service::{AuthOutcome, AuthService, IdentityResolver};
