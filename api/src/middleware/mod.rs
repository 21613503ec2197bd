//! Request gates: session extraction and role checks.

pub mod auth;
pub mod role;

pub use auth::AuthedUser;
pub use role::require_role;
