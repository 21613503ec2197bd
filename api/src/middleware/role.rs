//! Role checks for routes that are gated beyond authentication.

use wl_core::domain::entities::{Role, User};
use wl_core::errors::DomainError;

use crate::errors::ApiError;

/// Rejects the request with a 403 unless the user's role is in `allowed`
pub fn require_role(user: &User, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&user.role) {
        return Ok(());
    }
    Err(ApiError::from(DomainError::Forbidden(format!(
        "User role {} is not authorized to access this route",
        user.role
    ))))
}
