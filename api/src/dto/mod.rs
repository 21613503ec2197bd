//! Typed request bodies.
//!
//! Entity create/update payloads stay as raw JSON and go through the
//! schema rules in the core crate; only the auth endpoints, whose bodies
//! never become entities, get typed DTOs here.

pub mod auth;

use validator::Validate;

use wl_core::errors::{DomainError, Violation};

use crate::errors::ApiError;

/// Runs `validator` constraints and folds failures into the domain
/// validation error shape
pub fn check(dto: &impl Validate) -> Result<(), ApiError> {
    dto.validate().map_err(|errors| {
        let violations: Vec<Violation> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"));
                    Violation::new(field.to_string(), message)
                })
            })
            .collect();
        ApiError::from(DomainError::Validation { violations })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::ForgotPasswordRequest;
    use actix_web::ResponseError;

    #[test]
    fn test_invalid_dto_maps_to_400() {
        let dto = ForgotPasswordRequest {
            email: "not-an-email".to_string(),
        };
        let err = check(&dto).unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Please include a valid email");
    }
}
