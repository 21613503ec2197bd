//! Translation from `DomainError` to HTTP responses.
//!
//! This is the only place a domain error becomes a status code and body.
//! Handlers return `Result<HttpResponse, ApiError>` and let the `?` operator
//! do the rest.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use once_cell::sync::OnceCell;
use serde::Serialize;

use wl_core::errors::DomainError;
use wl_shared::ErrorBody;

static EXPOSE_STACKS: OnceCell<bool> = OnceCell::new();

/// Turn on debug renderings in error bodies. Called once at startup,
/// outside production only.
pub fn expose_stacks(enabled: bool) {
    let _ = EXPOSE_STACKS.set(enabled);
}

fn stacks_enabled() -> bool {
    EXPOSE_STACKS.get().copied().unwrap_or(false)
}

/// Error envelope: `{ success: false, message, stack? }`
#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    #[serde(flatten)]
    body: ErrorBody,
}

/// HTTP-facing wrapper around a domain error
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    /// The uniform gate failure: missing, invalid or expired credentials
    /// all read the same to the caller
    pub fn not_authorized() -> Self {
        ApiError(DomainError::Unauthorized(
            "Not authorized, no token".to_string(),
        ))
    }

    pub fn inner(&self) -> &DomainError {
        &self.0
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Duplicate(_) => StatusCode::CONFLICT,
            DomainError::Upstream { .. } | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{:?}", self.0);
        }

        let mut body = ErrorBody::new(self.0.to_string());
        if stacks_enabled() {
            body = body.with_stack(format!("{:?}", self.0));
        }

        HttpResponse::build(status).json(ErrorEnvelope {
            success: false,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(DomainError::not_found("Company")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::Duplicate("dup".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::not_authorized().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(DomainError::validation_msg("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_body_shape() {
        let response = ApiError::from(DomainError::not_found("Job")).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
