//! Session extraction.
//!
//! `AuthedUser` is the gate for protected routes: it reads the session
//! cookie (or, when enabled, an `Authorization: Bearer` header), resolves
//! the token to an account and hands the handler the authenticated user.
//! Every failure mode collapses into the same 401 so a probing client
//! cannot distinguish a missing token from an expired one or a deleted
//! account.

use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use wl_core::domain::entities::User;
use wl_core::services::IdentityResolver;
use wl_shared::config::AppConfig;

use crate::errors::ApiError;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// The authenticated account behind the current request
pub struct AuthedUser(pub User);

impl FromRequest for AuthedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let config = req
                .app_data::<web::Data<AppConfig>>()
                .ok_or_else(ApiError::not_authorized)?;

            let token = extract_token(&req, config.auth.allow_bearer)
                .ok_or_else(ApiError::not_authorized)?;

            let resolver = req
                .app_data::<web::Data<Arc<dyn IdentityResolver>>>()
                .ok_or_else(ApiError::not_authorized)?;

            let user = resolver.resolve(&token).await?;
            Ok(AuthedUser(user))
        })
    }
}

/// Cookie first; the bearer header only participates when configured in
fn extract_token(req: &HttpRequest, allow_bearer: bool) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value().trim();
        // A logged-out cookie holds the placeholder value "none"
        if !value.is_empty() && value != "none" {
            return Some(value.to_string());
        }
    }

    if allow_bearer {
        return req
            .headers()
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::to_string);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_cookie_takes_precedence_over_bearer() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .insert_header((header::AUTHORIZATION, "Bearer from-header"))
            .to_http_request();

        assert_eq!(extract_token(&req, true).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_ignored_unless_enabled() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc"))
            .to_http_request();

        assert_eq!(extract_token(&req, false), None);
        assert_eq!(extract_token(&req, true).as_deref(), Some("abc"));
    }

    #[test]
    fn test_logged_out_cookie_is_no_token() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "none"))
            .to_http_request();

        assert_eq!(extract_token(&req, false), None);
    }

    #[test]
    fn test_malformed_authorization_header() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .to_http_request();

        assert_eq!(extract_token(&req, true), None);
    }
}
