//! Stateless session tokens.
//!
//! Sessions are HS256 JWTs carrying only the user id; role and account
//! state are re-read from the store on every authenticated request, so a
//! role change takes effect without waiting for tokens to expire.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

const ISSUER: &str = "worklane";

/// JWT claims for a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
    /// Issuer
    pub iss: String,
}

/// Issues and verifies session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expire_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;
        // No grace period: a token expired by one second is invalid
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expire_minutes,
        }
    }

    /// Issues a signed token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expire_minutes)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Verifies a token and returns the user id it was issued for.
    ///
    /// Signature, expiry, issuer and subject failures all collapse into
    /// `TokenError::Invalid`.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 30)
    }

    #[test]
    fn test_round_trip() {
        let service = service();
        let user_id = Uuid::new_v4();
        let token = service.issue(user_id).unwrap();
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(Uuid::new_v4()).unwrap();
        let other = TokenService::new("other-secret", 30);
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(service().verify("not-a-jwt"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_rejected() {
        let service = TokenService::new("test-secret", -1);
        let token = service.issue(Uuid::new_v4()).unwrap();
        assert_eq!(service.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tokens_carry_unique_jti() {
        let service = service();
        let user_id = Uuid::new_v4();
        let a = service.issue(user_id).unwrap();
        let b = service.issue(user_id).unwrap();
        assert_ne!(a, b);
    }
}
