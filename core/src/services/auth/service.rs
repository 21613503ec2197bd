//! Authentication service: registration, login and the account flows.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::user::{self, Role, User};
use crate::domain::schema::{validate_create, validate_update};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::mail::{EmailMessage, Mailer};
use crate::services::token::TokenService;

use super::one_time;

/// How long a password-reset token stays valid
const RESET_TOKEN_MINUTES: i64 = 10;

/// A successful authentication: the account plus a fresh session token
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    pub token: String,
}

/// Resolves a presented session token to the account it belongs to.
///
/// The request gate depends on this trait rather than on the full service,
/// so tests can stub identity without wiring mail and hashing.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// # Returns
    /// * `Err(DomainError::Unauthorized)` - token invalid, expired, or the
    ///   account no longer exists; callers must not distinguish the cases
    async fn resolve(&self, token: &str) -> DomainResult<User>;
}

/// Authentication and account management
pub struct AuthService<U: UserRepository, M: Mailer> {
    users: U,
    mailer: M,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl<U: UserRepository, M: Mailer> AuthService<U, M> {
    pub fn new(users: U, mailer: M, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            users,
            mailer,
            tokens,
            bcrypt_cost,
        }
    }

    /// Registers a new account and opens a session.
    ///
    /// A confirmation email goes out with a one-time token; if the mail
    /// transport fails the stored token is rolled back and registration
    /// still succeeds.
    pub async fn register(&self, payload: &Value, confirm_url_base: &str) -> DomainResult<AuthOutcome> {
        validate_create(user::CREATE_RULES, payload)?;

        let name = str_field(payload, "name");
        let email = str_field(payload, "email");
        let password = str_field(payload, "password");
        let role = payload
            .get("role")
            .and_then(Value::as_str)
            .and_then(|r| r.parse::<Role>().ok())
            .unwrap_or_default();

        let password_hash = self.hash_password(&password)?;
        let mut created = self
            .users
            .create(User::new(name, email, password_hash, role))
            .await?;

        let (raw_confirm, confirm_hash) = one_time::confirm_token();
        created.set_confirm_token(confirm_hash);
        let mut created = self.users.update(created).await?;

        let confirm_url = format!("{confirm_url_base}?token={raw_confirm}");
        let message = EmailMessage {
            to: created.email.clone(),
            subject: "Email confirmation token".to_string(),
            body: format!(
                "You are receiving this email because you need to confirm your \
                 email address. Please visit: \n\n {confirm_url}"
            ),
        };
        if let Err(err) = self.mailer.send(message).await {
            warn!(error = %err, "confirmation email failed, rolling back token");
            created.confirm_email_token = None;
            created = self.users.update(created).await?;
        }

        let token = self.tokens.issue(created.id)?;
        Ok(AuthOutcome { user: created, token })
    }

    /// Opens a session for an existing account.
    ///
    /// Unknown email and wrong password report the same message.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation_msg(
                "Please provide an email and password",
            ));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let matched = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        if !matched {
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(user.id)?;
        Ok(AuthOutcome { user, token })
    }

    /// Returns the account behind an authenticated session
    pub async fn current_user(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Updates name and email
    pub async fn update_details(&self, id: Uuid, payload: &Value) -> DomainResult<User> {
        validate_update(user::CREATE_RULES, payload)?;

        let mut user = self.current_user(id).await?;
        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            user.name = name.to_string();
        }
        if let Some(email) = payload.get("email").and_then(Value::as_str) {
            user.email = email.to_string();
        }
        user.updated_at = Utc::now();
        self.users.update(user).await
    }

    /// Replaces the password after checking the current one, and rotates
    /// the session
    pub async fn update_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<AuthOutcome> {
        let mut user = self.current_user(id).await?;

        let matched = bcrypt::verify(current_password, &user.password_hash)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        if !matched {
            return Err(DomainError::Unauthorized("Password is incorrect".to_string()));
        }

        check_password_length(new_password)?;
        let hash = self.hash_password(new_password)?;
        user.set_password_hash(hash);
        let user = self.users.update(user).await?;

        let token = self.tokens.issue(user.id)?;
        Ok(AuthOutcome { user, token })
    }

    /// Starts the password-reset flow.
    ///
    /// Stores a hashed one-time token valid for ten minutes and emails the
    /// raw form. A mail failure rolls the token back and surfaces upstream.
    pub async fn forgot_password(&self, email: &str, reset_url_base: &str) -> DomainResult<()> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let (raw_token, token_hash) = one_time::reset_token();
        user.set_reset_token(token_hash, Utc::now() + Duration::minutes(RESET_TOKEN_MINUTES));
        let mut user = self.users.update(user).await?;

        let reset_url = format!("{reset_url_base}/{raw_token}");
        let message = EmailMessage {
            to: user.email.clone(),
            subject: "Password reset token".to_string(),
            body: format!(
                "You are receiving this email because you (or someone else) has \
                 requested the reset of a password. Please make a PUT request to: \
                 \n\n {reset_url}"
            ),
        };

        if let Err(err) = self.mailer.send(message).await {
            warn!(error = %err, "reset email failed, rolling back token");
            user.clear_reset_token();
            self.users.update(user).await?;
            return Err(DomainError::upstream("mail", "Email could not be sent"));
        }

        Ok(())
    }

    /// Completes the reset flow: consumes the token, sets the new password
    /// and opens a session
    pub async fn reset_password(&self, raw_token: &str, new_password: &str) -> DomainResult<AuthOutcome> {
        let token_hash = one_time::sha256_hex(raw_token);
        let mut user = self
            .users
            .find_by_reset_token(&token_hash)
            .await?
            .ok_or_else(invalid_one_time_token)?;

        if !user.reset_token_valid(Utc::now()) {
            return Err(invalid_one_time_token());
        }

        check_password_length(new_password)?;
        let hash = self.hash_password(new_password)?;
        user.set_password_hash(hash);
        user.clear_reset_token();
        let user = self.users.update(user).await?;

        let token = self.tokens.issue(user.id)?;
        Ok(AuthOutcome { user, token })
    }

    /// Confirms an email address with the emailed one-time token
    pub async fn confirm_email(&self, raw_token: &str) -> DomainResult<AuthOutcome> {
        if raw_token.trim().is_empty() {
            return Err(invalid_one_time_token());
        }

        let token_hash = one_time::confirm_token_hash(raw_token);
        let mut user = self
            .users
            .find_by_confirm_token(&token_hash)
            .await?
            .ok_or_else(invalid_one_time_token)?;

        user.confirm_email();
        let user = self.users.update(user).await?;

        let token = self.tokens.issue(user.id)?;
        Ok(AuthOutcome { user, token })
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(|e| DomainError::internal(e.to_string()))
    }
}

#[async_trait]
impl<U: UserRepository, M: Mailer> IdentityResolver for AuthService<U, M> {
    async fn resolve(&self, token: &str) -> DomainResult<User> {
        let user_id = self
            .tokens
            .verify(token)
            .map_err(|_| not_authorized())?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(not_authorized)
    }
}

fn invalid_credentials() -> DomainError {
    DomainError::Unauthorized("Invalid credentials".to_string())
}

fn invalid_one_time_token() -> DomainError {
    DomainError::validation_msg("Invalid token")
}

fn not_authorized() -> DomainError {
    DomainError::Unauthorized("Not authorized, no token".to_string())
}

fn check_password_length(password: &str) -> DomainResult<()> {
    if password.len() < 6 {
        return Err(DomainError::validation(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

fn str_field(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
