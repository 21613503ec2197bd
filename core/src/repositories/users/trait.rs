//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;
use crate::query::{ListQuery, Page};

/// Repository contract for User entities
///
/// Implementations load the full record, secrets included; the entity's
/// `Serialize` impl keeps those fields out of anything a handler returns.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user
    ///
    /// # Returns
    /// * `Err(DomainError::Duplicate)` - the email is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Finds a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Finds a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Finds the user holding an outstanding reset token
    ///
    /// # Arguments
    /// * `token_hash` - sha256 hex of the raw token the client presented
    async fn find_by_reset_token(&self, token_hash: &str) -> Result<Option<User>, DomainError>;

    /// Finds the user holding an outstanding email-confirmation token
    async fn find_by_confirm_token(&self, token_hash: &str) -> Result<Option<User>, DomainError>;

    /// Replaces a stored user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - no user with this id exists
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Deletes a user, reporting whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Runs a translated list query over the collection
    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError>;
}
