//! Review repository trait.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::Review;
use crate::errors::DomainError;
use crate::query::{ListQuery, Page};

/// Repository contract for Review entities
///
/// The store carries a unique index on `(company, author)`; the insert
/// path surfaces it as `DomainError::Duplicate` so concurrent submissions
/// cannot produce two reviews from the same author.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persists a new review
    ///
    /// # Returns
    /// * `Err(DomainError::Duplicate)` - the author already reviewed this
    ///   company
    async fn create(&self, review: Review) -> Result<Review, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError>;

    async fn update(&self, review: Review) -> Result<Review, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Runs a translated list query over the collection
    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError>;

    /// Removes every review of a company, returning how many went
    async fn delete_by_company(&self, company: Uuid) -> Result<u64, DomainError>;

    /// Mean rating over a company's reviews; `None` when it has none
    async fn average_rating(&self, company: Uuid) -> Result<Option<f64>, DomainError>;
}
