//! Job repository trait.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::Job;
use crate::errors::DomainError;
use crate::query::{ListQuery, Page};

/// Repository contract for Job entities
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: Job) -> Result<Job, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DomainError>;

    async fn update(&self, job: Job) -> Result<Job, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Runs a translated list query over the collection
    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError>;

    /// Every job posted by a company, for embedding into company documents
    async fn find_by_company(&self, company: Uuid) -> Result<Vec<Job>, DomainError>;

    /// Removes every job posted by a company, returning how many went
    async fn delete_by_company(&self, company: Uuid) -> Result<u64, DomainError>;

    /// Mean salary over a company's jobs; `None` when it has none
    async fn average_salary(&self, company: Uuid) -> Result<Option<f64>, DomainError>;
}
