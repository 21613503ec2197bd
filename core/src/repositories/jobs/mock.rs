//! Mock implementation of JobRepository for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Job;
use crate::errors::DomainError;
use crate::query::{eval, ListQuery, Page};

use super::trait_::JobRepository;

/// Mock job repository backed by an in-memory map
#[derive(Clone)]
pub struct MockJobRepository {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
}

impl MockJobRepository {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn seed(&self, job: Job) {
        self.jobs.write().await.insert(job.id, job);
    }

    pub async fn count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

impl Default for MockJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobRepository for MockJobRepository {
    async fn create(&self, job: Job) -> Result<Job, DomainError> {
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DomainError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(&id).cloned())
    }

    async fn update(&self, job: Job) -> Result<Job, DomainError> {
        let mut jobs = self.jobs.write().await;

        if !jobs.contains_key(&job.id) {
            return Err(DomainError::not_found("Job"));
        }

        jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError> {
        let jobs = self.jobs.read().await;
        let docs = jobs
            .values()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(eval::apply(query, docs))
    }

    async fn find_by_company(&self, company: Uuid) -> Result<Vec<Job>, DomainError> {
        let jobs = self.jobs.read().await;
        let mut found: Vec<Job> = jobs
            .values()
            .filter(|job| job.company == company)
            .cloned()
            .collect();
        found.sort_by_key(|job| job.created_at);
        Ok(found)
    }

    async fn delete_by_company(&self, company: Uuid) -> Result<u64, DomainError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| job.company != company);
        Ok((before - jobs.len()) as u64)
    }

    async fn average_salary(&self, company: Uuid) -> Result<Option<f64>, DomainError> {
        let jobs = self.jobs.read().await;
        let salaries: Vec<u64> = jobs
            .values()
            .filter(|job| job.company == company)
            .map(|job| job.salary)
            .collect();

        if salaries.is_empty() {
            return Ok(None);
        }
        let sum: u64 = salaries.iter().sum();
        Ok(Some(sum as f64 / salaries.len() as f64))
    }
}
