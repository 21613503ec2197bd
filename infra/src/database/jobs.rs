//! MongoDB-backed job repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};
use serde_json::Value;
use uuid::Uuid;

use wl_core::domain::entities::Job;
use wl_core::errors::{DomainError, DomainResult};
use wl_core::query::{ListQuery, Page};
use wl_core::repositories::JobRepository;

use super::documents::{
    document_to_json, json_to_document, run_average, run_list_query, storage_err, uuid_bson,
    write_err,
};

const COLLECTION: &str = "jobs";

#[derive(Clone)]
pub struct MongoJobRepository {
    database: Database,
}

impl MongoJobRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }
}

fn job_to_document(job: &Job) -> DomainResult<Document> {
    let json = serde_json::to_value(job).map_err(|e| DomainError::internal(e.to_string()))?;
    json_to_document(json)
}

fn document_to_job(document: Document) -> DomainResult<Job> {
    serde_json::from_value(document_to_json(document))
        .map_err(|e| DomainError::internal(e.to_string()))
}

#[async_trait]
impl JobRepository for MongoJobRepository {
    async fn create(&self, job: Job) -> Result<Job, DomainError> {
        self.collection()
            .insert_one(job_to_document(&job)?)
            .await
            .map_err(write_err)?;
        Ok(job)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DomainError> {
        let document = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(storage_err)?;
        document.map(document_to_job).transpose()
    }

    async fn update(&self, job: Job) -> Result<Job, DomainError> {
        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(job.id) }, job_to_document(&job)?)
            .await
            .map_err(write_err)?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found("Job"));
        }
        Ok(job)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(storage_err)?;
        Ok(result.deleted_count > 0)
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError> {
        run_list_query(&self.collection(), query).await
    }

    async fn find_by_company(&self, company: Uuid) -> Result<Vec<Job>, DomainError> {
        let cursor = self
            .collection()
            .find(doc! { "company": uuid_bson(company) })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(storage_err)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(storage_err)?;
        documents.into_iter().map(document_to_job).collect()
    }

    async fn delete_by_company(&self, company: Uuid) -> Result<u64, DomainError> {
        let result = self
            .collection()
            .delete_many(doc! { "company": uuid_bson(company) })
            .await
            .map_err(storage_err)?;
        Ok(result.deleted_count)
    }

    async fn average_salary(&self, company: Uuid) -> Result<Option<f64>, DomainError> {
        run_average(&self.collection(), company, "salary").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::domain::entities::MinimumSkill;

    #[test]
    fn test_job_document_round_trip() {
        let job = Job::new(
            "Backend Engineer".to_string(),
            "Builds services".to_string(),
            3,
            120000,
            MinimumSkill::Senior,
            false,
            Uuid::new_v4(),
            Uuid::new_v4(),
        );

        let document = job_to_document(&job).unwrap();
        assert_eq!(document.get_str("minimum_skill").unwrap(), "senior");
        assert_eq!(document.get_i64("salary").unwrap(), 120000);

        let back = document_to_job(document).unwrap();
        assert_eq!(back, job);
    }
}
