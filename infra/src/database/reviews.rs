//! MongoDB-backed review repository.

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};
use serde_json::Value;
use uuid::Uuid;

use wl_core::domain::entities::Review;
use wl_core::errors::{DomainError, DomainResult};
use wl_core::query::{ListQuery, Page};
use wl_core::repositories::ReviewRepository;

use super::documents::{
    document_to_json, json_to_document, run_average, run_list_query, storage_err, uuid_bson,
    write_err,
};

const COLLECTION: &str = "reviews";

#[derive(Clone)]
pub struct MongoReviewRepository {
    database: Database,
}

impl MongoReviewRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }
}

fn review_to_document(review: &Review) -> DomainResult<Document> {
    let json = serde_json::to_value(review).map_err(|e| DomainError::internal(e.to_string()))?;
    json_to_document(json)
}

fn document_to_review(document: Document) -> DomainResult<Review> {
    serde_json::from_value(document_to_json(document))
        .map_err(|e| DomainError::internal(e.to_string()))
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    /// The unique `(company, author)` index turns a concurrent duplicate
    /// insert into `DomainError::Duplicate`
    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        self.collection()
            .insert_one(review_to_document(&review)?)
            .await
            .map_err(write_err)?;
        Ok(review)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let document = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(storage_err)?;
        document.map(document_to_review).transpose()
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let result = self
            .collection()
            .replace_one(
                doc! { "_id": uuid_bson(review.id) },
                review_to_document(&review)?,
            )
            .await
            .map_err(write_err)?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found("Review"));
        }
        Ok(review)
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

    async fn delete_by_company(&self, company: Uuid) -> Result<u64, DomainError> {
        let result = self
            .collection()
            .delete_many(doc! { "company": uuid_bson(company) })
            .await
            .map_err(storage_err)?;
        Ok(result.deleted_count)
    }

    async fn average_rating(&self, company: Uuid) -> Result<Option<f64>, DomainError> {
        run_average(&self.collection(), company, "rating").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_document_round_trip() {
        let review = Review::new(
            "Solid place".to_string(),
            "Good colleagues".to_string(),
            8,
            Uuid::new_v4(),
            Uuid::new_v4(),
        );

        let document = review_to_document(&review).unwrap();
        assert_eq!(document.get_str("company").unwrap(), review.company.to_string());

        let back = document_to_review(document).unwrap();
        assert_eq!(back, review);
    }
}
