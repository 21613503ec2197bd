//! Mock implementation of ReviewRepository for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Review;
use crate::errors::DomainError;
use crate::query::{eval, ListQuery, Page};

use super::trait_::ReviewRepository;

/// Mock review repository backed by an in-memory map
#[derive(Clone)]
pub struct MockReviewRepository {
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
}

impl MockReviewRepository {
    pub fn new() -> Self {
        Self {
            reviews: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn seed(&self, review: Review) {
        self.reviews.write().await.insert(review.id, review);
    }

    pub async fn count(&self) -> usize {
        self.reviews.read().await.len()
    }
}

impl Default for MockReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn create(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;

        if reviews
            .values()
            .any(|r| r.company == review.company && r.author == review.author)
        {
            return Err(DomainError::Duplicate(
                "Duplicate field value entered".to_string(),
            ));
        }

        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id).cloned())
    }

    async fn update(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;

        if !reviews.contains_key(&review.id) {
            return Err(DomainError::not_found("Review"));
        }

        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut reviews = self.reviews.write().await;
        Ok(reviews.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError> {
        let reviews = self.reviews.read().await;
        let docs = reviews
            .values()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(eval::apply(query, docs))
    }

    async fn delete_by_company(&self, company: Uuid) -> Result<u64, DomainError> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|_, review| review.company != company);
        Ok((before - reviews.len()) as u64)
    }

    async fn average_rating(&self, company: Uuid) -> Result<Option<f64>, DomainError> {
        let reviews = self.reviews.read().await;
        let ratings: Vec<u8> = reviews
            .values()
            .filter(|r| r.company == company)
            .map(|r| r.rating)
            .collect();

        if ratings.is_empty() {
            return Ok(None);
        }
        let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
        Ok(Some(sum as f64 / ratings.len() as f64))
    }
}
