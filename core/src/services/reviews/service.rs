//! Review service: one review per user per company, with rating-aggregate
//! upkeep.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::review::{self, Review};
use crate::domain::entities::User;
use crate::domain::schema::{validate_create, validate_update};
use crate::errors::{DomainError, DomainResult};
use crate::query::{ListQuery, Page, Populate};
use crate::repositories::{CompanyRepository, ReviewRepository};
use crate::services::{aggregates, populate};

/// Review management
pub struct ReviewService<R, C>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    reviews: R,
    companies: C,
}

impl<R, C> ReviewService<R, C>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    pub fn new(reviews: R, companies: C) -> Self {
        Self { reviews, companies }
    }

    fn company_populate() -> Populate {
        Populate::with_select("company", &["name", "description"])
    }

    /// Runs a translated list query, embedding each review's company
    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Value>> {
        let mut page = self.reviews.list(query).await?;
        populate::attach_company(&self.companies, &mut page.items, &Self::company_populate())
            .await?;
        Ok(page)
    }

    /// Fetches one review with its company embedded
    pub async fn get(&self, id: Uuid) -> DomainResult<Value> {
        let review = self.find(id).await?;
        let mut docs = vec![serde_json::to_value(&review)
            .map_err(|e| DomainError::internal(e.to_string()))?];
        populate::attach_company(&self.companies, &mut docs, &Self::company_populate()).await?;
        Ok(docs.remove(0))
    }

    /// Creates a review of a company.
    ///
    /// The store's unique `(company, author)` index backs the one-review
    /// rule, so a concurrent duplicate fails there rather than racing a
    /// read-then-write check here.
    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &Value,
        actor: &User,
    ) -> DomainResult<Review> {
        validate_create(review::CREATE_RULES, payload)?;

        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company"))?;

        let created = self
            .reviews
            .create(Review::new(
                str_field(payload, "title"),
                str_field(payload, "text"),
                rating_field(payload),
                company.id,
                actor.id,
            ))
            .await?;

        aggregates::refresh_average_rating(&self.reviews, &self.companies, company.id).await?;
        Ok(created)
    }

    /// Updates a review its author wrote (or any review, for admins)
    pub async fn update(&self, id: Uuid, payload: &Value, actor: &User) -> DomainResult<Review> {
        let mut existing = self.find(id).await?;
        self.ensure_author_or_admin(&existing, actor)?;
        validate_update(review::CREATE_RULES, payload)?;

        if let Some(title) = payload.get("title").and_then(Value::as_str) {
            existing.title = title.to_string();
        }
        if let Some(text) = payload.get("text").and_then(Value::as_str) {
            existing.text = text.to_string();
        }
        if payload.get("rating").is_some() {
            existing.rating = rating_field(payload);
        }

        let updated = self.reviews.update(existing).await?;
        aggregates::refresh_average_rating(&self.reviews, &self.companies, updated.company)
            .await?;
        Ok(updated)
    }

    /// Deletes a review its author wrote (or any review, for admins)
    pub async fn delete(&self, id: Uuid, actor: &User) -> DomainResult<()> {
        let existing = self.find(id).await?;
        self.ensure_author_or_admin(&existing, actor)?;

        self.reviews.delete(id).await?;
        aggregates::refresh_average_rating(&self.reviews, &self.companies, existing.company)
            .await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review"))
    }

    fn ensure_author_or_admin(&self, review: &Review, actor: &User) -> DomainResult<()> {
        if actor.is_admin() || actor.id == review.author {
            return Ok(());
        }
        Err(DomainError::Forbidden(
            "Not authorized to update review".to_string(),
        ))
    }
}

fn str_field(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn rating_field(payload: &Value) -> u8 {
    payload
        .get("rating")
        .and_then(Value::as_u64)
        .unwrap_or_default() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Company, Industry, Role};
    use crate::repositories::{MockCompanyRepository, MockReviewRepository};
    use serde_json::json;

    struct Harness {
        service: ReviewService<MockReviewRepository, MockCompanyRepository>,
        companies: MockCompanyRepository,
        company: Company,
    }

    async fn harness() -> Harness {
        let companies = MockCompanyRepository::new();
        let reviews = MockReviewRepository::new();

        let company = Company::new(
            "Acme".to_string(),
            "Anvils".to_string(),
            vec![Industry::Tech],
            Uuid::new_v4(),
        );
        companies.seed(company.clone()).await;

        Harness {
            service: ReviewService::new(reviews, companies.clone()),
            companies,
            company,
        }
    }

    fn reviewer(name: &str) -> User {
        User::new(
            name.to_string(),
            format!("{name}@example.com"),
            "hash".to_string(),
            Role::User,
        )
    }

    fn payload(rating: u64) -> Value {
        json!({
            "title": "Solid place",
            "text": "Good colleagues",
            "rating": rating,
        })
    }

    #[tokio::test]
    async fn test_create_refreshes_average_rating() {
        let h = harness().await;
        h.service
            .create(h.company.id, &payload(8), &reviewer("ann"))
            .await
            .unwrap();
        h.service
            .create(h.company.id, &payload(5), &reviewer("bob"))
            .await
            .unwrap();

        let stored = h.companies.find_by_id(h.company.id).await.unwrap().unwrap();
        assert_eq!(stored.average_rating, Some(6.5));
    }

    #[tokio::test]
    async fn test_second_review_by_same_author_rejected() {
        let h = harness().await;
        let author = reviewer("ann");
        h.service
            .create(h.company.id, &payload(8), &author)
            .await
            .unwrap();

        let err = h
            .service
            .create(h.company.id, &payload(3), &author)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected() {
        let h = harness().await;
        let err = h
            .service
            .create(h.company.id, &payload(11), &reviewer("ann"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_last_review_clears_average() {
        let h = harness().await;
        let author = reviewer("ann");
        let created = h
            .service
            .create(h.company.id, &payload(8), &author)
            .await
            .unwrap();

        h.service.delete(created.id, &author).await.unwrap();

        let stored = h.companies.find_by_id(h.company.id).await.unwrap().unwrap();
        assert_eq!(stored.average_rating, None);
    }

    #[tokio::test]
    async fn test_update_by_other_user_forbidden() {
        let h = harness().await;
        let created = h
            .service
            .create(h.company.id, &payload(8), &reviewer("ann"))
            .await
            .unwrap();

        let err = h
            .service
            .update(created.id, &json!({"rating": 1}), &reviewer("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_admin_may_delete_any_review() {
        let h = harness().await;
        let created = h
            .service
            .create(h.company.id, &payload(8), &reviewer("ann"))
            .await
            .unwrap();

        let admin = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            Role::Admin,
        );
        h.service.delete(created.id, &admin).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_embeds_company() {
        let h = harness().await;
        let created = h
            .service
            .create(h.company.id, &payload(8), &reviewer("ann"))
            .await
            .unwrap();

        let doc = h.service.get(created.id).await.unwrap();
        assert_eq!(doc["company"]["name"], "Acme");
        assert_eq!(doc["rating"], 8);
    }
}
