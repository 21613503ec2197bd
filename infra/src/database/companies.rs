//! MongoDB-backed company repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};
use serde_json::Value;
use uuid::Uuid;

use wl_core::domain::entities::Company;
use wl_core::errors::{DomainError, DomainResult};
use wl_core::query::{ListQuery, Page};
use wl_core::repositories::companies::EARTH_RADIUS_KM;
use wl_core::repositories::CompanyRepository;

use super::documents::{
    document_to_json, json_to_document, run_list_query, storage_err, uuid_bson, write_err,
};

const COLLECTION: &str = "companies";

#[derive(Clone)]
pub struct MongoCompanyRepository {
    database: Database,
}

impl MongoCompanyRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }

    async fn set_aggregate(&self, id: Uuid, update: Document) -> DomainResult<()> {
        let result = self
            .collection()
            .update_one(doc! { "_id": uuid_bson(id) }, update)
            .await
            .map_err(storage_err)?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found("Company"));
        }
        Ok(())
    }
}

fn company_to_document(company: &Company) -> DomainResult<Document> {
    let json = serde_json::to_value(company).map_err(|e| DomainError::internal(e.to_string()))?;
    json_to_document(json)
}

fn document_to_company(document: Document) -> DomainResult<Company> {
    serde_json::from_value(document_to_json(document))
        .map_err(|e| DomainError::internal(e.to_string()))
}

#[async_trait]
impl CompanyRepository for MongoCompanyRepository {
    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        self.collection()
            .insert_one(company_to_document(&company)?)
            .await
            .map_err(write_err)?;
        Ok(company)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        let document = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(storage_err)?;
        document.map(document_to_company).transpose()
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Option<Company>, DomainError> {
        let document = self
            .collection()
            .find_one(doc! { "owner": uuid_bson(owner) })
            .await
            .map_err(storage_err)?;
        document.map(document_to_company).transpose()
    }

    async fn update(&self, company: Company) -> Result<Company, DomainError> {
        let result = self
            .collection()
            .replace_one(
                doc! { "_id": uuid_bson(company.id) },
                company_to_document(&company)?,
            )
            .await
            .map_err(write_err)?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found("Company"));
        }
        Ok(company)
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

    async fn find_within_radius(
        &self,
        center: [f64; 2],
        radius_km: f64,
    ) -> Result<Vec<Company>, DomainError> {
        // $centerSphere takes the radius in radians
        let filter = doc! {
            "location.coordinates": {
                "$geoWithin": {
                    "$centerSphere": [
                        [center[0], center[1]],
                        radius_km / EARTH_RADIUS_KM,
                    ]
                }
            }
        };

        let cursor = self.collection().find(filter).await.map_err(storage_err)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(storage_err)?;
        documents.into_iter().map(document_to_company).collect()
    }

    async fn set_average_rating(&self, id: Uuid, value: Option<f64>) -> Result<(), DomainError> {
        let update = match value {
            Some(rating) => doc! { "$set": { "average_rating": rating } },
            None => doc! { "$unset": { "average_rating": "" } },
        };
        self.set_aggregate(id, update).await
    }

    async fn set_average_salary(&self, id: Uuid, value: Option<u64>) -> Result<(), DomainError> {
        let update = match value {
            Some(salary) => doc! { "$set": { "average_salary": salary as i64 } },
            None => doc! { "$unset": { "average_salary": "" } },
        };
        self.set_aggregate(id, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::domain::entities::{Industry, Location};

    #[test]
    fn test_company_document_round_trip() {
        let mut company = Company::new(
            "Acme".to_string(),
            "Anvils".to_string(),
            vec![Industry::Tech, Industry::Retail],
            Uuid::new_v4(),
        );
        company.slug = "acme".to_string();
        company.location = Some(Location {
            coordinates: [-71.05, 42.36],
            formatted_address: Some("Boston, MA".to_string()),
            street: None,
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            zipcode: None,
            country: Some("US".to_string()),
        });

        let document = company_to_document(&company).unwrap();
        assert_eq!(document.get_str("_id").unwrap(), company.id.to_string());

        let back = document_to_company(document).unwrap();
        assert_eq!(back, company);
    }

    #[test]
    fn test_absent_aggregates_stay_absent() {
        let company = Company::new(
            "Acme".to_string(),
            "Anvils".to_string(),
            vec![Industry::Other],
            Uuid::new_v4(),
        );
        let document = company_to_document(&company).unwrap();
        assert!(document.get("average_rating").is_none());
        assert!(document.get("average_salary").is_none());
    }
}
