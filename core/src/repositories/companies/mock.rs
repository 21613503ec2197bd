//! Mock implementation of CompanyRepository for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Company;
use crate::errors::DomainError;
use crate::query::{eval, ListQuery, Page};

use super::trait_::{CompanyRepository, EARTH_RADIUS_KM};

/// Mock company repository backed by an in-memory map
#[derive(Clone)]
pub struct MockCompanyRepository {
    companies: Arc<RwLock<HashMap<Uuid, Company>>>,
}

impl MockCompanyRepository {
    pub fn new() -> Self {
        Self {
            companies: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seeds a company directly, bypassing duplicate checks
    pub async fn seed(&self, company: Company) {
        self.companies.write().await.insert(company.id, company);
    }

    pub async fn count(&self) -> usize {
        self.companies.read().await.len()
    }
}

impl Default for MockCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Great-circle distance between two `[longitude, latitude]` points
fn haversine_km(a: [f64; 2], b: [f64; 2]) -> f64 {
    let lat_a = a[1].to_radians();
    let lat_b = b[1].to_radians();
    let d_lat = (b[1] - a[1]).to_radians();
    let d_lng = (b[0] - a[0]).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[async_trait]
impl CompanyRepository for MockCompanyRepository {
    async fn create(&self, company: Company) -> Result<Company, DomainError> {
        let mut companies = self.companies.write().await;

        if companies.values().any(|c| c.name == company.name) {
            return Err(DomainError::Duplicate(
                "Duplicate field value entered".to_string(),
            ));
        }

        companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        let companies = self.companies.read().await;
        Ok(companies.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Option<Company>, DomainError> {
        let companies = self.companies.read().await;
        Ok(companies.values().find(|c| c.owner == owner).cloned())
    }

    async fn update(&self, company: Company) -> Result<Company, DomainError> {
        let mut companies = self.companies.write().await;

        if !companies.contains_key(&company.id) {
            return Err(DomainError::not_found("Company"));
        }

        // The unique name index rejects replacements too
        if companies
            .values()
            .any(|c| c.id != company.id && c.name == company.name)
        {
            return Err(DomainError::Duplicate(
                "Duplicate field value entered".to_string(),
            ));
        }

        companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut companies = self.companies.write().await;
        Ok(companies.remove(&id).is_some())
    }

    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError> {
        let companies = self.companies.read().await;
        let docs = companies
            .values()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(eval::apply(query, docs))
    }

    async fn find_within_radius(
        &self,
        center: [f64; 2],
        radius_km: f64,
    ) -> Result<Vec<Company>, DomainError> {
        let companies = self.companies.read().await;
        Ok(companies
            .values()
            .filter(|c| match &c.location {
                Some(location) => haversine_km(location.coordinates, center) <= radius_km,
                None => false,
            })
            .cloned()
            .collect())
    }

    async fn set_average_rating(&self, id: Uuid, value: Option<f64>) -> Result<(), DomainError> {
        let mut companies = self.companies.write().await;
        match companies.get_mut(&id) {
            Some(company) => {
                company.average_rating = value;
                Ok(())
            }
            None => Err(DomainError::not_found("Company")),
        }
    }

    async fn set_average_salary(&self, id: Uuid, value: Option<u64>) -> Result<(), DomainError> {
        let mut companies = self.companies.write().await;
        match companies.get_mut(&id) {
            Some(company) => {
                company.average_salary = value;
                Ok(())
            }
            None => Err(DomainError::not_found("Company")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Boston to New York is roughly 300 km
        let boston = [-71.0589, 42.3601];
        let new_york = [-74.0060, 40.7128];
        let d = haversine_km(boston, new_york);
        assert!((d - 306.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = [13.4050, 52.5200];
        assert!(haversine_km(p, p) < 1e-9);
    }
}
