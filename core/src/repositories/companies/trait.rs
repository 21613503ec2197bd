//! Company repository trait.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::Company;
use crate::errors::DomainError;
use crate::query::{ListQuery, Page};

/// Mean Earth radius in kilometers, used for radius searches
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Repository contract for Company entities
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Persists a new company
    ///
    /// # Returns
    /// * `Err(DomainError::Duplicate)` - a company with this name exists
    async fn create(&self, company: Company) -> Result<Company, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError>;

    /// Finds a company owned by the given user, if any
    async fn find_by_owner(&self, owner: Uuid) -> Result<Option<Company>, DomainError>;

    /// Replaces a stored company
    async fn update(&self, company: Company) -> Result<Company, DomainError>;

    /// Deletes a company, reporting whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Runs a translated list query over the collection
    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError>;

    /// Companies whose geocoded location lies within `radius_km` of
    /// `center` (`[longitude, latitude]`) along a great circle
    async fn find_within_radius(
        &self,
        center: [f64; 2],
        radius_km: f64,
    ) -> Result<Vec<Company>, DomainError>;

    /// Writes the derived mean review rating; `None` clears it
    async fn set_average_rating(&self, id: Uuid, value: Option<f64>) -> Result<(), DomainError>;

    /// Writes the derived average salary; `None` clears it
    async fn set_average_salary(&self, id: Uuid, value: Option<u64>) -> Result<(), DomainError>;
}
