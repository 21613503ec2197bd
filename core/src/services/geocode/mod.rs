//! Geocoding port.
//!
//! Company addresses are never stored verbatim; the pre-write pipeline
//! resolves them into a [`Location`] through this trait. The storage crate
//! provides the MapQuest-backed implementation.

pub mod mock;

pub use mock::MockGeocoder;

use async_trait::async_trait;

use crate::domain::entities::Location;
use crate::errors::DomainError;

/// Resolves a free-form address into a geocoded location
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Location, DomainError>;
}
