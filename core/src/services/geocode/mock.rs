//! Mock geocoder for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Location;
use crate::errors::DomainError;

use super::Geocoder;

/// Mock geocoder returning a fixed location, recording every address it saw
#[derive(Clone)]
pub struct MockGeocoder {
    location: Location,
    requests: Arc<RwLock<Vec<String>>>,
    fail: bool,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self {
            location: Location {
                coordinates: [-71.525909, 41.483657],
                formatted_address: Some("233 Bay State Rd, Boston, MA 02215-1405, US".to_string()),
                street: Some("233 Bay State Rd".to_string()),
                city: Some("Boston".to_string()),
                state: Some("MA".to_string()),
                zipcode: Some("02215".to_string()),
                country: Some("US".to_string()),
            },
            requests: Arc::new(RwLock::new(Vec::new())),
            fail: false,
        }
    }

    /// A geocoder whose every call fails upstream
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_location(location: Location) -> Self {
        Self {
            location,
            ..Self::new()
        }
    }

    /// Addresses geocoded so far, in call order
    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<Location, DomainError> {
        self.requests.write().await.push(address.to_string());

        if self.fail {
            return Err(DomainError::upstream("geocoder", "request failed"));
        }
        Ok(self.location.clone())
    }
}
