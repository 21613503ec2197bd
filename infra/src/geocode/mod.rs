//! MapQuest geocoding client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use wl_core::domain::entities::Location;
use wl_core::errors::{DomainError, DomainResult};
use wl_core::services::Geocoder;
use wl_shared::GeocoderConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoder backed by the MapQuest geocoding API
pub struct MapQuestGeocoder {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl MapQuestGeocoder {
    pub fn new(config: GeocoderConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Geocoder for MapQuestGeocoder {
    async fn geocode(&self, address: &str) -> Result<Location, DomainError> {
        let url = format!("{}/address", self.config.base_url);
        debug!(address, "geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str()), ("location", address)])
            .send()
            .await
            .map_err(|e| DomainError::upstream("geocoder", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(
                "geocoder",
                format!("status {}", response.status()),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::upstream("geocoder", e.to_string()))?;

        parse_mapquest(&body)
    }
}

/// Pulls the first location out of a MapQuest geocoding response
fn parse_mapquest(body: &Value) -> DomainResult<Location> {
    let place = body
        .pointer("/results/0/locations/0")
        .ok_or_else(|| DomainError::upstream("geocoder", "no locations in response"))?;

    let lat = place
        .pointer("/latLng/lat")
        .and_then(Value::as_f64)
        .ok_or_else(|| DomainError::upstream("geocoder", "missing latitude"))?;
    let lng = place
        .pointer("/latLng/lng")
        .and_then(Value::as_f64)
        .ok_or_else(|| DomainError::upstream("geocoder", "missing longitude"))?;

    let field = |key: &str| -> Option<String> {
        place
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let street = field("street");
    // MapQuest admin areas: 5 = city, 3 = state, 1 = country
    let city = field("adminArea5");
    let state = field("adminArea3");
    let zipcode = field("postalCode");
    let country = field("adminArea1");

    let formatted_address = {
        let parts: Vec<&str> = [&street, &city, &state, &zipcode, &country]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    };

    Ok(Location {
        coordinates: [lng, lat],
        formatted_address,
        street,
        city,
        state,
        zipcode,
        country,
    })
}
