//! Geocoding provider configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// MapQuest geocoding configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocoderConfig {
    /// Provider API key
    pub api_key: String,

    /// Base URL of the geocoding endpoint
    pub base_url: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::from("https://www.mapquestapi.com/geocoding/v1"),
        }
    }
}

impl GeocoderConfig {
    /// Load from `GEOCODER_API_KEY` / `GEOCODER_BASE_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_or("GEOCODER_API_KEY", ""),
            base_url: env_or("GEOCODER_BASE_URL", &defaults.base_url),
        }
    }
}
