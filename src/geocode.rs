//! Geocoding client
//!
//! Resolves a free-text place name into coordinates through the Open-Meteo
//! geocoding API. One attempt per user action: a miss or a network error is
//! surfaced to the user and nothing is retried, since no search can be
//! issued without resolved coordinates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::PadelScoutConfig;
use crate::error::PadelScoutError;
use crate::tournament::Coordinates;

/// Best-match result of a geocoding lookup
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinates: Coordinates,
    pub display_name: String,
}

/// Seam for the place-name resolution step, so the search flow can run
/// against a stub in tests.
#[async_trait]
pub trait Geocoder {
    /// Resolve a place name to its best match, or fail with a
    /// [`PadelScoutError::Geocode`] when there is none.
    async fn geocode(&self, place: &str) -> Result<GeocodedPlace, PadelScoutError>;
}

/// Geocoding response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingHit>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingHit {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
}

/// Open-Meteo geocoding client
pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    /// Create a new geocoder
    pub fn new(config: &PadelScoutConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.geocoder.timeout_seconds.into()))
            .user_agent("PadelScout/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.geocoder.base_url.clone(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn geocode(&self, place: &str) -> Result<GeocodedPlace, PadelScoutError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(PadelScoutError::validation("Place name cannot be empty"));
        }

        info!("Geocoding place: '{place}'");
        let url = format!(
            "{}/search?name={}&count=1&language=fr&format=json",
            self.base_url,
            urlencoding::encode(place)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PadelScoutError::geocode(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PadelScoutError::geocode(format!(
                "geocoding API returned {}",
                response.status()
            )));
        }

        let parsed: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| PadelScoutError::geocode(format!("invalid response: {e}")))?;

        let Some(hit) = parsed.results.unwrap_or_default().into_iter().next() else {
            warn!("No geocoding match for '{place}'");
            return Err(PadelScoutError::geocode(format!("no match for '{place}'")));
        };

        let display_name = match &hit.admin1 {
            Some(region) => format!("{}, {region}", hit.name),
            None => hit.name.clone(),
        };

        debug!(
            "Geocoded '{place}' to {display_name} ({:.4}, {:.4})",
            hit.latitude, hit.longitude
        );

        Ok(GeocodedPlace {
            coordinates: Coordinates::new(hit.latitude, hit.longitude),
            display_name,
        })
    }
}
