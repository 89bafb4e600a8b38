//! TenUp search API client
//!
//! Async client for the FFT mobile API tournament search. One attempt per
//! user action: a failed search is surfaced to the user, never retried
//! automatically, and leaves the previously installed canonical set intact.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::error::{Result, TournamentError};
use super::geo::Coordinates;
use super::raw::RawTournament;
use crate::config::PadelScoutConfig;

/// Parameters of one search request
#[derive(Debug, Clone)]
pub struct TenUpQuery {
    pub center: Coordinates,
    pub radius_km: u32,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    /// Level code passed through as the `categories` parameter
    pub level_code: Option<String>,
}

/// Search response envelope; the items land under `items` or `content`
/// depending on the API version. Items stay loose JSON values here so one
/// malformed record degrades to defaults instead of rejecting the batch.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    items: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    content: Option<Vec<serde_json::Value>>,
}

impl SearchEnvelope {
    fn into_items(self) -> Vec<RawTournament> {
        self.items
            .or(self.content)
            .unwrap_or_default()
            .into_iter()
            .map(RawTournament::from_loose_value)
            .collect()
    }
}

/// TenUp API client
pub struct TenUpClient {
    client: Client,
    base_url: String,
    application_id: String,
    access_token: Option<String>,
    limit: u32,
}

impl TenUpClient {
    /// Create a new client
    pub fn new(config: &PadelScoutConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.search.timeout_seconds.into()))
            .user_agent("PadelScout/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.search.base_url.clone(),
            application_id: config.search.application_id.clone(),
            access_token: config.search.access_token.clone(),
            limit: config.search.limit,
        }
    }

    /// Fetch the raw tournament batch for one search.
    ///
    /// The returned records are untouched wire records; deduplication and
    /// normalization happen in the catalog.
    pub async fn search(&self, query: &TenUpQuery) -> Result<Vec<RawTournament>> {
        info!(
            "Searching tournaments within {}km of ({:.4}, {:.4})",
            query.radius_km, query.center.latitude, query.center.longitude
        );

        let mut url = format!(
            "{}/competition/tournois?practice=PADEL&latitude={}&longitude={}&distance={}&offset=0&limit={}",
            self.base_url,
            query.center.latitude,
            query.center.longitude,
            query.radius_km,
            self.limit
        );
        if let Some(start) = query.date_start {
            url.push_str(&format!("&startDate={}", start.format("%Y-%m-%d")));
        }
        if let Some(end) = query.date_end {
            url.push_str(&format!("&endDate={}", end.format("%Y-%m-%d")));
        }
        if let Some(level) = &query.level_code {
            url.push_str(&format!("&categories={}", urlencoding::encode(level)));
        }

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("X-APPLICATION-ID", &self.application_id);

        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| TournamentError::NetworkError(format!("Search request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return match status.as_u16() {
                401 => Err(TournamentError::AuthenticationError(
                    "TenUp token expired or invalid".to_string(),
                )),
                429 => Err(TournamentError::RateLimitError(
                    "TenUp API rate limit exceeded".to_string(),
                )),
                _ => Err(TournamentError::ApiError(format!(
                    "TenUp API error {status}: {error_text}"
                ))),
            };
        }

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| TournamentError::ParseError(format!("Failed to parse TenUp response: {e}")))?;

        let items = envelope.into_items();
        if items.is_empty() {
            warn!("TenUp search returned no tournaments");
        } else {
            info!("TenUp search returned {} tournaments", items.len());
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PadelScoutConfig;

    #[test]
    fn test_envelope_accepts_both_item_fields() {
        let mobile: SearchEnvelope =
            serde_json::from_str(r#"{"items": [{"id": "1"}]}"#).unwrap();
        assert_eq!(mobile.into_items().len(), 1);

        let paged: SearchEnvelope =
            serde_json::from_str(r#"{"content": [{"id": "1"}, {"id": "2"}]}"#).unwrap();
        assert_eq!(paged.into_items().len(), 2);

        let empty: SearchEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(empty.into_items().is_empty());
    }

    #[test]
    fn test_malformed_item_does_not_reject_the_envelope() {
        let envelope: SearchEnvelope = serde_json::from_str(
            r#"{"items": [{"id": "1", "code": "A", "libelle": "Valide"}, {"lat": []}]}"#,
        )
        .unwrap();
        let items = envelope.into_items();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].identity_key(), "1|A");
        assert_eq!(items[1].identity_key(), "|");
    }

    #[test]
    fn test_client_creation() {
        let config = PadelScoutConfig::default();
        let client = TenUpClient::new(&config);
        assert_eq!(client.base_url, "https://api.fft.fr/fft/v1");
        assert_eq!(client.application_id, "tenup-app");
    }
}
