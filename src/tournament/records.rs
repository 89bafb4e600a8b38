//! Canonical tournament records and the deduplicated catalog
//!
//! The catalog is the source of truth for one search session: a raw batch is
//! normalized into canonical records and deduplicated on the composite
//! identity key, first occurrence wins. It is replaced wholesale on every
//! successful search, never merged incrementally.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::geo::{Coordinates, distance_km};
use super::raw::RawTournament;

/// Start/end calendar days of a tournament, each optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Venue of a tournament
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Venue {
    pub address_lines: Vec<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub phone: Option<String>,
}

/// One épreuve of a tournament, with level and nature resolved to
/// single trimmed code strings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TournamentEvent {
    pub label: Option<String>,
    pub level_code: Option<String>,
    pub nature_code: Option<String>,
    pub age_category: Option<String>,
    pub rank_low: Option<String>,
    pub rank_high: Option<String>,
    pub adult_fee: Option<f64>,
    pub junior_fee: Option<f64>,
}

/// Canonical tournament record, post-normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tournament {
    /// Composite identity key, `externalId|code`, unique within a catalog
    pub identity: String,
    pub title: Option<String>,
    pub club_name: Option<String>,
    pub dates: DateRange,
    pub venue: Option<Venue>,
    pub events: Vec<TournamentEvent>,
    /// Source-provided distance in km, used only without a user center
    pub distance_hint_km: Option<f64>,
    pub online_registration: bool,
    pub online_payment: bool,
}

impl Tournament {
    /// Distance used for filtering and sorting: computed geodesic distance
    /// when both a user center and a venue coordinate exist, else the source
    /// hint, else infinite (never matches a finite bound, always sorts last).
    #[must_use]
    pub fn resolved_distance_km(&self, center: Option<Coordinates>) -> f64 {
        let venue_coords = self.venue.as_ref().and_then(|v| v.coordinates);
        match (center, venue_coords) {
            (Some(center), Some(venue)) => distance_km(center, venue),
            _ => self.distance_hint_km.unwrap_or(f64::INFINITY),
        }
    }
}

/// The deduplicated canonical record set for one search session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Tournament>,
}

impl Catalog {
    /// Normalize a raw batch into the canonical sequence, preserving
    /// first-seen order and silently dropping later duplicates by identity
    /// key. Fully keyless records share the empty key and dedup only
    /// against each other.
    #[must_use]
    pub fn from_raw(batch: Vec<RawTournament>) -> Self {
        let total = batch.len();
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(total);

        for raw in batch {
            let key = raw.identity_key();
            if seen.insert(key) {
                records.push(raw.into_tournament());
            }
        }

        if records.len() < total {
            debug!(
                "Dropped {} duplicate records out of {}",
                total - records.len(),
                total
            );
        }

        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Tournament] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
