//! `PadelScout` - Padel tournament search and aggregation
//!
//! This library provides the core functionality for aggregating padel
//! tournament listings from the FFT TenUp API: normalization and
//! deduplication, geodesic distance, filtering, sorting and timeline
//! bucketing, plus thin clients for the geocoding and search collaborators.

pub mod config;
pub mod error;
pub mod geocode;
pub mod tournament;

// Re-export core types for public API
pub use config::PadelScoutConfig;
pub use error::PadelScoutError;
pub use geocode::{GeocodedPlace, Geocoder, OpenMeteoGeocoder};
pub use tournament::{
    Catalog, Coordinates, SearchCriteria, SearchOutcome, SearchSession, SortKey, TenUpClient,
    TenUpQuery, TimelineBucket, Tournament,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PadelScoutError>;
