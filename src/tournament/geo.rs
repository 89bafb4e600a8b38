//! Geographic coordinates and great-circle distance
//!
//! Thin wrapper around the haversine crate so the rest of the engine never
//! handles the crate's own location types directly.

use serde::{Deserialize, Serialize};

/// A coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinate pairs in kilometers.
///
/// Pure haversine with the standard 6371 km Earth radius. Inputs are not
/// validated; callers must guard against non-finite coordinates.
#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: Coordinates = Coordinates {
        latitude: 48.8566,
        longitude: 2.3522,
    };
    const LYON: Coordinates = Coordinates {
        latitude: 45.7640,
        longitude: 4.8357,
    };

    #[test]
    fn test_paris_lyon_distance() {
        let d = distance_km(PARIS, LYON);
        assert!((d - 392.0).abs() < 5.0, "expected ~392km, got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = distance_km(PARIS, LYON);
        let back = distance_km(LYON, PARIS);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_km(PARIS, PARIS), 0.0);
    }
}
