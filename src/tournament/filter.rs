//! Filter criteria and the conjunctive predicate
//!
//! A record survives iff it satisfies every active criterion; an absent
//! criterion imposes no constraint. Every criterion is an explicit `Option`
//! so "user typed nothing" is never conflated with an empty value.

use chrono::NaiveDate;

use super::geo::Coordinates;
use super::records::Tournament;

/// User-chosen filter dimensions for one recomputation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Free-text query matched against title, club, city and postal code
    pub text_query: Option<String>,
    /// Level code at least one event must carry, e.g. "P100"
    pub level_code: Option<String>,
    /// Code at least one event must carry as level *or* nature
    pub event_type_code: Option<String>,
    /// Upper bound on the resolved distance in km
    pub max_distance_km: Option<f64>,
    /// User-chosen geographic center for distance resolution
    pub center: Option<Coordinates>,
    /// Search radius in km, combined with `max_distance_km` by taking the
    /// smaller bound
    pub radius_km: Option<f64>,
    /// Records starting before this day are excluded
    pub date_start: Option<NaiveDate>,
    /// Records ending after this day are excluded
    pub date_end: Option<NaiveDate>,
}

impl SearchCriteria {
    /// Evaluate one record against every active criterion (conjunctive).
    #[must_use]
    pub fn matches(&self, record: &Tournament) -> bool {
        self.matches_text(record)
            && self.matches_level(record)
            && self.matches_event_type(record)
            && self.matches_distance(record)
            && self.matches_dates(record)
    }

    /// The effective distance bound: the smaller of max distance and radius
    /// when either is set, unconstrained otherwise.
    #[must_use]
    pub fn distance_bound_km(&self) -> Option<f64> {
        match (self.max_distance_km, self.radius_km) {
            (Some(max), Some(radius)) => Some(max.min(radius)),
            (Some(max), None) => Some(max),
            (None, Some(radius)) => Some(radius),
            (None, None) => None,
        }
    }

    fn matches_text(&self, record: &Tournament) -> bool {
        let Some(query) = self.text_query.as_deref() else {
            return true;
        };
        let query = query.trim().to_lowercase();

        let venue = record.venue.as_ref();
        let haystack: Vec<&str> = [
            record.title.as_deref(),
            record.club_name.as_deref(),
            venue.and_then(|v| v.city.as_deref()),
            venue.and_then(|v| v.postal_code.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        haystack.join(" ").to_lowercase().contains(&query)
    }

    fn matches_level(&self, record: &Tournament) -> bool {
        let Some(level) = self.level_code.as_deref() else {
            return true;
        };
        record
            .events
            .iter()
            .any(|event| event.level_code.as_deref() == Some(level))
    }

    fn matches_event_type(&self, record: &Tournament) -> bool {
        let Some(code) = self.event_type_code.as_deref() else {
            return true;
        };
        record.events.iter().any(|event| {
            event.level_code.as_deref() == Some(code) || event.nature_code.as_deref() == Some(code)
        })
    }

    fn matches_distance(&self, record: &Tournament) -> bool {
        let Some(bound) = self.distance_bound_km() else {
            return true;
        };
        record.resolved_distance_km(self.center) <= bound
    }

    /// Date bounds are permissive on purpose: a record with no parseable
    /// start or end date is not excluded by the corresponding bound, so
    /// incompletely-specified listings stay visible.
    fn matches_dates(&self, record: &Tournament) -> bool {
        if let (Some(bound), Some(start)) = (self.date_start, record.dates.start) {
            if start < bound {
                return false;
            }
        }
        if let (Some(bound), Some(end)) = (self.date_end, record.dates.end) {
            if end > bound {
                return false;
            }
        }
        true
    }
}
