//! Timeline bucketing by calendar day
//!
//! Groups the filtered and sorted result list into one bucket per distinct
//! start day, with each bucket placed on a normalized [0, 1] time axis.
//! Buckets are derived values: regenerated wholesale on every recomputation,
//! never mutated afterwards.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::records::Tournament;

/// One timeline entry aggregating all tournaments starting on the same day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBucket {
    pub day: NaiveDate,
    /// Number of tournaments starting on this day
    pub count: usize,
    /// Position on the normalized time axis, 0.0 at the earliest day
    pub position: f64,
}

/// Group records by start-date calendar day, ascending.
///
/// Records with no parseable start date produce no bucket. An empty input
/// yields no buckets; callers treat the empty timeline as the canonical
/// initial state, not an error.
#[must_use]
pub fn build_timeline(records: &[Tournament]) -> Vec<TimelineBucket> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        if let Some(day) = record.dates.start {
            *per_day.entry(day).or_insert(0) += 1;
        }
    }

    let (Some(&min_day), Some(&max_day)) = (
        per_day.keys().next(),
        per_day.keys().next_back(),
    ) else {
        return Vec::new();
    };

    // Clamp the denominator so a single-day set yields position 0 instead
    // of dividing by zero.
    let span_days = (max_day - min_day).num_days().max(1) as f64;

    per_day
        .into_iter()
        .map(|(day, count)| TimelineBucket {
            day,
            count,
            position: (day - min_day).num_days() as f64 / span_days,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::raw::RawTournament;

    fn record(json: &str) -> Tournament {
        serde_json::from_str::<RawTournament>(json)
            .unwrap()
            .into_tournament()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_yields_one_bucket_at_zero() {
        let records = vec![
            record(r#"{"id": 1, "dateDebut": "2024-07-10"}"#),
            record(r#"{"id": 2, "dateDebut": "2024-07-10"}"#),
            record(r#"{"id": 3, "dateDebut": "2024-07-10"}"#),
        ];
        let buckets = build_timeline(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].day, day(2024, 7, 10));
        assert_eq!(buckets[0].count, 3);
        assert_eq!(buckets[0].position, 0.0);
    }

    #[test]
    fn test_positions_span_zero_to_one() {
        let records = vec![
            record(r#"{"id": 1, "dateDebut": "2024-07-01"}"#),
            record(r#"{"id": 2, "dateDebut": "2024-07-06"}"#),
            record(r#"{"id": 3, "dateDebut": "2024-07-11"}"#),
        ];
        let buckets = build_timeline(&records);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].position, 0.0);
        assert_eq!(buckets[1].position, 0.5);
        assert_eq!(buckets[2].position, 1.0);
    }

    #[test]
    fn test_days_are_ascending_and_counts_sum_up() {
        let records = vec![
            record(r#"{"id": 1, "dateDebut": "2024-07-10"}"#),
            record(r#"{"id": 2, "dateDebut": "2024-07-02"}"#),
            record(r#"{"id": 3, "dateDebut": "2024-07-10"}"#),
            record(r#"{"id": 4, "libelle": "Sans date"}"#),
        ];
        let buckets = build_timeline(&records);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.windows(2).all(|w| w[0].day < w[1].day));
        // Dateless records are excluded from the timeline entirely
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_empty_input_yields_no_buckets() {
        assert!(build_timeline(&[]).is_empty());
        // Only dateless records is the same as empty
        let dateless = vec![record(r#"{"libelle": "Sans date"}"#)];
        assert!(build_timeline(&dateless).is_empty());
    }
}
