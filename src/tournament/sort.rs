//! Sort comparators for the result list
//!
//! All sorts operate on a copy of the input and rely on the standard
//! library's stable sort, so records with equal keys keep their input order.

use chrono::NaiveDate;

use super::geo::Coordinates;
use super::records::Tournament;

/// Sort key chosen by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending by resolved distance, unknown distances last
    Distance,
    /// Ascending by title with French-style collation
    Title,
    /// Ascending by start date, the default
    #[default]
    Date,
}

/// Sort a filtered sequence by the chosen key. The input is not mutated.
#[must_use]
pub fn sort_records(
    records: &[Tournament],
    key: SortKey,
    center: Option<Coordinates>,
) -> Vec<Tournament> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Distance => {
            sorted.sort_by(|a, b| {
                a.resolved_distance_km(center)
                    .total_cmp(&b.resolved_distance_km(center))
            });
        }
        SortKey::Title => {
            sorted.sort_by(|a, b| {
                let a_title = a.title.as_deref().unwrap_or_default();
                let b_title = b.title.as_deref().unwrap_or_default();
                collation_key(a_title)
                    .cmp(&collation_key(b_title))
                    .then_with(|| a_title.cmp(b_title))
            });
        }
        SortKey::Date => {
            // A missing or unparseable start date deliberately sorts as the
            // epoch, i.e. before every real listing.
            sorted.sort_by_key(|record| record.dates.start.unwrap_or_else(NaiveDate::default));
        }
    }
    sorted
}

/// Lower-cased, accent-folded key so accented letters collate adjacent to
/// their base letter ("Été" lands next to "Ete", not after "Z").
fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        match c {
            'à' | 'â' | 'ä' | 'á' | 'ã' => key.push('a'),
            'ç' => key.push('c'),
            'è' | 'é' | 'ê' | 'ë' => key.push('e'),
            'î' | 'ï' | 'í' | 'ì' => key.push('i'),
            'ô' | 'ö' | 'ó' | 'ò' | 'õ' => key.push('o'),
            'ù' | 'û' | 'ü' | 'ú' => key.push('u'),
            'ÿ' => key.push('y'),
            'ñ' => key.push('n'),
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            other => key.push(other),
        }
    }
    key
}
