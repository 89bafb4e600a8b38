//! Recomputation pipeline and search session state
//!
//! `recompute` is the single entry point that turns a canonical catalog plus
//! the active criteria into the derived outputs the presentation layer
//! consumes. The full filter → sort → bucketize chain reruns on every
//! trigger; with batches of at most a few hundred records there is nothing
//! worth memoizing.
//!
//! `SearchSession` wraps the catalog with a monotonic request generation so
//! a slow response from an older search can never overwrite the results of a
//! newer one.

use tracing::{debug, info, warn};

use super::filter::SearchCriteria;
use super::raw::RawTournament;
use super::records::{Catalog, Tournament};
use super::sort::{SortKey, sort_records};
use super::timeline::{TimelineBucket, build_timeline};

/// Derived outputs of one recomputation, handed to the presentation boundary
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Filtered and sorted result list
    pub results: Vec<Tournament>,
    /// Timeline buckets over the result list
    pub timeline: Vec<TimelineBucket>,
    /// Number of records surviving the filter
    pub matched: usize,
    /// Size of the canonical set before filtering
    pub total: usize,
}

/// Run the full pipeline over an immutable catalog snapshot.
#[must_use]
pub fn recompute(catalog: &Catalog, criteria: &SearchCriteria, sort: SortKey) -> SearchOutcome {
    let survivors: Vec<Tournament> = catalog
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();

    let results = sort_records(&survivors, sort, criteria.center);
    let timeline = build_timeline(&results);

    debug!(
        "Recomputed pipeline: {}/{} records, {} timeline buckets",
        results.len(),
        catalog.len(),
        timeline.len()
    );

    SearchOutcome {
        matched: results.len(),
        total: catalog.len(),
        results,
        timeline,
    }
}

/// Monotonic token identifying one issued search request
pub type Generation = u64;

/// Holds the canonical set for the current session and guards it against
/// stale search responses.
///
/// `None` catalog means no search has ever completed — distinct from a
/// completed search with zero matches.
#[derive(Debug, Default)]
pub struct SearchSession {
    catalog: Option<Catalog>,
    issued: Generation,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request generation. Responses must echo it back through
    /// [`SearchSession::install`].
    pub fn begin_search(&mut self) -> Generation {
        self.issued += 1;
        self.issued
    }

    /// Install a fresh raw batch as the new canonical set, replacing the
    /// previous one wholesale. A batch whose generation is not the latest
    /// issued one is discarded and the current set left untouched.
    ///
    /// Returns whether the batch was installed.
    pub fn install(&mut self, generation: Generation, batch: Vec<RawTournament>) -> bool {
        if generation != self.issued {
            warn!(
                "Discarding stale search response (generation {generation}, latest {})",
                self.issued
            );
            return false;
        }
        let catalog = Catalog::from_raw(batch);
        info!("Installed canonical set with {} records", catalog.len());
        self.catalog = Some(catalog);
        true
    }

    /// Recompute the derived outputs for the current canonical set.
    ///
    /// `None` means no search has completed yet; callers render the initial
    /// state rather than "no results".
    #[must_use]
    pub fn view(&self, criteria: &SearchCriteria, sort: SortKey) -> Option<SearchOutcome> {
        self.catalog
            .as_ref()
            .map(|catalog| recompute(catalog, criteria, sort))
    }

    /// Whether any search has ever completed in this session.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        self.catalog.is_some()
    }
}
