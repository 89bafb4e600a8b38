//! Tournament module
//!
//! Everything from the raw TenUp wire records to the derived view outputs:
//! - Raw wire model tolerating the API's loose shapes
//! - Canonical records with identity-key deduplication
//! - Geodesic distance and resolved-distance rules
//! - Conjunctive filter criteria, sort comparators, timeline buckets
//! - The recomputation pipeline and the generation-guarded search session
//! - The TenUp search API client

pub mod error;
pub mod filter;
pub mod geo;
pub mod pipeline;
pub mod raw;
pub mod records;
pub mod sort;
pub mod tenup;
pub mod timeline;

// Re-export commonly used types from submodules
pub use error::{Result, TournamentError};
pub use filter::SearchCriteria;
pub use geo::{Coordinates, distance_km};
pub use pipeline::{Generation, SearchOutcome, SearchSession, recompute};
pub use raw::{CodeOrLabel, Flag, RawTournament};
pub use records::{Catalog, DateRange, Tournament, TournamentEvent, Venue};
pub use sort::{SortKey, sort_records};
pub use tenup::{TenUpClient, TenUpQuery};
pub use timeline::{TimelineBucket, build_timeline};
