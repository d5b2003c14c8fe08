//! Extractors Crate
//!
//! Finds release dates in free text and turns them into something a user can
//! act on.
//!
//! # Architecture
//!
//! - **Types**: Candidate, page and calendar types live in the `shared-types` crate
//! - **Resolver**: `release_date` holds the pattern catalog, scanner, normalizer and ranker
//! - **Around the resolver**: page aggregation, calendar events and search fallback
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use extractors::ReleaseDateExtractor;
//!
//! let extractor = ReleaseDateExtractor::new();
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let found = extractor.resolve("Release date: March 5, 2026", today).unwrap();
//! assert_eq!(found.canonical_date, "2026-03-05");
//! ```

pub mod calendar_event;
pub mod page_aggregator;
pub mod release_date;
pub mod search_fallback;

// Re-export commonly used types
pub use calendar_event::{build_release_event, to_ics, ReminderConfig};
pub use page_aggregator::{PageAggregator, ScoringConfig};
pub use release_date::ReleaseDateExtractor;
pub use search_fallback::{search_query, search_url, SearchConfig};

// Re-export the resolver trait from shared-types for convenience
pub use shared_types::ReleaseDateResolver;
