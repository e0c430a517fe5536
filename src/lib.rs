//! # course-scout
//!
//! Discovery and deduplication engine for free-course coupon listings.
//!
//! Given one page of HTML from a coupon-aggregation site, this library
//! extracts candidate course links with four independent strategies,
//! resolves each candidate into a structured course record, and classifies
//! every record as new or already-published through a three-tier duplicate
//! check (coupon URL, course slug, fuzzy title match). Only genuinely new
//! courses come back; everything else is accounted for in run statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use course_scout::{discover, FetchedPage, MemorySeenStore, Options, PageFetcher};
//!
//! // The fetch layer is yours: anything that can follow a coupon link.
//! struct StaticFetcher;
//! impl PageFetcher for StaticFetcher {
//!     fn fetch(&self, _url: &str) -> Result<FetchedPage, course_scout::FetchError> {
//!         Ok(FetchedPage {
//!             final_url: "https://learn.example.com/course/rust-basics/".to_string(),
//!             html: "<html><head><title>Rust Basics</title></head></html>".to_string(),
//!         })
//!     }
//! }
//!
//! let listing = r#"<html><body>
//!     <a href="https://deals.example.com/go/rust-basics">Rust Basics</a>
//! </body></html>"#;
//!
//! let store = MemorySeenStore::new();
//! let report = discover(listing, &StaticFetcher, &store, &Options::default())?;
//! assert_eq!(report.new_courses.len(), 1);
//!
//! // The same page again: everything is a duplicate now.
//! let report = discover(listing, &StaticFetcher, &store, &Options::default())?;
//! assert!(report.new_courses.is_empty());
//! # Ok::<(), course_scout::Error>(())
//! ```
//!
//! ## Boundaries
//!
//! Scheduling, message delivery, and HTTP live outside this crate: the
//! caller triggers [`discover`] on whatever cadence it likes, hands the
//! returned records to its publisher, and supplies fetching through the
//! [`PageFetcher`] trait. Persistence is consumed through the
//! [`SeenStore`] trait; [`MemorySeenStore`] and [`JsonlSeenStore`] are
//! bundled reference implementations.

mod discovery;
mod error;
mod options;
mod patterns;
mod record;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Candidate extraction strategies.
pub mod extractor;

/// Candidate resolution into course records.
pub mod resolver;

/// Three-tier duplicate detection and the seen-store capability.
pub mod dedup;

/// Bundled seen-store implementations.
pub mod store;

/// Fuzzy title matching utilities.
pub mod similarity;

/// URL validation, resolution, and normalization.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use dedup::{classify, SeenStore};
pub use discovery::{discover, discover_bytes};
pub use error::{ConflictError, Error, FetchError, ResolveError, Result};
pub use options::{Options, DEFAULT_MAX_RESULTS, MAX_RESULTS_CAP};
pub use record::{CandidateLink, CourseRecord, SeenRecord, Strategy};
pub use resolver::{resolve, FetchedPage, PageFetcher};
pub use result::{Classification, DiscoveryReport, ResolveErrorKind, RunStats, Tier};
pub use store::{JsonlSeenStore, MemorySeenStore};

/// Extracts candidate course links from an HTML document.
///
/// Standalone entry to the first pipeline stage, useful for inspecting
/// what the strategies see on a page without resolving or classifying
/// anything.
///
/// # Arguments
///
/// * `html` - The listing page as a string slice
/// * `base_url` - URL the page was fetched from, for resolving relative links
///
/// # Example
///
/// ```rust
/// use course_scout::extract_candidates;
///
/// let html = r#"<html><body><a href="/go/abc">Get course</a></body></html>"#;
/// let candidates = extract_candidates(html, Some("https://deals.example.com/all"))?;
/// assert_eq!(candidates.len(), 1);
/// # Ok::<(), course_scout::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_candidates(html: &str, base_url: Option<&str>) -> Result<Vec<CandidateLink>> {
    extractor::extract_candidates(html, base_url)
}
