//! Error types for course-scout.
//!
//! Only [`Error::MissingDocument`] is fatal to a discovery run. Everything
//! else is scoped to a single candidate or store operation and degrades into
//! run statistics.

/// Error type for discovery operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No HTML document was supplied (empty or whitespace-only input).
    #[error("no HTML document supplied")]
    MissingDocument,
}

/// Why a single candidate failed to resolve into a course record.
///
/// Local to one candidate: recorded in run statistics, never aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ResolveError {
    /// The fetch layer could not retrieve the landing page (includes timeouts).
    #[error("network failure while following coupon link")]
    NetworkFailure,

    /// Resolution landed on a page with no recognizable course shape.
    #[error("link does not lead to a course page")]
    NotACourseLink,

    /// The landing page parsed, but no usable title could be extracted.
    #[error("could not parse course details from landing page")]
    ParseFailure,
}

/// Returned by [`SeenStore::insert`](crate::SeenStore::insert) when the
/// coupon URL is already recorded.
///
/// The dedup engine treats this as a race signal and re-classifies the
/// record as a duplicate; it is never surfaced to the caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("coupon URL already recorded: {0}")]
pub struct ConflictError(pub String);

/// Error from the page-fetch boundary.
///
/// The fetcher owns timeout and retry policy; by the time an error reaches
/// the resolver it is terminal for that candidate and maps to
/// [`ResolveError::NetworkFailure`].
#[derive(Debug, thiserror::Error)]
#[error("fetch failed for {url}: {reason}")]
pub struct FetchError {
    /// The URL the fetch was attempted against.
    pub url: String,
    /// Human-readable failure description from the fetch layer.
    pub reason: String,
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;
