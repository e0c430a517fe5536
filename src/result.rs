//! Result types for discovery output.
//!
//! This module defines the structured output of a discovery run: the new
//! courses found plus the statistics that make partial failures observable
//! without raising.

use serde::Serialize;

use crate::error::ResolveError;
use crate::record::{CourseRecord, Strategy};

/// Verdict of the dedup engine for one resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not seen before; the store has been marked before this is returned.
    New,
    /// Already published, caught at the given tier.
    Duplicate(Tier),
}

/// One of the three ordered duplicate-detection checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    /// Exact match on the normalized coupon URL.
    CouponUrl,
    /// Match on the target-course slug.
    Slug,
    /// Fuzzy title-similarity match.
    Title,
}

/// Result of a discovery run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// Courses judged new, in page-encounter order. Already reflected in
    /// the seen-store when returned.
    pub new_courses: Vec<CourseRecord>,

    /// What happened to everything else.
    pub stats: RunStats,
}

/// Counters for one discovery run.
///
/// Every candidate ends up in exactly one of: emitted, duplicate, failed,
/// or skipped over the cap.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Candidates found, per strategy that won the tag.
    pub candidates_by_strategy: Vec<(Strategy, usize)>,

    /// Resolution failures, per reason.
    pub resolution_failures: Vec<(ResolveErrorKind, usize)>,

    /// Duplicates skipped, per tier that caught them.
    pub duplicates_by_tier: Vec<(Tier, usize)>,

    /// Candidates left unprocessed once the result cap was reached.
    pub skipped_over_cap: usize,

    /// Number of new courses emitted.
    pub new_count: usize,
}

/// Serializable mirror of [`ResolveError`] for stats reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResolveErrorKind {
    /// See [`ResolveError::NetworkFailure`].
    NetworkFailure,
    /// See [`ResolveError::NotACourseLink`].
    NotACourseLink,
    /// See [`ResolveError::ParseFailure`].
    ParseFailure,
}

impl From<ResolveError> for ResolveErrorKind {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NetworkFailure => Self::NetworkFailure,
            ResolveError::NotACourseLink => Self::NotACourseLink,
            ResolveError::ParseFailure => Self::ParseFailure,
        }
    }
}

impl RunStats {
    /// Bump the candidate count for a strategy.
    pub(crate) fn count_candidate(&mut self, strategy: Strategy) {
        bump(&mut self.candidates_by_strategy, strategy);
    }

    /// Bump the failure count for a resolution-error reason.
    pub(crate) fn count_resolution_failure(&mut self, err: ResolveError) {
        bump(&mut self.resolution_failures, err.into());
    }

    /// Bump the duplicate count for a tier.
    pub(crate) fn count_duplicate(&mut self, tier: Tier) {
        bump(&mut self.duplicates_by_tier, tier);
    }

    /// Candidates found by the given strategy.
    #[must_use]
    pub fn candidates_for(&self, strategy: Strategy) -> usize {
        lookup(&self.candidates_by_strategy, strategy)
    }

    /// Resolution failures with the given reason.
    #[must_use]
    pub fn failures_for(&self, kind: ResolveErrorKind) -> usize {
        lookup(&self.resolution_failures, kind)
    }

    /// Duplicates caught at the given tier.
    #[must_use]
    pub fn duplicates_for(&self, tier: Tier) -> usize {
        lookup(&self.duplicates_by_tier, tier)
    }

    /// Total duplicates skipped across all tiers.
    #[must_use]
    pub fn duplicates_total(&self) -> usize {
        self.duplicates_by_tier.iter().map(|(_, n)| n).sum()
    }

    /// Total resolution failures across all reasons.
    #[must_use]
    pub fn failures_total(&self) -> usize {
        self.resolution_failures.iter().map(|(_, n)| n).sum()
    }
}

// Association lists instead of maps: a handful of keys, and stable
// first-seen ordering in serialized reports.
fn bump<K: PartialEq + Copy>(counters: &mut Vec<(K, usize)>, key: K) {
    if let Some(entry) = counters.iter_mut().find(|(k, _)| *k == key) {
        entry.1 += 1;
    } else {
        counters.push((key, 1));
    }
}

fn lookup<K: PartialEq + Copy>(counters: &[(K, usize)], key: K) -> usize {
    counters
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(0, |(_, n)| *n)
}
