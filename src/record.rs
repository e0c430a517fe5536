//! Core data model: candidates, resolved course records, and persisted rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::similarity;

/// Which detection strategy first surfaced a candidate link.
///
/// Declaration order is the tag tie-break order: when two strategies find
/// the same URL, the earlier one keeps the tag, except `DirectGoLink`,
/// which wins any conflict outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Link whose path matches the category taxonomy.
    CategoryLink,
    /// Link through the aggregator's redirect segment.
    DirectGoLink,
    /// Link found inside a structural course-card container.
    CardContainer,
    /// Link recovered by the raw-text pattern scan.
    PatternMatch,
}

impl Strategy {
    /// All strategies in declaration (tie-break) order.
    pub const ALL: [Strategy; 4] = [
        Strategy::CategoryLink,
        Strategy::DirectGoLink,
        Strategy::CardContainer,
        Strategy::PatternMatch,
    ];
}

/// A raw link extracted from a page, not yet confirmed to be a real course.
///
/// Ephemeral: produced and consumed within one discovery run, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateLink {
    /// Absolute coupon URL.
    pub coupon_url: String,

    /// Strategy that surfaced this link.
    pub strategy: Strategy,

    /// Inline title hint from the surrounding markup, if any.
    pub title_hint: Option<String>,
}

/// A fully resolved course offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecord {
    /// Absolute coupon URL the course was discovered through.
    pub coupon_url: String,

    /// Path-segment identifier of the target course's canonical URL.
    ///
    /// Absent when resolution could not reach the target page. A stronger
    /// duplicate signal than the coupon URL.
    pub course_slug: Option<String>,

    /// Course title. Non-empty after normalization.
    pub title: String,

    /// Course thumbnail, absolute URL.
    pub thumbnail_url: Option<String>,
}

/// A persisted row marking a course as already published.
///
/// Created exactly once per distinct course ever judged new; never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenRecord {
    /// Normalized coupon URL, unique per store.
    pub coupon_url: String,

    /// Target-course slug, when resolution reached the target page.
    pub course_slug: Option<String>,

    /// Title after dedup normalization (lowercase, punctuation stripped).
    pub normalized_title: String,

    /// When this course was first judged new.
    pub first_seen_at: DateTime<Utc>,
}

impl SeenRecord {
    /// Derive the persisted row from a freshly resolved record.
    #[must_use]
    pub fn from_course(record: &CourseRecord) -> Self {
        Self {
            coupon_url: crate::url_utils::normalize_url(&record.coupon_url),
            course_slug: record.course_slug.clone(),
            normalized_title: similarity::normalize_title(&record.title),
            first_seen_at: Utc::now(),
        }
    }
}
