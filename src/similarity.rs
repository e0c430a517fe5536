//! Fuzzy title matching for the third dedup tier.
//!
//! Isolated as pure functions so the safety net is unit-testable without
//! HTML, network, or store concerns.

use std::collections::HashSet;

use crate::patterns;

/// Similarity score at or above which two titles are the same course.
///
/// Calibration point, not an exact science: false positives (wrongly
/// calling a distinct course a duplicate) are the safer failure mode than
/// reposting.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Normalized titles at or below this length are too generic to match on.
pub const MIN_MEANINGFUL_TITLE_LEN: usize = 10;

/// Containment only counts when the contained title is longer than this.
const MIN_CONTAINMENT_LEN: usize = 20;

/// Normalize a title for comparison: lowercase, punctuation replaced by
/// spaces, whitespace collapsed.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    patterns::WHITESPACE_NORMALIZE
        .replace_all(stripped.trim(), " ")
        .to_string()
}

/// Similarity between two *normalized* titles, in `[0.0, 1.0]`.
///
/// Token-overlap (Jaccard) ratio, with one addition: a long title fully
/// contained in the other scores 1.0, so a re-listing that appends a
/// subtitle still matches.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let shorter = if a.len() <= b.len() { a } else { b };
    let longer = if a.len() <= b.len() { b } else { a };
    if shorter.len() > MIN_CONTAINMENT_LEN && longer.contains(shorter) {
        return 1.0;
    }

    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}
