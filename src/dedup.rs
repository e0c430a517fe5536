//! Three-tier duplicate detection.
//!
//! Classifies a resolved course record against the seen-store, cheapest and
//! most certain check first: exact coupon URL, target-course slug, fuzzy
//! title similarity. A record that passes all three tiers is committed to
//! the store *before* it is reported new, so a concurrent classification of
//! an equivalent record observes the fresh row.

use crate::error::ConflictError;
use crate::record::{CourseRecord, SeenRecord};
use crate::result::{Classification, Tier};
use crate::similarity::{self, MIN_MEANINGFUL_TITLE_LEN};
use crate::url_utils;

/// Capability for the persistent record of already-published courses.
///
/// `insert` carries the uniqueness contract: a second insert of the same
/// coupon URL must fail with [`ConflictError`] rather than duplicate or
/// overwrite the row. Implementations use interior mutability; all methods
/// take `&self`.
pub trait SeenStore: Send + Sync {
    /// Whether a course with this normalized coupon URL is recorded.
    fn exists(&self, coupon_url: &str) -> bool;

    /// Recorded course with this target-course slug, if any.
    fn find_by_slug(&self, slug: &str) -> Option<SeenRecord>;

    /// All recorded `(normalized_title, record)` pairs.
    fn all_titles(&self) -> Vec<(String, SeenRecord)>;

    /// Record a course. Fails with [`ConflictError`] if the coupon URL is
    /// already present; the existing row is never touched.
    fn insert(&self, record: SeenRecord) -> Result<(), ConflictError>;
}

/// Classify a resolved record as new or duplicate.
///
/// A `New` verdict has already been committed to the store when this
/// returns. An insert conflict means another caller committed the same
/// coupon URL between our checks and our insert; that is a duplicate, not
/// an error.
pub fn classify(
    record: &CourseRecord,
    store: &dyn SeenStore,
    similarity_threshold: f64,
) -> Classification {
    // Tier 1: exact coupon URL.
    let coupon_url = url_utils::normalize_url(&record.coupon_url);
    if store.exists(&coupon_url) {
        tracing::debug!(url = %coupon_url, "duplicate by coupon URL");
        return Classification::Duplicate(Tier::CouponUrl);
    }

    // Tier 2: the same course re-offered through a different coupon URL.
    if let Some(slug) = record.course_slug.as_deref() {
        if let Some(seen) = store.find_by_slug(slug) {
            tracing::debug!(slug, first_seen = %seen.first_seen_at, "duplicate by course slug");
            return Classification::Duplicate(Tier::Slug);
        }
    }

    // Tier 3: fuzzy title match, the only probabilistic tier. Short
    // normalized titles are too generic to compare.
    let normalized = similarity::normalize_title(&record.title);
    if normalized.len() > MIN_MEANINGFUL_TITLE_LEN {
        for (seen_title, _) in store.all_titles() {
            let score = similarity::similarity(&normalized, &seen_title);
            if score >= similarity_threshold {
                tracing::debug!(title = %record.title, score, "duplicate by title similarity");
                return Classification::Duplicate(Tier::Title);
            }
        }
    }

    // Commit point: mark before reporting new.
    match store.insert(SeenRecord::from_course(record)) {
        Ok(()) => Classification::New,
        Err(ConflictError(url)) => {
            tracing::debug!(url = %url, "lost insert race, re-classifying as duplicate");
            Classification::Duplicate(Tier::CouponUrl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::SIMILARITY_THRESHOLD;
    use crate::store::MemorySeenStore;

    fn record(coupon_url: &str, slug: Option<&str>, title: &str) -> CourseRecord {
        CourseRecord {
            coupon_url: coupon_url.to_string(),
            course_slug: slug.map(str::to_string),
            title: title.to_string(),
            thumbnail_url: None,
        }
    }

    #[test]
    fn fresh_record_classifies_new_and_commits() {
        let store = MemorySeenStore::new();
        let rec = record(
            "https://deals.example.com/go/a",
            Some("rust-basics"),
            "Rust Basics for Everyone",
        );
        assert_eq!(classify(&rec, &store, SIMILARITY_THRESHOLD), Classification::New);
        assert!(store.exists("https://deals.example.com/go/a"));
    }

    #[test]
    fn coupon_url_hit_wins_despite_title_drift() {
        let store = MemorySeenStore::new();
        let first = record(
            "https://deals.example.com/go/a?utm=x",
            None,
            "Original Title Goes Here",
        );
        classify(&first, &store, SIMILARITY_THRESHOLD);

        let drifted = record(
            "https://deals.example.com/go/a",
            None,
            "Completely Rewritten Name",
        );
        assert_eq!(
            classify(&drifted, &store, SIMILARITY_THRESHOLD),
            Classification::Duplicate(Tier::CouponUrl)
        );
    }

    #[test]
    fn slug_hit_fires_before_title_tier() {
        let store = MemorySeenStore::new();
        let first = record(
            "https://deals.example.com/go/a",
            Some("docker-deep-dive"),
            "Docker Deep Dive",
        );
        classify(&first, &store, SIMILARITY_THRESHOLD);

        // New coupon URL, same slug, same-ish title: must be caught at
        // tier 2, never reaching the similarity scan.
        let reoffered = record(
            "https://deals.example.com/go/b",
            Some("docker-deep-dive"),
            "Docker Deep Dive 2024 Relaunch",
        );
        assert_eq!(
            classify(&reoffered, &store, SIMILARITY_THRESHOLD),
            Classification::Duplicate(Tier::Slug)
        );
    }

    #[test]
    fn near_identical_title_is_a_tier_three_duplicate() {
        let store = MemorySeenStore::new();
        let first = record(
            "https://deals.example.com/go/a",
            None,
            "The Complete JavaScript Course",
        );
        classify(&first, &store, SIMILARITY_THRESHOLD);

        let relisted = record(
            "https://deals.example.com/go/b",
            None,
            "the complete javascript course!!!",
        );
        assert_eq!(
            classify(&relisted, &store, SIMILARITY_THRESHOLD),
            Classification::Duplicate(Tier::Title)
        );
    }

    #[test]
    fn shared_generic_word_is_not_a_duplicate() {
        let store = MemorySeenStore::new();
        let first = record(
            "https://deals.example.com/go/a",
            None,
            "Complete Photography Masterclass",
        );
        classify(&first, &store, SIMILARITY_THRESHOLD);

        let other = record(
            "https://deals.example.com/go/b",
            None,
            "Complete Guitar Course for Beginners",
        );
        assert_eq!(classify(&other, &store, SIMILARITY_THRESHOLD), Classification::New);
    }

    #[test]
    fn short_generic_titles_skip_the_similarity_tier() {
        let store = MemorySeenStore::new();
        classify(
            &record("https://deals.example.com/go/a", None, "Python 101"),
            &store,
            SIMILARITY_THRESHOLD,
        );
        // "python 101" normalizes to 10 chars, under the meaningful floor.
        assert_eq!(
            classify(
                &record("https://deals.example.com/go/b", None, "Python-101!"),
                &store,
                SIMILARITY_THRESHOLD,
            ),
            Classification::New
        );
    }

    #[test]
    fn insert_conflict_reclassifies_as_duplicate() {
        struct RacingStore(MemorySeenStore);
        impl SeenStore for RacingStore {
            fn exists(&self, _coupon_url: &str) -> bool {
                false // pretend the row landed after our check
            }
            fn find_by_slug(&self, slug: &str) -> Option<SeenRecord> {
                self.0.find_by_slug(slug)
            }
            fn all_titles(&self) -> Vec<(String, SeenRecord)> {
                Vec::new()
            }
            fn insert(&self, record: SeenRecord) -> Result<(), ConflictError> {
                self.0.insert(record)
            }
        }

        let store = RacingStore(MemorySeenStore::new());
        let rec = record("https://deals.example.com/go/a", None, "Some Course Title Here");
        assert_eq!(classify(&rec, &store, SIMILARITY_THRESHOLD), Classification::New);
        // Second pass: exists() still lies, insert conflicts.
        assert_eq!(
            classify(&rec, &store, SIMILARITY_THRESHOLD),
            Classification::Duplicate(Tier::CouponUrl)
        );
    }
}
