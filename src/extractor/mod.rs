//! Candidate extraction module.
//!
//! Four independent detection strategies run against the same document and
//! their results are unioned by normalized coupon URL:
//!
//! - `structural`: the three DOM-based passes (category taxonomy links,
//!   direct redirect links, course-card containers)
//! - `pattern`: the raw-text regex fallback, independent of DOM structure
//!
//! The first strategy (in declaration order) to find a URL wins its tag,
//! with one exception: a `DirectGoLink` hit takes the tag over any earlier
//! finder, since the redirect segment has the lowest false-positive rate.
//! A malformed document never aborts extraction — each strategy degrades
//! to an empty contribution on its own.

pub mod pattern;
pub mod structural;

use std::collections::HashMap;

use url::Url;

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::record::{CandidateLink, Strategy};
use crate::url_utils;

/// Extract candidate course links from one page of HTML.
///
/// `base_url` is the URL the page was fetched from; without it, relative
/// hrefs cannot be resolved and are dropped.
///
/// # Errors
///
/// Returns [`Error::MissingDocument`] for empty or whitespace-only input.
/// A syntactically invalid document is not an error: whatever the parser
/// salvages is scanned, and the raw-text pass runs regardless.
pub fn extract_candidates(html: &str, base_url: Option<&str>) -> Result<Vec<CandidateLink>> {
    if html.trim().is_empty() {
        return Err(Error::MissingDocument);
    }

    let base = base_url.and_then(|raw| match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(_) => {
            tracing::warn!(base_url = raw, "unparseable base URL, relative links will be dropped");
            None
        }
    });

    let doc = Document::from(html);
    let mut union = CandidateUnion::default();

    union.merge(structural::category_links(&doc, base.as_ref()));
    union.merge(structural::go_links(&doc, base.as_ref()));
    union.merge(structural::card_container_links(&doc, base.as_ref()));
    union.merge(pattern::pattern_links(html, base.as_ref()));

    tracing::debug!(candidates = union.candidates.len(), "extraction complete");
    Ok(union.candidates)
}

/// Ordered union of strategy results, keyed by normalized coupon URL.
#[derive(Default)]
struct CandidateUnion {
    candidates: Vec<CandidateLink>,
    by_url: HashMap<String, usize>,
}

impl CandidateUnion {
    fn merge(&mut self, found: Vec<CandidateLink>) {
        for candidate in found {
            let key = url_utils::normalize_url(&candidate.coupon_url);
            match self.by_url.get(&key) {
                None => {
                    self.by_url.insert(key, self.candidates.len());
                    self.candidates.push(candidate);
                }
                Some(&idx) => {
                    let existing = &mut self.candidates[idx];
                    // Redirect links are the highest-confidence tag.
                    if candidate.strategy == Strategy::DirectGoLink
                        && existing.strategy != Strategy::DirectGoLink
                    {
                        existing.strategy = Strategy::DirectGoLink;
                    }
                    if existing.title_hint.is_none() {
                        existing.title_hint = candidate.title_hint;
                    }
                }
            }
        }
    }
}
