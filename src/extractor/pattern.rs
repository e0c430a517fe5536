//! Raw-text fallback strategy.
//!
//! Scans the HTML source for href attributes with a course-shaped path,
//! without going through the DOM at all. Markup mangled badly enough to
//! hide links from the structural passes (unclosed tags, links assembled in
//! inline scripts) still surrenders its URLs to a plain regex.

use url::Url;

use crate::patterns;
use crate::record::{CandidateLink, Strategy};
use crate::url_utils;

/// Hrefs recovered from raw HTML text with a `/segment/segment` path shape.
pub fn pattern_links(html: &str, base: Option<&Url>) -> Vec<CandidateLink> {
    let mut found = Vec::new();
    for caps in patterns::RAW_HREF.captures_iter(html) {
        let Some(href) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if url_utils::is_skippable_href(href) || !patterns::COURSE_PATH_SHAPE.is_match(href) {
            continue;
        }
        let Some(coupon_url) = url_utils::absolutize(href, base) else {
            continue;
        };
        found.push(CandidateLink {
            coupon_url,
            strategy: Strategy::PatternMatch,
            title_hint: None,
        });
    }
    tracing::debug!(count = found.len(), "raw-pattern pass");
    found
}
