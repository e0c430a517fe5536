//! Compiled regex patterns and CSS selectors for candidate detection.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by the extraction strategy or pipeline stage that
//! uses them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Strategy 1: Category Taxonomy Links
// =============================================================================

/// Matches hrefs whose first path segment is a known course-category slug.
/// The taxonomy is the aggregator's, not ours; new categories show up with
/// layout changes, which is why the pattern-match fallback exists.
pub static CATEGORY_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/(marketing|development|design|business|it-software|personal-development|photography|music|teaching|academic|graphic-design|3d-model|ethical-hacking|after-effects|network-security|python|data-science|web-development|mobile-development|cloud|devops|cybersecurity|ai|machine-learning|blockchain|game-development|ui-ux|video-editing|animation|writing|finance|health|fitness|language|programming|database|software-engineering|testing|automation)/",
    )
    .expect("CATEGORY_PATH regex")
});

// =============================================================================
// Strategy 2: Direct Redirect Links
// =============================================================================

/// Matches hrefs carrying the aggregator's redirect segment. Lowest
/// false-positive rate of the four strategies.
pub static GO_LINK_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/go/").expect("GO_LINK_PATH regex"));

// =============================================================================
// Strategy 3: Course Card Containers
// =============================================================================

/// Matches class names of structural "course card" container elements.
pub static CARD_CONTAINER_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(course|card|item|post|deal|coupon)").expect("CARD_CONTAINER_CLASS regex")
});

/// Selector for elements that may act as course cards.
pub const CARD_CONTAINER_SELECTOR: &str = "div, article, section";

// =============================================================================
// Strategy 4: Raw Pattern Scan
// =============================================================================

/// Matches any `/segment/segment`-shaped path, the generic course-link shape.
pub static COURSE_PATH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[^/\s]+/[^/\s]+").expect("COURSE_PATH_SHAPE regex"));

/// Scans raw HTML text for href attributes, independent of DOM structure.
/// Catches malformed or script-injected markup the structural passes miss.
pub static RAW_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href\s*=\s*["']([^"'<>\s]+)["']"#).expect("RAW_HREF regex")
});

// =============================================================================
// Path Filtering
// =============================================================================

/// Path fragments that mark a link as navigation, chrome, or assets rather
/// than a course.
pub const SKIP_PATH_FRAGMENTS: &[&str] = &[
    "/tag/",
    "/category/",
    "/author/",
    "/page/",
    "/search",
    "/about",
    "/contact",
    "/privacy",
    "/terms",
    "/login",
    "/register",
    "/wp-",
    "/static/",
    "/assets/",
    "/css/",
    "/js/",
    "/img/",
    "/images/",
];

/// Href schemes and fragments that are never course links.
pub const SKIP_HREF_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:"];

// =============================================================================
// Resolution Patterns
// =============================================================================

/// Captures the course slug from a target-course URL path.
pub static COURSE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/course/([^/?#]+)").expect("COURSE_SLUG regex"));

// =============================================================================
// Title Cleaning Patterns
// =============================================================================

/// Matches a trailing price tail appended to card text (e.g. "$84.99 Free").
pub static TITLE_PRICE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[\d,.]+.*$").expect("TITLE_PRICE_TAIL regex"));

/// Matches view/enrollment counters embedded in card text.
pub static TITLE_COUNTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(views?|enrolls?|students?)").expect("TITLE_COUNTER regex")
});

/// Matches common separators between a page title and the site name.
pub static TITLE_SITE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[\|–—·]\s*|\s+-\s+").expect("TITLE_SITE_SEPARATOR regex")
});

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_path_matches_taxonomy_links() {
        assert!(CATEGORY_PATH.is_match("/development/learn-rust-fast"));
        assert!(CATEGORY_PATH.is_match("/it-software/networking-basics"));
        assert!(!CATEGORY_PATH.is_match("/blog/some-post"));
    }

    #[test]
    fn go_link_path_matches_redirect_segment() {
        assert!(GO_LINK_PATH.is_match("/go/abc123"));
        assert!(!GO_LINK_PATH.is_match("/golang/abc123"));
    }

    #[test]
    fn course_path_shape_requires_two_segments() {
        assert!(COURSE_PATH_SHAPE.is_match("/development/rust-course"));
        assert!(!COURSE_PATH_SHAPE.is_match("/single-segment"));
        assert!(!COURSE_PATH_SHAPE.is_match("relative/path"));
    }

    #[test]
    fn raw_href_captures_quoted_urls() {
        let html = r#"<a href="/go/xyz">x</a> <a href='/development/course'>y</a>"#;
        let hrefs: Vec<&str> = RAW_HREF
            .captures_iter(html)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(hrefs, vec!["/go/xyz", "/development/course"]);
    }

    #[test]
    fn course_slug_captures_path_segment() {
        let caps = COURSE_SLUG.captures("https://learn.example.com/course/python-hacking/?couponCode=FREE");
        assert_eq!(
            caps.and_then(|c| c.get(1)).map(|m| m.as_str()),
            Some("python-hacking")
        );
    }

    #[test]
    fn title_price_tail_strips_price() {
        let cleaned = TITLE_PRICE_TAIL.replace("Learn Rust $84.99 Free", "");
        assert_eq!(cleaned.trim(), "Learn Rust");
    }
}
