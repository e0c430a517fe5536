//! URL utilities for candidate links.
//!
//! Validation, resolution of relative hrefs against the page URL, the
//! query-stripping normalization the dedup store keys on, and course-slug
//! extraction.

use url::Url;

use crate::patterns;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether the URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) => {
            if url.host().is_some() {
                (true, Some(url))
            } else {
                (false, None)
            }
        }
        Err(_) => (false, None),
    }
}

/// Resolve an href to absolute form against the page it came from.
///
/// Absolute hrefs pass through untouched. Relative hrefs resolve against
/// `base`; with no base, or a failing join, there is nothing valid to
/// return.
#[must_use]
pub fn absolutize(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let (is_abs, _) = is_absolute_url(href);
    if is_abs {
        return Some(href.to_string());
    }

    let base = base?;
    match base.join(href) {
        Ok(resolved) if resolved.host().is_some() => Some(resolved.to_string()),
        _ => None,
    }
}

/// Normalize a URL for identity comparison: strip query and fragment.
///
/// Coupon pages hand out the same link with varying tracking parameters;
/// the stored key must not vary with them. Invalid URLs are truncated at
/// the first `?` or `#` instead.
#[must_use]
pub fn normalize_url(url_str: &str) -> String {
    let url_str = url_str.trim();
    if let Ok(mut url) = Url::parse(url_str) {
        if url.host().is_some() {
            url.set_query(None);
            url.set_fragment(None);
            return url.to_string();
        }
    }
    match url_str.find(['?', '#']) {
        Some(idx) => url_str[..idx].to_string(),
        None => url_str.to_string(),
    }
}

/// Extract the course slug from a target-course URL.
///
/// The slug is the `/course/<slug>` path segment of the course's canonical
/// URL and is a stronger duplicate signal than the coupon URL.
#[must_use]
pub fn course_slug(url_str: &str) -> Option<String> {
    patterns::COURSE_SLUG
        .captures(url_str)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check whether an href is navigation, chrome, assets, or another
/// non-course path.
#[must_use]
pub fn is_skippable_href(href: &str) -> bool {
    let lowered = href.to_lowercase();
    if patterns::SKIP_HREF_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return true;
    }
    patterns::SKIP_PATH_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
}
