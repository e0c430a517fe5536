//! Candidate resolution.
//!
//! Follows a coupon link to its landing page and extracts the structured
//! course record: target-course slug, title, thumbnail. Fetching goes
//! through the [`PageFetcher`] capability so the engine imposes no HTTP
//! stack; the fetcher follows redirects and reports where it ended up.

use url::Url;

use crate::dom::{self, Document, Selection};
use crate::error::{FetchError, ResolveError};
use crate::patterns;
use crate::record::{CandidateLink, CourseRecord};
use crate::url_utils;

/// One fetched landing page: the final URL after redirects, plus its HTML.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the fetch ended on after following redirects.
    pub final_url: String,
    /// Page body as UTF-8 text.
    pub html: String,
}

/// Capability for retrieving landing pages.
///
/// Timeout and retry policy live behind this trait; a fetch that times out
/// surfaces as [`FetchError`] and becomes a `NetworkFailure` for the
/// candidate, never a hang.
pub trait PageFetcher: Send + Sync {
    /// Retrieve `url`, following redirects.
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Attribute names a thumbnail URL may hide behind, in probe order.
const IMG_SRC_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src", "data-original", "data-url"];

/// Resolve a candidate into a course record.
///
/// Title priority: cleaned `<title>` element, then the first prominent
/// heading, then the candidate's inline hint from the listing page.
///
/// # Errors
///
/// * [`ResolveError::NetworkFailure`] - the fetcher could not retrieve the page
/// * [`ResolveError::NotACourseLink`] - the landing page has no course shape
/// * [`ResolveError::ParseFailure`] - no usable title could be extracted
pub fn resolve(
    candidate: &CandidateLink,
    fetcher: &dyn PageFetcher,
) -> Result<CourseRecord, ResolveError> {
    let page = fetcher.fetch(&candidate.coupon_url).map_err(|err| {
        tracing::debug!(url = %candidate.coupon_url, %err, "fetch failed");
        ResolveError::NetworkFailure
    })?;

    let doc = Document::from(page.html.as_str());
    let landing_url = Url::parse(&page.final_url).ok();

    let course_slug = find_course_slug(&doc, &page.final_url);
    if course_slug.is_none() && !has_redirect_affordance(&doc) {
        return Err(ResolveError::NotACourseLink);
    }

    let title = find_title(&doc)
        .or_else(|| candidate.title_hint.clone())
        .ok_or(ResolveError::ParseFailure)?;

    Ok(CourseRecord {
        coupon_url: candidate.coupon_url.clone(),
        course_slug,
        title,
        thumbnail_url: find_thumbnail(&doc, landing_url.as_ref()),
    })
}

/// Slug from the final URL, else from the first course-target anchor on the
/// landing page (the coupon page often links out to the course rather than
/// redirecting).
fn find_course_slug(doc: &Document, final_url: &str) -> Option<String> {
    if let Some(slug) = url_utils::course_slug(final_url) {
        return Some(slug);
    }
    for node in doc.select("a[href]").nodes() {
        let anchor = Selection::from(*node);
        if let Some(slug) = dom::get_attribute(&anchor, "href")
            .as_deref()
            .and_then(url_utils::course_slug)
        {
            return Some(slug);
        }
    }
    None
}

/// Whether the landing page offers a `/go/` redirect button. Pages with one
/// are coupon detail pages whose target just is not reachable yet.
fn has_redirect_affordance(doc: &Document) -> bool {
    doc.select("a[href]").nodes().iter().any(|node| {
        let anchor = Selection::from(*node);
        dom::get_attribute(&anchor, "href")
            .is_some_and(|href| patterns::GO_LINK_PATH.is_match(&href))
    })
}

/// Most specific title available on the page.
fn find_title(doc: &Document) -> Option<String> {
    if let Some(title) = examine_title_element(doc) {
        return Some(title);
    }
    for selector in ["h1", "h2"] {
        for node in doc.select(selector).nodes() {
            let heading = Selection::from(*node);
            let text = collapse_whitespace(dom::text_content(&heading).as_ref());
            if text.len() >= 5 && text.len() < 200 {
                return Some(text);
            }
        }
    }
    None
}

/// Text of the `<title>` element with any site-name suffix parsed off.
fn examine_title_element(doc: &Document) -> Option<String> {
    let title_elem = doc.select("title");
    if title_elem.is_empty() {
        return None;
    }

    let full = collapse_whitespace(dom::text_content(&title_elem).as_ref());
    if full.is_empty() {
        return None;
    }

    let parts: Vec<&str> = patterns::TITLE_SITE_SEPARATOR.split(&full).collect();
    if parts.len() > 1 {
        // The course name is usually the longest substantial part.
        let main_part = parts.iter().max_by_key(|p| p.len()).map(|s| s.trim());
        if let Some(part) = main_part {
            if part.len() > 10 {
                return Some(part.to_string());
            }
        }
    }

    if full.len() >= 5 {
        Some(full)
    } else {
        None
    }
}

/// Thumbnail from `og:image`, else the first image carrying a source
/// attribute. Query strings are dropped; CDNs key variants on them and the
/// bare asset URL is the stable form.
fn find_thumbnail(doc: &Document, base: Option<&Url>) -> Option<String> {
    let og = doc.select(r#"meta[property="og:image"]"#);
    if let Some(content) = dom::get_attribute(&og, "content") {
        if let Some(abs) = url_utils::absolutize(&content, base) {
            return Some(url_utils::normalize_url(&abs));
        }
    }

    for node in doc.select("img").nodes() {
        let img = Selection::from(*node);
        for &attr in IMG_SRC_ATTRS {
            if let Some(src) = dom::get_attribute(&img, attr) {
                if let Some(abs) = url_utils::absolutize(&src, base) {
                    return Some(url_utils::normalize_url(&abs));
                }
            }
        }
    }
    None
}

fn collapse_whitespace(text: &str) -> String {
    patterns::WHITESPACE_NORMALIZE
        .replace_all(text.trim(), " ")
        .to_string()
}
