//! DOM-based detection strategies.
//!
//! The three structural passes over the parsed document: category taxonomy
//! links, direct redirect links, and course-card containers. Each pass
//! walks its own selection and contributes whatever it recognizes; a page
//! where a pass finds nothing is normal, not an error.

use url::Url;

use crate::dom::{self, Document, Selection};
use crate::patterns;
use crate::record::{CandidateLink, Strategy};
use crate::url_utils;

/// Links whose path matches the known category taxonomy.
pub fn category_links(doc: &Document, base: Option<&Url>) -> Vec<CandidateLink> {
    let mut found = Vec::new();
    for node in doc.select("a[href]").nodes() {
        let anchor = Selection::from(*node);
        let Some(href) = dom::get_attribute(&anchor, "href") else {
            continue;
        };
        if url_utils::is_skippable_href(&href) || !patterns::CATEGORY_PATH.is_match(&href) {
            continue;
        }
        let Some(coupon_url) = url_utils::absolutize(&href, base) else {
            continue;
        };
        found.push(CandidateLink {
            coupon_url,
            strategy: Strategy::CategoryLink,
            title_hint: anchor_text(&anchor),
        });
    }
    tracing::debug!(count = found.len(), "category-link pass");
    found
}

/// Links through the aggregator's `/go/` redirect segment.
pub fn go_links(doc: &Document, base: Option<&Url>) -> Vec<CandidateLink> {
    let mut found = Vec::new();
    for node in doc.select("a[href]").nodes() {
        let anchor = Selection::from(*node);
        let Some(href) = dom::get_attribute(&anchor, "href") else {
            continue;
        };
        if url_utils::is_skippable_href(&href) || !patterns::GO_LINK_PATH.is_match(&href) {
            continue;
        }
        let Some(coupon_url) = url_utils::absolutize(&href, base) else {
            continue;
        };
        found.push(CandidateLink {
            coupon_url,
            strategy: Strategy::DirectGoLink,
            title_hint: anchor_text(&anchor),
        });
    }
    tracing::debug!(count = found.len(), "go-link pass");
    found
}

/// Links nested inside structural course-card containers.
///
/// The container's heading (or, failing that, the anchor text) becomes the
/// title hint the resolver falls back on when the landing page yields none.
pub fn card_container_links(doc: &Document, base: Option<&Url>) -> Vec<CandidateLink> {
    let mut found = Vec::new();
    for node in doc.select(patterns::CARD_CONTAINER_SELECTOR).nodes() {
        let container = Selection::from(*node);
        let is_card = dom::class_name(&container)
            .is_some_and(|class| patterns::CARD_CONTAINER_CLASS.is_match(&class));
        if !is_card {
            continue;
        }

        let hint = card_title_hint(&container);
        for anchor_node in container.select("a[href]").nodes() {
            let anchor = Selection::from(*anchor_node);
            let Some(href) = dom::get_attribute(&anchor, "href") else {
                continue;
            };
            if url_utils::is_skippable_href(&href) {
                continue;
            }
            // Cards link out to all sorts of chrome; only path-shaped or
            // absolute hrefs can be coupon links.
            if !href.starts_with('/') && !href.starts_with("http://") && !href.starts_with("https://")
            {
                continue;
            }
            let Some(coupon_url) = url_utils::absolutize(&href, base) else {
                continue;
            };
            found.push(CandidateLink {
                coupon_url,
                strategy: Strategy::CardContainer,
                title_hint: hint.clone().or_else(|| anchor_text(&anchor)),
            });
        }
    }
    tracing::debug!(count = found.len(), "card-container pass");
    found
}

/// Non-empty trimmed anchor text, if it is long enough to mean something.
fn anchor_text(anchor: &Selection) -> Option<String> {
    clean_card_text(dom::text_content(anchor).as_ref())
}

/// Title hint for a card: its first heading, else its own text.
fn card_title_hint(container: &Selection) -> Option<String> {
    let heading = dom::query_selector(container, "h1, h2, h3, h4, h5, h6");
    if !heading.is_empty() {
        if let Some(text) = clean_card_text(dom::text_content(&heading).as_ref()) {
            return Some(text);
        }
    }
    clean_card_text(dom::text_content(container).as_ref())
}

/// Scrub card text into a usable title hint: drop price tails and
/// view/enrollment counters, collapse whitespace, reject stubs.
fn clean_card_text(text: &str) -> Option<String> {
    let text = patterns::TITLE_PRICE_TAIL.replace(text, "");
    let text = patterns::TITLE_COUNTER.replace_all(&text, "");
    let text = patterns::WHITESPACE_NORMALIZE
        .replace_all(text.trim(), " ")
        .to_string();
    if text.len() < 5 {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Option<Url> {
        Url::parse("https://deals.example.com/all").ok()
    }

    #[test]
    fn category_pass_resolves_relative_hrefs() {
        let doc = Document::from(
            r#"<html><body><a href="/development/learn-rust">Learn Rust Today</a></body></html>"#,
        );
        let found = category_links(&doc, base().as_ref());
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].coupon_url,
            "https://deals.example.com/development/learn-rust"
        );
        assert_eq!(found[0].title_hint.as_deref(), Some("Learn Rust Today"));
    }

    #[test]
    fn category_pass_ignores_unknown_taxonomies() {
        let doc = Document::from(
            r#"<html><body><a href="/blog/announcement">Read more</a></body></html>"#,
        );
        assert!(category_links(&doc, base().as_ref()).is_empty());
    }

    #[test]
    fn go_pass_finds_redirect_links() {
        let doc =
            Document::from(r#"<html><body><a href="/go/abc123">Get course</a></body></html>"#);
        let found = go_links(&doc, base().as_ref());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].strategy, Strategy::DirectGoLink);
    }

    #[test]
    fn card_pass_prefers_the_container_heading() {
        let doc = Document::from(
            r#"<html><body>
              <article class="coupon-item">
                <h3>Docker for Beginners</h3>
                <a href="/it-software/docker-beginners">Enroll</a>
                <span>$19.99 Free</span>
              </article>
            </body></html>"#,
        );
        let found = card_container_links(&doc, base().as_ref());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title_hint.as_deref(), Some("Docker for Beginners"));
    }

    #[test]
    fn card_pass_skips_navigation_links() {
        let doc = Document::from(
            r##"<html><body>
              <div class="card">
                <a href="/about">About us</a>
                <a href="#top">Back to top</a>
                <a href="mailto:hi@example.com">Mail</a>
              </div>
            </body></html>"##,
        );
        assert!(card_container_links(&doc, base().as_ref()).is_empty());
    }

    #[test]
    fn card_text_scrubbing_drops_price_and_counters() {
        assert_eq!(
            clean_card_text("  Learn   Python\n$84.99 Free"),
            Some("Learn Python".to_string())
        );
        assert_eq!(clean_card_text("1200 students"), None);
        assert_eq!(clean_card_text("abc"), None);
    }
}
