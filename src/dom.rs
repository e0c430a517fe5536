//! DOM operations adapter.
//!
//! Thin wrappers over the `dom_query` crate covering the operations the
//! extractor and resolver need: attribute reads, text content, and a little
//! tree navigation.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril: text content is reference-counted, cloning is O(1)
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get element class attribute.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Querying ===

/// Query single element by CSS selector.
#[inline]
#[must_use]
pub fn query_selector<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select_single(selector)
}
