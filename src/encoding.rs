//! Character encoding detection and transcoding.
//!
//! Aggregator pages occasionally arrive in legacy encodings. The byte entry
//! point sniffs the charset declaration from the document head and
//! transcodes to UTF-8 before extraction, replacing invalid sequences
//! rather than failing.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">`.
#[allow(clippy::expect_used)]
static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("valid regex")
});

/// Detect the character encoding declared in the first KiB of a document.
///
/// Checks `<meta charset>` first, then the `http-equiv` form, and falls
/// back to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);

    for pattern in [&CHARSET_META, &HTTP_EQUIV_CHARSET] {
        let label = pattern
            .captures(&head)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        if let Some(encoding) = label.and_then(|l| Encoding::for_label(l.as_bytes())) {
            return encoding;
        }
    }

    UTF_8
}

/// Transcode HTML bytes to a UTF-8 string, lossily.
///
/// Invalid sequences become the Unicode replacement character instead of
/// aborting the run.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
