//! Discovery orchestration.
//!
//! Composes the extractor, resolver, and dedup engine over one fetched
//! page: extract candidates, resolve each in page-encounter order, classify
//! the survivors, stop at the result cap. Everything that does not become a
//! new course lands in the run statistics instead of an error.

use crate::dedup::{self, SeenStore};
use crate::encoding;
use crate::error::Result;
use crate::extractor;
use crate::options::Options;
use crate::resolver::{self, PageFetcher};
use crate::result::{Classification, DiscoveryReport};

/// Run one discovery pass over a page of HTML.
///
/// Returns new courses in page-encounter order; each was committed to the
/// store before being added to the report. With
/// [`Options::allow_duplicates`] set, classification is bypassed and every
/// resolved record is emitted (records not yet in the store are still
/// recorded for later normal runs).
///
/// # Errors
///
/// Returns [`Error::MissingDocument`](crate::Error::MissingDocument) for
/// empty input — the only fatal failure. Per-candidate problems degrade
/// into [`RunStats`](crate::RunStats).
pub fn discover(
    html: &str,
    fetcher: &dyn PageFetcher,
    store: &dyn SeenStore,
    options: &Options,
) -> Result<DiscoveryReport> {
    let candidates = extractor::extract_candidates(html, options.base_url.as_deref())?;

    let mut report = DiscoveryReport::default();
    for candidate in &candidates {
        report.stats.count_candidate(candidate.strategy);
    }

    let cap = options.clamped_max_results();
    for (index, candidate) in candidates.iter().enumerate() {
        if report.new_courses.len() >= cap {
            report.stats.skipped_over_cap = candidates.len() - index;
            tracing::debug!(
                cap,
                skipped = report.stats.skipped_over_cap,
                "result cap reached"
            );
            break;
        }

        let record = match resolver::resolve(candidate, fetcher) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(url = %candidate.coupon_url, %err, "candidate failed to resolve");
                report.stats.count_resolution_failure(err);
                continue;
            }
        };

        if options.allow_duplicates {
            // Reposting mode: emit everything, but still record unseen
            // courses so later normal runs recognize them.
            let _ = store.insert(crate::record::SeenRecord::from_course(&record));
            report.new_courses.push(record);
            continue;
        }

        match dedup::classify(&record, store, options.similarity_threshold) {
            Classification::New => report.new_courses.push(record),
            Classification::Duplicate(tier) => report.stats.count_duplicate(tier),
        }
    }

    report.stats.new_count = report.new_courses.len();
    tracing::info!(
        candidates = candidates.len(),
        new = report.stats.new_count,
        duplicates = report.stats.duplicates_total(),
        failures = report.stats.failures_total(),
        skipped_over_cap = report.stats.skipped_over_cap,
        "discovery run complete"
    );
    Ok(report)
}

/// Run one discovery pass over raw page bytes, transcoding to UTF-8 first.
///
/// # Errors
///
/// Same contract as [`discover`].
pub fn discover_bytes(
    html: &[u8],
    fetcher: &dyn PageFetcher,
    store: &dyn SeenStore,
    options: &Options,
) -> Result<DiscoveryReport> {
    let html_str = encoding::transcode_to_utf8(html);
    discover(&html_str, fetcher, store, options)
}
