//! File-link extraction from listing-page HTML.

use scraper::{Html, Selector};
use tracing::warn;

/// Anchor class marking a downloadable-file entry on a listing page.
const FILE_LINK_SELECTOR: &str = "a.flex-container";

/// Returns the `href` values of all file-entry anchors, in document order.
///
/// Only anchors carrying the listing entry class are considered; anchors of
/// other classes or without an `href` are ignored. The parser is
/// error-recovering, so malformed markup degrades to fewer (possibly zero)
/// links rather than a hard failure. Links may be absolute or relative;
/// resolution against the listing URL is the caller's job.
#[must_use]
pub fn extract_file_links(html: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(FILE_LINK_SELECTOR) else {
        // Static selector; unreachable unless the constant itself is broken.
        warn!(selector = FILE_LINK_SELECTOR, "invalid file-link selector");
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(std::string::ToString::to_string)
        .collect()
}
