//! Destination naming for downloaded files.
//!
//! Kept in one function so a stricter sanitizing variant can replace it
//! without touching the writer's control flow. The default takes the URL's
//! final path segment as-is, which matches the dedup contract: whatever name
//! the link carries is the name checked for on disk.

use url::Url;

/// Name used when a link has no usable final path segment.
const FALLBACK_NAME: &str = "download";

/// Derives the local file name for a file link: the final path segment.
///
/// Works for absolute URLs and bare/relative link strings alike. Query and
/// fragment parts are not considered part of the name. Returns `download`
/// when the link ends in a slash or has an empty path.
#[must_use]
pub fn filename_from_link(link: &str) -> String {
    if let Ok(parsed) = Url::parse(link) {
        return parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .unwrap_or(FALLBACK_NAME)
            .to_string();
    }

    // Relative link: strip fragment and query by hand, then take the last
    // path component.
    let without_fragment = link.split('#').next().unwrap_or(link);
    let without_query = without_fragment.split('?').next().unwrap_or(link);
    without_query
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}
