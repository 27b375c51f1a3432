//! Error types for listing fetches.

use thiserror::Error;

/// Errors that can occur while fetching one listing page.
///
/// None of these are fatal to the run: a failed listing is treated as
/// "nothing published here" and the task ends early.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Network-level error (DNS, connection refused, TLS, proxy).
    #[error("network error fetching listing {url}: {source}")]
    Network {
        /// The listing URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before the listing arrived.
    #[error("timeout fetching listing {url}")]
    Timeout {
        /// The listing URL that timed out.
        url: String,
    },

    /// Non-2xx response; for never-published dates this is the normal case.
    #[error("HTTP {status} fetching listing {url}")]
    HttpStatus {
        /// The listing URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Response body could not be read as text.
    #[error("failed reading listing body from {url}: {source}")]
    Body {
        /// The listing URL.
        url: String,
        /// The underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction failed (bad proxy configuration).
    #[error("failed to build listing HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl ListingError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a body-read error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }
}
