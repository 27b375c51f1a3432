//! HTTP client for listing pages.
//!
//! The listing endpoint sits behind a click-through data agreement and only
//! serves directory indexes when the agreement cookie is present, so the
//! cookie is attached as a default header on every request. Certificate
//! validation is disabled for this endpoint; that trade-off is inherited
//! from the source deployment and must not be widened to other clients.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Proxy};
use tracing::{debug, instrument};
use url::Url;

use super::error::ListingError;

/// Per-request timeout for listing fetches.
pub const LISTING_TIMEOUT_SECS: u64 = 30;

/// Cookie asserting the OpenIntel data agreement has been accepted.
const DATA_AGREEMENT_COOKIE: &str = "openintel-data-agreement-accepted=true";

/// HTTP client for fetching listing pages.
///
/// Immutably configured at construction and cheap to clone; create one in
/// `main` and share it across tasks.
#[derive(Debug, Clone)]
pub struct ListingClient {
    client: Client,
}

impl ListingClient {
    /// Creates a listing client, optionally routing through a proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::ClientBuild`] if the underlying client cannot
    /// be constructed (e.g. unsupported proxy scheme).
    pub fn new(proxy: Option<&Url>) -> Result<Self, ListingError> {
        Self::with_timeout(proxy, LISTING_TIMEOUT_SECS)
    }

    /// Creates a listing client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::ClientBuild`] if the underlying client cannot
    /// be constructed.
    #[instrument(level = "debug", skip(proxy), fields(proxy = proxy.is_some()))]
    pub fn with_timeout(proxy: Option<&Url>, timeout_secs: u64) -> Result<Self, ListingError> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(DATA_AGREEMENT_COOKIE));

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(true)
            .gzip(true);

        if let Some(proxy_url) = proxy {
            let resolved = Proxy::all(proxy_url.as_str())
                .map_err(|source| ListingError::ClientBuild { source })?;
            builder = builder.proxy(resolved);
        }

        let client = builder
            .build()
            .map_err(|source| ListingError::ClientBuild { source })?;

        Ok(Self { client })
    }

    /// Fetches one listing page and returns its HTML body.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError`] on transport failure, timeout, non-2xx
    /// status, or an unreadable body. A non-2xx status is the expected
    /// outcome for dates with no published listing.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<String, ListingError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ListingError::timeout(url)
            } else {
                ListingError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::http_status(url, status.as_u16()));
        }

        debug!(status = status.as_u16(), "listing fetched");

        response
            .text()
            .await
            .map_err(|source| ListingError::body(url, source))
    }
}
