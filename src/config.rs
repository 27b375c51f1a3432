//! Validated run configuration.
//!
//! All configuration errors are fatal and surface here, before any network
//! activity begins. Everything downstream of [`RunConfig`] can assume a
//! sane year window and a well-formed proxy URL.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Earliest year with published listings.
pub const MIN_YEAR: u16 = 2016;

/// Latest year with published listings.
pub const MAX_YEAR: u16 = 2025;

/// Default number of concurrent listing tasks.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default local directory for downloaded parquet files.
pub const DEFAULT_OUTPUT_DIR: &str = "parquet_files";

/// Root of the listing URL space. Tasks append
/// `source={dataset}/year={year}/month={MM}/day={DD}/`.
pub const DEFAULT_BASE_URL: &str = "https://openintel.nl/download/forward-dns/basis=toplist";

/// Dataset sources published under the toplist basis.
pub const DATASETS: [&str; 4] = ["alexa", "radar", "tranco", "umbrella"];

/// Errors raised while building a [`RunConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested year window is outside the published range or inverted.
    #[error(
        "invalid year range {start}-{end}: must satisfy {MIN_YEAR} <= start <= end <= {MAX_YEAR}"
    )]
    YearRange {
        /// Requested start year.
        start: u16,
        /// Requested end year.
        end: u16,
    },

    /// The proxy URL could not be parsed.
    #[error("invalid proxy URL {value:?}: {source}")]
    InvalidProxy {
        /// The raw proxy string as given.
        value: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Immutable configuration for one crawl run.
///
/// Built from CLI arguments (or directly in tests), validated on
/// construction. The listing base URL is overridable so tests can point the
/// whole pipeline at a stub server.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// First year to enumerate (inclusive).
    pub start_year: u16,
    /// Last year to enumerate (inclusive).
    pub end_year: u16,
    /// Optional HTTP proxy for listing fetches.
    pub proxy: Option<Url>,
    /// Dataset sources to enumerate.
    pub datasets: Vec<String>,
    /// Root of the listing URL space.
    pub base_url: String,
    /// Directory downloaded files are written to (created if absent).
    pub output_dir: PathBuf,
    /// Maximum number of listing tasks in flight.
    pub concurrency: usize,
}

impl RunConfig {
    /// Creates a configuration for the given year window with defaults for
    /// everything else.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::YearRange`] if the window is inverted or falls
    /// outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(start_year: u16, end_year: u16) -> Result<Self, ConfigError> {
        if start_year < MIN_YEAR || end_year > MAX_YEAR || start_year > end_year {
            return Err(ConfigError::YearRange {
                start: start_year,
                end: end_year,
            });
        }

        Ok(Self {
            start_year,
            end_year,
            proxy: None,
            datasets: DATASETS.iter().map(|d| (*d).to_string()).collect(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    /// Sets the HTTP proxy used for listing fetches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] if `raw` is not a valid URL.
    pub fn with_proxy(mut self, raw: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidProxy {
            value: raw.to_string(),
            source,
        })?;
        self.proxy = Some(parsed);
        Ok(self)
    }
}
