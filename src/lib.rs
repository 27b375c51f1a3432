//! OpenIntel forward-DNS toplist downloader.
//!
//! This library crawls the OpenIntel listing pages for every
//! (dataset, year, month, day) combination in a configured range, extracts
//! the parquet file links from each listing, and downloads every file to a
//! local directory exactly once.
//!
//! # Architecture
//!
//! - [`config`] - Validated run configuration
//! - [`enumerate`] - Listing-task enumeration and URL templating
//! - [`listing`] - Listing-page fetch and link extraction
//! - [`download`] - File download with presence-based dedup
//! - [`pipeline`] - Semaphore-bounded fan-out over all listing tasks

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod enumerate;
pub mod listing;
pub mod pipeline;

// Re-export commonly used types
pub use config::{
    ConfigError, DATASETS, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_OUTPUT_DIR, MAX_YEAR,
    MIN_YEAR, RunConfig,
};
pub use download::{DownloadError, DownloadOutcome, FileDownloader, filename_from_link};
pub use enumerate::{ListingTask, enumerate_tasks, task_count};
pub use listing::{ListingClient, ListingError, extract_file_links};
pub use pipeline::{Pipeline, PipelineError, RunStats};
