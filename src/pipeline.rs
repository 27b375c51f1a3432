//! Semaphore-bounded fan-out over all listing tasks.
//!
//! The pipeline enumerates every listing task, runs each one in its own
//! tokio task behind a fixed permit budget, and waits for all of them. One
//! task = fetch the listing, extract its file links, download each link in
//! order. Per-task failures are counted, never propagated: the run favors
//! maximal completion over fail-fast.
//!
//! # Concurrency model
//!
//! - Each listing task runs in its own tokio task
//! - An owned semaphore permit is acquired before spawning
//! - Permits are released automatically when tasks end (RAII), success or not
//! - Within a task, downloads happen sequentially in extraction order
//! - No ordering guarantee exists across tasks

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::RunConfig;
use crate::download::{DownloadOutcome, FileDownloader};
use crate::enumerate::{enumerate_tasks, task_count};
use crate::listing::{ListingClient, extract_file_links};

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Aggregate outcome of one crawl run.
///
/// Uses atomic counters so concurrent tasks can update it without locking.
/// Callers and tests assert on these counts instead of scraping log output.
#[derive(Debug, Default)]
pub struct RunStats {
    listings_fetched: AtomicUsize,
    listings_missing: AtomicUsize,
    files_downloaded: AtomicUsize,
    files_skipped: AtomicUsize,
    files_failed: AtomicUsize,
}

impl RunStats {
    /// Creates a stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listings that returned 2xx and were scanned for links.
    #[must_use]
    pub fn listings_fetched(&self) -> usize {
        self.listings_fetched.load(Ordering::SeqCst)
    }

    /// Listings that failed to fetch (non-2xx, timeout, transport error).
    #[must_use]
    pub fn listings_missing(&self) -> usize {
        self.listings_missing.load(Ordering::SeqCst)
    }

    /// Files fetched and written to disk.
    #[must_use]
    pub fn files_downloaded(&self) -> usize {
        self.files_downloaded.load(Ordering::SeqCst)
    }

    /// Files skipped because a same-named local copy already existed.
    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.files_skipped.load(Ordering::SeqCst)
    }

    /// Files whose download was abandoned on an error.
    #[must_use]
    pub fn files_failed(&self) -> usize {
        self.files_failed.load(Ordering::SeqCst)
    }

    fn record_listing_fetched(&self) {
        self.listings_fetched.fetch_add(1, Ordering::SeqCst);
    }

    fn record_listing_missing(&self) {
        self.listings_missing.fetch_add(1, Ordering::SeqCst);
    }

    fn record_file_downloaded(&self) {
        self.files_downloaded.fetch_add(1, Ordering::SeqCst);
    }

    fn record_file_skipped(&self) {
        self.files_skipped.fetch_add(1, Ordering::SeqCst);
    }

    fn record_file_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Coordinator that runs every listing task under a fixed permit budget.
#[derive(Debug)]
pub struct Pipeline {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl Pipeline {
    /// Creates a pipeline with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    pub fn new(concurrency: usize) -> Result<Self, PipelineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(PipelineError::InvalidConcurrency { value: concurrency });
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs the full crawl: every enumerated listing, bounded fan-out,
    /// returns once all tasks have completed.
    ///
    /// Individual listing or download failures never cause this method to
    /// error; they are counted in the returned [`RunStats`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::OutputDir`] if the output directory cannot
    /// be created, or [`PipelineError::SemaphoreClosed`] if the semaphore is
    /// closed.
    #[instrument(skip(self, config, listing_client, downloader), fields(output_dir = %config.output_dir.display()))]
    pub async fn run(
        &self,
        config: &RunConfig,
        listing_client: &ListingClient,
        downloader: &FileDownloader,
    ) -> Result<RunStats, PipelineError> {
        tokio::fs::create_dir_all(&config.output_dir)
            .await
            .map_err(|source| PipelineError::OutputDir {
                path: config.output_dir.clone(),
                source,
            })?;

        let total = task_count(config.start_year, config.end_year, config.datasets.len());
        info!(
            start_year = config.start_year,
            end_year = config.end_year,
            datasets = config.datasets.len(),
            tasks = total,
            concurrency = self.concurrency,
            "starting crawl"
        );

        let stats = Arc::new(RunStats::new());
        let mut handles = Vec::with_capacity(total);

        for task in enumerate_tasks(config.start_year, config.end_year, &config.datasets) {
            let url = task.listing_url(&config.base_url);

            // Acquire semaphore permit (blocks if at concurrency limit)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| PipelineError::SemaphoreClosed)?;

            let listing_client = listing_client.clone();
            let downloader = downloader.clone();
            let stats = Arc::clone(&stats);
            let output_dir = config.output_dir.clone();

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = permit;
                process_listing(&url, &listing_client, &downloader, &output_dir, &stats).await;
            }));
        }

        debug!(task_count = handles.len(), "waiting for tasks to complete");

        for handle in handles {
            // Task panics are logged but don't fail the run
            if let Err(e) = handle.await {
                warn!(error = %e, "listing task panicked");
            }
        }

        info!(
            listings_fetched = stats.listings_fetched(),
            listings_missing = stats.listings_missing(),
            files_downloaded = stats.files_downloaded(),
            files_skipped = stats.files_skipped(),
            files_failed = stats.files_failed(),
            "crawl complete"
        );

        // All tasks are joined, so this Arc should have sole ownership.
        match Arc::try_unwrap(stats) {
            Ok(stats) => Ok(stats),
            Err(arc_stats) => {
                let fresh = RunStats::new();
                fresh
                    .listings_fetched
                    .store(arc_stats.listings_fetched(), Ordering::SeqCst);
                fresh
                    .listings_missing
                    .store(arc_stats.listings_missing(), Ordering::SeqCst);
                fresh
                    .files_downloaded
                    .store(arc_stats.files_downloaded(), Ordering::SeqCst);
                fresh
                    .files_skipped
                    .store(arc_stats.files_skipped(), Ordering::SeqCst);
                fresh
                    .files_failed
                    .store(arc_stats.files_failed(), Ordering::SeqCst);
                Ok(fresh)
            }
        }
    }
}

/// Processes one listing: fetch, extract, download each link in order.
///
/// Never returns an error; every failure path updates `stats` and ends the
/// affected unit of work only.
async fn process_listing(
    url: &str,
    listing_client: &ListingClient,
    downloader: &FileDownloader,
    output_dir: &Path,
    stats: &RunStats,
) {
    debug!(url = %url, "checking listing");

    let html = match listing_client.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            // The common case for calendar-invalid dates: nothing here.
            debug!(url = %url, error = %e, "no listing");
            stats.record_listing_missing();
            return;
        }
    };

    stats.record_listing_fetched();

    let links = extract_file_links(&html);
    debug!(url = %url, links = links.len(), "listing scanned");

    for link in links {
        let Some(file_url) = resolve_link(url, &link) else {
            warn!(listing = %url, link = %link, "unresolvable file link");
            stats.record_file_failed();
            continue;
        };

        match downloader.download(&file_url, output_dir).await {
            Ok(DownloadOutcome::Downloaded(_)) => stats.record_file_downloaded(),
            Ok(DownloadOutcome::Skipped(path)) => {
                debug!(path = %path.display(), "file already downloaded");
                stats.record_file_skipped();
            }
            Err(e) => {
                warn!(url = %file_url, error = %e, "download failed");
                stats.record_file_failed();
            }
        }
    }
}

/// Resolves an extracted link to an absolute URL.
///
/// Absolute links are used verbatim; relative links are joined against the
/// listing URL they were found on.
fn resolve_link(listing_url: &str, link: &str) -> Option<String> {
    if Url::parse(link).is_ok() {
        return Some(link.to_string());
    }
    let base = Url::parse(listing_url).ok()?;
    base.join(link).ok().map(String::from)
}
