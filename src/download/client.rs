//! Streaming file downloader with presence-based dedup.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::error::DownloadError;
use super::filename::filename_from_link;

/// Outcome of a single file download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was fetched and written to the given path.
    Downloaded(PathBuf),
    /// A same-named file already existed; nothing was fetched.
    Skipped(PathBuf),
}

/// HTTP client that streams remote files to a local directory.
///
/// Deliberately plain: no proxy, no extra headers, default TLS. Created once
/// and cloned into tasks; clones share the connection pool.
#[derive(Debug, Clone, Default)]
pub struct FileDownloader {
    client: Client,
}

impl FileDownloader {
    /// Creates a downloader with default client configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Downloads `url` into `output_dir`, skipping if the destination exists.
    ///
    /// The destination name is the link's final path segment (see
    /// [`filename_from_link`]). Presence of the destination is the sole
    /// dedup signal; content is never re-validated. On a mid-stream or
    /// write failure the partial file is removed so the next run retries it.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] on transport failure, non-2xx status, or
    /// filesystem errors.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn download(
        &self,
        url: &str,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let destination = output_dir.join(filename_from_link(url));

        if tokio::fs::metadata(&destination).await.is_ok() {
            debug!(path = %destination.display(), "file already downloaded, skipping");
            return Ok(DownloadOutcome::Skipped(destination));
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let file = File::create(&destination)
            .await
            .map_err(|e| DownloadError::io(destination.clone(), e))?;

        match stream_to_file(file, response, url, &destination).await {
            Ok(bytes) => {
                info!(path = %destination.display(), bytes, "download complete");
                Ok(DownloadOutcome::Downloaded(destination))
            }
            Err(e) => {
                // Remove the partial file: a half-written destination would
                // otherwise satisfy the presence check on the next run.
                debug!(path = %destination.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&destination).await;
                Err(e)
            }
        }
    }
}

/// Streams the response body to the file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    destination: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(destination.to_path_buf(), e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(destination.to_path_buf(), e))?;

    Ok(bytes_written)
}
