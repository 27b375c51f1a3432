//! File download with presence-based dedup.
//!
//! The download directory itself is the dedup index: a file is skipped when
//! an entry with the same name already exists, and nothing is ever hashed,
//! renamed, or deleted once written. Deliberately a plainer client than the
//! listing fetcher (no proxy, no cookie, default TLS); see DESIGN.md.

mod client;
mod error;
mod filename;

pub use client::{DownloadOutcome, FileDownloader};
pub use error::DownloadError;
pub use filename::filename_from_link;
