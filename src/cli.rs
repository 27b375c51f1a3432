//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use openintel_dl::{DEFAULT_CONCURRENCY, DEFAULT_OUTPUT_DIR, MAX_YEAR, MIN_YEAR};

/// Bulk-download OpenIntel forward-DNS toplist parquet files.
///
/// Crawls the daily listing pages for every configured dataset over a year
/// range and downloads each linked file once. Already-present files are
/// skipped, so the tool is safe to re-run.
#[derive(Parser, Debug)]
#[command(name = "openintel-dl")]
#[command(author, version, about)]
pub struct Args {
    /// First year to crawl (2016-2025)
    #[arg(long, default_value_t = MIN_YEAR)]
    pub start_year: u16,

    /// Last year to crawl (2016-2025)
    #[arg(long, default_value_t = MAX_YEAR)]
    pub end_year: u16,

    /// HTTP proxy URL for listing fetches (optional)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Directory to save downloaded files to
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum concurrent listing tasks (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
