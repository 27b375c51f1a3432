//! CLI entry point for the OpenIntel downloader.

use anyhow::Result;
use clap::Parser;
use openintel_dl::{FileDownloader, ListingClient, Pipeline, RunConfig};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // Build and validate configuration before any network activity
    let mut config = RunConfig::new(args.start_year, args.end_year)?;
    config.output_dir = args.output_dir;
    config.concurrency = usize::from(args.concurrency);
    if let Some(proxy) = args.proxy.as_deref() {
        config = config.with_proxy(proxy)?;
        info!(proxy = %proxy, "using proxy for listing fetches");
    }

    info!(
        start_year = config.start_year,
        end_year = config.end_year,
        output_dir = %config.output_dir.display(),
        "OpenIntel downloader starting"
    );

    let listing_client = ListingClient::new(config.proxy.as_ref())?;
    let downloader = FileDownloader::new();
    let pipeline = Pipeline::new(config.concurrency)?;

    let stats = pipeline.run(&config, &listing_client, &downloader).await?;

    info!(
        listings_fetched = stats.listings_fetched(),
        listings_missing = stats.listings_missing(),
        files_downloaded = stats.files_downloaded(),
        files_skipped = stats.files_skipped(),
        files_failed = stats.files_failed(),
        "process completed"
    );

    Ok(())
}
