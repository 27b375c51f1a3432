//! Listing-page fetch and link extraction.
//!
//! A listing page is a remote HTML directory index for one
//! (dataset, year, month, day) combination. [`ListingClient`] fetches it with
//! the data-agreement cookie attached; [`extract_file_links`] pulls the file
//! links out of the returned markup.

mod client;
mod error;
mod extract;

pub use client::{LISTING_TIMEOUT_SECS, ListingClient};
pub use error::ListingError;
pub use extract::extract_file_links;
