//! Crawler module for fetching and processing result pages
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - Listing extraction and next-page detection
//! - Request pacing between pages
//! - The pagination loop tying them together

mod extractor;
mod fetcher;
mod paginator;
mod throttle;

pub use extractor::{normalize_text, parse_document, ListingExtractor};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use paginator::{run_scrape, Paginator};
pub use throttle::{Sleeper, TokioSleeper};
