//! Integration tests for the listing harvester
//!
//! These tests use wiremock to serve search result pages and exercise the
//! pagination loop end-to-end against a real HTTP client.

mod pacing_tests;
mod scrape_tests;
