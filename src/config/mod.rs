//! Configuration module for Listing Harvester
//!
//! The run configuration has two origins:
//! - `BASE_URL` and `SEARCH_URL`, resolved from the environment (a `.env` file is honoured)
//! - an optional TOML settings file for request behaviour, output path and the selector table
//!
//! Both are resolved once, before the first request.
//!
//! # Example
//!
//! ```no_run
//! use listing_harvester::config::{load_config, EnvSource};
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("harvester.toml")), &EnvSource::new()).unwrap();
//! println!("Starting at {}", config.site.search_url);
//! ```

mod parser;
mod source;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FieldSelectors, OutputConfig, Settings, SiteConfig};

// Re-export loaders
pub use parser::{load_config, load_settings, override_output, resolve_site};
pub use source::{ConfigSource, EnvSource, MapSource, BASE_URL_KEY, SEARCH_URL_KEY};
pub use validation::{validate, MIN_PAGE_DELAY_MS};
