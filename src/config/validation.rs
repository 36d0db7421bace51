use crate::config::source::{BASE_URL_KEY, SEARCH_URL_KEY};
use crate::config::types::{Config, CrawlerConfig, FieldSelectors, OutputConfig, SiteConfig};
use crate::crawler::ListingExtractor;
use crate::url::parse_http_url;
use crate::ConfigError;

/// Lowest accepted pause between page fetches
pub const MIN_PAGE_DELAY_MS: u64 = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    parse_http_url(BASE_URL_KEY, &config.base_url)?;
    parse_http_url(SEARCH_URL_KEY, &config.search_url)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.page_delay_ms < MIN_PAGE_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "page_delay_ms must be >= {}ms, got {}ms",
            MIN_PAGE_DELAY_MS, config.page_delay_ms
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    // The parameter is spliced into the query string as-is
    if config.page_param.is_empty()
        || !config
            .page_param
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "page_param must be a non-empty alphanumeric name, got '{}'",
            config.page_param
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_selectors(selectors: &FieldSelectors) -> Result<(), ConfigError> {
    if selectors.next_label.trim().is_empty() {
        return Err(ConfigError::Validation(
            "next_label cannot be empty".to_string(),
        ));
    }

    ListingExtractor::new(selectors).map(|_| ())
}
