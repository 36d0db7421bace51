//! URL handling for search pagination and listing links
//!
//! Search pages are addressed by appending a page parameter to the configured
//! search URL. Listing links are made absolute by plain concatenation with the
//! configured base URL, mirroring how the target site emits root-relative hrefs.

use crate::ConfigError;
use ::url::Url;

/// Builds the request URL for a given result page
///
/// Page 1 is the search URL itself. Later pages append `<param>=<page>` to the
/// *original* search URL, so parameters never accumulate across pages.
///
/// # Examples
///
/// ```
/// use listing_harvester::url::page_url;
///
/// let search = "https://example.com/search?ar=030";
/// assert_eq!(page_url(search, 1, "page"), search);
/// assert_eq!(page_url(search, 3, "page"), "https://example.com/search?ar=030&page=3");
/// ```
pub fn page_url(search_url: &str, page: u32, param: &str) -> String {
    if page <= 1 {
        return search_url.to_string();
    }

    let separator = if search_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", search_url, separator, param, page)
}

/// Builds the absolute URL of a listing from its page-relative link
///
/// The link is trimmed and appended to the base URL verbatim. A missing link
/// degrades to the base URL alone.
pub fn listing_url(base_url: &str, relative_link: Option<&str>) -> String {
    let link = relative_link.map(str::trim).unwrap_or_default();
    format!("{}{}", base_url, link)
}

/// Parses a configured URL and checks that it is absolute HTTP(S)
pub fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("{} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!("{} has no host: '{}'", key, value)));
    }

    Ok(url)
}
