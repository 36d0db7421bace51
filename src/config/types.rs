use serde::Deserialize;

/// Fully resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub selectors: FieldSelectors,
}

/// Optional settings file contents; every section falls back to defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub selectors: FieldSelectors,
}

/// Target site addresses, resolved from the environment
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Prefix for listing links
    pub base_url: String,

    /// First page of search results
    pub search_url: String,
}

/// Request behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Pause between successive page fetches (milliseconds)
    pub page_delay_ms: u64,

    /// Query parameter carrying the page number
    pub page_param: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: 1000,
            page_param: "page".to_string(),
            user_agent: format!("listing-harvester/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the CSV file
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "properties.csv".to_string(),
        }
    }
}

/// CSS selectors locating each logical field inside a listing container
///
/// The defaults read area/layout from one column and age/station/walk-time from
/// another. The site markup packs those values together, so the columns repeat.
/// Point an entry at a narrower selector to split them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FieldSelectors {
    /// One property listing on a results page
    pub container: String,
    pub title: String,
    pub price: String,
    pub address: String,
    pub area: String,
    pub layout: String,
    pub age: String,
    pub station: String,
    pub walk_time: String,

    /// Element whose `href` is the listing's detail link
    pub link: String,

    /// Pagination anchors
    pub next_page: String,

    /// Visible text of the "next" anchor
    pub next_label: String,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            container: ".cassetteitem".to_string(),
            title: ".cassetteitem_content-title".to_string(),
            price: ".cassetteitem_price--rent".to_string(),
            address: ".cassetteitem_detail-col1".to_string(),
            area: ".cassetteitem_madori".to_string(),
            layout: ".cassetteitem_madori".to_string(),
            age: ".cassetteitem_detail-col2".to_string(),
            station: ".cassetteitem_detail-col2".to_string(),
            walk_time: ".cassetteitem_detail-col2".to_string(),
            link: ".cassetteitem_other-linktext".to_string(),
            next_page: ".pagination-parts a".to_string(),
            next_label: "次へ".to_string(),
        }
    }
}
