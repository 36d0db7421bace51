//! Listing extraction from search result pages
//!
//! This module turns a parsed results page into `ListingRecord`s:
//! - Locating listing containers
//! - Reading each logical field through its configured selector
//! - Detecting the next-page control

use crate::config::FieldSelectors;
use crate::listing::ListingRecord;
use crate::url::listing_url;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selector table for one site layout
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    container: Selector,
    title: Selector,
    price: Selector,
    address: Selector,
    area: Selector,
    layout: Selector,
    age: Selector,
    station: Selector,
    walk_time: Selector,
    link: Selector,
    next_page: Selector,
    next_label: String,
}

impl ListingExtractor {
    /// Compiles every selector in the table
    ///
    /// # Returns
    ///
    /// * `Ok(ListingExtractor)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - Names the first field that failed
    pub fn new(selectors: &FieldSelectors) -> Result<Self, ConfigError> {
        Ok(Self {
            container: compile("container", &selectors.container)?,
            title: compile("title", &selectors.title)?,
            price: compile("price", &selectors.price)?,
            address: compile("address", &selectors.address)?,
            area: compile("area", &selectors.area)?,
            layout: compile("layout", &selectors.layout)?,
            age: compile("age", &selectors.age)?,
            station: compile("station", &selectors.station)?,
            walk_time: compile("walk_time", &selectors.walk_time)?,
            link: compile("link", &selectors.link)?,
            next_page: compile("next_page", &selectors.next_page)?,
            next_label: selectors.next_label.clone(),
        })
    }

    /// Counts the listing containers on a page
    pub fn count_listings(&self, document: &Html) -> usize {
        document.select(&self.container).count()
    }

    /// Extracts one record per listing container, in document order
    ///
    /// Missing fields become empty strings. The record URL is `base_url` followed
    /// by the trimmed `href` of the first link element, or `base_url` alone.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_harvester::config::FieldSelectors;
    /// use listing_harvester::crawler::{parse_document, ListingExtractor};
    ///
    /// let html = r#"<div class="cassetteitem">
    ///     <div class="cassetteitem_content-title"> Maison Kanda </div>
    ///     <a class="cassetteitem_other-linktext" href="/chintai/jnc_1/">detail</a>
    /// </div>"#;
    /// let extractor = ListingExtractor::new(&FieldSelectors::default()).unwrap();
    /// let records = extractor.extract(&parse_document(html), "https://suumo.jp");
    /// assert_eq!(records[0].title, "Maison Kanda");
    /// assert_eq!(records[0].url, "https://suumo.jp/chintai/jnc_1/");
    /// ```
    pub fn extract(&self, document: &Html, base_url: &str) -> Vec<ListingRecord> {
        document
            .select(&self.container)
            .map(|container| self.extract_listing(container, base_url))
            .collect()
    }

    /// Returns true if the page offers a next-page control
    ///
    /// A pagination anchor counts when its visible text contains the configured label.
    pub fn has_next_page(&self, document: &Html) -> bool {
        document
            .select(&self.next_page)
            .any(|anchor| anchor.text().collect::<String>().contains(&self.next_label))
    }

    fn extract_listing(&self, container: ElementRef<'_>, base_url: &str) -> ListingRecord {
        let href = container
            .select(&self.link)
            .next()
            .and_then(|element| element.value().attr("href"));

        ListingRecord {
            title: field_text(container, &self.title),
            price: field_text(container, &self.price),
            address: field_text(container, &self.address),
            area: field_text(container, &self.area),
            layout: field_text(container, &self.layout),
            age: field_text(container, &self.age),
            station: field_text(container, &self.station),
            walk_time: field_text(container, &self.walk_time),
            url: listing_url(base_url, href),
        }
    }
}

/// Parses a response body into a queryable document
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Trims surrounding whitespace, including newlines left by nested markup
///
/// Idempotent: normalizing an already normalized string returns it unchanged.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_string()
}

/// Concatenated text of every match inside the container, normalized
fn field_text(container: ElementRef<'_>, selector: &Selector) -> String {
    let raw: String = container
        .select(selector)
        .flat_map(|element| element.text())
        .collect();

    normalize_text(&raw)
}

fn compile(field: &str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
        field: field.to_string(),
        message: format!("'{}': {:?}", css, e),
    })
}
