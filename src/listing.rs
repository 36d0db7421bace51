//! Listing record definition
//!
//! A `ListingRecord` is one normalized row of output. Every field is a plain
//! string; an empty string means the field was not present on the page.

/// One extracted property listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: String,
    pub price: String,
    pub address: String,
    pub area: String,
    pub layout: String,
    pub age: String,
    pub station: String,
    pub walk_time: String,
    pub url: String,
}

impl ListingRecord {
    /// Output column headers, in row order
    pub const COLUMNS: [&'static str; 9] = [
        "Title",
        "Price",
        "Address",
        "Area",
        "Layout",
        "Age",
        "Station",
        "Walk Time",
        "URL",
    ];

    /// Returns the field values in the same order as [`Self::COLUMNS`]
    pub fn as_row(&self) -> [&str; 9] {
        [
            &self.title,
            &self.price,
            &self.address,
            &self.area,
            &self.layout,
            &self.age,
            &self.station,
            &self.walk_time,
            &self.url,
        ]
    }
}
