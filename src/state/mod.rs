//! State module for tracking pagination progress
//!
//! # Components
//!
//! - `Phase`: Where the controller is within one fetch/extract/decide iteration
//! - `PageState`: Page number, request URL and next-page signal for the current page

mod page_state;

// Re-export main types
pub use page_state::{PageState, Phase};
