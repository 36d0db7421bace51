//! Output module for harvested listings
//!
//! This module handles:
//! - Writing listing records as CSV rows
//! - Summarizing a finished run

mod csv_sink;
pub mod summary;
mod traits;

pub use csv_sink::CsvSink;
pub use summary::{completion_notice, print_summary, RunSummary, StopReason};
pub use traits::{MemorySink, RecordSink};
