//! Run summary
//!
//! Collected by the pagination loop and reported once the run stops.

use std::fmt;

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page had no listing containers
    EmptyPage { page: u32 },

    /// The page had listings but no next-page control
    NoNextPage { page: u32 },
}

impl StopReason {
    /// The page on which the run stopped
    pub fn page(&self) -> u32 {
        match self {
            Self::EmptyPage { page } | Self::NoNextPage { page } => *page,
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPage { page } => write!(f, "page {} had no listings", page),
            Self::NoNextPage { page } => write!(f, "page {} had no next-page link", page),
        }
    }
}

/// Totals for one completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages requested, including a final empty one
    pub pages_fetched: u32,

    /// Rows written to the sink
    pub records_written: u64,

    pub stop_reason: StopReason,
}

impl RunSummary {
    /// Average records per page that produced output
    pub fn records_per_page(&self) -> f64 {
        let productive = match self.stop_reason {
            StopReason::EmptyPage { .. } => self.pages_fetched.saturating_sub(1),
            StopReason::NoNextPage { .. } => self.pages_fetched,
        };

        if productive == 0 {
            return 0.0;
        }
        self.records_written as f64 / productive as f64
    }
}

/// One-line notice printed at the end of every successful run, even in quiet mode
pub fn completion_notice(summary: &RunSummary) -> String {
    format!(
        "Scraping completed: {} listings from {} pages",
        summary.records_written, summary.pages_fetched
    )
}

/// Prints the summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Run Summary ===");
    println!("  Pages fetched:   {}", summary.pages_fetched);
    println!("  Records written: {}", summary.records_written);
    println!("  Records/page:    {:.1}", summary.records_per_page());
    println!("  Stopped because: {}", summary.stop_reason);
}
