//! Record sink trait
//!
//! The pagination loop writes through `RecordSink`; `CsvSink` is the file-backed
//! implementation and `MemorySink` keeps rows in memory.

use crate::listing::ListingRecord;
use crate::OutputResult;

/// Destination for extracted listing records
pub trait RecordSink {
    /// Appends one record
    fn write_record(&mut self, record: &ListingRecord) -> OutputResult<()>;

    /// Pushes buffered rows to the underlying storage
    ///
    /// Called after every page so a later failure leaves complete rows behind.
    fn flush(&mut self) -> OutputResult<()>;

    /// Number of records written so far
    fn records_written(&self) -> u64;
}

/// Collects records in a vector
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<ListingRecord>,
    pub flushes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &ListingRecord) -> OutputResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.flushes += 1;
        Ok(())
    }

    fn records_written(&self) -> u64 {
        self.records.len() as u64
    }
}
