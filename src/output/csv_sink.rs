//! CSV output
//!
//! The file is opened once per run. The header goes out immediately, so even a
//! run that fails on its first request leaves a well-formed file behind.

use crate::listing::ListingRecord;
use crate::output::traits::RecordSink;
use crate::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes listing records as RFC 4180 CSV rows
///
/// Dropping the sink flushes it; rows written before an early return survive.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    records_written: u64,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path` and writes the header row
    pub fn create(path: &Path) -> OutputResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        tracing::debug!("Opened output file {}", path.display());
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps any writer and writes the header row
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);

        writer.write_record(ListingRecord::COLUMNS)?;
        writer.flush()?;

        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer.into_inner().map_err(|e| {
            OutputError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &ListingRecord) -> OutputResult<()> {
        self.writer.write_record(record.as_row())?;
        self.records_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn records_written(&self) -> u64 {
        self.records_written
    }
}
