//! The `SummaryWriter` trait implemented by all backend writers.

use pfa_core::SessionRecord;

use crate::OutputResult;

/// Trait implemented by the Parquet, CSV, and SQLite summary writers.
pub trait SummaryWriter {
    /// Append a batch of session records.
    fn write_records(&mut self, records: &[SessionRecord]) -> OutputResult<()>;

    /// Flush and close the underlying sink.
    ///
    /// Idempotent — safe to call more than once.  A Parquet summary written
    /// without `finish()` has no footer and cannot be reopened.
    fn finish(&mut self) -> OutputResult<()>;
}
