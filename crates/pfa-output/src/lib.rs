//! `pfa-output` — durable sinks for merged session-record summary tables.
//!
//! Three backends are provided, Parquet and CSV always, SQLite behind a
//! Cargo feature:
//!
//! | Feature   | Backend | File                                              |
//! |-----------|---------|---------------------------------------------------|
//! | *(none)*  | Parquet | `summary.parquet` (or any path you choose)        |
//! | *(none)*  | CSV     | plain-text summary with a `NaN` literal for faults |
//! | `sqlite`  | SQLite  | `session_records` table                           |
//!
//! All backends implement [`SummaryWriter`] and are driven either directly
//! or through [`GridOutputObserver`], which implements
//! `pfa_grid::GridObserver` and streams each completed combination's
//! records into the writer as the sweep runs.
//!
//! Fault records are preserved losslessly: `NaN` float placeholders and the
//! fault-tag string survive a write/read round trip (SQLite stores `NaN` as
//! `NULL`; the reader maps it back).
//!
//! # Usage
//!
//! ```rust,ignore
//! use pfa_grid::run_grid;
//! use pfa_output::{GridOutputObserver, ParquetSummaryWriter};
//!
//! let writer = ParquetSummaryWriter::new(Path::new("summary.parquet"))?;
//! let mut obs = GridOutputObserver::new(writer);
//! run_grid(&config, &source, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod parquet;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::{read_summary_csv, CsvSummaryWriter};
pub use error::{OutputError, OutputResult};
pub use observer::GridOutputObserver;
pub use parquet::{read_summary_parquet, ParquetSummaryWriter};
pub use writer::SummaryWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSummaryWriter;
