//! `pfa-source` — typed, filtered access to the operation-log event table.
//!
//! Three backends implement [`EventSource`]:
//!
//! | Backend                | Filtering                                       |
//! |------------------------|-------------------------------------------------|
//! | [`ParquetEventSource`] | Equality predicates pushed down into the Parquet reader |
//! | [`CsvEventSource`]     | Row-by-row during the scan (the format has no pushdown) |
//! | [`MemoryEventSource`]  | In-memory scan; for tests and demos             |
//!
//! Every `load` call opens its own reader, so one source value can serve
//! concurrent readers without mutation races.  Type coercion happens here
//! and only here: malformed rows (unknown operation codes, missing or
//! mistyped columns) are rejected with [`SourceError`] at this boundary and
//! never reach the reconciliation code.

pub mod csv;
pub mod error;
pub mod memory;
pub mod parquet;
pub mod source;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::CsvEventSource;
pub use error::{SourceError, SourceResult};
pub use memory::MemoryEventSource;
pub use parquet::{event_schema, write_event_table, ParquetEventSource};
pub use source::EventSource;
