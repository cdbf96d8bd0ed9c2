//! Error types for event-source backends.

use thiserror::Error;

/// Errors that can occur while reading an event table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("event table schema error: {0}")]
    Schema(String),

    #[error("malformed event row: {0}")]
    Decode(#[from] pfa_core::CoreError),
}

/// Alias for `Result<T, SourceError>`.
pub type SourceResult<T> = Result<T, SourceError>;
