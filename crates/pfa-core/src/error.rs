//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where the decoding boundary needs it.

use thiserror::Error;

/// Errors raised when decoding raw log values into typed core types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown operation code {0}")]
    UnknownOpCode(u32),

    #[error("unknown operation name {0:?}")]
    UnknownOpName(String),

    #[error("unknown outcome label {0:?}")]
    UnknownOutcomeLabel(String),
}

/// Shorthand result type for decoding operations.
pub type CoreResult<T> = Result<T, CoreError>;
