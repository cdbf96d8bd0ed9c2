//! Error types for grid orchestration.

use thiserror::Error;

use pfa_core::ExpParams;
use pfa_source::SourceError;

/// Errors that abort a grid run.
///
/// Under [`ErrorPolicy::Continue`][crate::ErrorPolicy::Continue] source
/// failures are counted instead of raised; `Source` only surfaces under
/// `Abort`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("event source failed for combination {params}: {source}")]
    Source {
        params: ExpParams,
        #[source]
        source: SourceError,
    },

    #[error("worker pool error: {0}")]
    Pool(String),
}

/// Alias for `Result<T, GridError>`.
pub type GridResult<T> = Result<T, GridError>;
