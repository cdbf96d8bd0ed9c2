//! The `EventSource` trait implemented by all backends.

use pfa_core::{ExpParams, PfEvent};

use crate::error::SourceResult;

/// A columnar event table that can be read by experiment-parameter key.
///
/// `load` returns every row matching the five parameter equalities, fully
/// typed, in no particular order — callers sort.  Sentinel-session rows
/// (`session_id == 0`) are excluded, with one exception: switch-off marker
/// rows are always returned, whichever session ID the simulation stamped on
/// them, because the vehicle processor needs the marker to close each
/// vehicle's observed window.  Implementations must support concurrent
/// `load` calls from independent threads (each call opens its own reader
/// state).
pub trait EventSource: Send + Sync {
    /// Read all session rows for one experiment-parameter point.
    fn load(&self, params: &ExpParams) -> SourceResult<Vec<PfEvent>>;
}
