//! Grid observer trait for progress reporting and diagnostics.

use pfa_core::{ExpParams, SessionRecord};
use pfa_source::SourceError;

use crate::orchestrator::GridStats;

/// Callbacks invoked by [`run_grid`][crate::run_grid] as combinations
/// complete.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Under parallel dispatch the callbacks
/// are serialized behind a lock — they may fire in any combination order,
/// but never concurrently, and `done` counts are exact.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl GridObserver for ProgressPrinter {
///     fn on_combination_done(
///         &mut self,
///         params:  &ExpParams,
///         records: &[SessionRecord],
///         done:    usize,
///         total:   usize,
///     ) {
///         println!("[{done}/{total}] {params}: {} records", records.len());
///     }
/// }
/// ```
pub trait GridObserver {
    /// Called once before any combination is dispatched.
    fn on_grid_start(&mut self, _total: usize) {}

    /// Called after a combination completes, with its records.
    fn on_combination_done(
        &mut self,
        _params:  &ExpParams,
        _records: &[SessionRecord],
        _done:    usize,
        _total:   usize,
    ) {
    }

    /// Called when a combination's filtered event set came back empty —
    /// usually an upstream simulation failure worth investigating.
    fn on_combination_empty(&mut self, _params: &ExpParams) {}

    /// Called when the event source failed for a combination.
    fn on_combination_failed(&mut self, _params: &ExpParams, _error: &SourceError) {}

    /// Called once after the last combination, before `run_grid` returns.
    /// Not called when the run aborts with an error.
    fn on_grid_end(&mut self, _stats: &GridStats) {}
}

/// A [`GridObserver`] that does nothing.
pub struct NoopObserver;

impl GridObserver for NoopObserver {}
