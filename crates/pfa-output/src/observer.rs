//! `GridOutputObserver<W>` — bridges `GridObserver` to a `SummaryWriter`.

use pfa_core::{ExpParams, SessionRecord};
use pfa_grid::{GridObserver, GridStats};

use crate::writer::SummaryWriter;
use crate::OutputError;

/// A [`GridObserver`] that streams each completed combination's records
/// into any [`SummaryWriter`] backend, so the merged summary is persisted
/// as the sweep runs instead of in one pass at the end.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `run_grid` returns, check for them with
/// [`take_error`][Self::take_error].
pub struct GridOutputObserver<W: SummaryWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: SummaryWriter> GridOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect the file after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: SummaryWriter> GridObserver for GridOutputObserver<W> {
    fn on_combination_done(
        &mut self,
        _params: &ExpParams,
        records: &[SessionRecord],
        _done:   usize,
        _total:  usize,
    ) {
        if !records.is_empty() {
            let result = self.writer.write_records(records);
            self.store_err(result);
        }
    }

    fn on_grid_end(&mut self, _stats: &GridStats) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
