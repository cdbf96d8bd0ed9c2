//! In-memory event source for tests and demos.

use pfa_core::{ExpParams, PfEvent, PfOp};

use crate::error::SourceResult;
use crate::source::EventSource;

/// Holds pre-built `(ExpParams, PfEvent)` rows and filters them on `load`.
///
/// Sentinel-session rows other than switch-off markers are stored but never
/// returned, matching the pushdown behavior of the on-disk backends.
#[derive(Default)]
pub struct MemoryEventSource {
    rows: Vec<(ExpParams, PfEvent)>,
}

impl MemoryEventSource {
    /// Build a source over the given rows.
    pub fn new(rows: Vec<(ExpParams, PfEvent)>) -> Self {
        Self { rows }
    }

    /// Append one row.
    pub fn push(&mut self, params: ExpParams, event: PfEvent) {
        self.rows.push((params, event));
    }

    /// Total stored rows, including sentinel-session rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl EventSource for MemoryEventSource {
    fn load(&self, params: &ExpParams) -> SourceResult<Vec<PfEvent>> {
        Ok(self
            .rows
            .iter()
            .filter(|(p, event)| {
                p == params
                    && (event.session.is_session() || event.op == PfOp::BarrierSwitchoff)
            })
            .map(|(_, event)| *event)
            .collect())
    }
}
