//! CSV event source.
//!
//! # CSV format
//!
//! One row per log entry, with a header row.  Column names match the
//! Parquet event table:
//!
//! ```csv
//! request_rate,max_platoon_size,max_distance,penetration,repetition,time,vehicle_id,session_id,operation,session_start,session_end,session_end_x
//! 5,8,200,0.25,0,10.0,1,7,0,0.0,0.0,0.0
//! 5,8,200,0.25,0,14.95,1,7,8,10.0,15.0,500.0
//! ```
//!
//! CSV has no predicate pushdown; the parameter filter is applied row by
//! row during the scan, after typed deserialization.  Use the Parquet
//! backend for sweeps large enough for scan cost to matter.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use pfa_core::{ExpParams, PfEvent, PfOp, SessionId, VehicleId};

use crate::error::SourceResult;
use crate::source::EventSource;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRow {
    request_rate:     u32,
    max_platoon_size: u32,
    max_distance:     u32,
    penetration:      f64,
    repetition:       u32,
    time:             f64,
    vehicle_id:       u32,
    session_id:       u32,
    operation:        u32,
    session_start:    f64,
    session_end:      f64,
    session_end_x:    f64,
}

impl EventRow {
    fn matches(&self, p: &ExpParams) -> bool {
        self.request_rate == p.request_rate
            && self.max_platoon_size == p.max_platoon_size
            && self.max_distance == p.max_distance
            && self.penetration == p.penetration
            && self.repetition == p.repetition
            && (SessionId(self.session_id).is_session()
                || self.operation == PfOp::BarrierSwitchoff.code() as u32)
    }
}

// ── CsvEventSource ────────────────────────────────────────────────────────────

/// Reads the event table from a CSV file, opening a fresh reader per `load`.
pub struct CsvEventSource {
    path: PathBuf,
}

impl CsvEventSource {
    /// Create a source over the CSV file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl EventSource for CsvEventSource {
    fn load(&self, params: &ExpParams) -> SourceResult<Vec<PfEvent>> {
        let file = std::fs::File::open(&self.path)?;
        let mut reader = csv::Reader::from_reader(file);

        let mut events = Vec::new();
        for result in reader.deserialize::<EventRow>() {
            let row = result?;
            if !row.matches(params) {
                continue;
            }
            events.push(PfEvent {
                time:          row.time,
                vehicle:       VehicleId(row.vehicle_id),
                session:       SessionId(row.session_id),
                op:            PfOp::try_from(row.operation)?,
                session_start: row.session_start,
                session_end:   row.session_end,
                session_end_x: row.session_end_x,
            });
        }
        Ok(events)
    }
}
