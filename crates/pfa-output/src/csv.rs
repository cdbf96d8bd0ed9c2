//! CSV summary backend.
//!
//! Float fields use Rust's display form, so fault placeholders appear as
//! the literal `NaN` and parse back to `f64::NAN` on reload.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pfa_core::{ExpParams, SessionId, SessionOutcome, SessionRecord, VehicleId};

use crate::writer::SummaryWriter;
use crate::OutputResult;

const HEADER: [&str; 11] = [
    "request_rate",
    "max_platoon_size",
    "max_distance",
    "penetration",
    "repetition",
    "vehicle_id",
    "session_id",
    "duration",
    "end_x",
    "end_time",
    "outcome",
];

// ── CsvSummaryWriter ──────────────────────────────────────────────────────────

/// Writes session records to one CSV file with a header row.
pub struct CsvSummaryWriter {
    writer:   csv::Writer<File>,
    finished: bool,
}

impl CsvSummaryWriter {
    /// Create the summary file at `path` and write the header.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(HEADER)?;
        Ok(Self { writer, finished: false })
    }
}

impl SummaryWriter for CsvSummaryWriter {
    fn write_records(&mut self, records: &[SessionRecord]) -> OutputResult<()> {
        for record in records {
            self.writer.write_record(&[
                record.params.request_rate.to_string(),
                record.params.max_platoon_size.to_string(),
                record.params.max_distance.to_string(),
                record.params.penetration.to_string(),
                record.params.repetition.to_string(),
                record.vehicle.0.to_string(),
                record.session.0.to_string(),
                record.duration.to_string(),
                record.end_x.to_string(),
                record.end_time.to_string(),
                record.outcome.label().to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

// ── Reading ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SummaryRow {
    request_rate:     u32,
    max_platoon_size: u32,
    max_distance:     u32,
    penetration:      f64,
    repetition:       u32,
    vehicle_id:       u32,
    session_id:       u32,
    duration:         f64,
    end_x:            f64,
    end_time:         f64,
    outcome:          String,
}

/// Reload a summary file written by [`CsvSummaryWriter`].
pub fn read_summary_csv(path: impl Into<PathBuf>) -> OutputResult<Vec<SessionRecord>> {
    let file = File::open(path.into())?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize::<SummaryRow>() {
        let row = result?;
        records.push(SessionRecord {
            params: ExpParams {
                request_rate:     row.request_rate,
                max_platoon_size: row.max_platoon_size,
                max_distance:     row.max_distance,
                penetration:      row.penetration,
                repetition:       row.repetition,
            },
            vehicle:  VehicleId(row.vehicle_id),
            session:  SessionId(row.session_id),
            duration: row.duration,
            end_x:    row.end_x,
            end_time: row.end_time,
            outcome:  SessionOutcome::from_label(&row.outcome)?,
        });
    }
    Ok(records)
}
