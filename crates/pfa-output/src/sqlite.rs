//! SQLite summary backend (feature `sqlite`).

use std::path::Path;

use rusqlite::{params, Connection};

use pfa_core::SessionRecord;

use crate::writer::SummaryWriter;
use crate::OutputResult;

/// Writes session records to a `session_records` table.
///
/// SQLite REALs cannot hold `NaN`: fault placeholders are stored as `NULL`
/// and must be mapped back to `NaN` when reading.
pub struct SqliteSummaryWriter {
    conn: Connection,
}

impl SqliteSummaryWriter {
    /// Open (or create) the database at `path` and create the table.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session_records (
                request_rate     INTEGER NOT NULL,
                max_platoon_size INTEGER NOT NULL,
                max_distance     INTEGER NOT NULL,
                penetration      REAL    NOT NULL,
                repetition       INTEGER NOT NULL,
                vehicle_id       INTEGER NOT NULL,
                session_id       INTEGER NOT NULL,
                duration         REAL,
                end_x            REAL,
                end_time         REAL,
                outcome          TEXT    NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    fn nullable(value: f64) -> Option<f64> {
        if value.is_nan() { None } else { Some(value) }
    }
}

impl SummaryWriter for SqliteSummaryWriter {
    fn write_records(&mut self, records: &[SessionRecord]) -> OutputResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO session_records VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.params.request_rate,
                    record.params.max_platoon_size,
                    record.params.max_distance,
                    record.params.penetration,
                    record.params.repetition,
                    record.vehicle.0,
                    record.session.0,
                    Self::nullable(record.duration),
                    Self::nullable(record.end_x),
                    Self::nullable(record.end_time),
                    record.outcome.label(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        // Connection flushes on drop; nothing to close explicitly.
        Ok(())
    }
}
