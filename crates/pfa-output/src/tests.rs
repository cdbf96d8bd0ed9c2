//! Integration tests for the summary backends.

use pfa_core::{
    ExpParams, PfOp, SessionFault, SessionId, SessionOutcome, SessionRecord, VehicleId,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params() -> ExpParams {
    ExpParams {
        request_rate:     5,
        max_platoon_size: 8,
        max_distance:     200,
        penetration:      0.25,
        repetition:       0,
    }
}

fn valid_record(vehicle: u32, sid: u32, duration: f64, op: PfOp) -> SessionRecord {
    SessionRecord {
        params:   params(),
        vehicle:  VehicleId(vehicle),
        session:  SessionId(sid),
        duration,
        end_x:    500.0,
        end_time: 15.0,
        outcome:  SessionOutcome::Op(op),
    }
}

fn fault_record(vehicle: u32, sid: u32) -> SessionRecord {
    SessionRecord::fault(
        params(),
        VehicleId(vehicle),
        SessionId(sid),
        SessionFault::WrongEventCount,
    )
}

fn sample_records() -> Vec<SessionRecord> {
    vec![
        valid_record(1, 7, 4.95, PfOp::PfCompleted),
        valid_record(2, 3, 9.5, PfOp::RespDenied),
        fault_record(2, 9),
    ]
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

mod parquet_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::parquet::{read_summary_parquet, ParquetSummaryWriter};
    use crate::writer::SummaryWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn round_trip_preserves_nan_and_labels() {
        let dir = tmp();
        let path = dir.path().join("summary.parquet");
        let mut writer = ParquetSummaryWriter::new(&path).unwrap();
        writer.write_records(&sample_records()).unwrap();
        writer.finish().unwrap();

        let records = read_summary_parquet(&path).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].outcome, SessionOutcome::Op(PfOp::PfCompleted));
        assert_eq!(records[0].duration, 4.95);
        assert_eq!(records[0].params.penetration, 0.25);

        let fault = &records[2];
        assert!(fault.is_fault());
        assert_eq!(fault.outcome.label(), "PROC ERROR");
        assert!(fault.duration.is_nan());
        assert!(fault.end_x.is_nan());
        assert!(fault.end_time.is_nan());
        assert_eq!(fault.session, SessionId(9));
    }

    #[test]
    fn multiple_batches_concatenate() {
        let dir = tmp();
        let path = dir.path().join("summary.parquet");
        let mut writer = ParquetSummaryWriter::new(&path).unwrap();
        writer.write_records(&sample_records()).unwrap();
        writer.write_records(&[valid_record(4, 1, 2.0, PfOp::TxFailure)]).unwrap();
        writer.finish().unwrap();

        let records = read_summary_parquet(&path).unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn empty_write_is_ok() {
        let dir = tmp();
        let path = dir.path().join("summary.parquet");
        let mut writer = ParquetSummaryWriter::new(&path).unwrap();
        writer.write_records(&[]).unwrap();
        writer.finish().unwrap();
        assert!(read_summary_parquet(&path).unwrap().is_empty());
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let path = dir.path().join("summary.parquet");
        let mut writer = ParquetSummaryWriter::new(&path).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap(); // second call must not fail
    }

    #[test]
    fn finish_required_for_readable_file() {
        // A Parquet file whose writer was not closed has no footer.
        let dir = tmp();
        let path = dir.path().join("summary.parquet");
        {
            let mut writer = ParquetSummaryWriter::new(&path).unwrap();
            writer.write_records(&sample_records()).unwrap();
            // Dropped without finish().
        }
        assert!(read_summary_parquet(&path).is_err());
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{read_summary_csv, CsvSummaryWriter};
    use crate::writer::SummaryWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn round_trip_preserves_nan_and_labels() {
        let dir = tmp();
        let path = dir.path().join("summary.csv");
        let mut writer = CsvSummaryWriter::new(&path).unwrap();
        writer.write_records(&sample_records()).unwrap();
        writer.finish().unwrap();

        let records = read_summary_csv(&path).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].outcome.label(), "RESP_DENIED");
        assert_eq!(records[1].duration, 9.5);
        assert!(records[2].is_fault());
        assert!(records[2].duration.is_nan());
    }

    #[test]
    fn nan_written_as_literal() {
        let dir = tmp();
        let path = dir.path().join("summary.csv");
        let mut writer = CsvSummaryWriter::new(&path).unwrap();
        writer.write_records(&[fault_record(1, 2)]).unwrap();
        writer.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("NaN,NaN,NaN,PROC ERROR"));
    }

    #[test]
    fn header_matches_parquet_columns() {
        let dir = tmp();
        let path = dir.path().join("summary.csv");
        let mut writer = CsvSummaryWriter::new(&path).unwrap();
        writer.finish().unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = reader.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
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
                "outcome"
            ]
        );
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let path = dir.path().join("summary.csv");
        let mut writer = CsvSummaryWriter::new(&path).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

// ── Observer bridge ───────────────────────────────────────────────────────────

mod observer_tests {
    use tempfile::TempDir;

    use pfa_core::PfEvent;
    use pfa_grid::{run_grid, ErrorPolicy, GridConfig};
    use pfa_source::MemoryEventSource;

    use super::*;
    use crate::observer::GridOutputObserver;
    use crate::parquet::{read_summary_parquet, ParquetSummaryWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn event(time: f64, vehicle: u32, sid: u32, op: PfOp, start: f64, end: f64) -> PfEvent {
        PfEvent {
            time,
            vehicle:       VehicleId(vehicle),
            session:       SessionId(sid),
            op,
            session_start: start,
            session_end:   end,
            session_end_x: 120.0,
        }
    }

    #[test]
    fn sweep_streams_records_into_parquet() {
        let config = GridConfig {
            request_rates:     vec![5, 30],
            max_platoon_sizes: vec![8],
            max_distances:     vec![200],
            penetrations:      vec![0.25],
            repetitions:       vec![0],
            num_threads:       Some(1),
            on_source_error:   ErrorPolicy::Continue,
        };

        let mut source = MemoryEventSource::default();
        for params in pfa_grid::param_grid(&config) {
            source.push(params, event(10.0, 1, 7, PfOp::RequestSent, f64::NAN, f64::NAN));
            source.push(params, event(14.0, 1, 7, PfOp::PfCompleted, 10.0, 14.0));
            source.push(params, event(50.0, 1, 0, PfOp::BarrierSwitchoff, f64::NAN, f64::NAN));
        }

        let dir = tmp();
        let path = dir.path().join("summary.parquet");
        let writer = ParquetSummaryWriter::new(&path).unwrap();
        let mut observer = GridOutputObserver::new(writer);

        let summary = run_grid(&config, &source, &mut observer).unwrap();
        assert!(observer.take_error().is_none(), "no write errors expected");
        assert_eq!(summary.records.len(), 2);

        let reloaded = read_summary_parquet(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.iter().all(|r| r.outcome.label() == "PF_COMPLETED"));
        let mut rates: Vec<u32> = reloaded.iter().map(|r| r.params.request_rate).collect();
        rates.sort_unstable();
        assert_eq!(rates, [5, 30]);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteSummaryWriter;
    use crate::writer::SummaryWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn record_count() {
        let dir = tmp();
        let path = dir.path().join("summary.db");
        let mut writer = SqliteSummaryWriter::new(&path).unwrap();
        writer.write_records(&sample_records()).unwrap();
        writer.finish().unwrap();
        drop(writer);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM session_records", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn nan_stored_as_null() {
        let dir = tmp();
        let path = dir.path().join("summary.db");
        let mut writer = SqliteSummaryWriter::new(&path).unwrap();
        writer.write_records(&[fault_record(1, 9)]).unwrap();
        writer.finish().unwrap();
        drop(writer);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let (duration, outcome): (Option<f64>, String) = conn
            .query_row(
                "SELECT duration, outcome FROM session_records WHERE session_id = 9",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(duration, None, "NaN REALs land as NULL");
        assert_eq!(outcome, "PROC ERROR");
    }

    #[test]
    fn valid_floats_stored_as_real() {
        let dir = tmp();
        let path = dir.path().join("summary.db");
        let mut writer = SqliteSummaryWriter::new(&path).unwrap();
        writer.write_records(&[valid_record(1, 7, 4.95, PfOp::PfCompleted)]).unwrap();
        writer.finish().unwrap();
        drop(writer);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let duration: f64 = conn
            .query_row(
                "SELECT duration FROM session_records WHERE session_id = 7",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(duration, 4.95);
    }
}
