//! Integration tests for the event-source backends.

use pfa_core::{ExpParams, PfEvent, PfOp, SessionId, VehicleId};

use crate::source::EventSource;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params_a() -> ExpParams {
    ExpParams {
        request_rate:     5,
        max_platoon_size: 8,
        max_distance:     200,
        penetration:      0.25,
        repetition:       0,
    }
}

fn params_b() -> ExpParams {
    ExpParams {
        request_rate:     30,
        max_platoon_size: 8,
        max_distance:     50,
        penetration:      1.0,
        repetition:       1,
    }
}

fn event(time: f64, vehicle: u32, sid: u32, op: PfOp) -> PfEvent {
    PfEvent {
        time,
        vehicle:       VehicleId(vehicle),
        session:       SessionId(sid),
        op,
        session_start: 0.0,
        session_end:   0.0,
        session_end_x: 0.0,
    }
}

/// Two runs' worth of rows.  Each run has a sentinel-session cooldown row
/// (filtered out) and a sentinel-session switch-off marker (kept).
fn fixture_rows() -> Vec<(ExpParams, PfEvent)> {
    vec![
        (params_a(), event(1.0, 1, 0, PfOp::BarrierCooldown)),
        (params_a(), event(10.0, 1, 7, PfOp::RequestSent)),
        (params_a(), event(14.95, 1, 7, PfOp::PfCompleted)),
        (params_a(), event(30.0, 1, 0, PfOp::BarrierSwitchoff)),
        (params_b(), event(2.0, 2, 0, PfOp::BarrierCooldown)),
        (params_b(), event(5.0, 2, 3, PfOp::RequestSent)),
        (params_b(), event(9.0, 2, 3, PfOp::RespDenied)),
        (params_b(), event(40.0, 2, 0, PfOp::BarrierSwitchoff)),
    ]
}

// ── Memory source ─────────────────────────────────────────────────────────────

mod memory_tests {
    use super::*;
    use crate::memory::MemoryEventSource;

    #[test]
    fn filters_by_params() {
        let source = MemoryEventSource::new(fixture_rows());
        let events = source.load(&params_a()).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.vehicle == VehicleId(1)));
    }

    #[test]
    fn sentinel_sessions_excluded_except_switchoff() {
        let source = MemoryEventSource::new(fixture_rows());
        let events = source.load(&params_b()).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| e.session.is_session() || e.op == PfOp::BarrierSwitchoff));
        assert!(!events.iter().any(|e| e.op == PfOp::BarrierCooldown));
    }

    #[test]
    fn unknown_params_load_empty() {
        let source = MemoryEventSource::new(fixture_rows());
        let mut other = params_a();
        other.repetition = 99;
        assert!(source.load(&other).unwrap().is_empty());
    }
}

// ── Parquet source ────────────────────────────────────────────────────────────

mod parquet_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::SourceError;
    use crate::parquet::{event_schema, write_event_table, ParquetEventSource};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn pushdown_returns_only_matching_rows() {
        let dir = tmp();
        let path = dir.path().join("events.parquet");
        write_event_table(&path, &fixture_rows()).unwrap();

        let source = ParquetEventSource::new(&path);
        let events = source.load(&params_a()).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.vehicle == VehicleId(1)));
        assert!(!events.iter().any(|e| e.op == PfOp::BarrierCooldown));

        let events = source.load(&params_b()).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| e.session == SessionId(3) || e.op == PfOp::BarrierSwitchoff));
    }

    #[test]
    fn typed_round_trip_preserves_fields() {
        let dir = tmp();
        let path = dir.path().join("events.parquet");
        let mut terminal = event(14.95, 1, 7, PfOp::PfCompleted);
        terminal.session_start = 10.0;
        terminal.session_end = 15.0;
        terminal.session_end_x = 500.0;
        write_event_table(&path, &[(params_a(), terminal)]).unwrap();

        let events = ParquetEventSource::new(&path).load(&params_a()).unwrap();
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.time, 14.95);
        assert_eq!(e.op, PfOp::PfCompleted);
        assert_eq!(e.session_start, 10.0);
        assert_eq!(e.session_end, 15.0);
        assert_eq!(e.session_end_x, 500.0);
    }

    #[test]
    fn nan_session_fields_survive() {
        let dir = tmp();
        let path = dir.path().join("events.parquet");
        let mut opening = event(10.0, 1, 7, PfOp::RequestSent);
        opening.session_start = f64::NAN;
        opening.session_end = f64::NAN;
        opening.session_end_x = f64::NAN;
        write_event_table(&path, &[(params_a(), opening)]).unwrap();

        let events = ParquetEventSource::new(&path).load(&params_a()).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].session_start.is_nan());
        assert!(events[0].session_end.is_nan());
        assert!(events[0].session_end_x.is_nan());
    }

    #[test]
    fn unknown_operation_code_rejected_at_boundary() {
        use std::sync::Arc;

        use arrow::array::{Float64Builder, UInt32Builder};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let dir = tmp();
        let path = dir.path().join("events.parquet");

        // Hand-write a one-row table whose operation code is out of range.
        let schema = event_schema();
        let p = params_a();
        let mut u32_cols: Vec<UInt32Builder> = (0..6).map(|_| UInt32Builder::new()).collect();
        let mut f64_cols: Vec<Float64Builder> = (0..6).map(|_| Float64Builder::new()).collect();
        u32_cols[0].append_value(p.request_rate);
        u32_cols[1].append_value(p.max_platoon_size);
        u32_cols[2].append_value(p.max_distance);
        f64_cols[0].append_value(p.penetration);
        u32_cols[3].append_value(p.repetition);
        f64_cols[1].append_value(10.0); // time
        u32_cols[4].append_value(1); // vehicle_id
        u32_cols[5].append_value(7); // session_id
        let mut op_col = UInt32Builder::new();
        op_col.append_value(99); // no such operation
        f64_cols[2].append_value(0.0);
        f64_cols[3].append_value(0.0);
        f64_cols[4].append_value(0.0);

        let batch = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![
                Arc::new(u32_cols[0].finish()),
                Arc::new(u32_cols[1].finish()),
                Arc::new(u32_cols[2].finish()),
                Arc::new(f64_cols[0].finish()),
                Arc::new(u32_cols[3].finish()),
                Arc::new(f64_cols[1].finish()),
                Arc::new(u32_cols[4].finish()),
                Arc::new(u32_cols[5].finish()),
                Arc::new(op_col.finish()),
                Arc::new(f64_cols[2].finish()),
                Arc::new(f64_cols[3].finish()),
                Arc::new(f64_cols[4].finish()),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let result = ParquetEventSource::new(&path).load(&params_a());
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }

    #[test]
    fn missing_key_column_is_schema_error() {
        use std::sync::Arc;

        use arrow::array::Float64Builder;
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let dir = tmp();
        let path = dir.path().join("not_events.parquet");

        let schema = Arc::new(Schema::new(vec![Field::new(
            "something_else",
            DataType::Float64,
            false,
        )]));
        let mut col = Float64Builder::new();
        col.append_value(1.0);
        let batch =
            RecordBatch::try_new(Arc::clone(&schema), vec![Arc::new(col.finish())]).unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let result = ParquetEventSource::new(&path).load(&params_a());
        assert!(matches!(result, Err(SourceError::Schema(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ParquetEventSource::new("/no/such/events.parquet").load(&params_a());
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}

// ── CSV source ────────────────────────────────────────────────────────────────

mod csv_tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvEventSource;
    use crate::error::SourceError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    const HEADER: &str = "request_rate,max_platoon_size,max_distance,penetration,repetition,time,vehicle_id,session_id,operation,session_start,session_end,session_end_x\n";

    fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("events.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn scan_filter_matches_params() {
        let dir = tmp();
        let path = write_csv(
            &dir,
            "5,8,200,0.25,0,10.0,1,7,0,0.0,0.0,0.0\n\
             5,8,200,0.25,0,14.95,1,7,8,10.0,15.0,500.0\n\
             5,8,200,0.25,0,30.0,1,0,14,0.0,0.0,0.0\n\
             30,8,50,1.0,1,5.0,2,3,0,0.0,0.0,0.0\n",
        );
        let source = CsvEventSource::new(&path);

        let events = source.load(&params_a()).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].op, PfOp::RequestSent);
        assert_eq!(events[1].op, PfOp::PfCompleted);
        assert_eq!(events[1].session_end_x, 500.0);
        assert_eq!(events[2].op, PfOp::BarrierSwitchoff); // sentinel sid, kept

        let events = source.load(&params_b()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].vehicle, VehicleId(2));
    }

    #[test]
    fn unknown_operation_code_rejected() {
        let dir = tmp();
        let path = write_csv(&dir, "5,8,200,0.25,0,10.0,1,7,99,0.0,0.0,0.0\n");
        let result = CsvEventSource::new(&path).load(&params_a());
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }

    #[test]
    fn mistyped_row_rejected() {
        let dir = tmp();
        let path = write_csv(&dir, "5,8,200,0.25,0,not_a_time,1,7,0,0.0,0.0,0.0\n");
        let result = CsvEventSource::new(&path).load(&params_a());
        assert!(matches!(result, Err(SourceError::Csv(_))));
    }
}
