//! Parquet event source with predicate pushdown.
//!
//! The five parameter equalities plus the `session_id != 0` exclusion are
//! evaluated inside the Parquet reader via a [`RowFilter`], so only matching
//! rows are ever materialized into Arrow batches.  Each `load` call opens
//! its own file handle; a single source value serves concurrent readers.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    ArrayRef, AsArray, BooleanArray, Float64Array, Float64Builder, PrimitiveArray,
    UInt32Array, UInt32Builder,
};
use arrow::compute::{and, or};
use arrow::compute::kernels::cmp::{eq, neq};
use arrow::datatypes::{DataType, Field, Float64Type, Schema, UInt32Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::{ArrowPredicateFn, ParquetRecordBatchReaderBuilder, RowFilter};
use parquet::arrow::{ArrowWriter, ProjectionMask};
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use parquet::schema::types::SchemaDescriptor;

use pfa_core::{ExpParams, PfEvent, PfOp, SessionId, VehicleId};

use crate::error::{SourceError, SourceResult};
use crate::source::EventSource;

// ── Schema ────────────────────────────────────────────────────────────────────

/// The Arrow schema of the on-disk event table.
pub fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("request_rate",     DataType::UInt32,  false),
        Field::new("max_platoon_size", DataType::UInt32,  false),
        Field::new("max_distance",     DataType::UInt32,  false),
        Field::new("penetration",      DataType::Float64, false),
        Field::new("repetition",       DataType::UInt32,  false),
        Field::new("time",             DataType::Float64, false),
        Field::new("vehicle_id",       DataType::UInt32,  false),
        Field::new("session_id",       DataType::UInt32,  false),
        Field::new("operation",        DataType::UInt32,  false),
        Field::new("session_start",    DataType::Float64, false),
        Field::new("session_end",      DataType::Float64, false),
        Field::new("session_end_x",    DataType::Float64, false),
    ]))
}

/// The columns the pushdown predicate reads.
const KEY_COLUMNS: [&str; 7] = [
    "request_rate",
    "max_platoon_size",
    "max_distance",
    "penetration",
    "repetition",
    "session_id",
    "operation",
];

// ── ParquetEventSource ────────────────────────────────────────────────────────

/// Reads the event table from a Parquet file with the parameter filter
/// pushed down into the reader.
pub struct ParquetEventSource {
    path: PathBuf,
}

impl ParquetEventSource {
    /// Create a source over the Parquet file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl EventSource for ParquetEventSource {
    fn load(&self, params: &ExpParams) -> SourceResult<Vec<PfEvent>> {
        let file = File::open(&self.path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let mask = key_column_mask(builder.parquet_schema())?;

        let p = *params;
        let predicate = ArrowPredicateFn::new(mask, move |batch: RecordBatch| {
            let keep = eq(
                key_column(&batch, "request_rate")?,
                &UInt32Array::new_scalar(p.request_rate),
            )?;
            let keep = and(&keep, &eq(
                key_column(&batch, "max_platoon_size")?,
                &UInt32Array::new_scalar(p.max_platoon_size),
            )?)?;
            let keep = and(&keep, &eq(
                key_column(&batch, "max_distance")?,
                &UInt32Array::new_scalar(p.max_distance),
            )?)?;
            let keep = and(&keep, &eq(
                key_column(&batch, "penetration")?,
                &Float64Array::new_scalar(p.penetration),
            )?)?;
            let keep = and(&keep, &eq(
                key_column(&batch, "repetition")?,
                &UInt32Array::new_scalar(p.repetition),
            )?)?;
            // Keep session rows plus switch-off markers, whichever session
            // ID the simulation stamped on the marker.
            let in_session = neq(
                key_column(&batch, "session_id")?,
                &UInt32Array::new_scalar(SessionId::NONE.0),
            )?;
            let is_switchoff = eq(
                key_column(&batch, "operation")?,
                &UInt32Array::new_scalar(PfOp::BarrierSwitchoff.code() as u32),
            )?;
            let keep = and(&keep, &or(&in_session, &is_switchoff)?)?;
            Ok::<BooleanArray, ArrowError>(keep)
        });

        let reader = builder
            .with_row_filter(RowFilter::new(vec![Box::new(predicate)]))
            .build()?;

        let mut events = Vec::new();
        for batch in reader {
            decode_batch(&batch?, &mut events)?;
        }
        Ok(events)
    }
}

// ── Writing (fixtures and demos) ──────────────────────────────────────────────

/// Write an event table to a Parquet file (Snappy, single batch).
///
/// Fixture support for tests and demo generators; the production event
/// table is written by the simulation itself.
pub fn write_event_table(path: &Path, rows: &[(ExpParams, PfEvent)]) -> SourceResult<()> {
    let schema = event_schema();
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(props))?;

    let mut request_rates = UInt32Builder::new();
    let mut platoon_sizes = UInt32Builder::new();
    let mut distances     = UInt32Builder::new();
    let mut penetrations  = Float64Builder::new();
    let mut repetitions   = UInt32Builder::new();
    let mut times         = Float64Builder::new();
    let mut vehicles      = UInt32Builder::new();
    let mut sessions      = UInt32Builder::new();
    let mut operations    = UInt32Builder::new();
    let mut starts        = Float64Builder::new();
    let mut ends          = Float64Builder::new();
    let mut end_xs        = Float64Builder::new();

    for (params, event) in rows {
        request_rates.append_value(params.request_rate);
        platoon_sizes.append_value(params.max_platoon_size);
        distances.append_value(params.max_distance);
        penetrations.append_value(params.penetration);
        repetitions.append_value(params.repetition);
        times.append_value(event.time);
        vehicles.append_value(event.vehicle.0);
        sessions.append_value(event.session.0);
        operations.append_value(event.op.code() as u32);
        starts.append_value(event.session_start);
        ends.append_value(event.session_end);
        end_xs.append_value(event.session_end_x);
    }

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(request_rates.finish()),
            Arc::new(platoon_sizes.finish()),
            Arc::new(distances.finish()),
            Arc::new(penetrations.finish()),
            Arc::new(repetitions.finish()),
            Arc::new(times.finish()),
            Arc::new(vehicles.finish()),
            Arc::new(sessions.finish()),
            Arc::new(operations.finish()),
            Arc::new(starts.finish()),
            Arc::new(ends.finish()),
            Arc::new(end_xs.finish()),
        ],
    )?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Projection mask over the predicate's key columns, resolved by name.
fn key_column_mask(schema: &SchemaDescriptor) -> SourceResult<ProjectionMask> {
    let mut leaves = Vec::with_capacity(KEY_COLUMNS.len());
    for name in KEY_COLUMNS {
        let index = (0..schema.num_columns())
            .find(|&i| schema.column(i).path().string() == name)
            .ok_or_else(|| {
                SourceError::Schema(format!("event table has no column {name:?}"))
            })?;
        leaves.push(index);
    }
    Ok(ProjectionMask::leaves(schema, leaves))
}

fn key_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, ArrowError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ArrowError::SchemaError(format!("missing key column {name:?}")))
}

fn col_u32<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> SourceResult<&'a PrimitiveArray<UInt32Type>> {
    batch
        .column_by_name(name)
        .ok_or_else(|| SourceError::Schema(format!("event table has no column {name:?}")))?
        .as_primitive_opt::<UInt32Type>()
        .ok_or_else(|| SourceError::Schema(format!("column {name:?} is not UInt32")))
}

fn col_f64<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> SourceResult<&'a PrimitiveArray<Float64Type>> {
    batch
        .column_by_name(name)
        .ok_or_else(|| SourceError::Schema(format!("event table has no column {name:?}")))?
        .as_primitive_opt::<Float64Type>()
        .ok_or_else(|| SourceError::Schema(format!("column {name:?} is not Float64")))
}

fn decode_batch(batch: &RecordBatch, out: &mut Vec<PfEvent>) -> SourceResult<()> {
    let times    = col_f64(batch, "time")?;
    let vehicles = col_u32(batch, "vehicle_id")?;
    let sessions = col_u32(batch, "session_id")?;
    let ops      = col_u32(batch, "operation")?;
    let starts   = col_f64(batch, "session_start")?;
    let ends     = col_f64(batch, "session_end")?;
    let end_xs   = col_f64(batch, "session_end_x")?;

    out.reserve(batch.num_rows());
    for i in 0..batch.num_rows() {
        out.push(PfEvent {
            time:          times.value(i),
            vehicle:       VehicleId(vehicles.value(i)),
            session:       SessionId(sessions.value(i)),
            op:            PfOp::try_from(ops.value(i))?,
            session_start: starts.value(i),
            session_end:   ends.value(i),
            session_end_x: end_xs.value(i),
        });
    }
    Ok(())
}
