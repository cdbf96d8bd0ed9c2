//! Parquet summary backend.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{AsArray, Float64Builder, PrimitiveArray, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Float64Type, Schema, UInt32Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use pfa_core::{ExpParams, SessionId, SessionOutcome, SessionRecord, VehicleId};

use crate::writer::SummaryWriter;
use crate::{OutputError, OutputResult};

// ── Schema ────────────────────────────────────────────────────────────────────

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("request_rate",     DataType::UInt32,  false),
        Field::new("max_platoon_size", DataType::UInt32,  false),
        Field::new("max_distance",     DataType::UInt32,  false),
        Field::new("penetration",      DataType::Float64, false),
        Field::new("repetition",       DataType::UInt32,  false),
        Field::new("vehicle_id",       DataType::UInt32,  false),
        Field::new("session_id",       DataType::UInt32,  false),
        Field::new("duration",         DataType::Float64, false),
        Field::new("end_x",            DataType::Float64, false),
        Field::new("end_time",         DataType::Float64, false),
        Field::new("outcome",          DataType::Utf8,    false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

// ── ParquetSummaryWriter ──────────────────────────────────────────────────────

/// Writes session records to one Parquet file, one batch per
/// `write_records` call.
///
/// `finish()` **must** be called to write the Parquet footer; files written
/// without it cannot be opened by Parquet readers.
pub struct ParquetSummaryWriter {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl ParquetSummaryWriter {
    /// Create the summary file at `path`.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let schema = summary_schema();
        let file = File::create(path)?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { writer: Some(writer), schema })
    }
}

impl SummaryWriter for ParquetSummaryWriter {
    fn write_records(&mut self, records: &[SessionRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let mut request_rates = UInt32Builder::new();
        let mut platoon_sizes = UInt32Builder::new();
        let mut distances     = UInt32Builder::new();
        let mut penetrations  = Float64Builder::new();
        let mut repetitions   = UInt32Builder::new();
        let mut vehicles      = UInt32Builder::new();
        let mut sessions      = UInt32Builder::new();
        let mut durations     = Float64Builder::new();
        let mut end_xs        = Float64Builder::new();
        let mut end_times     = Float64Builder::new();
        let mut outcomes      = StringBuilder::new();

        for record in records {
            request_rates.append_value(record.params.request_rate);
            platoon_sizes.append_value(record.params.max_platoon_size);
            distances.append_value(record.params.max_distance);
            penetrations.append_value(record.params.penetration);
            repetitions.append_value(record.params.repetition);
            vehicles.append_value(record.vehicle.0);
            sessions.append_value(record.session.0);
            durations.append_value(record.duration);
            end_xs.append_value(record.end_x);
            end_times.append_value(record.end_time);
            outcomes.append_value(record.outcome.label());
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(request_rates.finish()),
                Arc::new(platoon_sizes.finish()),
                Arc::new(distances.finish()),
                Arc::new(penetrations.finish()),
                Arc::new(repetitions.finish()),
                Arc::new(vehicles.finish()),
                Arc::new(sessions.finish()),
                Arc::new(durations.finish()),
                Arc::new(end_xs.finish()),
                Arc::new(end_times.finish()),
                Arc::new(outcomes.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Reload a summary file written by [`ParquetSummaryWriter`].
///
/// Lossless: `NaN` placeholders and fault-tag labels come back exactly.
pub fn read_summary_parquet(path: impl Into<PathBuf>) -> OutputResult<Vec<SessionRecord>> {
    let file = File::open(path.into())?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let request_rates = col_u32(&batch, "request_rate")?;
        let platoon_sizes = col_u32(&batch, "max_platoon_size")?;
        let distances     = col_u32(&batch, "max_distance")?;
        let penetrations  = col_f64(&batch, "penetration")?;
        let repetitions   = col_u32(&batch, "repetition")?;
        let vehicles      = col_u32(&batch, "vehicle_id")?;
        let sessions      = col_u32(&batch, "session_id")?;
        let durations     = col_f64(&batch, "duration")?;
        let end_xs        = col_f64(&batch, "end_x")?;
        let end_times     = col_f64(&batch, "end_time")?;
        let outcomes = batch
            .column_by_name("outcome")
            .ok_or_else(|| OutputError::Schema("summary has no column \"outcome\"".into()))?
            .as_string_opt::<i32>()
            .ok_or_else(|| OutputError::Schema("column \"outcome\" is not Utf8".into()))?;

        records.reserve(batch.num_rows());
        for i in 0..batch.num_rows() {
            records.push(SessionRecord {
                params: ExpParams {
                    request_rate:     request_rates.value(i),
                    max_platoon_size: platoon_sizes.value(i),
                    max_distance:     distances.value(i),
                    penetration:      penetrations.value(i),
                    repetition:       repetitions.value(i),
                },
                vehicle:  VehicleId(vehicles.value(i)),
                session:  SessionId(sessions.value(i)),
                duration: durations.value(i),
                end_x:    end_xs.value(i),
                end_time: end_times.value(i),
                outcome:  SessionOutcome::from_label(outcomes.value(i))?,
            });
        }
    }
    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn col_u32<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> OutputResult<&'a PrimitiveArray<UInt32Type>> {
    batch
        .column_by_name(name)
        .ok_or_else(|| OutputError::Schema(format!("summary has no column {name:?}")))?
        .as_primitive_opt::<UInt32Type>()
        .ok_or_else(|| OutputError::Schema(format!("column {name:?} is not UInt32")))
}

fn col_f64<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> OutputResult<&'a PrimitiveArray<Float64Type>> {
    batch
        .column_by_name(name)
        .ok_or_else(|| OutputError::Schema(format!("summary has no column {name:?}")))?
        .as_primitive_opt::<Float64Type>()
        .ok_or_else(|| OutputError::Schema(format!("column {name:?} is not Float64")))
}
