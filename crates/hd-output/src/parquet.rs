//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `guest_waits.parquet`
//! - `time_series.parquet`
//! - `summary.parquet`
//!
//! Column names match the CSV backend.  Optional values are nullable columns.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{GuestWaitRow, OutputResult, SeriesRow, SummaryRow};

fn wait_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("scenario",          DataType::Utf8,    false),
        Field::new("guest_id",          DataType::UInt32,  false),
        Field::new("room_id",           DataType::UInt32,  true),
        Field::new("arrival_hours",     DataType::Float64, false),
        Field::new("checkin_hours",     DataType::Float64, false),
        Field::new("nights",            DataType::UInt32,  false),
        Field::new("early_checkin",     DataType::Boolean, false),
        Field::new("wait_minutes",      DataType::Float64, false),
        Field::new("desk_wait_minutes", DataType::Float64, true),
        Field::new("room_wait_minutes", DataType::Float64, true),
        Field::new("total_minutes",     DataType::Float64, false),
    ]))
}

fn series_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("scenario",   DataType::Utf8,    false),
        Field::new("metric",     DataType::Utf8,    false),
        Field::new("time_hours", DataType::Float64, false),
        Field::new("value",      DataType::UInt32,  false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new("scenario",   DataType::Utf8,   false),
        Field::new("room_count", DataType::UInt32, false),
        Field::new("seed",       DataType::UInt64, false),
        Field::new("arrivals",   DataType::UInt64, false),
        Field::new("checkins",   DataType::UInt64, false),
        Field::new("checkouts",  DataType::UInt64, false),
    ];
    for name in [
        "avg_wait_minutes",
        "max_wait_minutes",
        "avg_desk_wait_minutes",
        "avg_room_wait_minutes",
        "avg_total_minutes",
        "desk_wait_p50_minutes",
        "desk_wait_p90_minutes",
        "desk_wait_p95_minutes",
        "room_wait_p50_minutes",
        "room_wait_p90_minutes",
        "room_wait_p95_minutes",
        "total_p50_minutes",
        "total_p90_minutes",
        "total_p95_minutes",
        "avg_front_desk_queue",
        "avg_housekeeping_queue",
        "occupancy_rate",
        "front_desk_utilization",
        "housekeeping_utilization",
    ] {
        fields.push(Field::new(name, DataType::Float64, false));
    }
    fields.push(Field::new("early_checkin_attempts", DataType::UInt64,  false));
    fields.push(Field::new("early_checkin_rate",     DataType::Float64, false));
    fields.push(Field::new("left_waiting_for_room",  DataType::UInt64,  false));
    Arc::new(Schema::new(fields))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> OutputResult<ArrowWriter<File>> {
    let file = File::create(dir.join(name))?;
    Ok(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?)
}

/// Writes run output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    waits:          Option<ArrowWriter<File>>,
    series:         Option<ArrowWriter<File>>,
    summaries:      Option<ArrowWriter<File>>,
    wait_schema:    Arc<Schema>,
    series_schema:  Arc<Schema>,
    summary_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create the three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let wait_schema = wait_schema();
        let series_schema = series_schema();
        let summary_schema = summary_schema();
        Ok(Self {
            waits:     Some(open(dir, "guest_waits.parquet", &wait_schema)?),
            series:    Some(open(dir, "time_series.parquet", &series_schema)?),
            summaries: Some(open(dir, "summary.parquet", &summary_schema)?),
            wait_schema,
            series_schema,
            summary_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_waits(&mut self, rows: &[GuestWaitRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.waits.as_mut() else {
            return Ok(());
        };

        let mut scenario   = StringBuilder::new();
        let mut guest_id   = UInt32Builder::new();
        let mut room_id    = UInt32Builder::new();
        let mut arrival    = Float64Builder::new();
        let mut checkin    = Float64Builder::new();
        let mut nights     = UInt32Builder::new();
        let mut early      = BooleanBuilder::new();
        let mut wait       = Float64Builder::new();
        let mut desk_wait  = Float64Builder::new();
        let mut room_wait  = Float64Builder::new();
        let mut total      = Float64Builder::new();

        for row in rows {
            scenario.append_value(&row.scenario);
            guest_id.append_value(row.guest_id);
            room_id.append_option(row.room_id);
            arrival.append_value(row.arrival_hours);
            checkin.append_value(row.checkin_hours);
            nights.append_value(row.nights);
            early.append_value(row.early_checkin);
            wait.append_value(row.wait_minutes);
            desk_wait.append_option(row.desk_wait_minutes);
            room_wait.append_option(row.room_wait_minutes);
            total.append_value(row.total_minutes);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.wait_schema),
            vec![
                Arc::new(scenario.finish()),
                Arc::new(guest_id.finish()),
                Arc::new(room_id.finish()),
                Arc::new(arrival.finish()),
                Arc::new(checkin.finish()),
                Arc::new(nights.finish()),
                Arc::new(early.finish()),
                Arc::new(wait.finish()),
                Arc::new(desk_wait.finish()),
                Arc::new(room_wait.finish()),
                Arc::new(total.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_series(&mut self, rows: &[SeriesRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.series.as_mut() else {
            return Ok(());
        };

        let mut scenario = StringBuilder::new();
        let mut metric   = StringBuilder::new();
        let mut time     = Float64Builder::new();
        let mut value    = UInt32Builder::new();

        for row in rows {
            scenario.append_value(&row.scenario);
            metric.append_value(row.metric);
            time.append_value(row.time_hours);
            value.append_value(row.value);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.series_schema),
            vec![
                Arc::new(scenario.finish()),
                Arc::new(metric.finish()),
                Arc::new(time.finish()),
                Arc::new(value.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut scenario = StringBuilder::new();
        scenario.append_value(&row.scenario);
        let mut room_count = UInt32Builder::new();
        room_count.append_value(row.room_count);

        let u64_col = |v: u64| {
            let mut b = UInt64Builder::new();
            b.append_value(v);
            Arc::new(b.finish()) as arrow::array::ArrayRef
        };
        let f64_col = |v: f64| {
            let mut b = Float64Builder::new();
            b.append_value(v);
            Arc::new(b.finish()) as arrow::array::ArrayRef
        };

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summary_schema),
            vec![
                Arc::new(scenario.finish()),
                Arc::new(room_count.finish()),
                u64_col(row.seed),
                u64_col(row.arrivals),
                u64_col(row.checkins),
                u64_col(row.checkouts),
                f64_col(row.avg_wait_minutes),
                f64_col(row.max_wait_minutes),
                f64_col(row.avg_desk_wait_minutes),
                f64_col(row.avg_room_wait_minutes),
                f64_col(row.avg_total_minutes),
                f64_col(row.desk_wait_p50_minutes),
                f64_col(row.desk_wait_p90_minutes),
                f64_col(row.desk_wait_p95_minutes),
                f64_col(row.room_wait_p50_minutes),
                f64_col(row.room_wait_p90_minutes),
                f64_col(row.room_wait_p95_minutes),
                f64_col(row.total_p50_minutes),
                f64_col(row.total_p90_minutes),
                f64_col(row.total_p95_minutes),
                f64_col(row.avg_front_desk_queue),
                f64_col(row.avg_housekeeping_queue),
                f64_col(row.occupancy_rate),
                f64_col(row.front_desk_utilization),
                f64_col(row.housekeeping_utilization),
                u64_col(row.early_checkin_attempts),
                f64_col(row.early_checkin_rate),
                u64_col(row.left_waiting_for_room),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for slot in [&mut self.waits, &mut self.series, &mut self.summaries] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
