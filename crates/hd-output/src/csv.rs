//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `guest_waits.csv`
//! - `time_series.csv`
//! - `summary.csv`
//!
//! Missing optional values are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{GuestWaitRow, OutputResult, SeriesRow, SummaryRow};

pub const WAIT_HEADERS: [&str; 11] = [
    "scenario", "guest_id", "room_id", "arrival_hours", "checkin_hours", "nights",
    "early_checkin", "wait_minutes", "desk_wait_minutes", "room_wait_minutes", "total_minutes",
];

pub const SERIES_HEADERS: [&str; 4] = ["scenario", "metric", "time_hours", "value"];

pub const SUMMARY_HEADERS: [&str; 28] = [
    "scenario", "room_count", "seed", "arrivals", "checkins", "checkouts",
    "avg_wait_minutes", "max_wait_minutes", "avg_desk_wait_minutes", "avg_room_wait_minutes",
    "avg_total_minutes",
    "desk_wait_p50_minutes", "desk_wait_p90_minutes", "desk_wait_p95_minutes",
    "room_wait_p50_minutes", "room_wait_p90_minutes", "room_wait_p95_minutes",
    "total_p50_minutes", "total_p90_minutes", "total_p95_minutes",
    "avg_front_desk_queue", "avg_housekeeping_queue", "occupancy_rate",
    "front_desk_utilization", "housekeeping_utilization", "early_checkin_attempts",
    "early_checkin_rate", "left_waiting_for_room",
];

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes run output to three CSV files.
pub struct CsvWriter {
    waits:     Writer<File>,
    series:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut waits = Writer::from_path(dir.join("guest_waits.csv"))?;
        waits.write_record(WAIT_HEADERS)?;

        let mut series = Writer::from_path(dir.join("time_series.csv"))?;
        series.write_record(SERIES_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("summary.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self {
            waits,
            series,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_waits(&mut self, rows: &[GuestWaitRow]) -> OutputResult<()> {
        for row in rows {
            self.waits.write_record(&[
                row.scenario.clone(),
                row.guest_id.to_string(),
                opt(row.room_id),
                row.arrival_hours.to_string(),
                row.checkin_hours.to_string(),
                row.nights.to_string(),
                (row.early_checkin as u8).to_string(),
                row.wait_minutes.to_string(),
                opt(row.desk_wait_minutes),
                opt(row.room_wait_minutes),
                row.total_minutes.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_series(&mut self, rows: &[SeriesRow]) -> OutputResult<()> {
        for row in rows {
            self.series.write_record(&[
                row.scenario.clone(),
                row.metric.to_owned(),
                row.time_hours.to_string(),
                row.value.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.scenario.clone(),
            row.room_count.to_string(),
            row.seed.to_string(),
            row.arrivals.to_string(),
            row.checkins.to_string(),
            row.checkouts.to_string(),
            row.avg_wait_minutes.to_string(),
            row.max_wait_minutes.to_string(),
            row.avg_desk_wait_minutes.to_string(),
            row.avg_room_wait_minutes.to_string(),
            row.avg_total_minutes.to_string(),
            row.desk_wait_p50_minutes.to_string(),
            row.desk_wait_p90_minutes.to_string(),
            row.desk_wait_p95_minutes.to_string(),
            row.room_wait_p50_minutes.to_string(),
            row.room_wait_p90_minutes.to_string(),
            row.room_wait_p95_minutes.to_string(),
            row.total_p50_minutes.to_string(),
            row.total_p90_minutes.to_string(),
            row.total_p95_minutes.to_string(),
            row.avg_front_desk_queue.to_string(),
            row.avg_housekeeping_queue.to_string(),
            row.occupancy_rate.to_string(),
            row.front_desk_utilization.to_string(),
            row.housekeeping_utilization.to_string(),
            row.early_checkin_attempts.to_string(),
            row.early_checkin_rate.to_string(),
            row.left_waiting_for_room.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.waits.flush()?;
        self.series.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
