//! Integration tests for hd-output.

use hd_core::{CapacityProfile, DurationSpec, HotelConfig, SimTime};
use hd_sim::{RunReport, ScriptedGuest, SimBuilder, SimObserver};

/// Two rooms, one early guest and one regular guest, deterministic durations.
fn tiny_config() -> HotelConfig {
    HotelConfig {
        horizon_hours:         48.0,
        warmup_hours:          0.0,
        room_count:            2,
        front_desk_staffing:   CapacityProfile::constant(1),
        housekeeping_staffing: CapacityProfile::constant(1),
        front_desk_service:    DurationSpec::Fixed { minutes: 6.0 },
        cleaning:              DurationSpec::Fixed { minutes: 30.0 },
        ..HotelConfig::default()
    }
}

fn tiny_guests() -> Vec<ScriptedGuest> {
    vec![
        ScriptedGuest { time: SimTime(9.0),  nights: 1, early_checkin_requested: true },
        ScriptedGuest { time: SimTime(15.5), nights: 1, early_checkin_requested: false },
    ]
}

fn run_tiny<O: SimObserver>(observer: &mut O) -> RunReport {
    let mut sim = SimBuilder::new(tiny_config())
        .scripted_arrivals(tiny_guests())
        .build()
        .unwrap();
    sim.run(observer).unwrap()
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, SERIES_HEADERS, SUMMARY_HEADERS, WAIT_HEADERS};
    use crate::observer::ReportObserver;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("guest_waits.csv").exists());
        assert!(dir.path().join("time_series.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir.path().join("guest_waits.csv")), WAIT_HEADERS);
        assert_eq!(headers(&dir.path().join("time_series.csv")), SERIES_HEADERS);
        assert_eq!(headers(&dir.path().join("summary.csv")), SUMMARY_HEADERS);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn report_observer_writes_one_row_per_guest() {
        let dir = tmp();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap(), "tiny");
        let report = run_tiny(&mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("guest_waits.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), report.waits.len());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| &r[0] == "tiny"));

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(&summaries[0][1], "2"); // room_count
        assert_eq!(&summaries[0][3], "2"); // arrivals
    }

    #[test]
    fn summary_carries_wait_percentiles() {
        let dir = tmp();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap(), "tiny");
        run_tiny(&mut obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let headers = rdr.headers().unwrap().clone();
        let row = rdr.records().next().unwrap().unwrap();
        let col = |name: &str| -> f64 {
            let i = headers.iter().position(|h| h == name).unwrap();
            row[i].parse().unwrap()
        };
        // Totals are 0 (early) and 6 minutes (desk service only).
        assert!((col("total_p50_minutes") - 3.0).abs() < 1e-9);
        assert!((col("total_p95_minutes") - 5.7).abs() < 1e-9);
        assert_eq!(col("desk_wait_p90_minutes"), 0.0);
        assert_eq!(col("room_wait_p95_minutes"), 0.0);
    }

    #[test]
    fn early_checkin_has_empty_desk_wait() {
        let dir = tmp();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap(), "tiny");
        run_tiny(&mut obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("guest_waits.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let early = rows.iter().find(|r| &r[6] == "1").unwrap();
        assert_eq!(&early[7], "0");  // wait_minutes
        assert_eq!(&early[8], "");   // desk_wait_minutes
        let regular = rows.iter().find(|r| &r[6] == "0").unwrap();
        assert!(!regular[8].is_empty());
    }

    #[test]
    fn series_rows_cover_all_three_metrics() {
        let dir = tmp();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap(), "tiny");
        let report = run_tiny(&mut obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("time_series.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        let expected = report.front_desk_queue.len()
            + report.housekeeping_queue.len()
            + report.occupancy.len();
        assert_eq!(rows.len(), expected);
        assert!(rows.iter().any(|r| &r[1] == "occupied_rooms"));
    }

    #[test]
    fn sweep_shares_one_set_of_files() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let a = hd_sim::run(&tiny_config()).unwrap();
        w.write_report("a", &a).unwrap();
        w.write_report("b", &a).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let labels: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(labels, ["a", "b"]);
    }
}

#[cfg(test)]
mod event_log_tests {
    use super::*;
    use crate::observer::{EVENT_LOG_HEADERS, EventLogObserver};

    #[test]
    fn one_row_per_processed_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = EventLogObserver::new(dir.path()).unwrap();
        let report = run_tiny(&mut obs);
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows(), report.events_processed);

        let mut rdr = csv::Reader::from_path(dir.path().join("event_log.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, EVENT_LOG_HEADERS);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len() as u64, report.events_processed);
        assert!(rows.iter().any(|r| &r[3] == "arrival"));
    }

    #[test]
    fn log_times_never_decrease() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = EventLogObserver::new(dir.path()).unwrap();
        run_tiny(&mut obs);

        let mut rdr = csv::Reader::from_path(dir.path().join("event_log.csv")).unwrap();
        let times: Vec<f64> = rdr
            .records()
            .map(|r| r.unwrap()[1].parse().unwrap())
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::observer::ReportObserver;
    use crate::parquet::ParquetWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn parquet_files_created() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("guest_waits.parquet").exists());
        assert!(dir.path().join("time_series.parquet").exists());
        assert!(dir.path().join("summary.parquet").exists());
    }

    #[test]
    fn parquet_wait_rows_and_nullable_desk_wait() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = ReportObserver::new(ParquetWriter::new(dir.path()).unwrap(), "tiny");
        let report = run_tiny(&mut obs);
        assert!(obs.take_error().is_none());

        let file = std::fs::File::open(dir.path().join("guest_waits.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let total: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total, report.waits.len());

        let desk = schema.field_with_name("desk_wait_minutes").unwrap();
        assert!(desk.is_nullable());
        assert_eq!(*desk.data_type(), DataType::Float64);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            let report = hd_sim::run(&tiny_config()).unwrap();
            w.write_summary(&crate::SummaryRow::from_report("x", &report)).unwrap();
        }
        let file = std::fs::File::open(dir.path().join("summary.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
