//! `hd-output` — run-report writers for the hotel simulation.
//!
//! Two backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                                                 |
//! |-----------|---------|---------------------------------------------------------------|
//! | *(none)*  | CSV     | `guest_waits.csv`, `time_series.csv`, `summary.csv`           |
//! | `parquet` | Parquet | `guest_waits.parquet`, `time_series.parquet`, `summary.parquet` |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`ReportObserver`], which implements `hd_sim::SimObserver`.
//! [`EventLogObserver`] additionally writes `event_log.csv`, one row per
//! processed event.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hd_output::{CsvWriter, ReportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer, "baseline");
//! let report = hd_sim::run_with_observer(&config, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{EventLogObserver, ReportObserver, Tee};
pub use row::{EventLogRow, GuestWaitRow, SeriesRow, SummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
