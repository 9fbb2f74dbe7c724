//! The `OutputWriter` trait implemented by all backend writers.

use hd_sim::RunReport;

use crate::row::{series_rows, wait_rows};
use crate::{GuestWaitRow, OutputResult, SeriesRow, SummaryRow};

/// Trait implemented by the CSV and Parquet writers.
pub trait OutputWriter {
    /// Write a batch of per-guest wait rows.
    fn write_waits(&mut self, rows: &[GuestWaitRow]) -> OutputResult<()>;

    /// Write a batch of step-series rows.
    fn write_series(&mut self, rows: &[SeriesRow]) -> OutputResult<()>;

    /// Write one summary row.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write all three tables for one run, tagged with `scenario`.
    fn write_report(&mut self, scenario: &str, report: &RunReport) -> OutputResult<()> {
        self.write_waits(&wait_rows(scenario, report))?;
        self.write_series(&series_rows(scenario, report))?;
        self.write_summary(&SummaryRow::from_report(scenario, report))
    }
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_waits(&mut self, rows: &[GuestWaitRow]) -> OutputResult<()> {
        (**self).write_waits(rows)
    }

    fn write_series(&mut self, rows: &[SeriesRow]) -> OutputResult<()> {
        (**self).write_series(rows)
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        (**self).write_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
