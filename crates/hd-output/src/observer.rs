//! Observers that bridge `SimObserver` to file output.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use hd_schedule::Event;
use hd_sim::{RunReport, SimObserver, StateSnapshot};

use crate::row::EventLogRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

fn keep_first(slot: &mut Option<OutputError>, result: OutputResult<()>) {
    if let Err(e) = result {
        if slot.is_none() {
            *slot = Some(e);
        }
    }
}

// ── ReportObserver ────────────────────────────────────────────────────────────

/// A [`SimObserver`] that writes the finished [`RunReport`] to any
/// [`OutputWriter`] backend, tagged with a scenario label.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    scenario:   String,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W, scenario: impl Into<String>) -> Self {
        Self {
            writer,
            scenario:   scenario.into(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: OutputWriter> SimObserver for ReportObserver<W> {
    fn on_run_end(&mut self, report: &RunReport) {
        let result = self
            .writer
            .write_report(&self.scenario, report)
            .and_then(|()| self.writer.finish());
        keep_first(&mut self.last_error, result);
    }
}

// ── EventLogObserver ──────────────────────────────────────────────────────────

pub const EVENT_LOG_HEADERS: [&str; 11] = [
    "seq", "time_hours", "clock", "kind", "subject", "rooms_clean", "rooms_dirty",
    "rooms_occupied", "front_desk_queue", "housekeeping_queue", "awaiting_room",
];

/// Writes one `event_log.csv` row per processed event.
///
/// The log covers the whole run, warm-up included.
pub struct EventLogObserver {
    log:        Writer<File>,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl EventLogObserver {
    /// Create `event_log.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut log = Writer::from_path(dir.join("event_log.csv"))?;
        log.write_record(EVENT_LOG_HEADERS)?;
        Ok(Self { log, rows: 0, last_error: None })
    }

    /// Rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn write_row(&mut self, row: &EventLogRow) -> OutputResult<()> {
        self.log.write_record(&[
            row.seq.to_string(),
            row.time_hours.to_string(),
            row.clock.clone(),
            row.kind.to_owned(),
            row.subject.map(|s| s.to_string()).unwrap_or_default(),
            row.rooms_clean.to_string(),
            row.rooms_dirty.to_string(),
            row.rooms_occupied.to_string(),
            row.front_desk_queue.to_string(),
            row.housekeeping_queue.to_string(),
            row.awaiting_room.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }
}

impl SimObserver for EventLogObserver {
    fn on_event(&mut self, event: &Event, state: &StateSnapshot) {
        // Stop writing after the first failure.
        if self.last_error.is_some() {
            return;
        }
        let result = self.write_row(&EventLogRow::new(event, state));
        keep_first(&mut self.last_error, result);
    }

    fn on_run_end(&mut self, _report: &RunReport) {
        let result = self.log.flush().map_err(OutputError::from);
        keep_first(&mut self.last_error, result);
    }
}

// ── Fan-out ───────────────────────────────────────────────────────────────────

/// Forwards every callback to two observers in order.
pub struct Tee<A, B>(pub A, pub B);

impl<A: SimObserver, B: SimObserver> SimObserver for Tee<A, B> {
    fn on_run_start(&mut self, config: &hd_core::HotelConfig) {
        self.0.on_run_start(config);
        self.1.on_run_start(config);
    }

    fn on_event(&mut self, event: &Event, state: &StateSnapshot) {
        self.0.on_event(event, state);
        self.1.on_event(event, state);
    }

    fn on_run_end(&mut self, report: &RunReport) {
        self.0.on_run_end(report);
        self.1.on_run_end(report);
    }
}
