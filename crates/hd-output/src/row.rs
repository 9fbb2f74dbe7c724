//! Plain data row types written by output backends, and their conversion
//! from a [`RunReport`].
//!
//! Every row carries a `scenario` label so one set of files can hold a whole
//! sweep.  Durations are exported in minutes, timestamps in hours.

use hd_core::SimTime;
use hd_schedule::{Event, EventKind};
use hd_sim::{RunReport, StateSnapshot};

const MINUTES_PER_HOUR: f64 = 60.0;

/// One checked-in guest.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestWaitRow {
    pub scenario:          String,
    pub guest_id:          u32,
    pub room_id:           Option<u32>,
    pub arrival_hours:     f64,
    pub checkin_hours:     f64,
    pub nights:            u32,
    pub early_checkin:     bool,
    pub wait_minutes:      f64,
    /// `None` for early check-ins (no desk visit).
    pub desk_wait_minutes: Option<f64>,
    pub room_wait_minutes: Option<f64>,
    pub total_minutes:     f64,
}

/// One step of a queue or occupancy series, in long format.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub scenario:   String,
    /// `front_desk_queue`, `housekeeping_queue`, or `occupied_rooms`.
    pub metric:     &'static str,
    pub time_hours: f64,
    pub value:      u32,
}

/// Scalar results of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub scenario:                 String,
    pub room_count:               u32,
    pub seed:                     u64,
    pub arrivals:                 u64,
    pub checkins:                 u64,
    pub checkouts:                u64,
    pub avg_wait_minutes:         f64,
    pub max_wait_minutes:         f64,
    pub avg_desk_wait_minutes:    f64,
    pub avg_room_wait_minutes:    f64,
    pub avg_total_minutes:        f64,
    pub desk_wait_p50_minutes:    f64,
    pub desk_wait_p90_minutes:    f64,
    pub desk_wait_p95_minutes:    f64,
    pub room_wait_p50_minutes:    f64,
    pub room_wait_p90_minutes:    f64,
    pub room_wait_p95_minutes:    f64,
    pub total_p50_minutes:        f64,
    pub total_p90_minutes:        f64,
    pub total_p95_minutes:        f64,
    pub avg_front_desk_queue:     f64,
    pub avg_housekeeping_queue:   f64,
    pub occupancy_rate:           f64,
    pub front_desk_utilization:   f64,
    pub housekeeping_utilization: f64,
    pub early_checkin_attempts:   u64,
    pub early_checkin_rate:       f64,
    pub left_waiting_for_room:    u64,
}

/// One processed event plus the engine state right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogRow {
    pub seq:                u64,
    pub time_hours:         f64,
    /// `D3 14:05` style clock label.
    pub clock:              String,
    pub kind:               &'static str,
    /// Guest or room id the event concerns, if any.
    pub subject:            Option<u32>,
    pub rooms_clean:        u32,
    pub rooms_dirty:        u32,
    pub rooms_occupied:     u32,
    pub front_desk_queue:   u64,
    pub housekeeping_queue: u64,
    pub awaiting_room:      u64,
}

// ── Conversions ───────────────────────────────────────────────────────────────

pub fn wait_rows(scenario: &str, report: &RunReport) -> Vec<GuestWaitRow> {
    report
        .waits
        .iter()
        .map(|w| GuestWaitRow {
            scenario:          scenario.to_owned(),
            guest_id:          w.guest.0,
            room_id:           w.room.map(|r| r.0),
            arrival_hours:     w.arrival_time.hours(),
            checkin_hours:     w.checkin_time.hours(),
            nights:            w.nights,
            early_checkin:     w.early_checkin,
            wait_minutes:      w.wait_hours * MINUTES_PER_HOUR,
            desk_wait_minutes: w.desk_wait.map(|h| h * MINUTES_PER_HOUR),
            room_wait_minutes: w.room_wait.map(|h| h * MINUTES_PER_HOUR),
            total_minutes:     w.total_hours * MINUTES_PER_HOUR,
        })
        .collect()
}

pub fn series_rows(scenario: &str, report: &RunReport) -> Vec<SeriesRow> {
    let series: [(&'static str, &[(SimTime, u32)]); 3] = [
        ("front_desk_queue", &report.front_desk_queue),
        ("housekeeping_queue", &report.housekeeping_queue),
        ("occupied_rooms", &report.occupancy),
    ];
    series
        .into_iter()
        .flat_map(|(metric, points)| {
            points.iter().map(move |&(t, value)| SeriesRow {
                scenario: scenario.to_owned(),
                metric,
                time_hours: t.hours(),
                value,
            })
        })
        .collect()
}

impl SummaryRow {
    pub fn from_report(scenario: &str, report: &RunReport) -> Self {
        let s = &report.summary;
        Self {
            scenario:                 scenario.to_owned(),
            room_count:               report.config.room_count,
            seed:                     report.config.seed,
            arrivals:                 report.counts.arrivals,
            checkins:                 report.counts.checkins,
            checkouts:                report.counts.checkouts,
            avg_wait_minutes:         s.avg_wait_hours * MINUTES_PER_HOUR,
            max_wait_minutes:         s.max_wait_hours * MINUTES_PER_HOUR,
            avg_desk_wait_minutes:    s.avg_desk_wait_hours * MINUTES_PER_HOUR,
            avg_room_wait_minutes:    s.avg_room_wait_hours * MINUTES_PER_HOUR,
            avg_total_minutes:        s.avg_total_hours * MINUTES_PER_HOUR,
            desk_wait_p50_minutes:    s.desk_wait_pct.p50 * MINUTES_PER_HOUR,
            desk_wait_p90_minutes:    s.desk_wait_pct.p90 * MINUTES_PER_HOUR,
            desk_wait_p95_minutes:    s.desk_wait_pct.p95 * MINUTES_PER_HOUR,
            room_wait_p50_minutes:    s.room_wait_pct.p50 * MINUTES_PER_HOUR,
            room_wait_p90_minutes:    s.room_wait_pct.p90 * MINUTES_PER_HOUR,
            room_wait_p95_minutes:    s.room_wait_pct.p95 * MINUTES_PER_HOUR,
            total_p50_minutes:        s.total_pct.p50 * MINUTES_PER_HOUR,
            total_p90_minutes:        s.total_pct.p90 * MINUTES_PER_HOUR,
            total_p95_minutes:        s.total_pct.p95 * MINUTES_PER_HOUR,
            avg_front_desk_queue:     s.avg_front_desk_queue,
            avg_housekeeping_queue:   s.avg_housekeeping_queue,
            occupancy_rate:           s.occupancy_rate,
            front_desk_utilization:   report.front_desk_utilization,
            housekeeping_utilization: report.housekeeping_utilization,
            early_checkin_attempts:   report.early_checkin.attempts,
            early_checkin_rate:       s.early_checkin_rate,
            left_waiting_for_room:    report.left_waiting_for_room as u64,
        }
    }
}

impl EventLogRow {
    pub fn new(event: &Event, state: &StateSnapshot) -> Self {
        let subject = match event.kind {
            EventKind::FrontDeskServiceComplete(g) | EventKind::CheckOut(g) => Some(g.0),
            EventKind::CleaningComplete(r) => Some(r.0),
            _ => None,
        };
        Self {
            seq:                event.seq,
            time_hours:         event.time.hours(),
            clock:              event.time.to_string(),
            kind:               event.kind.label(),
            subject,
            rooms_clean:        state.rooms.clean,
            rooms_dirty:        state.rooms.dirty,
            rooms_occupied:     state.rooms.occupied,
            front_desk_queue:   state.front_desk_queue as u64,
            housekeeping_queue: state.housekeeping_queue as u64,
            awaiting_room:      state.awaiting_room as u64,
        }
    }
}
