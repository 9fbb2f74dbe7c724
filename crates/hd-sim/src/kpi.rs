//! KPI accumulation and the final [`RunReport`].
//!
//! The aggregator is passive: the engine pushes observations into it and it
//! never reads engine state.  Only the measured window `[warm-up, horizon]`
//! counts:
//!
//! - guest-level records (waits, early check-in outcomes) belong to the
//!   window when the guest *arrived* inside it;
//! - step samples and counts are kept when their timestamp is inside it;
//! - busy spans are clipped to it.
//!
//! Queue-length and occupancy series are exact step functions: a sample is
//! taken after every event, a later sample at the same instant replaces the
//! earlier one, and a sample equal to the current level is dropped.  No two
//! consecutive points share a value.

use hd_core::{GuestId, HotelConfig, RoomId, SimTime};
use hd_facility::Guest;

/// The two server pools.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    FrontDesk,
    Housekeeping,
}

impl Resource {
    #[inline]
    fn index(self) -> usize {
        match self {
            Resource::FrontDesk    => 0,
            Resource::Housekeeping => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::FrontDesk    => "front_desk",
            Resource::Housekeeping => "housekeeping",
        }
    }
}

/// One checked-in guest's wait, all durations in hours.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitRecord {
    pub guest:         GuestId,
    pub room:          Option<RoomId>,
    pub arrival_time:  SimTime,
    pub checkin_time:  SimTime,
    pub nights:        u32,
    pub early_checkin: bool,
    /// The recorded wait: check-in minus arrival, or minus the check-in
    /// opening for guests deferred without an early request.
    pub wait_hours:    f64,
    /// Front-desk queue wait; `None` for early check-ins (no desk visit).
    pub desk_wait:     Option<f64>,
    /// Wait for a clean room after desk service; `None` for early check-ins.
    pub room_wait:     Option<f64>,
    /// Arrival to room.
    pub total_hours:   f64,
}

impl WaitRecord {
    /// Build from a checked-in guest.  `None` if the guest has no check-in.
    pub fn from_guest(guest: &Guest) -> Option<Self> {
        let checkin_time = guest.checkin_time?;
        Some(Self {
            guest: guest.id,
            room: guest.room,
            arrival_time: guest.arrival_time,
            checkin_time,
            nights: guest.nights,
            early_checkin: guest.was_early_checkin(),
            wait_hours: guest.wait_hours()?,
            desk_wait: guest.desk_wait_hours(),
            room_wait: guest.room_wait_hours(),
            total_hours: guest.total_hours_to_room()?,
        })
    }
}

/// Early check-in attempts and successes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarlyCheckinStats {
    pub attempts:  u64,
    pub successes: u64,
}

impl EarlyCheckinStats {
    /// `successes / attempts`, or `None` when nobody tried.
    pub fn rate(&self) -> Option<f64> {
        (self.attempts > 0).then(|| self.successes as f64 / self.attempts as f64)
    }
}

/// Event counts inside the measured window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunCounts {
    pub arrivals:  u64,
    pub checkins:  u64,
    pub checkouts: u64,
}

/// Median and upper tail of a wait distribution, in hours.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percentiles {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
}

impl Percentiles {
    /// Linear interpolation between closest ranks.  All zero for no values.
    pub fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.collect();
        sorted.sort_by(f64::total_cmp);
        Self {
            p50: percentile(&sorted, 0.50),
            p90: percentile(&sorted, 0.90),
            p95: percentile(&sorted, 0.95),
        }
    }
}

/// Scalar statistics over the measured window.  Wait statistics are `0.0`
/// when no guest was recorded.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub avg_wait_hours:         f64,
    pub max_wait_hours:         f64,
    pub avg_desk_wait_hours:    f64,
    pub avg_room_wait_hours:    f64,
    pub avg_total_hours:        f64,
    pub desk_wait_pct:          Percentiles,
    pub room_wait_pct:          Percentiles,
    /// Arrival to room.
    pub total_pct:              Percentiles,
    pub avg_front_desk_queue:   f64,
    pub avg_housekeeping_queue: f64,
    pub avg_occupied_rooms:     f64,
    /// Average occupied rooms over the room count.
    pub occupancy_rate:         f64,
    /// Zero when no early check-in was attempted.
    pub early_checkin_rate:     f64,
}

/// Everything a run returns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub config:                   HotelConfig,
    /// Checked-in guests who arrived in the measured window, in check-in order.
    pub waits:                    Vec<WaitRecord>,
    pub front_desk_queue:         Vec<(SimTime, u32)>,
    pub housekeeping_queue:       Vec<(SimTime, u32)>,
    pub occupancy:                Vec<(SimTime, u32)>,
    pub front_desk_utilization:   f64,
    pub housekeeping_utilization: f64,
    pub early_checkin:            EarlyCheckinStats,
    pub counts:                   RunCounts,
    pub summary:                  Summary,
    /// Guests still waiting for a room (after desk service) at the horizon.
    pub left_waiting_for_room:    usize,
    pub events_processed:         u64,
}

impl RunReport {
    pub fn utilization(&self, resource: Resource) -> f64 {
        match resource {
            Resource::FrontDesk    => self.front_desk_utilization,
            Resource::Housekeeping => self.housekeeping_utilization,
        }
    }

    pub fn queue_series(&self, resource: Resource) -> &[(SimTime, u32)] {
        match resource {
            Resource::FrontDesk    => &self.front_desk_queue,
            Resource::Housekeeping => &self.housekeeping_queue,
        }
    }
}

// ── KpiAggregator ─────────────────────────────────────────────────────────────

/// Run-scoped metric accumulator.
pub struct KpiAggregator {
    start:        SimTime,
    end:          SimTime,
    waits:        Vec<WaitRecord>,
    queues:       [Vec<(SimTime, u32)>; 2],
    occupancy:    Vec<(SimTime, u32)>,
    busy_hours:   [f64; 2],
    early:        EarlyCheckinStats,
    counts:       RunCounts,
}

impl KpiAggregator {
    /// Measure over `[start, end]`.
    pub fn new(start: SimTime, end: SimTime) -> Self {
        Self {
            start,
            end,
            waits:      Vec::new(),
            queues:     [Vec::new(), Vec::new()],
            occupancy:  Vec::new(),
            busy_hours: [0.0; 2],
            early:      EarlyCheckinStats::default(),
            counts:     RunCounts::default(),
        }
    }

    #[inline]
    pub fn in_window(&self, t: SimTime) -> bool {
        t >= self.start && t <= self.end
    }

    // ── Ingestion ─────────────────────────────────────────────────────────

    pub fn record_wait(&mut self, record: WaitRecord) {
        if self.in_window(record.arrival_time) {
            self.waits.push(record);
        }
    }

    pub fn record_queue_sample(&mut self, resource: Resource, time: SimTime, length: u32) {
        if self.in_window(time) {
            push_step(&mut self.queues[resource.index()], time, length);
        }
    }

    pub fn record_occupancy_sample(&mut self, time: SimTime, occupied: u32) {
        if self.in_window(time) {
            push_step(&mut self.occupancy, time, occupied);
        }
    }

    /// Add a busy interval, clipped to the measured window.
    pub fn record_utilization_span(&mut self, resource: Resource, start: SimTime, end: SimTime) {
        let from = start.max(self.start);
        let to = end.min(self.end);
        if to > from {
            self.busy_hours[resource.index()] += to - from;
        }
    }

    /// `arrival_time` decides whether the outcome is in the window.
    pub fn record_early_checkin_outcome(&mut self, arrival_time: SimTime, success: bool) {
        if self.in_window(arrival_time) {
            self.early.attempts += 1;
            if success {
                self.early.successes += 1;
            }
        }
    }

    pub fn record_arrival(&mut self, time: SimTime) {
        if self.in_window(time) {
            self.counts.arrivals += 1;
        }
    }

    pub fn record_checkin(&mut self, time: SimTime) {
        if self.in_window(time) {
            self.counts.checkins += 1;
        }
    }

    pub fn record_checkout(&mut self, time: SimTime) {
        if self.in_window(time) {
            self.counts.checkouts += 1;
        }
    }

    // ── Read-only views ───────────────────────────────────────────────────

    pub fn waits(&self) -> &[WaitRecord] {
        &self.waits
    }

    pub fn early_checkin(&self) -> EarlyCheckinStats {
        self.early
    }

    pub fn counts(&self) -> RunCounts {
        self.counts
    }

    pub fn busy_hours(&self, resource: Resource) -> f64 {
        self.busy_hours[resource.index()]
    }

    /// Busy time over available capacity-time in the window, in `[0, 1]`.
    /// Zero when the profile offers no capacity in the window.
    pub fn utilization(&self, resource: Resource, capacity_hours: f64) -> f64 {
        if capacity_hours <= 0.0 {
            return 0.0;
        }
        (self.busy_hours[resource.index()] / capacity_hours).clamp(0.0, 1.0)
    }

    /// Assemble the report.  Capacity-time for each pool comes from the
    /// config's profiles, integrated over the window.
    pub fn finish(
        self,
        config:                &HotelConfig,
        left_waiting_for_room: usize,
        events_processed:      u64,
    ) -> RunReport {
        let fd_cap = config.front_desk_staffing.capacity_hours(self.start, self.end);
        let hk_cap = config.housekeeping_staffing.capacity_hours(self.start, self.end);
        let front_desk_utilization = self.utilization(Resource::FrontDesk, fd_cap);
        let housekeeping_utilization = self.utilization(Resource::Housekeeping, hk_cap);

        let avg_occupied_rooms = time_average(&self.occupancy, self.start, self.end);
        let summary = Summary {
            avg_wait_hours:         mean(self.waits.iter().map(|w| w.wait_hours)),
            max_wait_hours:         self.waits.iter().map(|w| w.wait_hours).fold(0.0, f64::max),
            avg_desk_wait_hours:    mean(self.waits.iter().filter_map(|w| w.desk_wait)),
            avg_room_wait_hours:    mean(self.waits.iter().filter_map(|w| w.room_wait)),
            avg_total_hours:        mean(self.waits.iter().map(|w| w.total_hours)),
            desk_wait_pct:          Percentiles::of(self.waits.iter().filter_map(|w| w.desk_wait)),
            room_wait_pct:          Percentiles::of(self.waits.iter().filter_map(|w| w.room_wait)),
            total_pct:              Percentiles::of(self.waits.iter().map(|w| w.total_hours)),
            avg_front_desk_queue:   time_average(&self.queues[0], self.start, self.end),
            avg_housekeeping_queue: time_average(&self.queues[1], self.start, self.end),
            avg_occupied_rooms,
            occupancy_rate:         avg_occupied_rooms / config.room_count.max(1) as f64,
            early_checkin_rate:     self.early.rate().unwrap_or(0.0),
        };

        let [front_desk_queue, housekeeping_queue] = self.queues;
        RunReport {
            config: config.clone(),
            waits: self.waits,
            front_desk_queue,
            housekeeping_queue,
            occupancy: self.occupancy,
            front_desk_utilization,
            housekeeping_utilization,
            early_checkin: self.early,
            counts: self.counts,
            summary,
            left_waiting_for_room,
            events_processed,
        }
    }
}

/// Append a step, replacing a same-instant sample and skipping no-ops.
fn push_step(series: &mut Vec<(SimTime, u32)>, time: SimTime, value: u32) {
    match series.last_mut() {
        Some(last) if last.0 == time => {
            last.1 = value;
            // The replacement may now repeat the level before it.
            let n = series.len();
            if n >= 2 && series[n - 2].1 == value {
                series.pop();
            }
        }
        Some(last) if last.1 == value => {}
        _ => series.push((time, value)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// `q`-quantile of an ascending slice; `0.0` when empty.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else { return 0.0 };
    let rank = q * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Time-weighted mean of a step series over `[start, end]`.  The level
/// before the first sample counts as zero.
pub fn time_average(series: &[(SimTime, u32)], start: SimTime, end: SimTime) -> f64 {
    let span = end - start;
    if span <= 0.0 {
        return 0.0;
    }
    let mut area = 0.0;
    for (i, &(t, v)) in series.iter().enumerate() {
        let next = series.get(i + 1).map_or(end, |&(n, _)| n);
        area += v as f64 * (next.min(end) - t.max(start)).max(0.0);
    }
    area / span
}
