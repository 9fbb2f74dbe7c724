//! The `Sim` run context and its event loop.

use std::collections::VecDeque;

use tracing::{info, trace, warn};

use hd_core::{GuestId, HotelConfig, SimTime};
use hd_facility::{GuestStore, ResourcePool, RoomInventory};
use hd_process::{ArrivalProcess, DurationSampler, GuestMix};
use hd_schedule::{Event, EventKind, EventQueue, ScheduleResult};

use crate::builder::ScriptedGuest;
use crate::kpi::{KpiAggregator, Resource};
use crate::{RunReport, SimError, SimObserver, SimResult, StateSnapshot, Violation};

/// Where arrivals come from.
pub(crate) enum ArrivalSource {
    Generated { process: ArrivalProcess, mix: GuestMix },
    /// Sorted by time; the front is the next arrival.
    Scripted(VecDeque<ScriptedGuest>),
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// All mutable state of one run.
///
/// Every handler takes `&mut self`; nothing is shared between runs, so any
/// number of `Sim`s can run side by side.  Create via
/// [`SimBuilder`][crate::SimBuilder].
///
/// # Event loop
///
/// ```text
/// while next event time <= horizon:
///   ① pop the earliest (time, seq) event; the clock moves to its time
///   ② dispatch to its lifecycle handler (which may schedule more events)
///   ③ check room conservation; any broken contract aborts the run
///   ④ sample queue lengths and occupancy (measured window only)
///   ⑤ observer.on_event
/// ```
pub struct Sim {
    pub(crate) config:             HotelConfig,
    pub(crate) queue:              EventQueue,
    pub(crate) rooms:              RoomInventory,
    pub(crate) guests:             GuestStore,
    pub(crate) front_desk:         ResourcePool<GuestId>,
    pub(crate) housekeeping:       ResourcePool<hd_core::RoomId>,
    pub(crate) kpi:                KpiAggregator,
    pub(crate) arrivals:           ArrivalSource,
    pub(crate) desk_durations:     DurationSampler,
    pub(crate) cleaning_durations: DurationSampler,
    /// Guests who arrived before the check-in hour, in arrival order.
    pub(crate) deferred:           VecDeque<GuestId>,
    /// Guests past desk service without a room, oldest first.
    pub(crate) room_waiters:       VecDeque<GuestId>,
    /// A `RoomRetry` tick is already scheduled.
    pub(crate) retry_pending:      bool,
    pub(crate) events_processed:   u64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Process every event up to and including the horizon, then build the
    /// report.
    ///
    /// A broken engine contract stops the run with [`SimError::Invariant`]
    /// carrying the triggering event and a state snapshot.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        let horizon = self.config.horizon();
        let measure_start = self.config.measure_start();
        info!(
            rooms = self.config.room_count,
            horizon_hours = self.config.horizon_hours,
            warmup_hours = self.config.warmup_hours,
            seed = self.config.seed,
            "starting run"
        );
        observer.on_run_start(&self.config);

        let mut baseline_taken = false;
        while let Some(next) = self.queue.peek_time() {
            if next > horizon {
                break;
            }
            // Pin the level in force when measurement starts.
            if !baseline_taken && next >= measure_start {
                self.record_samples(measure_start);
                baseline_taken = true;
            }
            let Some(event) = self.queue.advance() else { break };
            trace!(%event, "dispatch");

            self.dispatch(event)
                .and_then(|()| self.check_conservation())
                .map_err(|violation| self.invariant(event, violation))?;
            self.events_processed += 1;

            self.record_samples(event.time);
            observer.on_event(&event, &self.snapshot());
        }
        if !baseline_taken {
            self.record_samples(measure_start);
        }

        let report = self.finish();
        observer.on_run_end(&report);
        Ok(report)
    }

    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    pub fn rooms(&self) -> &RoomInventory {
        &self.rooms
    }

    pub fn guests(&self) -> &GuestStore {
        &self.guests
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Counts describing the engine right now.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            time:               self.queue.now(),
            rooms:              self.rooms.counts(),
            front_desk_busy:    self.front_desk.busy(),
            front_desk_queue:   self.front_desk.queue_len(),
            housekeeping_busy:  self.housekeeping.busy(),
            housekeeping_queue: self.housekeeping.queue_len(),
            deferred:           self.deferred.len(),
            awaiting_room:      self.room_waiters.len(),
            pending_events:     self.queue.len(),
        }
    }

    // ── Scheduling helpers ────────────────────────────────────────────────

    /// Schedule `kind` at `time` unless `time` lies past the horizon, where
    /// it could never fire.
    pub(crate) fn schedule_within_horizon(&mut self, time: SimTime, kind: EventKind) -> ScheduleResult<()> {
        if time <= self.config.horizon() {
            self.queue.schedule(time, kind)?;
        }
        Ok(())
    }

    /// Put the next arrival (if any) on the queue.
    pub(crate) fn schedule_next_arrival(&mut self) -> ScheduleResult<()> {
        let next = match &mut self.arrivals {
            ArrivalSource::Generated { process, .. } => process.next_arrival(),
            ArrivalSource::Scripted(script) => script.front().map(|g| g.time),
        };
        match next {
            Some(t) => self.schedule_within_horizon(t, EventKind::Arrival),
            None => Ok(()),
        }
    }

    /// First arrival plus the recurring hour-boundary and check-in-opening
    /// chains.  Each chain reschedules itself.
    pub(crate) fn bootstrap(&mut self) -> ScheduleResult<()> {
        self.schedule_next_arrival()?;
        self.schedule_within_horizon(SimTime::ZERO.next_hour_boundary(), EventKind::HourBoundary)?;
        self.schedule_within_horizon(SimTime::at(0, self.config.checkin_hour), EventKind::CheckinOpens)
    }

    // ── Loop internals ────────────────────────────────────────────────────

    fn dispatch(&mut self, event: Event) -> Result<(), Violation> {
        let now = event.time;
        match event.kind {
            EventKind::Arrival                     => self.on_arrival(now),
            EventKind::FrontDeskServiceComplete(g) => self.on_front_desk_complete(g, now),
            EventKind::CheckOut(g)                 => self.on_checkout(g, now),
            EventKind::CleaningComplete(r)         => self.on_cleaning_complete(r, now),
            EventKind::HourBoundary                => self.on_hour_boundary(now),
            EventKind::CheckinOpens                => self.on_checkin_opens(now),
            EventKind::RoomRetry                   => self.on_room_retry(now),
        }
    }

    fn check_conservation(&self) -> Result<(), Violation> {
        if self.rooms.is_conserved() {
            Ok(())
        } else {
            Err(Violation::Conservation { counts: self.rooms.counts(), room_count: self.config.room_count })
        }
    }

    fn invariant(&self, event: Event, violation: Violation) -> SimError {
        SimError::Invariant {
            time: event.time,
            event,
            violation,
            snapshot: Box::new(self.snapshot()),
        }
    }

    fn record_samples(&mut self, t: SimTime) {
        self.kpi.record_queue_sample(Resource::FrontDesk, t, self.front_desk.queue_len() as u32);
        self.kpi.record_queue_sample(Resource::Housekeeping, t, self.housekeeping.queue_len() as u32);
        self.kpi.record_occupancy_sample(t, self.rooms.occupied_count());
    }

    /// Close services still running at the horizon and build the report.
    fn finish(&mut self) -> RunReport {
        let horizon = self.config.horizon();
        let desk_open: Vec<SimTime> = self.front_desk.in_service().map(|(_, start)| start).collect();
        for start in desk_open {
            self.kpi.record_utilization_span(Resource::FrontDesk, start, horizon);
        }
        let cleaning_open: Vec<SimTime> = self.housekeeping.in_service().map(|(_, start)| start).collect();
        for start in cleaning_open {
            self.kpi.record_utilization_span(Resource::Housekeeping, start, horizon);
        }

        if !self.room_waiters.is_empty() {
            warn!(
                guests = self.room_waiters.len(),
                "guests still waiting for a clean room at the horizon"
            );
        }

        let kpi = std::mem::replace(
            &mut self.kpi,
            KpiAggregator::new(self.config.measure_start(), horizon),
        );
        let report = kpi.finish(&self.config, self.room_waiters.len(), self.events_processed);
        info!(
            events = report.events_processed,
            arrivals = report.counts.arrivals,
            checkins = report.counts.checkins,
            avg_wait_min = report.summary.avg_wait_hours * 60.0,
            front_desk_util = report.front_desk_utilization,
            housekeeping_util = report.housekeeping_utilization,
            occupancy = report.summary.occupancy_rate,
            early_checkin_rate = report.summary.early_checkin_rate,
            "run finished"
        );
        report
    }
}
