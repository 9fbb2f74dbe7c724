//! Guest lifecycle handlers, one per event kind.
//!
//! ```text
//! Arrival ─┬─ early request, before check-in hour, clean room ──▶ check in (wait 0)
//!          ├─ before check-in hour otherwise ──▶ deferred until CheckinOpens
//!          └─ at/after check-in hour ──▶ front-desk queue
//! FrontDeskServiceComplete ─┬─ clean room ──▶ check in
//!                           └─ none ──▶ wait for a room (retry policy)
//! CheckOut ──▶ room O → VD ──▶ housekeeping queue
//! CleaningComplete ──▶ room VD → VC ──▶ oldest room waiter (on-cleaning policy)
//! ```
//!
//! Handlers return `Violation` for any broken contract; the loop in
//! `sim.rs` attaches the event and a snapshot.

use tracing::debug;

use hd_core::{GuestId, RoomId, RoomRetryPolicy, SimTime, StayModel, HOURS_PER_DAY};
use hd_facility::{Admission, GuestPhase};
use hd_schedule::EventKind;

use crate::builder::ScriptedGuest;
use crate::kpi::{Resource, WaitRecord};
use crate::sim::ArrivalSource;
use crate::{Sim, Violation};

impl Sim {
    // ── Arrival ───────────────────────────────────────────────────────────

    pub(crate) fn on_arrival(&mut self, now: SimTime) -> Result<(), Violation> {
        let (nights, early) = match &mut self.arrivals {
            ArrivalSource::Generated { mix, .. } => {
                let traits = mix.draw();
                (traits.nights, traits.early_checkin_requested)
            }
            ArrivalSource::Scripted(script) => match script.pop_front() {
                Some(ScriptedGuest { nights, early_checkin_requested, .. }) => (nights, early_checkin_requested),
                None => return Ok(()),
            },
        };
        let id = self.guests.admit(now, nights, early);
        self.kpi.record_arrival(now);
        self.schedule_next_arrival()?;

        let opening = SimTime::at(now.day(), self.config.checkin_hour);
        if now >= opening {
            return self.join_front_desk(id, now);
        }

        if early {
            // Guests already waiting for a room keep their place.
            let room = if self.room_waiters.is_empty() {
                self.rooms.assign_first_clean(id)?
            } else {
                None
            };
            if let Some(room) = room {
                self.guests.get_mut(id)?.early_checkin_success = Some(true);
                self.kpi.record_early_checkin_outcome(now, true);
                debug!(guest = %id, room = %room, at = %now, "early check-in");
                return self.check_in(id, room, now);
            }
            // Failed early guests keep counting from arrival.
            self.guests.get_mut(id)?.early_checkin_success = Some(false);
            self.kpi.record_early_checkin_outcome(now, false);
            debug!(guest = %id, at = %now, "early check-in failed, no clean room");
        } else {
            self.guests.get_mut(id)?.wait_start = opening;
        }
        self.guests.advance(id, GuestPhase::AwaitingStandardCheckin)?;
        self.deferred.push_back(id);
        Ok(())
    }

    pub(crate) fn on_checkin_opens(&mut self, now: SimTime) -> Result<(), Violation> {
        let released: Vec<GuestId> = self.deferred.drain(..).collect();
        if !released.is_empty() {
            debug!(guests = released.len(), at = %now, "check-in opens");
        }
        for id in released {
            self.join_front_desk(id, now)?;
        }
        let next = SimTime::at(now.day() + 1, self.config.checkin_hour);
        self.schedule_within_horizon(next, EventKind::CheckinOpens)?;
        Ok(())
    }

    // ── Front desk ────────────────────────────────────────────────────────

    fn join_front_desk(&mut self, id: GuestId, now: SimTime) -> Result<(), Violation> {
        self.guests.get_mut(id)?.desk_queue_entry = Some(now);
        match self.front_desk.request_service(now, id)? {
            Admission::Started => self.begin_desk_service(id, now),
            Admission::Queued { position } => {
                self.guests.advance(id, GuestPhase::InFrontDeskQueue)?;
                debug!(guest = %id, position, at = %now, "queued at front desk");
                Ok(())
            }
        }
    }

    fn begin_desk_service(&mut self, id: GuestId, now: SimTime) -> Result<(), Violation> {
        self.guests.advance(id, GuestPhase::InService)?.front_desk_start = Some(now);
        let duration = self.desk_durations.sample_hours();
        self.schedule_within_horizon(now + duration, EventKind::FrontDeskServiceComplete(id))?;
        Ok(())
    }

    pub(crate) fn on_front_desk_complete(&mut self, id: GuestId, now: SimTime) -> Result<(), Violation> {
        let span = self.front_desk.on_completion(now, id)?;
        self.kpi.record_utilization_span(Resource::FrontDesk, span.start, span.end);
        self.guests.get_mut(id)?.front_desk_end = Some(now);

        // Nobody may jump the room line.
        let room = if self.room_waiters.is_empty() {
            self.rooms.assign_first_clean(id)?
        } else {
            None
        };
        match room {
            Some(room) => self.check_in(id, room, now)?,
            None => self.wait_for_room(id, now)?,
        }

        for next in self.front_desk.start_ready(now) {
            self.begin_desk_service(next, now)?;
        }
        Ok(())
    }

    // ── Rooms ─────────────────────────────────────────────────────────────

    fn wait_for_room(&mut self, id: GuestId, now: SimTime) -> Result<(), Violation> {
        self.guests.advance(id, GuestPhase::AwaitingRoom)?;
        self.room_waiters.push_back(id);
        debug!(guest = %id, waiting = self.room_waiters.len(), at = %now, "waiting for a clean room");
        match self.config.room_retry {
            RoomRetryPolicy::OnCleaningComplete => self.assign_waiting(now),
            RoomRetryPolicy::Periodic { interval_hours } => {
                if !self.retry_pending {
                    self.retry_pending = true;
                    self.schedule_within_horizon(now + interval_hours, EventKind::RoomRetry)?;
                }
                Ok(())
            }
        }
    }

    /// Hand clean rooms to waiting guests, oldest first, lowest room id first.
    fn assign_waiting(&mut self, now: SimTime) -> Result<(), Violation> {
        while let Some(&id) = self.room_waiters.front() {
            let Some(room) = self.rooms.assign_first_clean(id)? else { break };
            self.room_waiters.pop_front();
            self.check_in(id, room, now)?;
        }
        Ok(())
    }

    pub(crate) fn on_room_retry(&mut self, now: SimTime) -> Result<(), Violation> {
        self.retry_pending = false;
        self.assign_waiting(now)?;
        if let RoomRetryPolicy::Periodic { interval_hours } = self.config.room_retry {
            if !self.room_waiters.is_empty() {
                self.retry_pending = true;
                self.schedule_within_horizon(now + interval_hours, EventKind::RoomRetry)?;
            }
        }
        Ok(())
    }

    /// `room` is already Occupied by `id`; finish the guest's side and
    /// schedule the checkout.
    fn check_in(&mut self, id: GuestId, room: RoomId, now: SimTime) -> Result<(), Violation> {
        let nights = self.guests.get(id)?.nights;
        let checkout = self.checkout_time(nights, now);

        let guest = self.guests.advance(id, GuestPhase::CheckedIn)?;
        guest.room = Some(room);
        guest.checkin_time = Some(now);
        guest.requested_stay_length = Some(checkout - now);
        let record = WaitRecord::from_guest(guest);

        self.kpi.record_checkin(now);
        if let Some(record) = record {
            debug!(guest = %id, room = %room, wait_min = record.wait_hours * 60.0, "checked in");
            self.kpi.record_wait(record);
        }
        self.schedule_within_horizon(checkout, EventKind::CheckOut(id))?;
        Ok(())
    }

    fn checkout_time(&self, nights: u32, checkin: SimTime) -> SimTime {
        match self.config.stay_model {
            StayModel::CheckoutHour => SimTime::at(checkin.day() + nights as u64, self.config.checkout_hour),
            StayModel::FixedHours => checkin + nights as f64 * HOURS_PER_DAY as f64,
        }
    }

    pub(crate) fn on_checkout(&mut self, id: GuestId, now: SimTime) -> Result<(), Violation> {
        let guest = self.guests.advance(id, GuestPhase::CheckedOut)?;
        guest.checkout_time = Some(now);
        let room = guest.room.ok_or(Violation::MissingRoom(id))?;
        self.rooms.check_out(room, id)?;
        self.kpi.record_checkout(now);
        debug!(guest = %id, room = %room, at = %now, "checked out");

        match self.housekeeping.request_service(now, room)? {
            Admission::Started => self.begin_cleaning(room, now),
            Admission::Queued { .. } => Ok(()),
        }
    }

    // ── Housekeeping ──────────────────────────────────────────────────────

    fn begin_cleaning(&mut self, room: RoomId, now: SimTime) -> Result<(), Violation> {
        let duration = self.cleaning_durations.sample_hours();
        self.schedule_within_horizon(now + duration, EventKind::CleaningComplete(room))?;
        Ok(())
    }

    pub(crate) fn on_cleaning_complete(&mut self, room: RoomId, now: SimTime) -> Result<(), Violation> {
        let span = self.housekeeping.on_completion(now, room)?;
        self.kpi.record_utilization_span(Resource::Housekeeping, span.start, span.end);
        self.rooms.finish_cleaning(room)?;

        if self.config.room_retry == RoomRetryPolicy::OnCleaningComplete {
            self.assign_waiting(now)?;
        }
        for next in self.housekeeping.start_ready(now) {
            self.begin_cleaning(next, now)?;
        }
        Ok(())
    }

    // ── Staffing ──────────────────────────────────────────────────────────

    /// Capacity may have risen: start whatever the new level allows.
    pub(crate) fn on_hour_boundary(&mut self, now: SimTime) -> Result<(), Violation> {
        for id in self.front_desk.start_ready(now) {
            self.begin_desk_service(id, now)?;
        }
        for room in self.housekeeping.start_ready(now) {
            self.begin_cleaning(room, now)?;
        }
        self.schedule_within_horizon(now.next_hour_boundary(), EventKind::HourBoundary)?;
        Ok(())
    }
}
