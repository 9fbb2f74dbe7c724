//! Guest records and their lifecycle phases.
//!
//! Guests are never removed: a checked-out guest stays in the table with
//! `phase == CheckedOut` so the final report can read its timestamps.  The
//! "active" guests are the ones not yet checked out.

use hd_core::{GuestId, RoomId, SimTime};

use crate::GuestError;

/// Where a guest is in the check-in / stay cycle.
///
/// ```text
/// Arrived ─┬─────────────────────────────────────────────▶ CheckedIn (early)
///          ├─▶ AwaitingStandardCheckin ─┬─▶ InFrontDeskQueue ─▶ InService
///          └────────────────────────────┴─▶ InService ─────────────┘
/// InService ─┬─▶ CheckedIn ─▶ CheckedOut
///            └─▶ AwaitingRoom ─▶ CheckedIn
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GuestPhase {
    Arrived,
    /// Arrived before the standard check-in hour; released at the opening.
    AwaitingStandardCheckin,
    InFrontDeskQueue,
    InService,
    /// Front-desk service done, no clean room yet.
    AwaitingRoom,
    CheckedIn,
    CheckedOut,
}

impl GuestPhase {
    /// Whether `self → to` is a legal step.
    pub fn can_become(self, to: GuestPhase) -> bool {
        use GuestPhase::*;
        matches!(
            (self, to),
            (Arrived, AwaitingStandardCheckin | InFrontDeskQueue | InService | CheckedIn)
                | (AwaitingStandardCheckin, InFrontDeskQueue | InService)
                | (InFrontDeskQueue, InService)
                | (InService, AwaitingRoom | CheckedIn)
                | (AwaitingRoom, CheckedIn)
                | (CheckedIn, CheckedOut)
        )
    }
}

/// One guest.  Timestamps are filled in as the guest advances.
#[derive(Clone, Debug, PartialEq)]
pub struct Guest {
    pub id:                      GuestId,
    pub arrival_time:            SimTime,
    /// Whole nights booked (drawn at arrival).
    pub nights:                  u32,
    pub early_checkin_requested: bool,
    /// `Some(true/false)` once an early grab was attempted.
    pub early_checkin_success:   Option<bool>,
    /// Stay in hours, resolved at check-in so that
    /// `checkout_time - checkin_time == requested_stay_length`.
    pub requested_stay_length:   Option<f64>,
    /// Origin of the recorded wait (arrival, or the check-in opening for
    /// deferred guests who never asked for early check-in).
    pub wait_start:              SimTime,
    /// When the guest joined the front-desk queue.
    pub desk_queue_entry:        Option<SimTime>,
    pub front_desk_start:        Option<SimTime>,
    pub front_desk_end:          Option<SimTime>,
    pub room:                    Option<RoomId>,
    pub checkin_time:            Option<SimTime>,
    pub checkout_time:           Option<SimTime>,
    pub phase:                   GuestPhase,
}

impl Guest {
    /// Recorded check-in wait, in hours.
    pub fn wait_hours(&self) -> Option<f64> {
        self.checkin_time.map(|t| t - self.wait_start)
    }

    /// Time spent in the front-desk queue before service started.
    pub fn desk_wait_hours(&self) -> Option<f64> {
        Some(self.front_desk_start? - self.desk_queue_entry?)
    }

    /// Time between the end of front-desk service and getting a room.
    pub fn room_wait_hours(&self) -> Option<f64> {
        Some(self.checkin_time? - self.front_desk_end?)
    }

    /// Arrival to room, regardless of when the wait is counted from.
    pub fn total_hours_to_room(&self) -> Option<f64> {
        self.checkin_time.map(|t| t - self.arrival_time)
    }

    pub fn was_early_checkin(&self) -> bool {
        self.early_checkin_success == Some(true)
    }
}

/// Owned guest table indexed by `GuestId` (ids are dense, in arrival order).
#[derive(Default)]
pub struct GuestStore {
    guests: Vec<Guest>,
}

impl GuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a guest in phase `Arrived` and return its id.
    pub fn admit(&mut self, arrival_time: SimTime, nights: u32, early_checkin_requested: bool) -> GuestId {
        let id = GuestId(self.guests.len() as u32);
        self.guests.push(Guest {
            id,
            arrival_time,
            nights,
            early_checkin_requested,
            early_checkin_success: None,
            requested_stay_length: None,
            wait_start: arrival_time,
            desk_queue_entry: None,
            front_desk_start: None,
            front_desk_end: None,
            room: None,
            checkin_time: None,
            checkout_time: None,
            phase: GuestPhase::Arrived,
        });
        id
    }

    pub fn get(&self, id: GuestId) -> Result<&Guest, GuestError> {
        self.guests.get(id.index()).ok_or(GuestError::UnknownGuest(id))
    }

    pub fn get_mut(&mut self, id: GuestId) -> Result<&mut Guest, GuestError> {
        self.guests.get_mut(id.index()).ok_or(GuestError::UnknownGuest(id))
    }

    /// Move `id` to phase `to`, rejecting illegal steps.  Returns the record
    /// for further updates.
    pub fn advance(&mut self, id: GuestId, to: GuestPhase) -> Result<&mut Guest, GuestError> {
        let guest = self.get_mut(id)?;
        if !guest.phase.can_become(to) {
            return Err(GuestError::IllegalPhase { guest: id, from: guest.phase, to });
        }
        guest.phase = to;
        Ok(guest)
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Guest> {
        self.guests.iter()
    }
}
