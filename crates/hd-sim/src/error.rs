use hd_core::{ConfigError, GuestId, SimTime};
use hd_facility::{FacilityError, GuestError, ResourceError, RoomCounts, RoomError};
use hd_schedule::{Event, ScheduleError};
use thiserror::Error;

/// Engine state at the moment of a failure (or of any event, for observers).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub time:               SimTime,
    pub rooms:              RoomCounts,
    pub front_desk_busy:    usize,
    pub front_desk_queue:   usize,
    pub housekeeping_busy:  usize,
    pub housekeeping_queue: usize,
    /// Guests deferred until the next check-in opening.
    pub deferred:           usize,
    /// Guests past desk service waiting for a clean room.
    pub awaiting_room:      usize,
    pub pending_events:     usize,
}

/// A broken engine contract.  Always a bug, never a data condition.
#[derive(Debug, Error)]
pub enum Violation {
    #[error(transparent)]
    Facility(#[from] FacilityError),

    #[error("event ordering: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("room counts {counts:?} do not add up to {room_count} rooms")]
    Conservation { counts: RoomCounts, room_count: u32 },

    #[error("{0} is checked in without a room")]
    MissingRoom(GuestId),
}

impl From<RoomError> for Violation {
    fn from(e: RoomError) -> Self {
        Violation::Facility(e.into())
    }
}

impl From<ResourceError> for Violation {
    fn from(e: ResourceError) -> Self {
        Violation::Facility(e.into())
    }
}

impl From<GuestError> for Violation {
    fn from(e: GuestError) -> Self {
        Violation::Facility(e.into())
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not seed the event queue: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("invariant violated at {time} while handling {event}: {violation}")]
    Invariant {
        time:      SimTime,
        event:     Event,
        violation: Violation,
        snapshot:  Box<StateSnapshot>,
    },
}

pub type SimResult<T> = Result<T, SimError>;
