//! Timestamped events.

use std::cmp::Ordering;
use std::fmt;

use hd_core::{GuestId, RoomId, SimTime};

/// What happens when an event fires, with the id it concerns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A new guest walks in.  The guest record is created by the handler.
    Arrival,
    /// The front desk finished serving this guest.
    FrontDeskServiceComplete(GuestId),
    /// This guest's stay is over.
    CheckOut(GuestId),
    /// Housekeeping finished cleaning this room.
    CleaningComplete(RoomId),
    /// Top of an hour: staffing may have changed.
    HourBoundary,
    /// The standard check-in hour of a day: deferred guests join the desk queue.
    CheckinOpens,
    /// Periodic re-attempt for guests waiting for a clean room.
    RoomRetry,
}

impl EventKind {
    /// Short lowercase label for logs and exported event traces.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Arrival                     => "arrival",
            EventKind::FrontDeskServiceComplete(_) => "front_desk_complete",
            EventKind::CheckOut(_)                 => "checkout",
            EventKind::CleaningComplete(_)         => "cleaning_complete",
            EventKind::HourBoundary                => "hour_boundary",
            EventKind::CheckinOpens                => "checkin_opens",
            EventKind::RoomRetry                   => "room_retry",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::FrontDeskServiceComplete(g) | EventKind::CheckOut(g) => {
                write!(f, "{} {}", self.label(), g)
            }
            EventKind::CleaningComplete(r) => write!(f, "{} {}", self.label(), r),
            _ => f.write_str(self.label()),
        }
    }
}

/// One scheduled occurrence.  Created only by
/// [`EventQueue::schedule`][crate::EventQueue::schedule], which stamps the
/// insertion sequence; never mutated afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time: SimTime,
    /// Insertion sequence; breaks ties on equal `time`.
    pub seq:  u64,
    pub kind: EventKind,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} @ {} ({:.4} h): {}", self.seq, self.time, self.time.hours(), self.kind)
    }
}
