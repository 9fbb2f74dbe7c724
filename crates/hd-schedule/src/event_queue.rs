//! `EventQueue` — the simulation clock and its pending-event heap.
//!
//! # Why a sequence number
//!
//! Many events share a timestamp (every hour boundary, every check-in
//! opening, back-to-back zero-wait starts).  A binary heap alone gives no
//! guarantee about which of two equal keys pops first, so each event is
//! stamped with a monotonically increasing insertion sequence and the heap
//! is keyed on `(time, seq)`.  Equal-time events therefore dispatch in the
//! order they were scheduled, on every run.
//!
//! # Performance note
//!
//! `BinaryHeap` gives O(log E) schedule and advance where E is the number of
//! pending events.  For the reference hotel E stays in the low hundreds
//! (one checkout per occupied room plus in-flight services and the
//! pre-generated arrivals).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hd_core::SimTime;

use crate::{Event, EventKind, ScheduleError, ScheduleResult};

/// Min-heap of pending events plus the current simulation time.
#[derive(Default)]
pub struct EventQueue {
    heap:     BinaryHeap<Reverse<Event>>,
    now:      SimTime,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time: the time of the last event returned by
    /// [`advance`][Self::advance], or zero before the first.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `kind` to fire at `time`.
    ///
    /// Returns the stamped event.  Scheduling at exactly `now` is allowed
    /// (it fires after everything already pending at `now`); scheduling
    /// earlier is an ordering violation.
    pub fn schedule(&mut self, time: SimTime, kind: EventKind) -> ScheduleResult<Event> {
        if !time.hours().is_finite() {
            return Err(ScheduleError::NonFiniteTime(time.hours()));
        }
        if time < self.now {
            return Err(ScheduleError::OrderingViolation { at: time, now: self.now });
        }
        let event = Event { time, seq: self.next_seq, kind };
        self.next_seq += 1;
        self.heap.push(Reverse(event));
        Ok(event)
    }

    /// Remove and return the earliest pending event, moving the clock to its
    /// time.  Returns `None` when nothing is pending (the clock stays put).
    pub fn advance(&mut self) -> Option<Event> {
        let Reverse(event) = self.heap.pop()?;
        self.now = event.time;
        Some(event)
    }

    /// Time of the earliest pending event without consuming it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(e)| e.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
