//! `hd-schedule` — the event clock, staffing profiles from CSV.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`event`]       | `Event`, `EventKind`                                   |
//! | [`event_queue`] | `EventQueue` (min-heap on `(time, seq)`) + clock       |
//! | [`loader`]      | `load_profiles_csv`, `load_profiles_reader`, `ProfileTable` |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                   |
//!
//! # Ordering model (summary)
//!
//! ```text
//! schedule(t, kind)   → Event { time: t, seq: next_seq++, kind }
//! advance()           → pop min (time, seq); clock.now = event.time
//! schedule(t < now)   → ScheduleError::OrderingViolation
//! ```
//!
//! Two events at the same instant are always dispatched in the order they
//! were scheduled, so runs are reproducible event-for-event.

pub mod error;
pub mod event;
pub mod event_queue;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, EventKind};
pub use event_queue::EventQueue;
pub use loader::{load_profiles_csv, load_profiles_reader, ProfileTable};
