//! `hd-facility` — the hotel's physical state: rooms, servers, guests.
//!
//! Nothing here knows about events or randomness.  Each type enforces its own
//! state machine and reports a breach as an error; the engine in `hd-sim`
//! turns those into fatal invariant violations.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`rooms`]    | `RoomInventory`, `RoomState` (VC → O → VD → VC)           |
//! | [`resource`] | `ResourcePool<J>` — FIFO servers, time-varying capacity   |
//! | [`guests`]   | `GuestStore`, `Guest`, `GuestPhase`                       |
//! | [`error`]    | `RoomError`, `ResourceError`, `GuestError`, `FacilityError` |
//!
//! Rooms and guests point at each other only by id (`Room::occupant`,
//! `Guest::room`); both tables own their records.

pub mod error;
pub mod guests;
pub mod resource;
pub mod rooms;

#[cfg(test)]
mod tests;

pub use error::{FacilityError, FacilityResult, GuestError, ResourceError, RoomError};
pub use guests::{Guest, GuestPhase, GuestStore};
pub use resource::{Admission, ResourcePool, ServiceSpan};
pub use rooms::{Room, RoomCounts, RoomInventory, RoomState};
