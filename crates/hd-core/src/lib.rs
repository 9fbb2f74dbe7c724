//! `hd-core` — foundational types for the hotel front-desk / housekeeping DES.
//!
//! This crate is a dependency of every other `hd-*` crate.  It has no `hd-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `GuestId`, `RoomId`                                      |
//! | [`time`]      | `SimTime` (hours since run start), day/hour helpers      |
//! | [`rng`]       | `StreamRng`, `Stream` — independent named random streams |
//! | [`profile`]   | `CapacityProfile`, `IntensityProfile` (24 hourly slots)  |
//! | [`config`]    | `HotelConfig`, `DurationSpec`, policies, validation      |
//! | [`error`]     | `ConfigError`, `ProfileError`, `ConfigResult`            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod profile;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DurationSpec, HotelConfig, RoomRetryPolicy, StayModel};
pub use error::{ConfigError, ConfigResult, ProfileError};
pub use ids::{GuestId, RoomId};
pub use profile::{CapacityProfile, IntensityProfile, HOURS_PER_DAY};
pub use rng::{Stream, StreamRng};
pub use time::SimTime;
