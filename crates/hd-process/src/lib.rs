//! `hd-process` — the random inputs of a run.
//!
//! Each generator owns one [`StreamRng`][hd_core::StreamRng] and nothing else
//! draws from it, so the arrival sequence, the guest attributes, and the two
//! service-duration sequences are each a pure function of the seed.
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`arrivals`]  | `ArrivalProcess` — non-homogeneous Poisson by thinning      |
//! | [`duration`]  | `DurationSampler` — strictly positive service durations     |
//! | [`guest_mix`] | `GuestMix`, `GuestTraits` — nights of stay, early request   |

pub mod arrivals;
pub mod duration;
pub mod guest_mix;


pub use arrivals::ArrivalProcess;
pub use duration::{DurationSampler, MIN_DURATION_HOURS};
pub use guest_mix::{GuestMix, GuestTraits};
