//! Simulation time model.
//!
//! # Design
//!
//! Time is a floating-point number of simulated hours since the start of the
//! run.  Hour 0 is midnight of day 0, so the hour of day is simply
//! `t mod 24`.  There is no wall-clock coupling.
//!
//! `SimTime` is totally ordered (via `f64::total_cmp`) so it can key the event
//! queue directly.  Constructors reject NaN; every other value the engine
//! produces is a sum of finite, non-negative durations.

use std::cmp::Ordering;
use std::fmt;

use crate::profile::HOURS_PER_DAY;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp, in hours.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Timestamp at `hour` (fractional allowed) of `day`.
    #[inline]
    pub fn at(day: u64, hour: f64) -> SimTime {
        SimTime(day as f64 * HOURS_PER_DAY as f64 + hour)
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.0
    }

    /// Zero-based day index.
    #[inline]
    pub fn day(self) -> u64 {
        (self.0 / HOURS_PER_DAY as f64).floor().max(0.0) as u64
    }

    /// Fractional hour within the day, in `[0, 24)`.
    #[inline]
    pub fn hour_of_day(self) -> f64 {
        self.0.rem_euclid(HOURS_PER_DAY as f64)
    }

    /// Whole hour slot within the day, in `0..24`.  Used to index profiles.
    #[inline]
    pub fn hour_slot(self) -> usize {
        (self.hour_of_day().floor() as usize).min(HOURS_PER_DAY - 1)
    }

    /// The first whole-hour boundary strictly after `self`.
    #[inline]
    pub fn next_hour_boundary(self) -> SimTime {
        SimTime(self.0.floor() + 1.0)
    }

    /// Hours elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    /// `D3 14:05`: day index plus clock time, for logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hod = self.hour_of_day();
        let hh = hod.floor() as u32;
        let mm = ((hod - hh as f64) * 60.0).floor() as u32;
        write!(f, "D{} {:02}:{:02}", self.day(), hh, mm.min(59))
    }
}
