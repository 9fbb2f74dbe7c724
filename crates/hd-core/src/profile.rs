//! Hour-of-day profiles.
//!
//! Both profile types hold exactly 24 slots, validated at construction, so a
//! lookup is a single array index.  Profiles wrap across midnight: hour 30 of
//! a run reads slot 6.

use crate::error::ProfileError;
use crate::SimTime;

/// Slots per profile.
pub const HOURS_PER_DAY: usize = 24;

// ── CapacityProfile ───────────────────────────────────────────────────────────

/// Number of concurrent services a resource can run in each hour of the day.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u32>", into = "Vec<u32>")
)]
pub struct CapacityProfile([u32; HOURS_PER_DAY]);

impl CapacityProfile {
    pub fn new(slots: [u32; HOURS_PER_DAY]) -> Self {
        CapacityProfile(slots)
    }

    /// The same capacity around the clock.
    pub fn constant(capacity: u32) -> Self {
        CapacityProfile([capacity; HOURS_PER_DAY])
    }

    /// Build from `(start_hour, end_hour, capacity)` shifts; hours not covered
    /// by any shift get `off_shift`.  A shift with `end_hour <= start_hour`
    /// runs across midnight.  Later shifts overwrite earlier ones.
    pub fn from_shifts(shifts: &[(usize, usize, u32)], off_shift: u32) -> Self {
        let mut slots = [off_shift; HOURS_PER_DAY];
        for &(start, end, capacity) in shifts {
            let start = start % HOURS_PER_DAY;
            let end = end % HOURS_PER_DAY;
            let mut h = start;
            loop {
                slots[h] = capacity;
                h = (h + 1) % HOURS_PER_DAY;
                if h == end {
                    break;
                }
            }
        }
        CapacityProfile(slots)
    }

    #[inline]
    pub fn at_slot(&self, slot: usize) -> u32 {
        self.0[slot % HOURS_PER_DAY]
    }

    /// Capacity in force at `t`.
    #[inline]
    pub fn at(&self, t: SimTime) -> u32 {
        self.0[t.hour_slot()]
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn slots(&self) -> &[u32; HOURS_PER_DAY] {
        &self.0
    }

    /// Available capacity-time (server-hours) over `[start, end)`, integrated
    /// exactly over the hourly segments.
    pub fn capacity_hours(&self, start: SimTime, end: SimTime) -> f64 {
        let mut total = 0.0;
        let mut t = start;
        while t < end {
            let seg_end = t.next_hour_boundary().min(end);
            total += self.at(t) as f64 * (seg_end - t);
            t = seg_end;
        }
        total
    }
}

impl TryFrom<Vec<u32>> for CapacityProfile {
    type Error = ProfileError;

    fn try_from(v: Vec<u32>) -> Result<Self, ProfileError> {
        let slots: [u32; HOURS_PER_DAY] = v
            .try_into()
            .map_err(|v: Vec<u32>| ProfileError::WrongLength(v.len()))?;
        Ok(CapacityProfile(slots))
    }
}

impl From<CapacityProfile> for Vec<u32> {
    fn from(p: CapacityProfile) -> Vec<u32> {
        p.0.to_vec()
    }
}

// ── IntensityProfile ──────────────────────────────────────────────────────────

/// Relative arrival intensity per hour of day.  The arrival rate at `t` is
/// `base_rate * intensity.at(t)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct IntensityProfile(pub(crate) [f64; HOURS_PER_DAY]);

impl IntensityProfile {
    /// Validate that every slot is finite and non-negative.
    pub fn new(slots: [f64; HOURS_PER_DAY]) -> Result<Self, ProfileError> {
        for (hour, &value) in slots.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidValue { hour, value });
            }
        }
        Ok(IntensityProfile(slots))
    }

    /// Scale `weights` so the slots sum to 1.  With a normalized profile the
    /// base rate is the expected number of arrivals per day.  All-zero
    /// weights stay all-zero.
    pub fn normalized(weights: [f64; HOURS_PER_DAY]) -> Result<Self, ProfileError> {
        let profile = Self::new(weights)?;
        let sum = profile.sum();
        if sum == 0.0 {
            return Ok(profile);
        }
        Ok(IntensityProfile(weights.map(|w| w / sum)))
    }

    #[inline]
    pub fn at_slot(&self, slot: usize) -> f64 {
        self.0[slot % HOURS_PER_DAY]
    }

    #[inline]
    pub fn at(&self, t: SimTime) -> f64 {
        self.0[t.hour_slot()]
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn slots(&self) -> &[f64; HOURS_PER_DAY] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for IntensityProfile {
    type Error = ProfileError;

    fn try_from(v: Vec<f64>) -> Result<Self, ProfileError> {
        let slots: [f64; HOURS_PER_DAY] = v
            .try_into()
            .map_err(|v: Vec<f64>| ProfileError::WrongLength(v.len()))?;
        Self::new(slots)
    }
}

impl From<IntensityProfile> for Vec<f64> {
    fn from(p: IntensityProfile) -> Vec<f64> {
        p.0.to_vec()
    }
}
