//! Run configuration.
//!
//! `HotelConfig` is the single input of a run.  It is plain data: the
//! application crate typically loads it from JSON (feature `serde`), patches
//! a few fields from the command line, and hands it to `hd_sim::run`, which
//! calls [`HotelConfig::validate`] before touching any state.

use crate::error::{ConfigError, ConfigResult};
use crate::profile::{CapacityProfile, IntensityProfile, HOURS_PER_DAY};

// ── DurationSpec ──────────────────────────────────────────────────────────────

/// Distribution of a service duration.  All parameters are in **minutes**;
/// samplers convert to hours.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum DurationSpec {
    /// Always exactly `minutes`.
    Fixed { minutes: f64 },
    /// Triangular on `[min, max]` peaking at `mode`.
    Triangular { min: f64, mode: f64, max: f64 },
    /// Log-normal with the given arithmetic `mean` and log-space `sigma`.
    LogNormal { mean: f64, sigma: f64 },
    /// Normal, resampled when a draw is non-positive.
    Normal { mean: f64, std_dev: f64 },
}

impl DurationSpec {
    /// Expected duration in minutes (before resampling of non-positive draws).
    pub fn mean_minutes(&self) -> f64 {
        match *self {
            DurationSpec::Fixed { minutes } => minutes,
            DurationSpec::Triangular { min, mode, max } => (min + mode + max) / 3.0,
            DurationSpec::LogNormal { mean, .. } | DurationSpec::Normal { mean, .. } => mean,
        }
    }

    pub fn validate(&self, field: &'static str) -> ConfigResult<()> {
        let finite = |name: &str, v: f64| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::invalid(field, format!("{name} must be finite, got {v}")))
            }
        };
        match *self {
            DurationSpec::Fixed { minutes } => {
                finite("minutes", minutes)?;
                if minutes <= 0.0 {
                    return Err(ConfigError::invalid(field, format!("fixed duration must be > 0, got {minutes}")));
                }
            }
            DurationSpec::Triangular { min, mode, max } => {
                finite("min", min)?;
                finite("mode", mode)?;
                finite("max", max)?;
                if min < 0.0 || !(min <= mode && mode <= max) || max <= 0.0 {
                    return Err(ConfigError::invalid(
                        field,
                        format!("triangular needs 0 <= min <= mode <= max and max > 0, got ({min}, {mode}, {max})"),
                    ));
                }
            }
            DurationSpec::LogNormal { mean, sigma } => {
                finite("mean", mean)?;
                finite("sigma", sigma)?;
                if mean <= 0.0 || sigma < 0.0 {
                    return Err(ConfigError::invalid(
                        field,
                        format!("log-normal needs mean > 0 and sigma >= 0, got ({mean}, {sigma})"),
                    ));
                }
            }
            DurationSpec::Normal { mean, std_dev } => {
                finite("mean", mean)?;
                finite("std_dev", std_dev)?;
                if mean <= 0.0 || std_dev < 0.0 {
                    return Err(ConfigError::invalid(
                        field,
                        format!("normal needs mean > 0 and std_dev >= 0, got ({mean}, {std_dev})"),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

/// How a guest's nights of stay become a checkout time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StayModel {
    /// Check out at `checkout_hour` on the day `nights` days after the
    /// check-in day.
    #[default]
    CheckoutHour,
    /// Check out exactly `nights * 24` hours after check-in.
    FixedHours,
}

/// When a guest who finished front-desk service without a clean room gets
/// another chance at one.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "policy", rename_all = "snake_case")
)]
pub enum RoomRetryPolicy {
    /// The room released by each cleaning completion goes straight to the
    /// longest-waiting guest.
    #[default]
    OnCleaningComplete,
    /// Waiting guests only re-attempt on a retry tick every `interval_hours`;
    /// a freshly cleaned room sits vacant until the next tick.
    Periodic { interval_hours: f64 },
}

// ── HotelConfig ───────────────────────────────────────────────────────────────

/// Everything one run needs.  `Default` is the reference 200-room hotel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HotelConfig {
    /// Total simulated hours, warm-up included.  Events after this are never
    /// processed.
    pub horizon_hours: f64,

    /// Leading hours excluded from KPIs so the hotel starts measured periods
    /// partly occupied.  Must be `< horizon_hours`.
    pub warmup_hours: f64,

    pub room_count: u32,

    /// Arrival rate scale: the rate at `t` is `arrival_base_rate *
    /// arrival_profile.at(t)` arrivals per hour.  With a normalized profile
    /// this is the expected arrivals per day.
    pub arrival_base_rate: f64,
    pub arrival_profile: IntensityProfile,

    pub front_desk_staffing: CapacityProfile,
    pub housekeeping_staffing: CapacityProfile,

    pub front_desk_service: DurationSpec,
    pub cleaning: DurationSpec,

    /// Standard check-in hour of day, in `[0, 24)`.
    pub checkin_hour: f64,
    /// Standard checkout hour of day, in `[0, 24)`.
    pub checkout_hour: f64,

    /// Probability that an arriving guest asks for early check-in.
    pub early_checkin_fraction: f64,

    /// Mean of the exponential nights-of-stay draw (rounded up, minimum 1).
    pub avg_stay_nights: f64,
    pub stay_model: StayModel,
    pub room_retry: RoomRetryPolicy,

    /// Master seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            horizon_hours:          14.0 * HOURS_PER_DAY as f64,
            warmup_hours:           7.0 * HOURS_PER_DAY as f64,
            room_count:             200,
            arrival_base_rate:      80.0,
            arrival_profile:        default_arrival_profile(),
            front_desk_staffing:    CapacityProfile::from_shifts(&[(0, 8, 2), (8, 12, 3), (12, 20, 6), (20, 24, 3)], 0),
            housekeeping_staffing:  CapacityProfile::from_shifts(&[(9, 17, 12)], 0),
            front_desk_service:     DurationSpec::Triangular { min: 3.0, mode: 6.0, max: 10.0 },
            cleaning:               DurationSpec::LogNormal { mean: 35.0, sigma: 0.5 },
            checkin_hour:           15.0,
            checkout_hour:          12.0,
            // Every guest who turns up before 15:00 asks for their room early.
            early_checkin_fraction: 1.0,
            avg_stay_nights:        2.0,
            stay_model:             StayModel::CheckoutHour,
            room_retry:             RoomRetryPolicy::OnCleaningComplete,
            seed:                   42,
        }
    }
}

/// Reference arrival pattern: quiet overnight, a morning trickle, a lunch
/// bump, the afternoon peak before check-in opens, and an evening tail.
fn default_arrival_profile() -> IntensityProfile {
    let weights: [f64; HOURS_PER_DAY] = std::array::from_fn(|h| match h {
        7..=10  => 0.03,
        11..=13 => 0.05,
        14..=17 => 0.12,
        18..=21 => 0.06,
        _       => 0.02,
    });
    let sum: f64 = weights.iter().sum();
    IntensityProfile(weights.map(|w| w / sum))
}

impl HotelConfig {
    /// Start of the measured window.
    #[inline]
    pub fn measure_start(&self) -> crate::SimTime {
        crate::SimTime(self.warmup_hours)
    }

    /// End of the run.
    #[inline]
    pub fn horizon(&self) -> crate::SimTime {
        crate::SimTime(self.horizon_hours)
    }

    /// Check every field.  The first offending field is reported.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.horizon_hours.is_finite() || self.horizon_hours <= 0.0 {
            return Err(ConfigError::invalid("horizon_hours", format!("must be > 0, got {}", self.horizon_hours)));
        }
        if !self.warmup_hours.is_finite() || self.warmup_hours < 0.0 || self.warmup_hours >= self.horizon_hours {
            return Err(ConfigError::invalid(
                "warmup_hours",
                format!("must be in [0, horizon_hours), got {}", self.warmup_hours),
            ));
        }
        if self.room_count == 0 {
            return Err(ConfigError::invalid("room_count", "must be > 0"));
        }
        if !self.arrival_base_rate.is_finite() || self.arrival_base_rate < 0.0 {
            return Err(ConfigError::invalid(
                "arrival_base_rate",
                format!("must be finite and >= 0, got {}", self.arrival_base_rate),
            ));
        }
        // Re-check the intensity slots: the fields are public and may have
        // been built without going through `IntensityProfile::new`.
        IntensityProfile::new(*self.arrival_profile.slots())
            .map_err(|source| ConfigError::Profile { field: "arrival_profile", source })?;

        self.front_desk_service.validate("front_desk_service")?;
        self.cleaning.validate("cleaning")?;

        for (field, hour) in [("checkin_hour", self.checkin_hour), ("checkout_hour", self.checkout_hour)] {
            if !hour.is_finite() || !(0.0..HOURS_PER_DAY as f64).contains(&hour) {
                return Err(ConfigError::invalid(field, format!("must be in [0, 24), got {hour}")));
            }
        }
        if !(0.0..=1.0).contains(&self.early_checkin_fraction) {
            return Err(ConfigError::invalid(
                "early_checkin_fraction",
                format!("must be in [0, 1], got {}", self.early_checkin_fraction),
            ));
        }
        if !self.avg_stay_nights.is_finite() || self.avg_stay_nights <= 0.0 {
            return Err(ConfigError::invalid(
                "avg_stay_nights",
                format!("must be > 0, got {}", self.avg_stay_nights),
            ));
        }
        if let RoomRetryPolicy::Periodic { interval_hours } = self.room_retry {
            if !interval_hours.is_finite() || interval_hours <= 0.0 {
                return Err(ConfigError::invalid(
                    "room_retry",
                    format!("interval_hours must be > 0, got {interval_hours}"),
                ));
            }
        }
        Ok(())
    }
}
