//! Fluent builder for constructing a [`Sim`].

use std::collections::VecDeque;

use hd_core::{ConfigError, HotelConfig, SimTime, Stream};
use hd_facility::{GuestStore, ResourcePool, RoomInventory};
use hd_process::{ArrivalProcess, DurationSampler, GuestMix};
use hd_schedule::EventQueue;

use crate::kpi::KpiAggregator;
use crate::sim::ArrivalSource;
use crate::{Sim, SimResult};

/// A predetermined guest, for replaying a known arrival list instead of the
/// random arrival process.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedGuest {
    pub time:                    SimTime,
    pub nights:                  u32,
    pub early_checkin_requested: bool,
}

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                    |
/// |--------------------------|--------------------------------------------|
/// | `.scripted_arrivals(v)`  | Thinned Poisson arrivals + random guest mix |
///
/// # Example
///
/// ```rust,ignore
/// let report = SimBuilder::new(HotelConfig { room_count: 1, ..Default::default() })
///     .scripted_arrivals(vec![ScriptedGuest { time: SimTime(9.0), nights: 1, early_checkin_requested: true }])
///     .build()?
///     .run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: HotelConfig,
    script: Option<Vec<ScriptedGuest>>,
}

impl SimBuilder {
    pub fn new(config: HotelConfig) -> Self {
        Self { config, script: None }
    }

    /// Replace the random arrivals with a fixed guest list.  Order does not
    /// matter; guests are admitted by time (stable for equal times).
    pub fn scripted_arrivals(mut self, guests: Vec<ScriptedGuest>) -> Self {
        self.script = Some(guests);
        self
    }

    /// Validate the configuration, seed every stream, schedule the first
    /// arrival and the recurring bookkeeping events, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;

        let seed = config.seed;
        let measure_start = config.measure_start();
        let horizon = config.horizon();

        // ── Arrival source ────────────────────────────────────────────────
        let arrivals = match self.script {
            Some(mut guests) => {
                if let Some(bad) = guests
                    .iter()
                    .find(|g| !g.time.hours().is_finite() || g.time < SimTime::ZERO || g.nights == 0)
                {
                    return Err(ConfigError::invalid(
                        "scripted_arrivals",
                        format!("need a finite time >= 0 and nights >= 1, got {bad:?}"),
                    )
                    .into());
                }
                guests.sort_by(|a, b| a.time.cmp(&b.time));
                ArrivalSource::Scripted(VecDeque::from(guests))
            }
            None => ArrivalSource::Generated {
                process: ArrivalProcess::new(
                    config.arrival_base_rate,
                    config.arrival_profile.clone(),
                    SimTime::ZERO,
                    horizon,
                    seed,
                )?,
                mix: GuestMix::new(config.avg_stay_nights, config.early_checkin_fraction, seed)?,
            },
        };

        let desk_durations =
            DurationSampler::new(&config.front_desk_service, "front_desk_service", seed, Stream::FrontDesk)?;
        let cleaning_durations = DurationSampler::new(&config.cleaning, "cleaning", seed, Stream::Cleaning)?;

        let mut sim = Sim {
            queue:        EventQueue::new(),
            rooms:        RoomInventory::new(config.room_count),
            guests:       GuestStore::new(),
            front_desk:   ResourcePool::new("front_desk", config.front_desk_staffing.clone()),
            housekeeping: ResourcePool::new("housekeeping", config.housekeeping_staffing.clone()),
            kpi:          KpiAggregator::new(measure_start, horizon),
            arrivals,
            desk_durations,
            cleaning_durations,
            deferred:     VecDeque::new(),
            room_waiters: VecDeque::new(),
            retry_pending:    false,
            events_processed: 0,
            config,
        };

        sim.bootstrap()?;

        Ok(sim)
    }
}
