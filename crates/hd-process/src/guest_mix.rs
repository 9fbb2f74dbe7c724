//! Per-guest attribute draws.

use rand_distr::{Distribution, Exp};

use hd_core::{ConfigError, ConfigResult, Stream, StreamRng};

/// Attributes fixed at arrival.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GuestTraits {
    /// Whole nights booked, at least 1.
    pub nights: u32,
    pub early_checkin_requested: bool,
}

/// Draws [`GuestTraits`] from the `GuestMix` stream.
pub struct GuestMix {
    nights:         Exp<f64>,
    early_fraction: f64,
    rng:            StreamRng,
}

impl GuestMix {
    pub fn new(avg_stay_nights: f64, early_fraction: f64, seed: u64) -> ConfigResult<Self> {
        let nights = Exp::new(1.0 / avg_stay_nights)
            .map_err(|e| ConfigError::invalid("avg_stay_nights", e.to_string()))?;
        Ok(Self {
            nights,
            early_fraction,
            rng: StreamRng::new(seed, Stream::GuestMix),
        })
    }

    /// Draw one guest.  Always consumes the same draws, in the same order.
    pub fn draw(&mut self) -> GuestTraits {
        let raw = self.nights.sample(self.rng.inner());
        let nights = (raw.ceil() as u32).max(1);
        let early_checkin_requested = self.rng.gen_bool(self.early_fraction);
        GuestTraits { nights, early_checkin_requested }
    }
}
