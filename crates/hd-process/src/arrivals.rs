//! Non-homogeneous Poisson arrivals by thinning.
//!
//! Candidates are drawn from a homogeneous process at the peak rate
//! `λ* = base_rate · max(profile)`; a candidate at `t` is kept with
//! probability `λ(t) / λ*`.  The accepted points form a Poisson process with
//! rate `λ(t)`, so the expected count in hour `h` of every day is
//! `base_rate · profile[h]`.

use rand_distr::{Distribution, Exp};

use hd_core::{ConfigError, ConfigResult, IntensityProfile, SimTime, Stream, StreamRng};

/// Lazily yields arrival instants in increasing order up to an end time.
pub struct ArrivalProcess {
    base_rate: f64,
    profile:   IntensityProfile,
    /// `None` when the peak rate is zero: no arrivals at all.
    candidate: Option<Exp<f64>>,
    peak_rate: f64,
    last:      SimTime,
    end:       SimTime,
    rng:       StreamRng,
}

impl ArrivalProcess {
    /// Arrivals on `[start, end)` for `seed`'s `Arrivals` stream.
    pub fn new(
        base_rate: f64,
        profile:   IntensityProfile,
        start:     SimTime,
        end:       SimTime,
        seed:      u64,
    ) -> ConfigResult<Self> {
        let peak_rate = base_rate * profile.max();
        let candidate = if peak_rate > 0.0 {
            Some(Exp::new(peak_rate).map_err(|e| {
                ConfigError::invalid("arrival_base_rate", format!("peak rate {peak_rate}: {e}"))
            })?)
        } else {
            None
        };
        Ok(Self {
            base_rate,
            profile,
            candidate,
            peak_rate,
            last: start,
            end,
            rng: StreamRng::new(seed, Stream::Arrivals),
        })
    }

    /// Instantaneous arrival rate (guests per hour) at `t`.
    #[inline]
    pub fn rate_at(&self, t: SimTime) -> f64 {
        self.base_rate * self.profile.at(t)
    }

    /// Peak rate used for candidate generation.
    pub fn peak_rate(&self) -> f64 {
        self.peak_rate
    }

    /// The next accepted arrival strictly after the previous one, or `None`
    /// once the process passes `end`.
    pub fn next_arrival(&mut self) -> Option<SimTime> {
        let candidate = self.candidate?;
        loop {
            let gap = candidate.sample(self.rng.inner());
            let t = self.last + gap;
            if t >= self.end {
                // Park at the end so later calls stay exhausted.
                self.last = self.end;
                return None;
            }
            self.last = t;
            let accept: f64 = self.rng.random();
            if accept * self.peak_rate < self.rate_at(t) {
                return Some(t);
            }
        }
    }
}

impl Iterator for ArrivalProcess {
    type Item = SimTime;

    fn next(&mut self) -> Option<SimTime> {
        self.next_arrival()
    }
}
