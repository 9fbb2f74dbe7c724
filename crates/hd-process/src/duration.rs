//! Service-duration samplers.
//!
//! Durations are configured in minutes and returned in hours.  A sampler
//! never returns a non-positive duration: a non-positive draw (possible with
//! `Normal`, or a triangular with `min = 0`) is redrawn up to
//! `MAX_REDRAWS` times and then floored at [`MIN_DURATION_HOURS`].

use rand_distr::{Distribution, LogNormal, Normal, Triangular};

use hd_core::{ConfigError, ConfigResult, DurationSpec, Stream, StreamRng};

/// One second, in hours.
pub const MIN_DURATION_HOURS: f64 = 1.0 / 3_600.0;

const MAX_REDRAWS: usize = 16;
const MINUTES_PER_HOUR: f64 = 60.0;

enum Shape {
    Fixed(f64),
    Triangular(Triangular<f64>),
    LogNormal(LogNormal<f64>),
    Normal(Normal<f64>),
}

/// Draws durations for one resource from its own stream.
pub struct DurationSampler {
    spec:  DurationSpec,
    shape: Shape,
    rng:   StreamRng,
}

impl DurationSampler {
    /// Build a sampler for `spec`, drawing from `seed`'s `stream`.
    ///
    /// `field` names the configuration entry in any error.
    pub fn new(
        spec:   &DurationSpec,
        field:  &'static str,
        seed:   u64,
        stream: Stream,
    ) -> ConfigResult<Self> {
        spec.validate(field)?;
        let shape = match *spec {
            DurationSpec::Fixed { minutes } => Shape::Fixed(minutes),
            DurationSpec::Triangular { min, mode, max } => Shape::Triangular(
                Triangular::new(min, max, mode)
                    .map_err(|e| ConfigError::invalid(field, e.to_string()))?,
            ),
            DurationSpec::LogNormal { mean, sigma } => {
                // Choose mu so that the arithmetic mean is `mean`.
                let mu = mean.ln() - 0.5 * sigma * sigma;
                Shape::LogNormal(
                    LogNormal::new(mu, sigma)
                        .map_err(|e| ConfigError::invalid(field, e.to_string()))?,
                )
            }
            DurationSpec::Normal { mean, std_dev } => Shape::Normal(
                Normal::new(mean, std_dev)
                    .map_err(|e| ConfigError::invalid(field, e.to_string()))?,
            ),
        };
        Ok(Self {
            spec: spec.clone(),
            shape,
            rng: StreamRng::new(seed, stream),
        })
    }

    pub fn spec(&self) -> &DurationSpec {
        &self.spec
    }

    fn draw_minutes(&mut self) -> f64 {
        match &self.shape {
            Shape::Fixed(m)      => *m,
            Shape::Triangular(d) => d.sample(self.rng.inner()),
            Shape::LogNormal(d)  => d.sample(self.rng.inner()),
            Shape::Normal(d)     => d.sample(self.rng.inner()),
        }
    }

    /// Next duration in hours, always `>= MIN_DURATION_HOURS`.
    pub fn sample_hours(&mut self) -> f64 {
        for _ in 0..MAX_REDRAWS {
            let hours = self.draw_minutes() / MINUTES_PER_HOUR;
            if hours > 0.0 {
                return hours.max(MIN_DURATION_HOURS);
            }
        }
        MIN_DURATION_HOURS
    }
}
