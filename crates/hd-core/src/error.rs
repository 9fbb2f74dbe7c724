//! Configuration error types.
//!
//! Everything in this module is raised before a run starts.  Engine-side
//! failures (invariant violations) live in `hd-sim`.

use thiserror::Error;

/// A malformed hourly profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("expected 24 hourly entries, got {0}")]
    WrongLength(usize),

    #[error("hour {hour} has invalid value {value} (must be finite and >= 0)")]
    InvalidValue { hour: usize, value: f64 },
}

/// An invalid run configuration, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("invalid `{field}` profile: {source}")]
    Profile {
        field:  &'static str,
        #[source]
        source: ProfileError,
    },
}

impl ConfigError {
    /// Build an `Invalid` error for `field`.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }

    /// Name of the configuration field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::Invalid { field, .. } | ConfigError::Profile { field, .. } => field,
        }
    }
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
