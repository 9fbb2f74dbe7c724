use hd_core::{ProfileError, SimTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("event scheduled at {at:?} is before the current clock {now:?}")]
    OrderingViolation { at: SimTime, now: SimTime },

    #[error("event time {0} is not finite")]
    NonFiniteTime(f64),

    #[error("profile parse error: {0}")]
    Parse(String),

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
