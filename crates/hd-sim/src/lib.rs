//! `hd-sim` — the discrete-event engine for the hotel front desk and
//! housekeeping.
//!
//! # Event loop
//!
//! ```text
//! while the next event is at or before the horizon:
//!   ① pop the earliest event (time, then insertion sequence)
//!   ② run its lifecycle handler:
//!        Arrival                  → early grab | defer to opening | desk queue
//!        FrontDeskServiceComplete → check in | wait for a room
//!        CheckOut                 → room O → VD, request cleaning
//!        CleaningComplete         → room VD → VC, serve room waiters
//!        HourBoundary             → start queued work if capacity rose
//!        CheckinOpens             → deferred guests join the desk queue
//!        RoomRetry                → periodic room re-attempt
//!   ③ check room conservation; sample queues and occupancy
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`sweep`] runs configurations on Rayon's thread pool.  |
//! | `serde`    | `Serialize`/`Deserialize` on [`RunReport`] and parts.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hd_core::HotelConfig;
//!
//! let report = hd_sim::run(&HotelConfig::default())?;
//! println!("average wait {:.1} min", report.summary.avg_wait_hours * 60.0);
//! ```

pub mod builder;
pub mod error;
pub mod kpi;
mod lifecycle;
pub mod observer;
pub mod sim;
pub mod sweep;


pub use builder::{ScriptedGuest, SimBuilder};
pub use error::{SimError, SimResult, StateSnapshot, Violation};
pub use kpi::{EarlyCheckinStats, KpiAggregator, Percentiles, Resource, RunCounts, RunReport, Summary, WaitRecord};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use sweep::{room_count_variants, sweep};

use hd_core::HotelConfig;

/// Validate `config` and run it to the horizon.
pub fn run(config: &HotelConfig) -> SimResult<RunReport> {
    run_with_observer(config, &mut NoopObserver)
}

/// As [`run`], reporting every event to `observer`.
pub fn run_with_observer<O: SimObserver>(config: &HotelConfig, observer: &mut O) -> SimResult<RunReport> {
    SimBuilder::new(config.clone()).build()?.run(observer)
}
