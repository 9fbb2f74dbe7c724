//! Simulation observer trait for progress reporting and event tracing.

use hd_core::HotelConfig;
use hd_schedule::Event;

use crate::{RunReport, StateSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — checkout counter
///
/// ```rust,ignore
/// struct Checkouts(u64);
///
/// impl SimObserver for Checkouts {
///     fn on_event(&mut self, event: &Event, _state: &StateSnapshot) {
///         if matches!(event.kind, EventKind::CheckOut(_)) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once, after validation and before the first event.
    fn on_run_start(&mut self, _config: &HotelConfig) {}

    /// Called after each event has been handled.  `state` is the engine state
    /// right after the handler ran.
    fn on_event(&mut self, _event: &Event, _state: &StateSnapshot) {}

    /// Called once with the finished report.  Not called when the run fails.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
