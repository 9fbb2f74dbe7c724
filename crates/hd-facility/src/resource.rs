//! `ResourcePool` — a multi-server FIFO queue whose server count follows a
//! 24-hour [`CapacityProfile`].
//!
//! The pool does no scheduling of its own.  It decides *whether* a job
//! starts; the caller samples the duration and schedules the completion
//! event, then reports it back through [`on_completion`][ResourcePool::on_completion]
//! and drains [`start_ready`][ResourcePool::start_ready].
//!
//! # Capacity changes
//!
//! Capacity is read at the instant of each start decision.  When the profile
//! drops below the number of jobs in service, those jobs run to completion;
//! only new starts are held back until `in_service < capacity` again.  The
//! caller calls `start_ready` at every hour boundary to pick up increases.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use hd_core::{CapacityProfile, SimTime};

use crate::ResourceError;

/// Outcome of [`ResourcePool::request_service`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Service starts now; the caller must schedule its completion.
    Started,
    /// No free server (or others were already waiting).  `position` is the
    /// 1-based place in the queue.
    Queued { position: usize },
}

/// A finished service interval, for utilization accounting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ServiceSpan<J> {
    pub job:   J,
    pub start: SimTime,
    pub end:   SimTime,
}

/// Time-varying-capacity server pool over jobs of type `J` (a guest id for
/// the front desk, a room id for housekeeping).
pub struct ResourcePool<J> {
    name:       &'static str,
    capacity:   CapacityProfile,
    /// Jobs in service → start time.
    in_service: BTreeMap<J, SimTime>,
    /// Waiting jobs with their enqueue time, oldest first.
    queue:      VecDeque<(J, SimTime)>,
}

impl<J: Copy + Ord + fmt::Display> ResourcePool<J> {
    pub fn new(name: &'static str, capacity: CapacityProfile) -> Self {
        Self {
            name,
            capacity,
            in_service: BTreeMap::new(),
            queue:      VecDeque::new(),
        }
    }

    /// `true` when a new service may start at `now`.
    #[inline]
    pub fn has_free_server(&self, now: SimTime) -> bool {
        self.in_service.len() < self.capacity.at(now) as usize
    }

    /// Start `job` now if a server is free and nobody is ahead of it,
    /// otherwise append it to the FIFO queue.  Never drops a request.
    pub fn request_service(&mut self, now: SimTime, job: J) -> Result<Admission, ResourceError> {
        if self.in_service.contains_key(&job) || self.queue.iter().any(|&(j, _)| j == job) {
            return Err(ResourceError::AlreadyAdmitted { pool: self.name, job: job.to_string() });
        }
        if self.queue.is_empty() && self.has_free_server(now) {
            self.start(now, job);
            return Ok(Admission::Started);
        }
        self.queue.push_back((job, now));
        Ok(Admission::Queued { position: self.queue.len() })
    }

    /// Release the server held by `job` and return its span.  A completion
    /// for a job that is not in service is a contract breach.
    pub fn on_completion(&mut self, now: SimTime, job: J) -> Result<ServiceSpan<J>, ResourceError> {
        let start = self.in_service.remove(&job).ok_or_else(|| ResourceError::UnknownCompletion {
            pool: self.name,
            job:  job.to_string(),
        })?;
        Ok(ServiceSpan { job, start, end: now })
    }

    /// Start queued jobs, oldest first, while capacity at `now` allows.
    /// Returns the started jobs in start order.
    pub fn start_ready(&mut self, now: SimTime) -> Vec<J> {
        let mut started = Vec::new();
        while self.has_free_server(now) {
            let Some((job, _)) = self.queue.pop_front() else { break };
            self.start(now, job);
            started.push(job);
        }
        started
    }

    fn start(&mut self, now: SimTime, job: J) {
        self.in_service.insert(job, now);
    }

    // ── Read-only views ───────────────────────────────────────────────────

    #[inline]
    pub fn busy(&self) -> usize {
        self.in_service.len()
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Jobs in service with their start time, in job order.
    pub fn in_service(&self) -> impl Iterator<Item = (J, SimTime)> + '_ {
        self.in_service.iter().map(|(&j, &t)| (j, t))
    }
}
