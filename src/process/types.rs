/*!
 * Process Types
 * Workload specs, timing records and per-process reports
 */

use crate::core::serde::skip_serializing_none;
use crate::core::errors::SchedulerError;
use crate::core::types::{Level, ProcessId, SchedulerResult, Tick};
use serde::{Deserialize, Serialize};

/// Process spec as delivered by the workload builder
///
/// Fields are signed so that out-of-range values survive parsing and are
/// rejected at admission with a precise reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub arrival_time: i64,
    pub burst_time: i64,
    pub queue_level: i64,
}

impl ProcessSpec {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ProcessId>, arrival_time: i64, burst_time: i64, queue_level: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            queue_level,
        }
    }
}

/// Where a record currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessLocation {
    /// Held by the arrival feed
    Pending,
    /// Waiting in a queue level
    Queued(Level),
    /// In the running slot
    Running,
    /// In the completed set
    Completed,
}

/// Unit of work and its timing state
///
/// Identity and demand are immutable. `remaining_time` and the first-dispatch
/// fields change through `execute_tick` and `mark_dispatched`; completion
/// fields are written once through `complete`, called by the metrics collector.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRecord {
    id: ProcessId,
    arrival_time: Tick,
    burst_time: Tick,
    queue_level: Level,

    remaining_time: Tick,
    start_time: Option<Tick>,
    response_time: Option<Tick>,

    completion_time: Option<Tick>,
    turnaround_time: Option<Tick>,
    waiting_time: Option<Tick>,
}

impl ProcessRecord {
    /// Create a record for a validated spec
    #[must_use]
    pub fn new(id: ProcessId, arrival_time: Tick, burst_time: Tick, queue_level: Level) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            queue_level,
            remaining_time: burst_time,
            start_time: None,
            response_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    #[inline]
    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    #[inline]
    pub const fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    #[inline]
    pub const fn burst_time(&self) -> Tick {
        self.burst_time
    }

    #[inline]
    pub const fn queue_level(&self) -> Level {
        self.queue_level
    }

    #[inline]
    pub const fn remaining_time(&self) -> Tick {
        self.remaining_time
    }

    #[inline]
    pub const fn start_time(&self) -> Option<Tick> {
        self.start_time
    }

    #[inline]
    pub const fn response_time(&self) -> Option<Tick> {
        self.response_time
    }

    #[inline]
    pub const fn completion_time(&self) -> Option<Tick> {
        self.completion_time
    }

    #[inline]
    pub const fn turnaround_time(&self) -> Option<Tick> {
        self.turnaround_time
    }

    #[inline]
    pub const fn waiting_time(&self) -> Option<Tick> {
        self.waiting_time
    }

    /// Whether the process has ever held the CPU
    #[inline(always)]
    #[must_use]
    pub const fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Record the first dispatch; later dispatches leave the values untouched
    pub(crate) fn mark_dispatched(&mut self, now: Tick) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
            self.response_time = Some(now.saturating_sub(self.arrival_time));
        }
    }

    /// Consume one tick of CPU, returning the remaining demand
    pub(crate) fn execute_tick(&mut self) -> Tick {
        debug_assert!(self.remaining_time > 0, "process {} executed past its burst", self.id);
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.remaining_time
    }

    /// Fix completion, turnaround and waiting times; a record completes exactly once
    pub(crate) fn complete(&mut self, completion_time: Tick) -> SchedulerResult<Tick> {
        if self.is_completed() {
            return Err(SchedulerError::InvariantViolation(format!(
                "process {} completed twice",
                self.id
            )));
        }
        if self.remaining_time > 0 {
            return Err(SchedulerError::InvariantViolation(format!(
                "process {} completed with {} ticks remaining",
                self.id, self.remaining_time
            )));
        }

        let turnaround = completion_time.saturating_sub(self.arrival_time);
        self.completion_time = Some(completion_time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround.saturating_sub(self.burst_time));
        Ok(turnaround)
    }

    /// Final report, available once the process has completed
    #[must_use]
    pub fn report(&self) -> Option<ProcessReport> {
        Some(ProcessReport {
            id: self.id.clone(),
            queue_level: self.queue_level,
            arrival_time: self.arrival_time,
            burst_time: self.burst_time,
            completion_time: self.completion_time?,
            turnaround_time: self.turnaround_time?,
            waiting_time: self.waiting_time?,
            response_time: self.response_time?,
        })
    }
}

/// Per-process result handed to reporting collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessReport {
    pub id: ProcessId,
    pub queue_level: Level,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub completion_time: Tick,
    pub turnaround_time: Tick,
    pub waiting_time: Tick,
    pub response_time: Tick,
}
