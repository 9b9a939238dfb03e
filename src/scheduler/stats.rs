/*!
 * Scheduler Statistics
 * Counters for dispatch decisions made during a run
 */

use crate::core::serde::is_zero_u64;
use serde::{Deserialize, Serialize};

/// Scheduling decision counters
///
/// Zero counters are omitted from serialized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    /// Dispatches into the running slot, first runs included
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub dispatches: u64,
    /// Dispatches of a different process than the one that ran last tick
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub context_switches: u64,
    /// Running processes displaced by a higher priority level
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub preemptions: u64,
    /// Round-robin processes requeued after exhausting their quantum
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub quantum_expiries: u64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub completions: u64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub idle_ticks: u64,
}

impl SchedulerStats {
    #[inline(always)]
    pub(crate) fn inc_dispatches(&mut self) {
        self.dispatches += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_context_switches(&mut self) {
        self.context_switches += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_preemptions(&mut self) {
        self.preemptions += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_quantum_expiries(&mut self) {
        self.quantum_expiries += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_completions(&mut self) {
        self.completions += 1;
    }

    #[inline(always)]
    pub(crate) fn inc_idle_ticks(&mut self) {
        self.idle_ticks += 1;
    }
}
