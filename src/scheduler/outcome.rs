/*!
 * Simulation Outcome
 * Everything a reporting collaborator needs once the run has ended
 */

use super::config::SchedulerConfig;
use super::events::SchedEvent;
use super::stats::SchedulerStats;
use crate::core::serde::is_empty_vec;
use crate::core::types::Tick;
use crate::monitoring::{Aggregates, Trace};
use crate::process::ProcessReport;
use serde::{Deserialize, Serialize};

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationOutcome {
    pub run_id: String,
    pub config: SchedulerConfig,
    pub final_tick: Tick,
    /// Per-process reports in declaration order
    pub processes: Vec<ProcessReport>,
    pub aggregates: Aggregates,
    pub trace: Trace,
    pub stats: SchedulerStats,
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub events: Vec<SchedEvent>,
}

impl SimulationOutcome {
    /// Report for the process with `id`
    pub fn process(&self, id: &str) -> Option<&ProcessReport> {
        self.processes.iter().find(|p| p.id.as_str() == id)
    }

    /// Trace labels as plain strings
    pub fn trace_labels(&self) -> Vec<String> {
        self.trace.iter().map(|label| label.to_string()).collect()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
