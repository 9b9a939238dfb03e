/*!
 * Metrics Collection
 * Per-process completion metrics and run-level aggregates
 */

use crate::core::types::{Level, SchedulerResult, Slot, Tick};
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};

/// Statistics for one priority level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LevelSummary {
    pub level: Level,
    pub process_count: usize,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
}

/// Run-level aggregates
///
/// `utilization` is a percentage; `throughput` is completed processes per tick.
/// Both are zero for a run that ends at tick 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Aggregates {
    pub completed: usize,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
    pub utilization: f64,
    pub throughput: f64,
    pub busy_ticks: Tick,
    pub total_ticks: Tick,
    pub levels: Vec<LevelSummary>,
}

/// Completion bookkeeping
///
/// Sole writer of completion, turnaround and waiting times. Holds the
/// completed set in completion order.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    completed: Vec<Slot>,
}

impl MetricsCollector {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            completed: Vec::with_capacity(capacity),
        }
    }

    /// Fix the completion metrics of a finished process
    pub(crate) fn record_completion(
        &mut self,
        slot: Slot,
        record: &mut ProcessRecord,
        completion_time: Tick,
    ) -> SchedulerResult<()> {
        record.complete(completion_time)?;
        self.completed.push(slot);
        Ok(())
    }

    /// Slots in completion order
    pub fn completed(&self) -> &[Slot] {
        &self.completed
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Aggregate over every completed record
    pub fn summarize(
        &self,
        records: &[ProcessRecord],
        level_count: usize,
        busy_ticks: Tick,
        final_tick: Tick,
    ) -> Aggregates {
        let done: Vec<&ProcessRecord> = self.completed.iter().map(|&slot| &records[slot]).collect();

        let levels = (0..level_count)
            .map(|level| {
                let members: Vec<&ProcessRecord> = done
                    .iter()
                    .copied()
                    .filter(|r| r.queue_level() == level)
                    .collect();
                LevelSummary {
                    level,
                    process_count: members.len(),
                    average_turnaround: mean(members.iter().filter_map(|r| r.turnaround_time())),
                    average_waiting: mean(members.iter().filter_map(|r| r.waiting_time())),
                    average_response: mean(members.iter().filter_map(|r| r.response_time())),
                }
            })
            .collect();

        let (utilization, throughput) = if final_tick == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_ticks as f64 / final_tick as f64 * 100.0,
                done.len() as f64 / final_tick as f64,
            )
        };

        Aggregates {
            completed: done.len(),
            average_turnaround: mean(done.iter().filter_map(|r| r.turnaround_time())),
            average_waiting: mean(done.iter().filter_map(|r| r.waiting_time())),
            average_response: mean(done.iter().filter_map(|r| r.response_time())),
            utilization,
            throughput,
            busy_ticks,
            total_ticks: final_tick,
            levels,
        }
    }
}

/// Arithmetic mean, zero for an empty input
fn mean(values: impl Iterator<Item = Tick>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
