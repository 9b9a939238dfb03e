/*!
 * Scheduler Module
 * Multilevel queue dispatch: level policies, ready queues, the CPU slot and the tick loop
 */

pub mod config;
pub mod dispatcher;
pub mod events;
pub mod outcome;
pub mod queue_bank;
pub mod running;
pub mod stats;
pub mod types;

// Re-export public API
pub use config::SchedulerConfig;
pub use dispatcher::{Dispatcher, DispatcherState};
pub use events::SchedEvent;
pub use outcome::SimulationOutcome;
pub use queue_bank::QueueBank;
pub use running::{Running, RunningSlot};
pub use stats::SchedulerStats;
pub use types::SchedulingPolicy;

use crate::core::types::SchedulerResult;
use crate::process::ProcessSpec;

/// Admit `specs` under `config` and run to completion
pub fn simulate(config: SchedulerConfig, specs: Vec<ProcessSpec>) -> SchedulerResult<SimulationOutcome> {
    Dispatcher::new(config, specs)?.run()
}
