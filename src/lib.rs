/*!
 * MLQ Scheduling Simulator
 * Deterministic multilevel queue CPU scheduling exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{ConfigError, SchedulerError, SpecViolation};
pub use crate::core::types::{Level, ProcessId, SchedulerResult, Tick};
pub use monitoring::{init_tracing, Aggregates, LevelSummary, Trace, TraceLabel, TraceSegment};
pub use process::{ProcessRecord, ProcessReport, ProcessSpec};
pub use scheduler::{
    simulate, Dispatcher, DispatcherState, SchedEvent, SchedulerConfig, SchedulerStats,
    SchedulingPolicy, SimulationOutcome,
};
