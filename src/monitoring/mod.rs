/*!
 * Monitoring
 * Execution trace, scheduling metrics and structured tracing
 */

mod metrics;
mod trace;
mod tracer;

pub use metrics::{Aggregates, LevelSummary, MetricsCollector};
pub use trace::{Trace, TraceLabel, TraceSegment};
pub use tracer::{generate_run_id, init_tracing, RunSpan};
