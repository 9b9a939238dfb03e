/*!
 * Core Types
 * Common types used across the simulator
 */

/// Simulated clock value (one tick = one unit of CPU time)
pub type Tick = u64;

/// Priority level index (0 is the highest priority)
pub type Level = usize;

/// Process identifier supplied by the workload
///
/// Short identifiers such as `P1` stay inline without heap allocation.
pub type ProcessId = smartstring::alias::String;

/// Index of a process in the dispatcher's record table
///
/// Queues and the running slot hold slots rather than records, so each record
/// has exactly one owner for the whole run.
pub type Slot = usize;

/// Common result type for scheduler operations
pub type SchedulerResult<T> = Result<T, super::errors::SchedulerError>;
