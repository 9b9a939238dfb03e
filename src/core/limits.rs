/*!
 * Simulator Limits and Constants
 *
 * Centralized location for defaults, environment variable names and caps.
 */

use super::types::Tick;

// =============================================================================
// LEVEL CONFIGURATION
// =============================================================================

/// Quantum of the highest priority level in the default configuration
pub const DEFAULT_HIGH_QUANTUM: Tick = 2;

/// Quantum of the middle level in the default configuration
pub const DEFAULT_MEDIUM_QUANTUM: Tick = 4;

/// Upper bound on configured priority levels
/// Level scans are linear, so the table is kept small
pub const MAX_LEVELS: usize = 64;

// =============================================================================
// TRACE
// =============================================================================

/// Trace label for a tick in which no process held the CPU
pub const IDLE_LABEL: &str = "IDLE";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Comma-separated level table override, e.g. `rr:2,rr:4,fcfs`
pub const ENV_LEVELS: &str = "MLQ_LEVELS";

/// Path to a JSON scheduler configuration file
pub const ENV_CONFIG: &str = "MLQ_CONFIG";

/// Path to a JSON workload (array of process specs)
pub const ENV_WORKLOAD: &str = "MLQ_WORKLOAD";

/// Enables JSON log output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "MLQ_TRACE_JSON";
