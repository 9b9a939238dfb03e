/*!
 * Scheduling Events
 * Tick-stamped record of every decision the dispatcher takes
 */

use crate::core::types::{Level, ProcessId, Tick};
use serde::{Deserialize, Serialize};

/// Dispatcher decision
///
/// `tick` is the tick boundary at which the decision takes effect: arrivals,
/// preemptions and dispatches at the start of a tick, completions and quantum
/// expiries at the end of the executed tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    Arrived {
        tick: Tick,
        id: ProcessId,
        level: Level,
    },
    Dispatched {
        tick: Tick,
        id: ProcessId,
        level: Level,
        first_run: bool,
    },
    Preempted {
        tick: Tick,
        id: ProcessId,
        level: Level,
        by_level: Level,
    },
    QuantumExpired {
        tick: Tick,
        id: ProcessId,
        level: Level,
    },
    Completed {
        tick: Tick,
        id: ProcessId,
    },
}

impl SchedEvent {
    pub fn tick(&self) -> Tick {
        match self {
            Self::Arrived { tick, .. }
            | Self::Dispatched { tick, .. }
            | Self::Preempted { tick, .. }
            | Self::QuantumExpired { tick, .. }
            | Self::Completed { tick, .. } => *tick,
        }
    }

    pub fn id(&self) -> &ProcessId {
        match self {
            Self::Arrived { id, .. }
            | Self::Dispatched { id, .. }
            | Self::Preempted { id, .. }
            | Self::QuantumExpired { id, .. }
            | Self::Completed { id, .. } => id,
        }
    }
}
