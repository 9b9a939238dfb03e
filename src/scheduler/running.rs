/*!
 * Running Slot
 * The single CPU: at most one process plus its consumed-quantum counter
 */

use crate::core::types::{Level, Slot, Tick};

/// Process currently holding the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Running {
    pub slot: Slot,
    /// Level the process was dispatched from
    pub level: Level,
    /// Ticks executed since the last (re)dispatch
    pub quantum_used: Tick,
}

#[derive(Debug, Default)]
pub struct RunningSlot {
    current: Option<Running>,
}

impl RunningSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a process on the CPU with a fresh quantum counter
    pub fn occupy(&mut self, slot: Slot, level: Level) {
        debug_assert!(
            self.current.is_none(),
            "running slot already holds slot {:?}",
            self.current.map(|r| r.slot)
        );
        self.current = Some(Running {
            slot,
            level,
            quantum_used: 0,
        });
    }

    /// Remove the running process, if any
    pub fn vacate(&mut self) -> Option<Running> {
        self.current.take()
    }

    /// Count one executed tick against the quantum
    pub fn charge_tick(&mut self) -> Option<Running> {
        let running = self.current.as_mut()?;
        running.quantum_used += 1;
        Some(*running)
    }

    #[inline]
    pub fn current(&self) -> Option<Running> {
        self.current
    }

    #[inline]
    pub fn level(&self) -> Option<Level> {
        self.current.map(|r| r.level)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
