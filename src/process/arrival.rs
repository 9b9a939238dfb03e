/*!
 * Arrival Feed
 * Holds admitted-but-not-arrived processes and releases them on time
 */

use super::types::ProcessRecord;
use crate::core::types::{Level, SchedulerResult, Slot, Tick};
use crate::scheduler::QueueBank;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct PendingArrival {
    slot: Slot,
    arrival_time: Tick,
    level: Level,
}

/// Pending processes ordered by arrival time, then declaration order
#[derive(Debug, Default)]
pub struct ArrivalFeed {
    pending: VecDeque<PendingArrival>,
}

impl ArrivalFeed {
    /// Build the feed from the record table (slot = declaration index)
    pub fn new(records: &[ProcessRecord]) -> Self {
        let mut pending: Vec<PendingArrival> = records
            .iter()
            .enumerate()
            .map(|(slot, record)| PendingArrival {
                slot,
                arrival_time: record.arrival_time(),
                level: record.queue_level(),
            })
            .collect();

        // Stable sort keeps declaration order among equal arrival times
        pending.sort_by_key(|p| p.arrival_time);

        Self {
            pending: pending.into(),
        }
    }

    /// Move every process with `arrival_time <= now` into its queue level
    ///
    /// Returns the released slots in release order. Each process leaves the
    /// feed exactly once.
    pub fn release_due(&mut self, now: Tick, bank: &mut QueueBank) -> SchedulerResult<Vec<Slot>> {
        let mut released = Vec::new();

        while let Some(next) = self.pending.front() {
            if next.arrival_time > now {
                break;
            }
            let PendingArrival { slot, level, .. } = *next;
            bank.enqueue(level, slot)?;
            self.pending.pop_front();
            released.push(slot);
        }

        Ok(released)
    }

    /// Arrival time of the next pending process
    pub fn next_arrival(&self) -> Option<Tick> {
        self.pending.front().map(|p| p.arrival_time)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
