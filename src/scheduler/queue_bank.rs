/*!
 * Queue Bank
 * One FIFO ready queue per priority level, each bound to its policy
 */

use super::config::SchedulerConfig;
use super::types::SchedulingPolicy;
use crate::core::errors::SchedulerError;
use crate::core::types::{Level, SchedulerResult, Slot};
use std::collections::VecDeque;

#[derive(Debug)]
struct LevelQueue {
    policy: SchedulingPolicy,
    queue: VecDeque<Slot>,
}

/// Ready queues, index 0 is the highest priority
#[derive(Debug)]
pub struct QueueBank {
    levels: Vec<LevelQueue>,
}

impl QueueBank {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            levels: config
                .levels()
                .iter()
                .map(|&policy| LevelQueue {
                    policy,
                    queue: VecDeque::new(),
                })
                .collect(),
        }
    }

    /// Append a process to the tail of `level`
    pub fn enqueue(&mut self, level: Level, slot: Slot) -> SchedulerResult<()> {
        self.level_mut(level)?.queue.push_back(slot);
        Ok(())
    }

    /// Remove and return the head of `level`
    pub fn dequeue_front(&mut self, level: Level) -> SchedulerResult<Slot> {
        self.level_mut(level)?
            .queue
            .pop_front()
            .ok_or(SchedulerError::EmptyQueue(level))
    }

    /// First non-empty level scanning from the highest priority
    #[inline]
    pub fn highest_non_empty_level(&self) -> Option<Level> {
        self.levels.iter().position(|l| !l.queue.is_empty())
    }

    pub fn policy(&self, level: Level) -> SchedulerResult<SchedulingPolicy> {
        self.level_ref(level).map(|l| l.policy)
    }

    /// Queued processes at `level`, head first
    pub fn queued(&self, level: Level) -> SchedulerResult<impl Iterator<Item = Slot> + '_> {
        Ok(self.level_ref(level)?.queue.iter().copied())
    }

    pub fn level_len(&self, level: Level) -> SchedulerResult<usize> {
        self.level_ref(level).map(|l| l.queue.len())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total queued processes across all levels
    pub fn len(&self) -> usize {
        self.levels.iter().map(|l| l.queue.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|l| l.queue.is_empty())
    }

    fn level_ref(&self, level: Level) -> SchedulerResult<&LevelQueue> {
        let level_count = self.levels.len();
        self.levels
            .get(level)
            .ok_or(SchedulerError::UnknownLevel { level, level_count })
    }

    fn level_mut(&mut self, level: Level) -> SchedulerResult<&mut LevelQueue> {
        let level_count = self.levels.len();
        self.levels
            .get_mut(level)
            .ok_or(SchedulerError::UnknownLevel { level, level_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QueueBank {
        QueueBank::new(&SchedulerConfig::default())
    }

    #[test]
    fn test_fifo_per_level() {
        let mut bank = bank();
        bank.enqueue(1, 7).unwrap();
        bank.enqueue(1, 3).unwrap();

        assert_eq!(bank.level_len(1).unwrap(), 2);
        assert_eq!(bank.queued(1).unwrap().collect::<Vec<_>>(), vec![7, 3]);
        assert_eq!(bank.dequeue_front(1).unwrap(), 7);
        assert_eq!(bank.dequeue_front(1).unwrap(), 3);
    }

    #[test]
    fn test_empty_queue_error() {
        let mut bank = bank();
        assert_eq!(bank.dequeue_front(0), Err(SchedulerError::EmptyQueue(0)));
    }

    #[test]
    fn test_unknown_level_error() {
        let mut bank = bank();
        assert_eq!(
            bank.enqueue(5, 0),
            Err(SchedulerError::UnknownLevel {
                level: 5,
                level_count: 3
            })
        );
        assert!(bank.policy(3).is_err());
    }

    #[test]
    fn test_highest_non_empty_level() {
        let mut bank = bank();
        assert!(bank.is_empty());
        assert_eq!(bank.highest_non_empty_level(), None);

        bank.enqueue(2, 0).unwrap();
        assert_eq!(bank.highest_non_empty_level(), Some(2));

        bank.enqueue(1, 1).unwrap();
        assert_eq!(bank.highest_non_empty_level(), Some(1));
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.policy(2).unwrap(), SchedulingPolicy::Fcfs);
    }
}
