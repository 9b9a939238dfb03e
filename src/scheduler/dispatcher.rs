/*!
 * Dispatcher
 * The tick loop: admission, preemption, dispatch, execution, completion
 *
 * Every tick runs the same fixed sequence:
 * 1. release due arrivals into their levels
 * 2. terminate when nothing is pending, queued or running
 * 3. preempt the running process if a strictly higher level has work
 * 4. dispatch the head of the highest non-empty level onto an idle CPU
 * 5. execute one tick (or record idle)
 * 6. complete the process, or requeue it on round-robin quantum expiry
 * 7. advance the clock
 */

use super::config::SchedulerConfig;
use super::events::SchedEvent;
use super::outcome::SimulationOutcome;
use super::queue_bank::QueueBank;
use super::running::RunningSlot;
use super::stats::SchedulerStats;
use crate::core::errors::SchedulerError;
use crate::core::types::{Level, SchedulerResult, Slot, Tick};
use crate::monitoring::{MetricsCollector, RunSpan, Trace};
use crate::process::{admit_all, ArrivalFeed, ProcessLocation, ProcessRecord, ProcessReport, ProcessSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Simulation state after the most recent step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatcherState {
    /// No process held the CPU during the last tick
    IdleCpu,
    /// A process held the CPU during the last tick
    Running,
    /// Every process has completed; the clock no longer advances
    Terminated,
}

/// Owns all simulation state for one run
pub struct Dispatcher {
    config: SchedulerConfig,
    now: Tick,
    busy_ticks: Tick,
    state: DispatcherState,

    // Record table indexed by slot (declaration order)
    records: Vec<ProcessRecord>,
    locations: Vec<ProcessLocation>,

    feed: ArrivalFeed,
    bank: QueueBank,
    cpu: RunningSlot,
    // Process that executed during the previous tick
    last_ran: Option<Slot>,

    metrics: MetricsCollector,
    trace: Trace,
    stats: SchedulerStats,
    events: Vec<SchedEvent>,
}

impl Dispatcher {
    /// Admit a workload; fails without running anything if any spec is invalid
    pub fn new(config: SchedulerConfig, specs: Vec<ProcessSpec>) -> SchedulerResult<Self> {
        let records = admit_all(specs, config.level_count())?;
        let count = records.len();

        if count == 0 {
            warn!("Empty workload: run terminates at tick 0");
        } else {
            info!(processes = count, levels = config.level_count(), "Workload admitted");
        }

        Ok(Self {
            feed: ArrivalFeed::new(&records),
            bank: QueueBank::new(&config),
            config,
            now: 0,
            busy_ticks: 0,
            state: DispatcherState::IdleCpu,
            locations: vec![ProcessLocation::Pending; count],
            records,
            cpu: RunningSlot::new(),
            last_ran: None,
            metrics: MetricsCollector::with_capacity(count),
            trace: Trace::new(),
            stats: SchedulerStats::default(),
            events: Vec::new(),
        })
    }

    /// Execute one tick of the loop
    pub fn step(&mut self) -> SchedulerResult<DispatcherState> {
        if self.state == DispatcherState::Terminated {
            return Ok(self.state);
        }

        self.admit_arrivals()?;

        if self.feed.is_empty() && self.bank.is_empty() && self.cpu.is_empty() {
            debug!(tick = self.now, "Nothing pending, queued or running");
            self.state = DispatcherState::Terminated;
            self.check_invariants();
            return Ok(self.state);
        }

        self.check_preemption()?;
        self.dispatch()?;
        self.execute()?;

        self.now += 1;
        self.check_invariants();
        Ok(self.state)
    }

    /// Run to termination and collect the outcome
    pub fn run(mut self) -> SchedulerResult<SimulationOutcome> {
        let span = RunSpan::new(self.records.len(), self.config.level_count());
        let _entered = span.enter();
        info!("Simulation started");

        loop {
            match self.step() {
                Ok(DispatcherState::Terminated) => break,
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, tick = self.now, "Simulation aborted");
                    span.record_error(&e.to_string());
                    return Err(e);
                }
            }
        }

        span.record_final_tick(self.now);
        let outcome = self.into_outcome(span.run_id())?;
        span.record_result(true);

        info!(
            final_tick = outcome.final_tick,
            completed = outcome.aggregates.completed,
            avg_turnaround = outcome.aggregates.average_turnaround,
            avg_waiting = outcome.aggregates.average_waiting,
            utilization = outcome.aggregates.utilization,
            "Simulation finished"
        );
        Ok(outcome)
    }

    /// Step 1: move due arrivals into their levels
    fn admit_arrivals(&mut self) -> SchedulerResult<()> {
        for slot in self.feed.release_due(self.now, &mut self.bank)? {
            let record = &self.records[slot];
            let level = record.queue_level();
            self.locations[slot] = ProcessLocation::Queued(level);

            debug!(tick = self.now, id = %record.id(), level, "Process arrived");
            self.events.push(SchedEvent::Arrived {
                tick: self.now,
                id: record.id().clone(),
                level,
            });
        }
        Ok(())
    }

    /// Step 3: only a strictly higher priority level preempts
    fn check_preemption(&mut self) -> SchedulerResult<()> {
        let (Some(running), Some(active)) = (self.cpu.current(), self.bank.highest_non_empty_level()) else {
            return Ok(());
        };
        if active >= running.level {
            return Ok(());
        }

        self.cpu.vacate();
        // Back to the tail of its own level, not the interrupting one
        self.requeue(running.slot, running.level)?;
        self.stats.inc_preemptions();

        let id = self.records[running.slot].id().clone();
        debug!(tick = self.now, id = %id, level = running.level, by_level = active, "Process preempted");
        self.events.push(SchedEvent::Preempted {
            tick: self.now,
            id,
            level: running.level,
            by_level: active,
        });
        Ok(())
    }

    /// Step 4: fill an idle CPU from the highest non-empty level
    fn dispatch(&mut self) -> SchedulerResult<()> {
        if !self.cpu.is_empty() {
            return Ok(());
        }
        let Some(level) = self.bank.highest_non_empty_level() else {
            return Ok(());
        };

        let slot = self.bank.dequeue_front(level)?;
        let record = &mut self.records[slot];
        if record.queue_level() != level {
            return Err(SchedulerError::InvariantViolation(format!(
                "process {} assigned to level {} was queued at level {}",
                record.id(),
                record.queue_level(),
                level
            )));
        }

        let first_run = !record.has_started();
        record.mark_dispatched(self.now);
        let id = record.id().clone();

        self.cpu.occupy(slot, level);
        self.locations[slot] = ProcessLocation::Running;
        self.stats.inc_dispatches();
        if self.last_ran != Some(slot) {
            self.stats.inc_context_switches();
        }

        debug!(tick = self.now, id = %id, level, first_run, "Process dispatched");
        self.events.push(SchedEvent::Dispatched {
            tick: self.now,
            id,
            level,
            first_run,
        });
        Ok(())
    }

    /// Steps 5 and 6: run one tick, then resolve completion before quantum expiry
    fn execute(&mut self) -> SchedulerResult<()> {
        let Some(running) = self.cpu.charge_tick() else {
            self.trace.push_idle();
            self.stats.inc_idle_ticks();
            self.last_ran = None;
            self.state = DispatcherState::IdleCpu;
            return Ok(());
        };

        let end = self.now + 1;
        let record = &mut self.records[running.slot];
        let remaining = record.execute_tick();
        let id = record.id().clone();

        self.busy_ticks += 1;
        self.trace.push_process(id.clone());
        self.last_ran = Some(running.slot);
        self.state = DispatcherState::Running;

        if remaining == 0 {
            self.cpu.vacate();
            self.metrics.record_completion(running.slot, record, end)?;
            self.locations[running.slot] = ProcessLocation::Completed;
            self.stats.inc_completions();

            debug!(tick = end, id = %id, "Process completed");
            self.events.push(SchedEvent::Completed { tick: end, id });
        } else if self.bank.policy(running.level)?.quantum_expired(running.quantum_used) {
            self.cpu.vacate();
            self.requeue(running.slot, running.level)?;
            self.stats.inc_quantum_expiries();

            debug!(tick = end, id = %id, level = running.level, "Quantum expired, requeued");
            self.events.push(SchedEvent::QuantumExpired {
                tick: end,
                id,
                level: running.level,
            });
        }

        Ok(())
    }

    fn requeue(&mut self, slot: Slot, level: Level) -> SchedulerResult<()> {
        self.bank.enqueue(level, slot)?;
        self.locations[slot] = ProcessLocation::Queued(level);
        Ok(())
    }

    /// Every record lives in exactly one place; trace and clock agree
    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let running = usize::from(!self.cpu.is_empty());
        debug_assert_eq!(
            self.feed.len() + self.bank.len() + running + self.metrics.completed_count(),
            self.records.len(),
            "process count mismatch at tick {}",
            self.now
        );
        debug_assert_eq!(self.trace.len() as Tick, self.now);
        debug_assert_eq!(self.busy_ticks + self.stats.idle_ticks, self.now);

        for (slot, location) in self.locations.iter().enumerate() {
            match *location {
                ProcessLocation::Queued(level) => debug_assert!(
                    self.bank
                        .queued(level)
                        .map(|mut q| q.any(|s| s == slot))
                        .unwrap_or(false),
                    "slot {slot} claims level {level} but is not queued there"
                ),
                ProcessLocation::Running => {
                    debug_assert_eq!(self.cpu.current().map(|r| r.slot), Some(slot))
                }
                ProcessLocation::Completed => debug_assert!(self.records[slot].is_completed()),
                ProcessLocation::Pending => debug_assert!(!self.records[slot].has_started()),
            }
        }
    }

    fn into_outcome(self, run_id: &str) -> SchedulerResult<SimulationOutcome> {
        let processes = self
            .records
            .iter()
            .map(|r| {
                r.report().ok_or_else(|| {
                    SchedulerError::InvariantViolation(format!(
                        "process {} did not complete before termination",
                        r.id()
                    ))
                })
            })
            .collect::<SchedulerResult<Vec<ProcessReport>>>()?;

        let aggregates = self.metrics.summarize(
            &self.records,
            self.config.level_count(),
            self.busy_ticks,
            self.now,
        );

        Ok(SimulationOutcome {
            run_id: run_id.to_string(),
            config: self.config,
            final_tick: self.now,
            processes,
            aggregates,
            trace: self.trace,
            stats: self.stats,
            events: self.events,
        })
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn busy_ticks(&self) -> Tick {
        self.busy_ticks
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn events(&self) -> &[SchedEvent] {
        &self.events
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.id().as_str() == id)
    }

    pub fn location(&self, id: &str) -> Option<ProcessLocation> {
        self.records
            .iter()
            .position(|r| r.id().as_str() == id)
            .map(|slot| self.locations[slot])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulingPolicy;

    fn dispatcher(specs: Vec<ProcessSpec>) -> Dispatcher {
        Dispatcher::new(SchedulerConfig::default(), specs).unwrap()
    }

    #[test]
    fn test_empty_workload_terminates_at_zero() {
        let mut d = dispatcher(vec![]);
        assert_eq!(d.step().unwrap(), DispatcherState::Terminated);
        assert_eq!(d.now(), 0);
        assert!(d.trace().is_empty());
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let mut d = dispatcher(vec![ProcessSpec::new("A", 2, 1, 0)]);
        assert_eq!(d.step().unwrap(), DispatcherState::IdleCpu);
        assert_eq!(d.location("A"), Some(ProcessLocation::Pending));
        assert_eq!(d.step().unwrap(), DispatcherState::IdleCpu);
        assert_eq!(d.step().unwrap(), DispatcherState::Running);
        assert_eq!(d.location("A"), Some(ProcessLocation::Completed));
        assert_eq!(d.step().unwrap(), DispatcherState::Terminated);
        assert_eq!(d.now(), 3);
        assert_eq!(d.stats().idle_ticks, 2);
    }

    #[test]
    fn test_step_after_termination_is_stable() {
        let mut d = dispatcher(vec![ProcessSpec::new("A", 0, 1, 2)]);
        while d.step().unwrap() != DispatcherState::Terminated {}
        let now = d.now();
        assert_eq!(d.step().unwrap(), DispatcherState::Terminated);
        assert_eq!(d.now(), now);
    }

    #[test]
    fn test_completion_wins_over_quantum_expiry() {
        // Burst equals quantum: the last tick both completes and exhausts the quantum
        let mut d = dispatcher(vec![ProcessSpec::new("A", 0, 2, 0), ProcessSpec::new("B", 0, 1, 0)]);
        d.step().unwrap();
        d.step().unwrap();

        assert_eq!(d.location("A"), Some(ProcessLocation::Completed));
        assert_eq!(d.stats().quantum_expiries, 0);
        assert_eq!(d.record("A").and_then(|r| r.completion_time()), Some(2));
    }

    #[test]
    fn test_preempted_process_returns_to_own_level_tail() {
        let mut d = dispatcher(vec![
            ProcessSpec::new("low", 0, 5, 1),
            ProcessSpec::new("peer", 0, 2, 1),
            ProcessSpec::new("high", 1, 1, 0),
        ]);
        d.step().unwrap();
        assert_eq!(d.location("low"), Some(ProcessLocation::Running));

        d.step().unwrap();
        assert_eq!(d.location("low"), Some(ProcessLocation::Queued(1)));
        assert_eq!(d.stats().preemptions, 1);
        assert_eq!(d.trace().last().map(|l| l.as_str()), Some("high"));

        // "peer" was ahead in level 1 and runs before the preempted process
        d.step().unwrap();
        assert_eq!(d.trace().last().map(|l| l.as_str()), Some("peer"));
    }

    #[test]
    fn test_fcfs_level_has_no_quantum_expiry() {
        let config = SchedulerConfig::new(vec![SchedulingPolicy::Fcfs]).unwrap();
        let mut d = Dispatcher::new(
            config,
            vec![ProcessSpec::new("A", 0, 6, 0), ProcessSpec::new("B", 0, 1, 0)],
        )
        .unwrap();
        for _ in 0..6 {
            d.step().unwrap();
        }
        assert_eq!(d.location("A"), Some(ProcessLocation::Completed));
        assert_eq!(d.location("B"), Some(ProcessLocation::Queued(0)));
        assert_eq!(d.stats().quantum_expiries, 0);
    }

    #[test]
    fn test_rejects_invalid_spec_before_running() {
        let result = Dispatcher::new(
            SchedulerConfig::default(),
            vec![ProcessSpec::new("A", 0, 1, 0), ProcessSpec::new("B", 0, 1, 7)],
        );
        assert!(matches!(
            result,
            Err(SchedulerError::InvalidProcessSpec { .. })
        ));
    }
}
