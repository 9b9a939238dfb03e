/*!
 * Scheduling Property Tests
 * Invariants that hold for every valid batch and level table
 */

use mlq_sim::scheduler::SchedEvent;
use mlq_sim::{simulate, ProcessSpec, SchedulerConfig, SchedulingPolicy, SimulationOutcome};
use proptest::prelude::*;
use std::collections::HashMap;

fn policy_strategy() -> impl Strategy<Value = SchedulingPolicy> {
    prop_oneof![
        (1u64..=5).prop_map(|q| SchedulingPolicy::round_robin(q).unwrap()),
        Just(SchedulingPolicy::Fcfs),
    ]
}

fn scenario_strategy() -> impl Strategy<Value = (SchedulerConfig, Vec<ProcessSpec>)> {
    prop::collection::vec(policy_strategy(), 1..=4).prop_flat_map(|levels| {
        let level_count = levels.len() as i64;
        let specs = prop::collection::vec((0i64..25, 1i64..9, 0..level_count), 0..14).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (arrival, burst, level))| {
                        ProcessSpec::new(format!("P{}", i).as_str(), arrival, burst, level)
                    })
                    .collect::<Vec<_>>()
            },
        );
        (Just(SchedulerConfig::new(levels).unwrap()), specs)
    })
}

fn run(config: &SchedulerConfig, specs: &[ProcessSpec]) -> SimulationOutcome {
    simulate(config.clone(), specs.to_vec()).unwrap()
}

proptest! {
    #[test]
    fn prop_timing_identities((config, specs) in scenario_strategy()) {
        let outcome = run(&config, &specs);

        prop_assert_eq!(outcome.processes.len(), specs.len());
        for p in &outcome.processes {
            prop_assert_eq!(p.completion_time, p.arrival_time + p.waiting_time + p.burst_time);
            prop_assert_eq!(p.turnaround_time, p.waiting_time + p.burst_time);
            prop_assert!(p.response_time <= p.waiting_time);
        }
    }

    #[test]
    fn prop_trace_accounts_for_every_tick((config, specs) in scenario_strategy()) {
        let outcome = run(&config, &specs);

        prop_assert_eq!(outcome.trace.len() as u64, outcome.final_tick);
        prop_assert_eq!(
            outcome.aggregates.busy_ticks + outcome.trace.idle_count() as u64,
            outcome.final_tick
        );

        let total_burst: i64 = specs.iter().map(|s| s.burst_time).sum();
        prop_assert_eq!(outcome.aggregates.busy_ticks as i64, total_burst);

        let mut executed: HashMap<&str, i64> = HashMap::new();
        for label in outcome.trace.iter().filter(|l| !l.is_idle()) {
            *executed.entry(label.as_str()).or_default() += 1;
        }
        for spec in &specs {
            prop_assert_eq!(executed.get(spec.id.as_str()).copied(), Some(spec.burst_time));
        }
    }

    #[test]
    fn prop_no_dispatch_before_arrival((config, specs) in scenario_strategy()) {
        let outcome = run(&config, &specs);
        let arrivals: HashMap<&str, i64> =
            specs.iter().map(|s| (s.id.as_str(), s.arrival_time)).collect();

        for event in &outcome.events {
            if let SchedEvent::Dispatched { tick, id, .. } = event {
                prop_assert!(*tick as i64 >= arrivals[id.as_str()]);
            }
        }
    }

    #[test]
    fn prop_dispatch_bounds_per_policy((config, specs) in scenario_strategy()) {
        let outcome = run(&config, &specs);
        let mut dispatched_at: HashMap<&str, (u64, usize)> = HashMap::new();

        for event in &outcome.events {
            match event {
                SchedEvent::Dispatched { tick, id, level, .. } => {
                    dispatched_at.insert(id.as_str(), (*tick, *level));
                }
                SchedEvent::Preempted { tick, id, level, by_level } => {
                    prop_assert!(by_level < level, "preempted in favour of level {}", by_level);
                    let (start, _) = dispatched_at[id.as_str()];
                    prop_assert!(*tick > start);
                }
                SchedEvent::QuantumExpired { tick, id, level } => {
                    let policy = config.policy(*level).unwrap();
                    prop_assert_ne!(policy, SchedulingPolicy::Fcfs);
                    let (start, _) = dispatched_at[id.as_str()];
                    prop_assert_eq!(Some(tick - start), policy.quantum());
                }
                SchedEvent::Completed { tick, id } => {
                    let (start, level) = dispatched_at[id.as_str()];
                    if let Some(quantum) = config.policy(level).unwrap().quantum() {
                        prop_assert!(tick - start <= quantum);
                    }
                }
                SchedEvent::Arrived { .. } => {}
            }
        }
    }

    #[test]
    fn prop_runs_are_deterministic((config, specs) in scenario_strategy()) {
        let first = run(&config, &specs);
        let second = run(&config, &specs);

        prop_assert_eq!(first.trace, second.trace);
        prop_assert_eq!(first.processes, second.processes);
        prop_assert_eq!(first.events, second.events);
    }
}
