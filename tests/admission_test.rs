/*!
 * Admission Tests
 * Invalid workloads and configurations are rejected before the loop starts
 */

use mlq_sim::{
    simulate, ConfigError, Dispatcher, ProcessSpec, SchedulerConfig, SchedulerError,
    SpecViolation,
};
use pretty_assertions::assert_eq;

fn rejection(specs: Vec<ProcessSpec>) -> (String, SpecViolation) {
    match Dispatcher::new(SchedulerConfig::default(), specs) {
        Err(SchedulerError::InvalidProcessSpec { id, reason }) => (id.to_string(), reason),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("workload was admitted"),
    }
}

#[test]
fn test_negative_arrival_rejected() {
    let (id, reason) = rejection(vec![ProcessSpec::new("P1", -3, 2, 0)]);
    assert_eq!(id, "P1");
    assert_eq!(reason, SpecViolation::NegativeArrival { arrival_time: -3 });
}

#[test]
fn test_non_positive_burst_rejected() {
    let (_, reason) = rejection(vec![ProcessSpec::new("P1", 0, -2, 0)]);
    assert_eq!(reason, SpecViolation::NonPositiveBurst { burst_time: -2 });
}

#[test]
fn test_duplicate_id_rejected_after_valid_specs() {
    let (id, reason) = rejection(vec![
        ProcessSpec::new("P1", 0, 1, 0),
        ProcessSpec::new("P2", 0, 1, 1),
        ProcessSpec::new("P1", 4, 1, 2),
    ]);
    assert_eq!(id, "P1");
    assert_eq!(reason, SpecViolation::DuplicateId);
}

#[test]
fn test_level_outside_config_rejected() {
    let config = SchedulerConfig::parse_levels("rr:3").unwrap();
    let result = simulate(config, vec![ProcessSpec::new("P1", 0, 1, 1)]);
    assert_eq!(
        result.unwrap_err(),
        SchedulerError::InvalidProcessSpec {
            id: "P1".into(),
            reason: SpecViolation::LevelOutOfRange {
                queue_level: 1,
                level_count: 1
            }
        }
    );
}

#[test]
fn test_workload_from_json() {
    let specs: Vec<ProcessSpec> = serde_json::from_str(
        r#"[
            {"id": "A", "arrival_time": 0, "burst_time": 2, "queue_level": 0},
            {"id": "B", "arrival_time": 1, "burst_time": 1, "queue_level": 2}
        ]"#,
    )
    .unwrap();

    let outcome = simulate(SchedulerConfig::default(), specs).unwrap();
    assert_eq!(outcome.trace_labels(), vec!["A", "A", "B"]);
}

#[test]
fn test_negative_values_survive_parsing() {
    let specs: Vec<ProcessSpec> =
        serde_json::from_str(r#"[{"id": "A", "arrival_time": -1, "burst_time": 0, "queue_level": 0}]"#)
            .unwrap();
    let (_, reason) = rejection(specs);
    assert_eq!(reason, SpecViolation::NegativeArrival { arrival_time: -1 });
}

#[test]
fn test_config_rejections() {
    assert_eq!(SchedulerConfig::new(vec![]), Err(ConfigError::NoLevels));
    assert_eq!(
        SchedulerConfig::parse_levels("rr:2,rr:0"),
        Err(ConfigError::ZeroQuantum)
    );
    assert!(matches!(
        SchedulerConfig::parse_levels("rr:2,mlfq"),
        Err(ConfigError::InvalidPolicy(_))
    ));
}

#[test]
fn test_errors_carry_diagnostic_codes() {
    use miette::Diagnostic;

    let err = SchedulerError::EmptyQueue(1);
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("scheduler::empty_queue".to_string())
    );
    assert!(ConfigError::NoLevels.help().is_some());
}
