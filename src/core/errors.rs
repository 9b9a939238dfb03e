/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Level, ProcessId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reason a process spec was rejected at admission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecViolation {
    /// Identifier is empty; `index` is the declaration position
    EmptyId { index: usize },
    NegativeArrival { arrival_time: i64 },
    NonPositiveBurst { burst_time: i64 },
    DuplicateId,
    LevelOutOfRange { queue_level: i64, level_count: usize },
}

impl fmt::Display for SpecViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId { index } => write!(f, "spec #{} has an empty id", index),
            Self::NegativeArrival { arrival_time } => {
                write!(f, "arrival time {} is negative", arrival_time)
            }
            Self::NonPositiveBurst { burst_time } => {
                write!(f, "burst time {} must be positive", burst_time)
            }
            Self::DuplicateId => write!(f, "id is declared more than once"),
            Self::LevelOutOfRange {
                queue_level,
                level_count,
            } => write!(
                f,
                "queue level {} outside configured range [0, {})",
                queue_level, level_count
            ),
        }
    }
}

/// Scheduler errors with serialization support
///
/// `InvalidProcessSpec` is raised before the loop starts. The remaining
/// variants are invariant violations inside the loop and are fatal.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid process spec '{id}': {reason}")]
    #[diagnostic(
        code(scheduler::invalid_process_spec),
        help("Ids must be unique and non-empty, arrival >= 0, burst > 0, and the level configured.")
    )]
    InvalidProcessSpec {
        id: ProcessId,
        reason: SpecViolation,
    },

    #[error("Queue level {0} is empty")]
    #[diagnostic(
        code(scheduler::empty_queue),
        help("Dequeue was attempted on an empty level. This is a dispatcher defect.")
    )]
    EmptyQueue(Level),

    #[error("Queue level {level} is not configured ({level_count} levels)")]
    #[diagnostic(
        code(scheduler::unknown_level),
        help("Levels are validated at admission; an unknown level inside the loop is a defect.")
    )]
    UnknownLevel { level: Level, level_count: usize },

    #[error("Scheduler invariant violated: {0}")]
    #[diagnostic(
        code(scheduler::invariant_violation),
        help("The run was aborted. Please report this issue with the workload that triggered it.")
    )]
    InvariantViolation(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    #[diagnostic(
        code(config::io),
        help("Check that the file exists and is readable.")
    )]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(code(config::parse), help("Configuration files are JSON documents."))]
    Parse(String),

    #[error("No priority levels configured")]
    #[diagnostic(
        code(config::no_levels),
        help("Configure at least one level, e.g. MLQ_LEVELS=rr:2,rr:4,fcfs")
    )]
    NoLevels,

    #[error("Too many priority levels: {count} (max {max})")]
    #[diagnostic(code(config::too_many_levels))]
    TooManyLevels { count: usize, max: usize },

    #[error("Round-robin quantum must be positive")]
    #[diagnostic(
        code(config::zero_quantum),
        help("Use a quantum of at least 1 tick.")
    )]
    ZeroQuantum,

    #[error("Invalid policy '{0}'. Valid: rr:<quantum>, round_robin:<quantum>, fcfs")]
    #[diagnostic(code(config::invalid_policy))]
    InvalidPolicy(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
