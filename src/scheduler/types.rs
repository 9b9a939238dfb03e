/*!
 * Scheduler Types
 * Per-level dispatch policy descriptors
 */

use crate::core::errors::ConfigError;
use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Dispatch policy of one queue level
///
/// The quantum lives inside the round-robin variant, so an FCFS level can
/// never carry one and a round-robin level can never lack one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// Round-robin with a fixed quantum in ticks
    RoundRobin { quantum: NonZeroU64 },
    /// First-come-first-served; yields only on completion or preemption
    Fcfs,
}

impl SchedulingPolicy {
    /// Round-robin policy, rejecting a zero quantum
    pub fn round_robin(quantum: Tick) -> Result<Self, ConfigError> {
        NonZeroU64::new(quantum)
            .map(|quantum| Self::RoundRobin { quantum })
            .ok_or(ConfigError::ZeroQuantum)
    }

    /// Quantum in ticks, `None` for FCFS
    #[inline(always)]
    pub const fn quantum(&self) -> Option<Tick> {
        match self {
            Self::RoundRobin { quantum } => Some(quantum.get()),
            Self::Fcfs => None,
        }
    }

    /// Whether a process that has run `used` ticks since dispatch must yield
    ///
    /// # Performance
    /// Hot path - evaluated once per executed tick
    #[inline(always)]
    pub const fn quantum_expired(&self, used: Tick) -> bool {
        match self {
            Self::RoundRobin { quantum } => used >= quantum.get(),
            Self::Fcfs => false,
        }
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin { .. } => "round_robin",
            Self::Fcfs => "fcfs",
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "rr:{}", quantum),
            Self::Fcfs => f.write_str("fcfs"),
        }
    }
}

/// Algorithm name accepted by both the compact text form and the JSON descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    RoundRobin,
    Fcfs,
}

impl Algorithm {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "rr" | "round_robin" | "roundrobin" => Some(Self::RoundRobin),
            "fcfs" | "fifo" => Some(Self::Fcfs),
            _ => None,
        }
    }
}

/// Parse the compact form: `rr:<quantum>`, `round_robin:<quantum>` or `fcfs`
impl FromStr for SchedulingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let (name, quantum) = match normalized.split_once(':') {
            Some((name, quantum)) => (name.trim(), Some(quantum.trim())),
            None => (normalized.as_str(), None),
        };

        match (Algorithm::from_name(name), quantum) {
            (Some(Algorithm::RoundRobin), Some(quantum)) => {
                let quantum: Tick = quantum
                    .parse()
                    .map_err(|_| ConfigError::InvalidPolicy(s.to_string()))?;
                Self::round_robin(quantum)
            }
            (Some(Algorithm::Fcfs), None) => Ok(Self::Fcfs),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

/// Wire form: `{"algorithm": "round_robin", "quantum": 2}` or `{"algorithm": "fcfs"}`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct PolicyDescriptor {
    algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantum: Option<Tick>,
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PolicyDescriptor {
            algorithm: self.as_str().to_string(),
            quantum: self.quantum(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let descriptor = PolicyDescriptor::deserialize(deserializer)?;
        match (Algorithm::from_name(&descriptor.algorithm), descriptor.quantum) {
            (Some(Algorithm::RoundRobin), Some(quantum)) => {
                Self::round_robin(quantum).map_err(serde::de::Error::custom)
            }
            (Some(Algorithm::RoundRobin), None) => Err(serde::de::Error::custom(
                "round_robin level requires a quantum",
            )),
            (Some(Algorithm::Fcfs), None) => Ok(Self::Fcfs),
            (Some(Algorithm::Fcfs), Some(_)) => Err(serde::de::Error::custom(
                "fcfs level must not carry a quantum",
            )),
            (None, _) => Err(serde::de::Error::custom(ConfigError::InvalidPolicy(
                descriptor.algorithm,
            ))),
        }
    }
}
