/*!
 * Scheduler Configuration
 * Immutable level table: one dispatch policy per priority level
 */

use super::types::SchedulingPolicy;
use crate::core::errors::ConfigError;
use crate::core::limits::{DEFAULT_HIGH_QUANTUM, DEFAULT_MEDIUM_QUANTUM, ENV_LEVELS, MAX_LEVELS};
use crate::core::types::Level;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::path::Path;
use tracing::{debug, info};

/// Level table, index 0 is the highest priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawSchedulerConfig")]
pub struct SchedulerConfig {
    levels: Vec<SchedulingPolicy>,
}

/// Unvalidated wire form, checked on the way into `SchedulerConfig`
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct RawSchedulerConfig {
    levels: Vec<SchedulingPolicy>,
}

impl TryFrom<RawSchedulerConfig> for SchedulerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSchedulerConfig) -> Result<Self, Self::Error> {
        Self::new(raw.levels)
    }
}

impl SchedulerConfig {
    /// Create a validated level table
    pub fn new(levels: Vec<SchedulingPolicy>) -> Result<Self, ConfigError> {
        let config = Self { levels };
        config.validate()?;
        Ok(config)
    }

    /// Parse a comma-separated list such as `rr:2,rr:4,fcfs`
    pub fn parse_levels(spec: &str) -> Result<Self, ConfigError> {
        let levels = spec
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<SchedulingPolicy>)
            .collect::<Result<Vec<SchedulingPolicy>, _>>()?;
        Self::new(levels)
    }

    /// Default table, overridden by `MLQ_LEVELS` when set
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_LEVELS) {
            Ok(spec) => {
                let config = Self::parse_levels(&spec)?;
                info!(levels = %spec, "Scheduler levels loaded from environment");
                Ok(config)
            }
            Err(_) => {
                debug!("{} not set, using default levels", ENV_LEVELS);
                Ok(Self::default())
            }
        }
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        info!(path = %path.display(), levels = config.level_count(), "Scheduler configuration loaded");
        Ok(config)
    }

    /// Parse and validate a JSON configuration document
    ///
    /// Table-level failures keep their own variant instead of folding into `Parse`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawSchedulerConfig = serde_json::from_str(raw)?;
        Self::try_from(raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if self.levels.len() > MAX_LEVELS {
            return Err(ConfigError::TooManyLevels {
                count: self.levels.len(),
                max: MAX_LEVELS,
            });
        }
        Ok(())
    }

    pub fn levels(&self) -> &[SchedulingPolicy] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn policy(&self, level: Level) -> Option<SchedulingPolicy> {
        self.levels.get(level).copied()
    }
}

impl Default for SchedulerConfig {
    /// Round-robin q=2, round-robin q=4, FCFS
    fn default() -> Self {
        let rr = |quantum| SchedulingPolicy::RoundRobin {
            quantum: NonZeroU64::new(quantum).unwrap_or(NonZeroU64::MIN),
        };
        Self {
            levels: vec![
                rr(DEFAULT_HIGH_QUANTUM),
                rr(DEFAULT_MEDIUM_QUANTUM),
                SchedulingPolicy::Fcfs,
            ],
        }
    }
}
