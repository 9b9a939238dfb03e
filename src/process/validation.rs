/*!
 * Process Spec Validation
 * Admission checks run before the dispatch loop starts
 */

use super::types::{ProcessRecord, ProcessSpec};
use crate::core::errors::{SchedulerError, SpecViolation};
use crate::core::types::{Level, SchedulerResult, Tick};
use ahash::AHashSet;

/// Validate every spec and build the record table in declaration order
///
/// Fails on the first offending spec; nothing is admitted on failure.
pub(crate) fn admit_all(specs: Vec<ProcessSpec>, level_count: usize) -> SchedulerResult<Vec<ProcessRecord>> {
    let mut seen = AHashSet::with_capacity(specs.len());
    let mut records = Vec::with_capacity(specs.len());

    for (index, spec) in specs.into_iter().enumerate() {
        let record = validate_spec(spec, index, level_count)?;
        if !seen.insert(record.id().clone()) {
            return Err(invalid(record.id().clone(), SpecViolation::DuplicateId));
        }
        records.push(record);
    }

    Ok(records)
}

/// Validate a single spec
fn validate_spec(spec: ProcessSpec, index: usize, level_count: usize) -> SchedulerResult<ProcessRecord> {
    if spec.id.is_empty() {
        return Err(invalid(spec.id, SpecViolation::EmptyId { index }));
    }

    let arrival_time = Tick::try_from(spec.arrival_time).map_err(|_| {
        invalid(
            spec.id.clone(),
            SpecViolation::NegativeArrival {
                arrival_time: spec.arrival_time,
            },
        )
    })?;

    if spec.burst_time <= 0 {
        return Err(invalid(
            spec.id,
            SpecViolation::NonPositiveBurst {
                burst_time: spec.burst_time,
            },
        ));
    }
    let burst_time = spec.burst_time as Tick;

    let queue_level = Level::try_from(spec.queue_level)
        .ok()
        .filter(|level| *level < level_count)
        .ok_or_else(|| {
            invalid(
                spec.id.clone(),
                SpecViolation::LevelOutOfRange {
                    queue_level: spec.queue_level,
                    level_count,
                },
            )
        })?;

    Ok(ProcessRecord::new(spec.id, arrival_time, burst_time, queue_level))
}

#[cold]
#[inline(never)]
fn invalid(id: crate::core::types::ProcessId, reason: SpecViolation) -> SchedulerError {
    SchedulerError::InvalidProcessSpec { id, reason }
}
