/*!
 * Execution Trace
 * Append-only per-tick record of the CPU occupant
 */

use crate::core::limits::IDLE_LABEL;
use crate::core::types::{ProcessId, Tick};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Occupant of the CPU during one tick
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TraceLabel {
    Process(ProcessId),
    Idle,
}

impl TraceLabel {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Process(id) => id.as_str(),
            Self::Idle => IDLE_LABEL,
        }
    }

    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for TraceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form: the process id, or `null` for an idle tick
///
/// `IDLE` is only the display form, so a process with that id stays distinct.
impl Serialize for TraceLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Process(id) => serializer.serialize_some(id.as_str()),
            Self::Idle => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TraceLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<ProcessId>::deserialize(deserializer)? {
            Some(id) => Self::Process(id),
            None => Self::Idle,
        })
    }
}

/// Run of consecutive ticks with the same occupant, `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TraceSegment {
    pub label: TraceLabel,
    pub start: Tick,
    pub end: Tick,
}

impl TraceSegment {
    #[inline]
    pub const fn len(&self) -> Tick {
        self.end - self.start
    }
}

/// Per-tick occupant labels; entry `i` describes tick `i`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    labels: Vec<TraceLabel>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_process(&mut self, id: ProcessId) {
        self.labels.push(TraceLabel::Process(id));
    }

    pub(crate) fn push_idle(&mut self) {
        self.labels.push(TraceLabel::Idle);
    }

    pub fn labels(&self) -> &[TraceLabel] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceLabel> {
        self.labels.iter()
    }

    /// Number of recorded ticks
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn idle_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_idle()).count()
    }

    pub fn busy_count(&self) -> usize {
        self.len() - self.idle_count()
    }

    /// Label of the most recent tick
    pub fn last(&self) -> Option<&TraceLabel> {
        self.labels.last()
    }

    /// Run-length compressed form for Gantt rendering
    pub fn segments(&self) -> Vec<TraceSegment> {
        let mut segments: Vec<TraceSegment> = Vec::new();

        for (tick, label) in self.labels.iter().enumerate() {
            let tick = tick as Tick;
            match segments.last_mut() {
                Some(segment) if segment.label == *label => segment.end = tick + 1,
                _ => segments.push(TraceSegment {
                    label: label.clone(),
                    start: tick,
                    end: tick + 1,
                }),
            }
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut trace = Trace::new();
        trace.push_process("P1".into());
        trace.push_process("P1".into());
        trace.push_idle();
        trace.push_process("P2".into());
        trace
    }

    #[test]
    fn test_counts() {
        let trace = sample();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.idle_count(), 1);
        assert_eq!(trace.busy_count(), 3);
        assert_eq!(trace.last().map(|l| l.as_str()), Some("P2"));
    }

    #[test]
    fn test_segments() {
        let segments = sample().segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].label.as_str(), "P1");
        assert_eq!((segments[0].start, segments[0].end), (0, 2));
        assert!(segments[1].label.is_idle());
        assert_eq!(segments[2].len(), 1);
        assert!(Trace::new().segments().is_empty());
    }

    #[test]
    fn test_serializes_idle_as_null() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"["P1","P1",null,"P2"]"#);
        assert_eq!(serde_json::from_str::<Trace>(&json).unwrap(), sample());
    }

    #[test]
    fn test_process_named_like_idle_marker_survives_round_trip() {
        let mut trace = Trace::new();
        trace.push_idle();
        trace.push_process(IDLE_LABEL.into());

        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(json, r#"[null,"IDLE"]"#);

        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back.labels(), &[TraceLabel::Idle, TraceLabel::Process("IDLE".into())]);
        assert_eq!(back.idle_count(), 1);
    }
}
