//! DrawTrace — A complete sequence of draw events for one cycle or session
//!
//! A trace captures the full timeline as the host received it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{DrawEvent, EventSink, FrameEvent};
use crate::phase::{AudioCue, DrawPhase};
use crate::taxonomy::DrawResult;

/// A complete trace of draw events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawTrace {
    /// Unique identifier for this trace
    pub trace_id: String,

    /// All events in emission order
    pub events: Vec<DrawEvent>,

    /// When this trace was started
    pub recorded_at: DateTime<Utc>,

    /// Custom metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl DrawTrace {
    /// Create a new empty trace
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn push(&mut self, event: DrawEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All frames, in order
    pub fn frames(&self) -> Vec<&FrameEvent> {
        self.events.iter().filter_map(|e| e.as_frame()).collect()
    }

    /// Frames emitted while counting down
    pub fn countdown_frames(&self) -> Vec<&FrameEvent> {
        self.frames()
            .into_iter()
            .filter(|f| f.phase == DrawPhase::Countdown)
            .collect()
    }

    /// All audio cues, in order
    pub fn audio_cues(&self) -> Vec<AudioCue> {
        self.events.iter().filter_map(|e| e.as_cue()).collect()
    }

    /// Phases entered, in order
    pub fn phases(&self) -> Vec<DrawPhase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DrawEvent::PhaseChanged { phase } => Some(*phase),
                _ => None,
            })
            .collect()
    }

    /// Results of every completed cycle in this trace
    pub fn results(&self) -> Vec<&DrawResult> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DrawEvent::Complete { results } => Some(results.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Get events by type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&DrawEvent> {
        self.events
            .iter()
            .filter(|e| e.type_name() == type_name)
            .collect()
    }

    /// Position of the first event matching a predicate
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&DrawEvent) -> bool,
    {
        self.events.iter().position(predicate)
    }

    pub fn has_event(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.type_name() == type_name)
    }

    pub fn was_cancelled(&self) -> bool {
        self.has_event("cancelled")
    }

    pub fn is_complete(&self) -> bool {
        self.has_event("complete")
    }

    /// Check cue ordering for a single successful cycle
    pub fn validate(&self) -> TraceValidation {
        let cue_pos = |cue: AudioCue| self.position(|e| e.as_cue() == Some(cue));
        let first_frame = self.position(|e| e.as_frame().is_some());
        let complete = self.position(|e| matches!(e, DrawEvent::Complete { .. }));

        let drumroll_start = cue_pos(AudioCue::DrumrollStart);
        let drumroll_stop = cue_pos(AudioCue::DrumrollStop);
        let crash = cue_pos(AudioCue::Crash);
        let applause = cue_pos(AudioCue::Applause);

        let drumroll_start_count = self
            .audio_cues()
            .iter()
            .filter(|c| **c == AudioCue::DrumrollStart)
            .count();

        let before = |a: Option<usize>, b: Option<usize>| match (a, b) {
            (Some(a), Some(b)) => a < b,
            (_, None) => true,
            (None, Some(_)) => false,
        };

        TraceValidation {
            single_drumroll_start: drumroll_start_count == 1,
            drumroll_before_frames: drumroll_start.is_some() && before(drumroll_start, first_frame),
            stop_before_crash: drumroll_stop.is_some() && before(drumroll_stop, crash),
            stop_before_applause: drumroll_stop.is_some() && before(drumroll_stop, applause),
            crash_before_applause: before(crash, applause) || crash.is_none(),
            cues_before_complete: complete.is_some()
                && [drumroll_stop, crash, applause]
                    .into_iter()
                    .flatten()
                    .all(|pos| Some(pos) < complete),
            has_complete: complete.is_some(),
        }
    }

    /// Get summary of trace
    pub fn summary(&self) -> TraceSummary {
        TraceSummary {
            trace_id: self.trace_id.clone(),
            event_count: self.events.len(),
            frame_count: self.frames().len(),
            cue_count: self.audio_cues().len(),
            winner_count: self.results().len(),
            cancelled: self.was_cancelled(),
            error_count: self.events_by_type("error").len(),
        }
    }
}

impl EventSink for DrawTrace {
    fn emit(&mut self, event: DrawEvent) {
        self.push(event);
    }
}

/// Validation result for a trace
#[derive(Debug, Clone, Default)]
pub struct TraceValidation {
    pub single_drumroll_start: bool,
    pub drumroll_before_frames: bool,
    pub stop_before_crash: bool,
    pub stop_before_applause: bool,
    pub crash_before_applause: bool,
    pub cues_before_complete: bool,
    pub has_complete: bool,
}

impl TraceValidation {
    /// Check if cue ordering is valid for a completed draw
    pub fn is_valid(&self) -> bool {
        self.single_drumroll_start
            && self.drumroll_before_frames
            && self.stop_before_crash
            && self.stop_before_applause
            && self.crash_before_applause
            && self.cues_before_complete
            && self.has_complete
    }

    /// Get list of warnings
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if !self.single_drumroll_start {
            warnings.push("Expected exactly one DRUMROLL_START");
        }
        if !self.drumroll_before_frames {
            warnings.push("DRUMROLL_START must precede the first frame");
        }
        if !self.stop_before_crash || !self.stop_before_applause {
            warnings.push("DRUMROLL_STOP must precede crash and applause");
        }
        if !self.crash_before_applause {
            warnings.push("Crash must precede applause");
        }
        if !self.has_complete {
            warnings.push("Missing COMPLETE event");
        } else if !self.cues_before_complete {
            warnings.push("Reveal cues must precede COMPLETE");
        }

        warnings
    }
}

/// Summary of a trace for quick overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub trace_id: String,
    pub event_count: usize,
    pub frame_count: usize,
    pub cue_count: usize,
    pub winner_count: usize,
    pub cancelled: bool,
    pub error_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Participant;

    fn cue(cue: AudioCue) -> DrawEvent {
        DrawEvent::AudioCue { cue }
    }

    fn create_basic_trace() -> DrawTrace {
        let mut trace = DrawTrace::new("test-001");

        trace.push(DrawEvent::PhaseChanged {
            phase: DrawPhase::Countdown,
        });
        trace.push(cue(AudioCue::DrumrollStart));
        trace.push(DrawEvent::Frame(FrameEvent::new(
            "Alice",
            0.5,
            DrawPhase::Countdown,
        )));
        trace.push(DrawEvent::Frame(FrameEvent::new(
            "Bob",
            0.0,
            DrawPhase::Countdown,
        )));
        trace.push(DrawEvent::PhaseChanged {
            phase: DrawPhase::Revealing,
        });
        trace.push(cue(AudioCue::DrumrollStop));
        trace.push(cue(AudioCue::Crash));
        trace.push(cue(AudioCue::Applause));
        trace.push(DrawEvent::PhaseChanged {
            phase: DrawPhase::Complete,
        });
        trace.push(DrawEvent::Frame(FrameEvent::new(
            "Carol",
            0.0,
            DrawPhase::Complete,
        )));
        trace.push(DrawEvent::Complete {
            results: vec![DrawResult::new(1, Participant::new(2, "Carol"))],
        });

        trace
    }

    #[test]
    fn test_trace_queries() {
        let trace = create_basic_trace();

        assert_eq!(trace.len(), 11);
        assert_eq!(trace.frames().len(), 3);
        assert_eq!(trace.countdown_frames().len(), 2);
        assert_eq!(trace.audio_cues().len(), 4);
        assert_eq!(
            trace.phases(),
            vec![
                DrawPhase::Countdown,
                DrawPhase::Revealing,
                DrawPhase::Complete
            ]
        );
        assert_eq!(trace.results().len(), 1);
        assert!(trace.is_complete());
        assert!(!trace.was_cancelled());
    }

    #[test]
    fn test_trace_validation() {
        let trace = create_basic_trace();
        let validation = trace.validate();

        assert!(validation.is_valid(), "{:?}", validation.warnings());
    }

    #[test]
    fn test_validation_without_optional_cues() {
        let mut trace = create_basic_trace();
        trace
            .events
            .retain(|e| !matches!(e.as_cue(), Some(AudioCue::Crash | AudioCue::Applause)));

        assert!(trace.validate().is_valid());
    }

    #[test]
    fn test_validation_detects_late_stop() {
        let mut trace = create_basic_trace();
        let stop = trace
            .position(|e| e.as_cue() == Some(AudioCue::DrumrollStop))
            .unwrap();
        let event = trace.events.remove(stop);
        trace.events.insert(stop + 2, event);

        let validation = trace.validate();
        assert!(!validation.is_valid());
        assert!(!validation.stop_before_crash);
        assert!(!validation.warnings().is_empty());
    }

    #[test]
    fn test_trace_summary() {
        let summary = create_basic_trace().summary();
        assert_eq!(summary.frame_count, 3);
        assert_eq!(summary.winner_count, 1);
        assert!(!summary.cancelled);
        assert_eq!(summary.error_count, 0);
    }
}
