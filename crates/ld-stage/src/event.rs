//! DrawEvent — the ordered push events a host consumes
//!
//! Frames, phase changes, audio cues and the terminal outcome of a cycle.

use serde::{Deserialize, Serialize};

use crate::phase::{AudioCue, DrawPhase, ErrorKind, TransitionHint};
use crate::taxonomy::DrawResult;

/// Read-only snapshot for rendering one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Token to render (a name, a name prefix, or the reveal text)
    pub display_text: String,

    /// Seconds left on the countdown, never negative
    pub remaining_seconds: f64,

    /// Phase the frame belongs to
    pub phase: DrawPhase,

    /// Presentation hint for the renderer
    #[serde(default)]
    pub transition: TransitionHint,
}

impl FrameEvent {
    /// Create a frame without a transition hint
    pub fn new(display_text: impl Into<String>, remaining_seconds: f64, phase: DrawPhase) -> Self {
        Self {
            display_text: display_text.into(),
            remaining_seconds: remaining_seconds.max(0.0),
            phase,
            transition: TransitionHint::None,
        }
    }

    /// Builder: attach a transition hint
    pub fn with_transition(mut self, transition: TransitionHint) -> Self {
        self.transition = transition;
        self
    }
}

/// Everything the engine pushes to its host, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawEvent {
    /// Engine entered a new phase
    PhaseChanged { phase: DrawPhase },

    /// One rendered tick
    Frame(FrameEvent),

    /// Play or stop a sound
    AudioCue { cue: AudioCue },

    /// Draw finished with these winners (in selection order)
    Complete { results: Vec<DrawResult> },

    /// Countdown was cancelled by the host
    Cancelled,

    /// A call failed; nothing else was emitted for it
    Error { kind: ErrorKind, message: String },
}

impl DrawEvent {
    /// Get a simple string name for this event type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PhaseChanged { .. } => "phase_changed",
            Self::Frame(_) => "frame",
            Self::AudioCue { .. } => "audio_cue",
            Self::Complete { .. } => "complete",
            Self::Cancelled => "cancelled",
            Self::Error { .. } => "error",
        }
    }

    pub fn as_frame(&self) -> Option<&FrameEvent> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn as_cue(&self) -> Option<AudioCue> {
        match self {
            Self::AudioCue { cue } => Some(*cue),
            _ => None,
        }
    }

    /// Complete, Cancelled and Error end a call chain
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete { .. } | Self::Cancelled | Self::Error { .. }
        )
    }
}

/// Receiver of draw events
///
/// The host must finish handling tick *k* (rendering, audio) before it
/// schedules tick *k+1*, or drop stale frames itself. The engine does not
/// enforce this.
pub trait EventSink {
    fn emit(&mut self, event: DrawEvent);
}

impl EventSink for Vec<DrawEvent> {
    fn emit(&mut self, event: DrawEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: DrawEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: DrawEvent) {
        (**self).emit(event);
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: DrawEvent) {}
}
