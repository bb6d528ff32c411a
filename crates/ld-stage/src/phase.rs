//! DrawPhase, AudioCue and the other small enums of the draw vocabulary
//!
//! A phase is NOT an animation. It is the semantic state of the draw cycle.

use serde::{Deserialize, Serialize};

/// State of the draw engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    /// No draw running, ready for `start()`
    #[default]
    Idle,
    /// Timer running, frames being emitted
    Countdown,
    /// Final selection in progress (synchronous)
    Revealing,
    /// Winners announced
    Complete,
}

impl DrawPhase {
    /// Countdown and Revealing both count as an active draw cycle
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Countdown | Self::Revealing)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Countdown => "Countdown",
            Self::Revealing => "Revealing",
            Self::Complete => "Complete",
        }
    }
}

/// Audio cue the host attaches a sound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Looping drumroll starts with the countdown
    DrumrollStart,
    /// Drumroll stops at the reveal
    DrumrollStop,
    /// One-shot crash at the reveal
    Crash,
    /// One-shot applause after the crash
    Applause,
}

impl AudioCue {
    /// Get a simple string name for this cue
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::DrumrollStart => "drumroll_start",
            Self::DrumrollStop => "drumroll_stop",
            Self::Crash => "crash",
            Self::Applause => "applause",
        }
    }

    /// Check if the cue starts a looping sound
    pub fn is_looping(&self) -> bool {
        matches!(self, Self::DrumrollStart)
    }

    /// Cues belonging to the end of a draw
    pub fn is_reveal_cue(&self) -> bool {
        !matches!(self, Self::DrumrollStart)
    }
}

/// Presentation hint attached to a frame
///
/// The engine only tags frames; the renderer owns the visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionHint {
    #[default]
    None,
    Fade,
    Slide,
}

/// Error category surfaced to the host through `DrawEvent::Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    EmptyParticipants,
    NoParticipants,
    InsufficientParticipants,
    ExhaustedPool,
    AlreadyRunning,
    NoActiveDraw,
}

impl ErrorKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration error",
            Self::EmptyParticipants => "Empty participants",
            Self::NoParticipants => "No participants",
            Self::InsufficientParticipants => "Insufficient participants",
            Self::ExhaustedPool => "Exhausted pool",
            Self::AlreadyRunning => "Already running",
            Self::NoActiveDraw => "No active draw",
        }
    }
}
