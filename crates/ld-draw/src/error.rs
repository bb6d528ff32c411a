//! Draw errors

use ld_stage::ErrorKind;

/// Errors raised by the draw core
///
/// All of them are surfaced synchronously from the call that detects them.
/// None are retried and none fall back to a smaller winner count.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No participant has a non-empty name")]
    EmptyParticipants,

    #[error("No participants to animate")]
    NoParticipants,

    #[error("Cannot draw {requested} distinct winners from {available} eligible participants")]
    InsufficientParticipants { requested: usize, available: usize },

    #[error("Every participant has already been drawn")]
    ExhaustedPool,

    #[error("A draw is already running")]
    AlreadyRunning,

    #[error("No draw is running")]
    NoActiveDraw,
}

impl DrawError {
    /// Category carried by `DrawEvent::Error`
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::EmptyParticipants => ErrorKind::EmptyParticipants,
            Self::NoParticipants => ErrorKind::NoParticipants,
            Self::InsufficientParticipants { .. } => ErrorKind::InsufficientParticipants,
            Self::ExhaustedPool => ErrorKind::ExhaustedPool,
            Self::AlreadyRunning => ErrorKind::AlreadyRunning,
            Self::NoActiveDraw => ErrorKind::NoActiveDraw,
        }
    }
}
