//! # ld-draw — Lucky Draw Engine
//!
//! Runs a timed, randomized countdown over a participant list and reveals
//! one or more winners, pushing every frame and audio cue to a host-supplied
//! event sink.
//!
//! ## Features
//!
//! - **Host-driven ticks**: no threads or timers inside; the host calls `tick(now)`
//! - **Animation styles**: Scrolling, Rolodex, Letter-by-Letter, Fade In, Slide In
//! - **Duplicate prevention**: session-wide, checked before the countdown starts
//! - **Injectable randomness**: seeded sources for tests, OS entropy for live draws
//! - **Import/Export**: participants from CSV, winners to CSV or JSON
//!
//! ## Architecture
//!
//! ```text
//! DrawEngine<S: EventSink>
//!     │
//!     ├── DrawConfig (duration, style, winner count, cues)
//!     ├── TickSchedule (deadlines capped at endTime)
//!     ├── AnimationFrameGenerator (token per tick)
//!     └── RandomSelector (final reveal)
//!           │
//!           v
//!     DrawEvent stream → host     DrawResult → DrawSession
//! ```

pub mod animation;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod participant;
pub mod random;
pub mod session;
pub mod settings;
pub mod timing;

pub use animation::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use export::*;
pub use participant::*;
pub use random::*;
pub use session::*;
pub use settings::*;
pub use timing::*;

pub use ld_stage::{DrawEvent, DrawPhase, DrawResult, EventSink, FrameEvent, Participant, RowIndex};
