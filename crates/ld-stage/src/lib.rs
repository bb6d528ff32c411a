//! # ld-stage — Lucky Draw Stage Vocabulary
//!
//! Defines the canonical moments of a draw cycle that every host maps to.
//! Renderers and audio players never inspect engine internals, only the
//! events defined here.
//!
//! ## Philosophy
//!
//! Every draw, regardless of animation style, passes through the same phases:
//! - Idle → Countdown (drumroll, frames) → Revealing → Complete (crash, applause)
//!
//! This crate defines those phases, the push events a host consumes and a
//! trace recorder for inspecting a full cycle after the fact.

pub mod event;
pub mod phase;
pub mod taxonomy;
pub mod trace;

pub use event::*;
pub use phase::*;
pub use taxonomy::*;
pub use trace::*;
