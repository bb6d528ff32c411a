//! Draw engine — the countdown-then-reveal state machine
//!
//! The engine never owns a clock or a thread. The host calls [`DrawEngine::tick`]
//! with its own notion of "now" (seconds, any epoch), typically when
//! [`DrawEngine::next_tick_at`] says a tick is due. Everything the host needs
//! to render or play is pushed to an [`EventSink`] in a fixed order.

use ld_stage::{AudioCue, DrawEvent, DrawPhase, DrawResult, EventSink, FrameEvent};

use crate::animation::AnimationFrameGenerator;
use crate::config::DrawConfig;
use crate::error::DrawError;
use crate::participant::ParticipantSet;
use crate::random::{RandomSelector, RandomSource};
use crate::session::DrawSession;
use crate::timing::TickSchedule;

/// What a call to [`DrawEngine::tick`] did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No countdown is running
    Inactive,
    /// Countdown is running but the next tick is not due yet
    NotDue,
    /// A countdown frame was emitted
    Frame,
    /// Countdown finished and these winners were revealed
    Completed(Vec<DrawResult>),
}

/// State held only while a cycle is counting down
struct ActiveDraw {
    participants: ParticipantSet,
    config: DrawConfig,
    rng: Box<dyn RandomSource>,
    schedule: TickSchedule,
    generator: AnimationFrameGenerator,
}

/// Runs one draw cycle at a time
///
/// ```text
/// Idle ──start()──> Countdown ──tick() at end──> Revealing ──> Complete
///   ^                   │                                        │
///   └──── cancel() ─────┘                  reset() ──────────────┘
/// ```
pub struct DrawEngine<S: EventSink> {
    sink: S,
    phase: DrawPhase,
    active: Option<ActiveDraw>,
    last_results: Vec<DrawResult>,
}

impl<S: EventSink> DrawEngine<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            phase: DrawPhase::Idle,
            active: None,
            last_results: Vec::new(),
        }
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// Check if a countdown is in progress
    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Configuration of the running countdown
    pub fn config(&self) -> Option<&DrawConfig> {
        self.active.as_ref().map(|a| &a.config)
    }

    /// Winners of the most recent completed cycle
    pub fn last_results(&self) -> &[DrawResult] {
        &self.last_results
    }

    /// When the next tick is due, if a countdown is running
    pub fn next_tick_at(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.schedule.next_deadline())
    }

    /// Seconds left on the running countdown
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.active.as_ref().map(|a| a.schedule.remaining(now))
    }

    /// Begin a countdown at `now`
    ///
    /// Every precondition is checked before anything is emitted. On failure
    /// the engine stays where it was and the only event is `Error`.
    pub fn start(
        &mut self,
        participants: ParticipantSet,
        config: DrawConfig,
        rng: impl RandomSource + 'static,
        session: &DrawSession,
        now: f64,
    ) -> Result<(), DrawError> {
        if self.phase != DrawPhase::Idle {
            return Err(self.fail(DrawError::AlreadyRunning));
        }

        if let Err(err) = config.validate() {
            return Err(self.fail(err));
        }

        if participants.is_empty() {
            return Err(self.fail(DrawError::EmptyParticipants));
        }

        // Prevention is session-wide: earlier winners are not eligible
        if config.prevent_duplicate_winners {
            let available = participants.eligible_count(session.excluded_identities());
            if config.winner_count > available {
                return Err(self.fail(DrawError::InsufficientParticipants {
                    requested: config.winner_count,
                    available,
                }));
            }
        }

        let schedule = TickSchedule::new(now, config.duration_seconds, config.tick_period());
        let generator =
            AnimationFrameGenerator::new(config.animation_style, config.rolodex_interval_seconds);

        log::debug!(
            "Draw started: {} participants, {} winner(s), {} for {:.2}s, tick every {:.3}s",
            participants.len(),
            config.winner_count,
            config.animation_style,
            config.duration_seconds,
            schedule.period()
        );

        self.active = Some(ActiveDraw {
            participants,
            config,
            rng: Box::new(rng),
            schedule,
            generator,
        });
        self.last_results.clear();
        self.set_phase(DrawPhase::Countdown);
        self.sink.emit(DrawEvent::AudioCue {
            cue: AudioCue::DrumrollStart,
        });

        Ok(())
    }

    /// Advance the countdown to `now`
    ///
    /// Emits at most one countdown frame per call. The tick at or after the
    /// end of the countdown also performs the reveal.
    pub fn tick(&mut self, now: f64, session: &mut DrawSession) -> Result<TickOutcome, DrawError> {
        if self.phase != DrawPhase::Countdown {
            return Ok(TickOutcome::Inactive);
        }
        let Some(active) = self.active.as_mut() else {
            return Ok(TickOutcome::Inactive);
        };

        if !active.schedule.is_due(now) {
            return Ok(TickOutcome::NotDue);
        }

        let elapsed = active.schedule.elapsed(now);
        let remaining = active.schedule.remaining(now);
        let finished = active.schedule.is_finished(now);
        let frame = active.generator.frame(
            elapsed,
            active.schedule.duration(),
            &active.participants,
            active.rng.as_mut(),
        );
        active.schedule.advance(now);

        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => return Err(self.abort(err)),
        };

        self.sink.emit(DrawEvent::Frame(
            FrameEvent::new(frame.text, remaining, DrawPhase::Countdown)
                .with_transition(frame.transition),
        ));

        if !finished {
            return Ok(TickOutcome::Frame);
        }

        self.reveal(session).map(TickOutcome::Completed)
    }

    /// Abandon the running countdown
    ///
    /// No reveal happens and no end-of-draw cue fires. The host treats
    /// `Cancelled` as "stop all audio".
    pub fn cancel(&mut self) -> Result<(), DrawError> {
        if self.phase != DrawPhase::Countdown {
            return Err(self.fail(DrawError::NoActiveDraw));
        }

        self.active = None;
        self.set_phase(DrawPhase::Idle);
        self.sink.emit(DrawEvent::Cancelled);
        log::debug!("Draw cancelled");

        Ok(())
    }

    /// Return a completed engine to Idle so it can start again
    pub fn reset(&mut self) -> Result<(), DrawError> {
        match self.phase {
            DrawPhase::Idle => Ok(()),
            DrawPhase::Complete => {
                self.set_phase(DrawPhase::Idle);
                Ok(())
            }
            DrawPhase::Countdown | DrawPhase::Revealing => {
                Err(self.fail(DrawError::AlreadyRunning))
            }
        }
    }

    /// Run a whole cycle on a virtual clock starting at `start_at`
    ///
    /// Each tick is fed exactly at its deadline, so the emitted events are
    /// the same a punctual host would see.
    pub fn run_virtual(
        &mut self,
        participants: ParticipantSet,
        config: DrawConfig,
        rng: impl RandomSource + 'static,
        session: &mut DrawSession,
        start_at: f64,
    ) -> Result<Vec<DrawResult>, DrawError> {
        self.start(participants, config, rng, session, start_at)?;

        while let Some(deadline) = self.next_tick_at() {
            if let TickOutcome::Completed(results) = self.tick(deadline, session)? {
                return Ok(results);
            }
        }

        Err(DrawError::NoActiveDraw)
    }

    fn reveal(&mut self, session: &mut DrawSession) -> Result<Vec<DrawResult>, DrawError> {
        let Some(mut active) = self.active.take() else {
            return Err(self.abort(DrawError::NoActiveDraw));
        };

        self.set_phase(DrawPhase::Revealing);

        let config = &active.config;
        let winners = match RandomSelector::select_many(
            &active.participants,
            config.winner_count,
            session.excluded_identities(),
            !config.prevent_duplicate_winners,
            active.rng.as_mut(),
        ) {
            Ok(winners) => winners,
            Err(err) => return Err(self.abort(err)),
        };

        let first = session.next_sequence();
        let results: Vec<DrawResult> = winners
            .into_iter()
            .enumerate()
            .map(|(i, participant)| DrawResult::new(first + i, participant))
            .collect();
        for result in &results {
            session.record(result.clone());
        }

        self.sink.emit(DrawEvent::AudioCue {
            cue: AudioCue::DrumrollStop,
        });
        if config.cues.crash {
            self.sink.emit(DrawEvent::AudioCue {
                cue: AudioCue::Crash,
            });
        }
        if config.cues.applause {
            self.sink.emit(DrawEvent::AudioCue {
                cue: AudioCue::Applause,
            });
        }

        self.set_phase(DrawPhase::Complete);

        let text = config.reveal_text(results.iter().map(|r| &r.participant));
        self.sink.emit(DrawEvent::Frame(
            FrameEvent::new(text, 0.0, DrawPhase::Complete)
                .with_transition(config.animation_style.transition()),
        ));

        log::info!(
            "Revealed {} winner(s): {}",
            results.len(),
            results
                .iter()
                .map(|r| format!("{} = {}", r.label(), r.participant.name))
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.sink.emit(DrawEvent::Complete {
            results: results.clone(),
        });
        self.last_results.clone_from(&results);

        Ok(results)
    }

    fn set_phase(&mut self, phase: DrawPhase) {
        log::debug!("Draw phase {} -> {}", self.phase.display_name(), phase.display_name());
        self.phase = phase;
        self.sink.emit(DrawEvent::PhaseChanged { phase });
    }

    /// Report a rejected call; state is untouched
    fn fail(&mut self, err: DrawError) -> DrawError {
        log::warn!("Draw call rejected: {err}");
        self.sink.emit(DrawEvent::Error {
            kind: err.kind(),
            message: err.to_string(),
        });
        err
    }

    /// Tear down a cycle that failed after the drumroll started
    fn abort(&mut self, err: DrawError) -> DrawError {
        log::warn!("Draw aborted: {err}");
        self.active = None;
        self.sink.emit(DrawEvent::AudioCue {
            cue: AudioCue::DrumrollStop,
        });
        self.set_phase(DrawPhase::Idle);
        self.sink.emit(DrawEvent::Error {
            kind: err.kind(),
            message: err.to_string(),
        });
        err
    }
}

impl<S: EventSink + Default> Default for DrawEngine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
