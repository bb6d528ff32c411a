//! Lucky Draw terminal host
//!
//! Usage:
//!   lucky-draw run --participants roster.csv      - Run a draw in real time
//!   lucky-draw run ... --instant --seed 7         - Reproducible draw, no waiting
//!   lucky-draw settings init                      - Write default settings.json
//!   lucky-draw settings show                      - Print effective settings

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ld_draw::{
    DEFAULT_SETTINGS_FILE, DrawConfig, DrawEngine, DrawSession, DrawSettings, EntropySource,
    ParticipantSet, RandomSource, SeededSource, TickOutcome, export_results_csv,
};
use ld_stage::{DrawEvent, DrawPhase, DrawResult, EventSink};

#[derive(Parser)]
#[command(name = "lucky-draw", about = "Timed lucky draw with animated reveal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more draws
    Run {
        /// Participants CSV (needs a Name column; ID and Account are optional)
        #[arg(short, long)]
        participants: PathBuf,

        /// Settings JSON
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Number of draw cycles in this session
        #[arg(short, long, default_value_t = 1)]
        rounds: u64,

        /// Write all winners to this CSV when done
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Skip the countdown wait (virtual clock)
        #[arg(long)]
        instant: bool,
    },
    /// Manage the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Write default settings
    Init {
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the settings that a draw would use
    Show {
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            participants,
            settings,
            seed,
            rounds,
            export,
            instant,
        } => run_draws(&participants, &settings, seed, rounds, export.as_deref(), instant),
        Commands::Settings { action } => match action {
            SettingsAction::Init { path, force } => init_settings(&path, force),
            SettingsAction::Show { path } => show_settings(&path),
        },
    }
}

fn run_draws(
    participants_path: &Path,
    settings_path: &Path,
    seed: Option<u64>,
    rounds: u64,
    export: Option<&Path>,
    instant: bool,
) -> Result<()> {
    let participants = ParticipantSet::from_csv_path(participants_path)
        .with_context(|| format!("Failed to load participants from {}", participants_path.display()))?;
    let config = DrawSettings::load(settings_path)
        .and_then(|s| s.to_config())
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    log::info!(
        "Loaded {} participants; {} winner(s) per round, {} rounds",
        participants.len(),
        config.winner_count,
        rounds
    );

    let mut session = DrawSession::new();
    let mut engine = DrawEngine::new(TerminalSink::stdout());

    for round in 0..rounds {
        engine.reset()?;

        let rng: Box<dyn RandomSource> = match seed {
            Some(seed) => Box::new(SeededSource::seeded(seed.wrapping_add(round))),
            None => Box::new(EntropySource::from_entropy()),
        };

        println!("\n── Round {} of {} ──", round + 1, rounds);
        let results = if instant {
            engine.run_virtual(participants.clone(), config.clone(), rng, &mut session, 0.0)?
        } else {
            run_realtime(&mut engine, participants.clone(), config.clone(), rng, &mut session)?
        };
        log::debug!("Round {} produced {} result(s)", round + 1, results.len());
    }

    println!("\nAll winners:");
    for result in session.all_results() {
        println!("  {}: {}", result.label(), result.participant.name);
    }

    if let Some(path) = export {
        export_results_csv(path, session.all_results())
            .with_context(|| format!("Failed to export winners to {}", path.display()))?;
        println!("\nExported to {}", path.display());
    }

    Ok(())
}

/// Drive one cycle against the wall clock
fn run_realtime<S: EventSink>(
    engine: &mut DrawEngine<S>,
    participants: ParticipantSet,
    config: DrawConfig,
    rng: Box<dyn RandomSource>,
    session: &mut DrawSession,
) -> Result<Vec<DrawResult>> {
    let clock = Instant::now();
    let now = || clock.elapsed().as_secs_f64();

    engine.start(participants, config, rng, session, now())?;

    while let Some(deadline) = engine.next_tick_at() {
        let wait = deadline - now();
        if wait > 0.0 {
            thread::sleep(Duration::from_secs_f64(wait));
        }
        if let TickOutcome::Completed(results) = engine.tick(now(), session)? {
            return Ok(results);
        }
    }

    bail!("Draw stopped before revealing a winner")
}

fn init_settings(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    DrawSettings::default()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

fn show_settings(path: &Path) -> Result<()> {
    let settings = DrawSettings::load(path)?;
    println!("{}", settings.to_json()?);

    match settings.to_config() {
        Ok(config) => println!(
            "\n{} over {:.1}s, {} winner(s), duplicates {}",
            config.animation_style,
            config.duration_seconds,
            config.winner_count,
            if config.prevent_duplicate_winners { "prevented" } else { "allowed" }
        ),
        Err(err) => println!("\nThese settings cannot start a draw: {err}"),
    }
    Ok(())
}

/// Renders frames on one terminal line and announces cues
///
/// Failed calls are reported once, by `main`, from the returned error.
struct TerminalSink<W: Write> {
    out: W,
    line_width: usize,
}

impl TerminalSink<io::Stdout> {
    fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    fn new(out: W) -> Self {
        Self { out, line_width: 0 }
    }

    fn redraw(&mut self, line: &str) {
        let pad = self.line_width.saturating_sub(line.chars().count());
        write!(self.out, "\r{line}{}", " ".repeat(pad)).ok();
        self.line_width = line.chars().count();
        self.out.flush().ok();
    }
}

impl<W: Write> EventSink for TerminalSink<W> {
    fn emit(&mut self, event: DrawEvent) {
        match event {
            DrawEvent::Frame(frame) if frame.phase == DrawPhase::Countdown => {
                self.redraw(&format!(
                    "{:>5.1}s  {}",
                    frame.remaining_seconds, frame.display_text
                ));
            }
            DrawEvent::Frame(frame) => {
                self.redraw("");
                writeln!(self.out, "\r🎉 {}", frame.display_text.replace('\n', "\n   ")).ok();
                self.line_width = 0;
            }
            DrawEvent::AudioCue { cue } => log::info!("♪ {}", cue.type_name()),
            DrawEvent::PhaseChanged { phase } => log::debug!("Phase: {}", phase.display_name()),
            DrawEvent::Complete { results } => {
                for result in results {
                    writeln!(self.out, "   {}: {}", result.label(), result.participant.name).ok();
                }
            }
            DrawEvent::Cancelled => {
                writeln!(self.out, "\nDraw cancelled").ok();
            }
            DrawEvent::Error { kind, message } => {
                log::debug!("{}: {message}", kind.display_name());
            }
        }
    }
}
