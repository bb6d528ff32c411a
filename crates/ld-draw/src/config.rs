//! Draw configuration

use serde::{Deserialize, Serialize};

use ld_stage::Participant;

use crate::animation::AnimationStyle;
use crate::error::DrawError;

/// Which participant fields make up the reveal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColumns {
    pub id: bool,
    pub name: bool,
    pub account: bool,
}

impl DisplayColumns {
    /// Name only
    pub fn name_only() -> Self {
        Self {
            id: false,
            name: true,
            account: false,
        }
    }

    /// ID, name and account
    pub fn all() -> Self {
        Self {
            id: true,
            name: true,
            account: true,
        }
    }

    /// Render one participant: enabled fields joined with `" | "`
    ///
    /// Falls back to the name when nothing enabled is present, so the text
    /// is never empty.
    pub fn render(&self, participant: &Participant) -> String {
        let mut fields: Vec<&str> = Vec::with_capacity(3);
        if self.id {
            fields.extend(participant.id.as_deref());
        }
        if self.name {
            fields.push(&participant.name);
        }
        if self.account {
            fields.extend(participant.account.as_deref());
        }

        if fields.is_empty() {
            participant.name.clone()
        } else {
            fields.join(" | ")
        }
    }
}

impl Default for DisplayColumns {
    fn default() -> Self {
        Self::name_only()
    }
}

/// Optional end-of-draw cues
///
/// Drumroll start/stop always fire; crash and applause only when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSheet {
    pub crash: bool,
    pub applause: bool,
}

impl CueSheet {
    pub fn silent() -> Self {
        Self {
            crash: false,
            applause: false,
        }
    }
}

impl Default for CueSheet {
    fn default() -> Self {
        Self {
            crash: true,
            applause: true,
        }
    }
}

/// Shortest accepted tick or rolodex interval (s)
pub const MIN_TICK_SECONDS: f64 = 0.001;

/// Immutable configuration of one draw cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Countdown length (s)
    pub duration_seconds: f64,

    /// Winners revealed per cycle
    pub winner_count: usize,

    pub animation_style: AnimationStyle,

    /// Tick period for every style except Rolodex (s)
    pub tick_interval_seconds: f64,

    /// Tick period and scan step for Rolodex (s)
    pub rolodex_interval_seconds: f64,

    /// Sample without replacement, excluding earlier session winners
    pub prevent_duplicate_winners: bool,

    #[serde(default)]
    pub display: DisplayColumns,

    #[serde(default)]
    pub cues: CueSheet,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 15.0,
            winner_count: 1,
            animation_style: AnimationStyle::Scrolling,
            tick_interval_seconds: 0.1,
            rolodex_interval_seconds: 0.2,
            prevent_duplicate_winners: true,
            display: DisplayColumns::default(),
            cues: CueSheet::default(),
        }
    }
}

impl DrawConfig {
    pub fn new(duration_seconds: f64, winner_count: usize, animation_style: AnimationStyle) -> Self {
        Self {
            duration_seconds,
            winner_count,
            animation_style,
            ..Default::default()
        }
    }

    /// Builder: set tick interval
    pub fn with_tick_interval(mut self, seconds: f64) -> Self {
        self.tick_interval_seconds = seconds;
        self
    }

    /// Builder: set rolodex interval
    pub fn with_rolodex_interval(mut self, seconds: f64) -> Self {
        self.rolodex_interval_seconds = seconds;
        self
    }

    /// Builder: set duplicate prevention
    pub fn with_prevent_duplicates(mut self, prevent: bool) -> Self {
        self.prevent_duplicate_winners = prevent;
        self
    }

    /// Builder: set display columns
    pub fn with_display(mut self, display: DisplayColumns) -> Self {
        self.display = display;
        self
    }

    /// Builder: set optional cues
    pub fn with_cues(mut self, cues: CueSheet) -> Self {
        self.cues = cues;
        self
    }

    /// Tick period for the configured style
    pub fn tick_period(&self) -> f64 {
        match self.animation_style {
            AnimationStyle::Rolodex => self.rolodex_interval_seconds,
            _ => self.tick_interval_seconds,
        }
    }

    /// Check values that do not depend on the participant set
    pub fn validate(&self) -> Result<(), DrawError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DrawError::Configuration(format!(
                    "{name} must be a positive number, got {value}"
                )))
            }
        };

        let interval = |name: &str, value: f64| -> Result<(), DrawError> {
            positive(name, value)?;
            if value < MIN_TICK_SECONDS {
                return Err(DrawError::Configuration(format!(
                    "{name} must be at least {MIN_TICK_SECONDS}s, got {value}"
                )));
            }
            Ok(())
        };

        positive("duration_seconds", self.duration_seconds)?;
        interval("tick_interval_seconds", self.tick_interval_seconds)?;
        if self.animation_style == AnimationStyle::Rolodex {
            interval("rolodex_interval_seconds", self.rolodex_interval_seconds)?;
        }

        if self.winner_count == 0 {
            return Err(DrawError::Configuration(
                "winner_count must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Reveal text for a set of winners, one line per winner
    pub fn reveal_text<'a>(&self, winners: impl IntoIterator<Item = &'a Participant>) -> String {
        winners
            .into_iter()
            .map(|p| self.display.render(p))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DrawConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), 0.1);
    }

    #[test]
    fn test_rolodex_period() {
        let config = DrawConfig::new(5.0, 1, AnimationStyle::Rolodex).with_rolodex_interval(0.25);
        assert_eq!(config.tick_period(), 0.25);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            DrawConfig::new(0.0, 1, AnimationStyle::Scrolling),
            DrawConfig::new(f64::NAN, 1, AnimationStyle::Scrolling),
            DrawConfig::new(1.0, 0, AnimationStyle::Scrolling),
            DrawConfig::new(1.0, 1, AnimationStyle::Scrolling).with_tick_interval(-0.1),
            DrawConfig::new(1.0, 1, AnimationStyle::Rolodex).with_rolodex_interval(0.0),
            DrawConfig::new(1.0, 1, AnimationStyle::Scrolling).with_tick_interval(1e-9),
            DrawConfig::new(1.0, 1, AnimationStyle::Rolodex).with_rolodex_interval(0.0005),
        ];

        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(DrawError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_minimum_interval_accepted() {
        let config = DrawConfig::new(1.0, 1, AnimationStyle::Rolodex)
            .with_tick_interval(MIN_TICK_SECONDS)
            .with_rolodex_interval(MIN_TICK_SECONDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rolodex_interval_ignored_for_other_styles() {
        let config = DrawConfig::new(1.0, 1, AnimationStyle::Scrolling).with_rolodex_interval(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_display_render() {
        let full = Participant::new(0, "Alice").with_id("7").with_account("ACC");
        let bare = Participant::new(1, "Bob");

        assert_eq!(DisplayColumns::all().render(&full), "7 | Alice | ACC");
        assert_eq!(DisplayColumns::all().render(&bare), "Bob");
        assert_eq!(DisplayColumns::name_only().render(&full), "Alice");

        let account_only = DisplayColumns {
            id: false,
            name: false,
            account: true,
        };
        assert_eq!(account_only.render(&full), "ACC");
        assert_eq!(account_only.render(&bare), "Bob");
    }

    #[test]
    fn test_reveal_text_joins_lines() {
        let config = DrawConfig::default();
        let winners = [Participant::new(0, "Alice"), Participant::new(1, "Bob")];
        assert_eq!(config.reveal_text(&winners), "Alice\nBob");
    }
}
