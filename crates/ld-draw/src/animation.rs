//! Animation frame generation
//!
//! Turns `(elapsed, duration, style)` into the token shown for one tick.
//! The generator never touches the participant set or the session; the only
//! state it keeps is the name chosen for the current letter-by-letter cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ld_stage::TransitionHint;

use crate::error::DrawError;
use crate::participant::ParticipantSet;
use crate::random::RandomSource;

/// How names cycle during the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationStyle {
    /// Uniformly random name every tick
    #[default]
    Scrolling,
    /// Deterministic round-robin scan
    Rolodex,
    /// Growing prefix of one name, paced over the whole countdown
    #[serde(alias = "Letter-by-Letter")]
    LetterByLetter,
    /// Scrolling, tagged with a fade transition
    #[serde(alias = "Fade In")]
    FadeIn,
    /// Scrolling, tagged with a slide transition
    #[serde(alias = "Slide In")]
    SlideIn,
}

impl AnimationStyle {
    pub const ALL: [AnimationStyle; 5] = [
        Self::Scrolling,
        Self::Rolodex,
        Self::LetterByLetter,
        Self::FadeIn,
        Self::SlideIn,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Scrolling => "Scrolling",
            Self::Rolodex => "Rolodex",
            Self::LetterByLetter => "Letter-by-Letter",
            Self::FadeIn => "Fade In",
            Self::SlideIn => "Slide In",
        }
    }

    /// Presentation hint attached to every frame of this style
    pub fn transition(&self) -> TransitionHint {
        match self {
            Self::FadeIn => TransitionHint::Fade,
            Self::SlideIn => TransitionHint::Slide,
            _ => TransitionHint::None,
        }
    }
}

impl fmt::Display for AnimationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AnimationStyle {
    type Err = DrawError;

    /// Accepts both identifiers ("LetterByLetter") and labels ("Letter-by-Letter")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "scrolling" => Ok(Self::Scrolling),
            "rolodex" => Ok(Self::Rolodex),
            "letterbyletter" => Ok(Self::LetterByLetter),
            "fadein" => Ok(Self::FadeIn),
            "slidein" => Ok(Self::SlideIn),
            _ => Err(DrawError::Configuration(format!(
                "unknown animation style '{s}'"
            ))),
        }
    }
}

/// Slack for step boundaries: `start + k * interval - start` can land a hair
/// below `k * interval`
const STEP_EPSILON: f64 = 1e-6;

/// Index shown by the rolodex at `elapsed`
pub fn rolodex_index(elapsed: f64, interval: f64, len: usize) -> usize {
    if len == 0 || interval <= 0.0 {
        return 0;
    }
    let step = (elapsed.max(0.0) / interval + STEP_EPSILON).floor() as usize;
    step % len
}

/// Characters of a `len`-character name visible at `elapsed`
///
/// `ceil(elapsed / duration * len)`, at least 1, and strictly short of the
/// full name until `elapsed >= duration`. A one-character name is always
/// fully visible.
pub fn letter_prefix_len(elapsed: f64, duration: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if duration <= 0.0 || elapsed >= duration {
        return len;
    }
    let ratio = (elapsed / duration).max(0.0);
    let k = (ratio * len as f64 - STEP_EPSILON).ceil() as usize;
    k.min(len.saturating_sub(1)).max(1)
}

/// One generated token plus its presentation hint
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub text: String,
    pub transition: TransitionHint,
}

/// Produces the display token for each countdown tick
#[derive(Debug, Clone)]
pub struct AnimationFrameGenerator {
    style: AnimationStyle,
    rolodex_interval: f64,
    /// Participant index chosen for the running letter-by-letter cycle
    cycle_pick: Option<usize>,
}

impl AnimationFrameGenerator {
    pub fn new(style: AnimationStyle, rolodex_interval: f64) -> Self {
        Self {
            style,
            rolodex_interval,
            cycle_pick: None,
        }
    }

    pub fn style(&self) -> AnimationStyle {
        self.style
    }

    /// Forget the letter-by-letter pick; the next frame starts a new cycle
    pub fn reset_cycle(&mut self) {
        self.cycle_pick = None;
    }

    /// Token for the tick at `elapsed` seconds into a `duration`-second countdown
    pub fn frame(
        &mut self,
        elapsed: f64,
        duration: f64,
        participants: &ParticipantSet,
        rng: &mut dyn RandomSource,
    ) -> Result<AnimationFrame, DrawError> {
        let all = participants.as_slice();
        if all.is_empty() {
            return Err(DrawError::NoParticipants);
        }

        let text = match self.style {
            AnimationStyle::Scrolling | AnimationStyle::FadeIn | AnimationStyle::SlideIn => {
                all[rng.index(all.len())].name.clone()
            }
            AnimationStyle::Rolodex => {
                all[rolodex_index(elapsed, self.rolodex_interval, all.len())]
                    .name
                    .clone()
            }
            AnimationStyle::LetterByLetter => {
                let pick = match self.cycle_pick {
                    Some(pick) if pick < all.len() => pick,
                    _ => {
                        let pick = rng.index(all.len());
                        self.cycle_pick = Some(pick);
                        pick
                    }
                };
                let name = &all[pick].name;
                let k = letter_prefix_len(elapsed, duration, name.chars().count());
                name.chars().take(k).collect()
            }
        };

        Ok(AnimationFrame {
            text,
            transition: self.style.transition(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededSource;
    use crate::random::tests::ScriptedSource;

    fn trio() -> ParticipantSet {
        ParticipantSet::from_names(["Alice", "Bob", "Carol"]).unwrap()
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!(
            "Letter-by-Letter".parse::<AnimationStyle>().unwrap(),
            AnimationStyle::LetterByLetter
        );
        assert_eq!(
            "fade in".parse::<AnimationStyle>().unwrap(),
            AnimationStyle::FadeIn
        );
        assert!("wobble".parse::<AnimationStyle>().is_err());

        for style in AnimationStyle::ALL {
            assert_eq!(style.display_name().parse::<AnimationStyle>().unwrap(), style);
        }
    }

    #[test]
    fn test_style_serde_aliases() {
        let style: AnimationStyle = serde_json::from_str("\"Slide In\"").unwrap();
        assert_eq!(style, AnimationStyle::SlideIn);
        assert_eq!(
            serde_json::to_string(&AnimationStyle::LetterByLetter).unwrap(),
            "\"LetterByLetter\""
        );
    }

    #[test]
    fn test_scrolling_returns_known_names() {
        let set = trio();
        let mut generator = AnimationFrameGenerator::new(AnimationStyle::Scrolling, 0.2);
        let mut rng = SeededSource::seeded(5);

        for tick in 0..50 {
            let frame = generator
                .frame(tick as f64 * 0.1, 5.0, &set, &mut rng)
                .unwrap();
            assert!(["Alice", "Bob", "Carol"].contains(&frame.text.as_str()));
            assert_eq!(frame.transition, TransitionHint::None);
        }
    }

    #[test]
    fn test_fade_and_slide_are_tagged() {
        let set = trio();
        let mut rng = SeededSource::seeded(5);

        let mut fade = AnimationFrameGenerator::new(AnimationStyle::FadeIn, 0.2);
        assert_eq!(
            fade.frame(0.1, 1.0, &set, &mut rng).unwrap().transition,
            TransitionHint::Fade
        );

        let mut slide = AnimationFrameGenerator::new(AnimationStyle::SlideIn, 0.2);
        assert_eq!(
            slide.frame(0.1, 1.0, &set, &mut rng).unwrap().transition,
            TransitionHint::Slide
        );
    }

    #[test]
    fn test_rolodex_is_deterministic() {
        let set = trio();
        let mut a = AnimationFrameGenerator::new(AnimationStyle::Rolodex, 0.2);
        let mut b = AnimationFrameGenerator::new(AnimationStyle::Rolodex, 0.2);
        let mut rng_a = SeededSource::seeded(1);
        let mut rng_b = SeededSource::seeded(2);

        for elapsed in [0.0, 0.1, 0.25, 0.45, 0.61, 3.3] {
            assert_eq!(
                a.frame(elapsed, 5.0, &set, &mut rng_a).unwrap(),
                b.frame(elapsed, 5.0, &set, &mut rng_b).unwrap()
            );
        }

        // floor(0.45 / 0.2) = 2 -> Carol, floor(0.61 / 0.2) = 3 -> wraps to Alice
        assert_eq!(a.frame(0.45, 5.0, &set, &mut rng_a).unwrap().text, "Carol");
        assert_eq!(a.frame(0.61, 5.0, &set, &mut rng_a).unwrap().text, "Alice");
    }

    #[test]
    fn test_rolodex_steps_on_scheduled_ticks() {
        // Deadlines are computed as start + k * interval, as the tick schedule does
        for start in [0.0, 1.0, 17.3, 1234.5] {
            for k in 1..=75_usize {
                let elapsed = (start + k as f64 * 0.2) - start;
                assert_eq!(rolodex_index(elapsed, 0.2, 1000), k, "start {start}, tick {k}");
            }
        }
    }

    #[test]
    fn test_letter_prefix_monotonic() {
        let duration = 3.0;
        let len = 7;
        let mut previous = 0;

        for step in 0..=400 {
            let elapsed = step as f64 * 0.01;
            let k = letter_prefix_len(elapsed, duration, len);
            assert!(k >= previous, "prefix shrank at {elapsed}");
            assert!(k >= 1);
            if elapsed < duration {
                assert!(k < len, "full name visible early at {elapsed}");
            } else {
                assert_eq!(k, len);
            }
            previous = k;
        }
    }

    #[test]
    fn test_letter_by_letter_keeps_one_name_per_cycle() {
        let set = trio();
        let mut generator = AnimationFrameGenerator::new(AnimationStyle::LetterByLetter, 0.2);
        // 0.5 picks index 1 -> "Bob"; later values would pick others
        let mut rng = ScriptedSource::new(vec![0.5, 0.0, 0.9]);

        let texts: Vec<String> = [0.5, 0.9, 1.5, 1.9, 3.0]
            .into_iter()
            .map(|t| generator.frame(t, 3.0, &set, &mut rng).unwrap().text)
            .collect();

        assert_eq!(texts, vec!["B", "B", "Bo", "Bo", "Bob"]);

        generator.reset_cycle();
        let next = generator.frame(3.0, 3.0, &set, &mut rng).unwrap();
        assert_eq!(next.text, "Alice");
    }

    #[test]
    fn test_letter_by_letter_counts_characters() {
        let set = ParticipantSet::from_names(["Zoë"]).unwrap();
        let mut generator = AnimationFrameGenerator::new(AnimationStyle::LetterByLetter, 0.2);
        let mut rng = SeededSource::seeded(0);

        assert_eq!(generator.frame(1.5, 2.0, &set, &mut rng).unwrap().text, "Zo");
        assert_eq!(generator.frame(2.0, 2.0, &set, &mut rng).unwrap().text, "Zoë");
    }
}
