//! Persisted draw settings
//!
//! A flat JSON document the host reads once and turns into a [`DrawConfig`]
//! before starting a draw. Keys that are missing fall back to defaults and
//! unknown keys (presentation options such as fonts or colors) are ignored.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationStyle;
use crate::config::{CueSheet, DisplayColumns, DrawConfig};
use crate::error::DrawError;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Settings loading/saving errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(#[from] DrawError),
}

/// A participant field that can be shown on the reveal screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayColumn {
    #[serde(rename = "ID", alias = "id", alias = "Id")]
    Id,
    #[serde(alias = "name")]
    Name,
    #[serde(alias = "account")]
    Account,
}

/// On-disk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    pub display_cols: Vec<DisplayColumn>,
    pub animation: AnimationStyle,
    /// Rolodex step (ms)
    pub rolodex_interval: u64,
    /// Countdown length (s)
    pub draw_duration: f64,
    pub winner_count: usize,
    /// Tick period for non-rolodex styles (ms)
    pub tick_interval: u64,
    pub prevent_duplicates: bool,
    pub crash_enabled: bool,
    pub applause_enabled: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self::from_config(&DrawConfig::default())
    }
}

impl DrawSettings {
    /// Load from `path`, or defaults if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::debug!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write pretty-printed JSON to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Capture a config as settings
    pub fn from_config(config: &DrawConfig) -> Self {
        let display = config.display;
        let display_cols = [
            (display.id, DisplayColumn::Id),
            (display.name, DisplayColumn::Name),
            (display.account, DisplayColumn::Account),
        ]
        .into_iter()
        .filter_map(|(on, col)| on.then_some(col))
        .collect();

        Self {
            display_cols,
            animation: config.animation_style,
            rolodex_interval: seconds_to_ms(config.rolodex_interval_seconds),
            draw_duration: config.duration_seconds,
            winner_count: config.winner_count,
            tick_interval: seconds_to_ms(config.tick_interval_seconds),
            prevent_duplicates: config.prevent_duplicate_winners,
            crash_enabled: config.cues.crash,
            applause_enabled: config.cues.applause,
        }
    }

    /// Validated draw configuration
    pub fn to_config(&self) -> Result<DrawConfig, SettingsError> {
        let display = DisplayColumns {
            id: self.display_cols.contains(&DisplayColumn::Id),
            name: self.display_cols.contains(&DisplayColumn::Name),
            account: self.display_cols.contains(&DisplayColumn::Account),
        };

        let config = DrawConfig::new(self.draw_duration, self.winner_count, self.animation)
            .with_tick_interval(self.tick_interval as f64 / 1000.0)
            .with_rolodex_interval(self.rolodex_interval as f64 / 1000.0)
            .with_prevent_duplicates(self.prevent_duplicates)
            .with_display(display)
            .with_cues(CueSheet {
                crash: self.crash_enabled,
                applause: self.applause_enabled,
            });

        config.validate()?;
        Ok(config)
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round().max(0.0) as u64
}
