//! Game settings and preferences
//!
//! Stored as JSON next to the game. Missing fields take their defaults, so a
//! settings file only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Errors from reading or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub width: f32,
    pub height: f32,

    // === Simulation ===
    /// RNG seed; 0 picks one from the clock at startup
    pub seed: u64,
    /// Directory with `level0.txt`.. overriding the built-in levels
    pub level_dir: Option<PathBuf>,
    /// Longest frame the runner feeds the simulation (seconds); no clamp if unset
    pub max_frame_dt: Option<f32>,

    // === Visual Effects ===
    /// Screen shake on solid brick hits
    pub screen_shake: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,

            seed: 0,
            level_dir: None,
            max_frame_dt: None,

            screen_shake: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "play area must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if let Some(max) = self.max_frame_dt {
            if !(max > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "max_frame_dt must be positive, got {max}"
                )));
            }
        }
        Ok(())
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Frame delta handed to the simulation
    pub fn frame_dt(&self, raw: f32) -> f32 {
        match self.max_frame_dt {
            Some(max) => raw.min(max),
            None => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert!(settings.muted);
        assert_eq!(settings.width, DEFAULT_WIDTH);
        assert_eq!(settings.sfx_volume, 1.0);
        assert!(settings.level_dir.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "width": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_frame_dt": -1.0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("brickfall-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 3,
            level_dir: Some(PathBuf::from("levels")),
            max_frame_dt: Some(0.05),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_effective_screen_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_frame_dt_clamp() {
        let mut settings = Settings::default();
        assert_eq!(settings.frame_dt(0.5), 0.5);
        settings.max_frame_dt = Some(0.1);
        assert_eq!(settings.frame_dt(0.5), 0.1);
        assert_eq!(settings.frame_dt(0.01), 0.01);
    }
}
