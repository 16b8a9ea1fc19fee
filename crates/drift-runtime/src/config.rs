//! Game configuration loaded from TOML
//!
//! Every section is optional; missing values fall back to the defaults of a
//! fullscreen 1920x1080 window at 60 fps with arrow-key movement.

use crate::input::InputBindings;
use crate::scene::DEFAULT_PLAYER_SPEED;
use crate::timer::DEFAULT_FPS;
use drift_core::{DriftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_FPS: u32 = 1000;
const MAX_SPEED: f32 = 1000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "drift".to_string(),
            width: 1920,
            height: 1080,
            fullscreen: true,
            vsync: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fps: u32,
    /// Stop after this many rendered frames (unbounded when absent)
    pub frame_limit: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            frame_limit: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub sprite: PathBuf,
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite: PathBuf::from("sprites/player.bmp"),
            speed: DEFAULT_PLAYER_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub sprite: PathBuf,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            sprite: PathBuf::from("sprites/floor.bmp"),
        }
    }
}

/// Top-level configuration for a run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub player: PlayerConfig,
    pub floor: FloorConfig,
    pub input: InputBindings,
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Relative sprite paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&source)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Make relative sprite paths relative to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for sprite in [&mut self.player.sprite, &mut self.floor.sprite] {
            if sprite.is_relative() {
                *sprite = base.join(&*sprite);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timing.fps == 0 || self.timing.fps > MAX_FPS {
            return Err(DriftError::ValueOutOfRange {
                field: "timing.fps".into(),
                min: 1.0,
                max: MAX_FPS as f64,
                value: self.timing.fps as f64,
            });
        }
        if !(self.player.speed.is_finite() && (0.0..=MAX_SPEED).contains(&self.player.speed)) {
            return Err(DriftError::ConfigError(format!(
                "player.speed must be a finite number between 0 and {MAX_SPEED}, got {}",
                self.player.speed
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(DriftError::ConfigError(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}
