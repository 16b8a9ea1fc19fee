//! Command-line arguments and how they override the game config

use anyhow::{Context, Result};
use clap::Parser;
use drift_runtime::GameConfig;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "drift.toml";

#[derive(Debug, Parser)]
#[command(name = "drift-player")]
#[command(about = "Drift player - move a sprite around a floor with the arrow keys")]
#[command(version)]
pub struct Args {
    /// Path to a TOML game config
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Launch in fullscreen mode
    #[arg(long, conflicts_with = "windowed")]
    pub fullscreen: bool,

    /// Launch in a window
    #[arg(long)]
    pub windowed: bool,

    /// Present with vsync in addition to the frame timer
    #[arg(long)]
    pub vsync: bool,

    /// Target frames per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Player speed in pixels per frame
    #[arg(long)]
    pub speed: Option<f32>,

    /// Quit after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Player sprite image
    #[arg(long)]
    pub player_sprite: Option<PathBuf>,

    /// Floor sprite image
    #[arg(long)]
    pub floor_sprite: Option<PathBuf>,
}

impl Args {
    /// Load the config named by `--config` (or `drift.toml` if present) and apply overrides
    pub fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                GameConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                    .context("Failed to load drift.toml")?
            }
            None => GameConfig::default(),
        };
        self.apply(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Overlay command-line flags onto `config`
    pub fn apply(&self, config: &mut GameConfig) {
        if self.fullscreen {
            config.window.fullscreen = true;
        }
        if self.windowed {
            config.window.fullscreen = false;
        }
        if self.vsync {
            config.window.vsync = true;
        }
        if let Some(fps) = self.fps {
            config.timing.fps = fps;
        }
        if let Some(frames) = self.frames {
            config.timing.frame_limit = Some(frames);
        }
        if let Some(speed) = self.speed {
            config.player.speed = speed;
        }
        if let Some(path) = &self.player_sprite {
            config.player.sprite = path.clone();
        }
        if let Some(path) = &self.floor_sprite {
            config.floor.sprite = path.clone();
        }
    }
}

/// Write flushed error log lines, one per line
pub fn write_error_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::ErrorCode;
    use drift_runtime::ErrorLog;

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["drift-player"]);
        let mut config = GameConfig::default();
        args.apply(&mut config);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "drift-player",
            "--windowed",
            "--fps",
            "30",
            "--speed",
            "2.5",
            "--frames",
            "10",
            "--floor-sprite",
            "art/floor.png",
        ]);
        let mut config = GameConfig::default();
        args.apply(&mut config);

        assert!(!config.window.fullscreen);
        assert_eq!(config.timing.fps, 30);
        assert_eq!(config.timing.frame_limit, Some(10));
        assert_eq!(config.player.speed, 2.5);
        assert_eq!(config.floor.sprite, PathBuf::from("art/floor.png"));
    }

    #[test]
    fn fullscreen_conflicts_with_windowed() {
        let result = Args::try_parse_from(["drift-player", "--fullscreen", "--windowed"]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_config_is_rejected() {
        let args = Args::parse_from(["drift-player", "--config", "/nonexistent/drift.toml"]);
        assert!(args.resolve_config().is_err());

        let args = Args::parse_from(["drift-player", "--fps", "0"]);
        let mut config = GameConfig::default();
        args.apply(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn error_lines_are_written_once_each() {
        let mut log = ErrorLog::new();
        log.record(ErrorCode::Backend);
        log.record(ErrorCode::IntRange);

        let mut out = Vec::new();
        write_error_lines(&mut out, &log.flush()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "{}\n{}\n",
                ErrorCode::Backend.message(),
                ErrorCode::IntRange.message()
            )
        );
        assert_eq!(text.matches(ErrorCode::Backend.message()).count(), 1);
    }
}
