//! Game configuration loaded from TOML.
//!
//! Every section has defaults matching the stock game, so an empty file (or
//! no file at all) yields a playable setup.

use std::path::{Path, PathBuf};
use std::{env, fmt, fs, io};

use serde::Deserialize;
use tracing::info;

use crate::entities::{Arsenal, Size, WeaponKind};

pub const CONFIG_PATH_ENV: &str = "GRAVITY_RUNNER_CONFIG";

/// Config file location, if one was requested through the environment.
pub fn config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
}

// ── Tuning sections ──────────────────────────────────────────────────────────

/// Gameplay tuning for the player.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Spawn position (sprite centre) in pixels.
    pub start_x: f32,
    pub start_y: f32,
    pub asset: String,
    /// Signed vertical rate in pixels per second. Negative pulls down.
    pub gravity: f32,
    /// Constant horizontal speed in pixels per second.
    pub dx: f32,
    /// Weapon cycle order.
    pub weapons: Vec<WeaponKind>,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_x: 200.0,
            start_y: 300.0,
            asset: "player.png".to_string(),
            gravity: -500.0,
            dx: 0.0,
            weapons: WeaponKind::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileMapTuning {
    /// Scroll speed in pixels per second.
    pub scroll_speed: f32,
    /// Width of one tile column in pixels.
    pub tile_size: f32,
}

impl Default for TileMapTuning {
    fn default() -> Self {
        Self {
            scroll_speed: 500.0,
            tile_size: 32.0,
        }
    }
}

// ── Root config ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: Size,
    pub player: PlayerTuning,
    pub weapons: Arsenal,
    pub tile_map: TileMapTuning,
    /// Target frame interval in milliseconds.
    pub frame_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Size::default(),
            player: PlayerTuning::default(),
            weapons: Arsenal::default(),
            tile_map: TileMapTuning::default(),
            frame_ms: 16,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `GRAVITY_RUNNER_CONFIG` when set and present, else defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                info!(path = %path.display(), "config file missing, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "window must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.player.weapons.is_empty() {
            return Err(ConfigError::Invalid(
                "player.weapons must name at least one weapon".to_string(),
            ));
        }
        if !(self.tile_map.tile_size.is_finite() && self.tile_map.tile_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tile_map.tile_size must be positive, got {}",
                self.tile_map.tile_size
            )));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame_ms must be non-zero".to_string()));
        }
        Ok(())
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config read error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
