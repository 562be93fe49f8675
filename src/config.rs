//! Game settings
//!
//! Read from `glade.ron` in the working directory, or from the path in
//! `GLADE_CONFIG`. Every field has a default, so a partial file works and a
//! missing file means "all defaults".
//!
//! ```ron
//! (
//!     window_width: 1280,
//!     window_height: 720,
//!     rng_seed: Some(42),
//! )
//! ```

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "glade.ron";
pub const CONFIG_ENV: &str = "GLADE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    /// Target frame rate; 0 = unlocked
    pub fps: u32,
    /// Root holding `graphics/` and `map/`
    pub assets_dir: PathBuf,
    /// Top-left of the player sprite at level start
    pub player_spawn: (f32, f32),
    /// Fixed seed for tile variant choice; random when unset
    pub rng_seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_title: "Glade".to_string(),
            window_width: 1600,
            window_height: 900,
            fps: 20,
            assets_dir: PathBuf::from("assets"),
            player_spawn: (2000.0, 1430.0),
            rng_seed: None,
        }
    }
}

/// Error type for settings loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameSettings {
    /// Parse settings from RON text
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = ron::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_ron(&text)?;
                println!("[config] loaded {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                println!("[config] {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load from `GLADE_CONFIG` if set, else `glade.ron`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        let (x, y) = self.player_spawn;
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "player_spawn must be finite, got ({}, {})",
                x, y
            )));
        }
        Ok(())
    }

    pub fn graphics_dir(&self) -> PathBuf {
        self.assets_dir.join(crate::asset::GRAPHICS_DIR)
    }

    pub fn map_dir(&self) -> PathBuf {
        self.assets_dir.join("map")
    }
}
