use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How an end-of-step alert is made audible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSound {
    /// Terminal bell (BEL on stderr).
    Bell,
    /// Generated tone on the default output device. Needs the `sound` feature.
    Tone,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub sound: AlertSound,
    /// Tone pitch in Hz
    pub tone_hz: f32,
    /// Tone length in milliseconds
    pub tone_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            sound: AlertSound::Bell,
            tone_hz: 880.0,
            tone_ms: 400,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub alert: AlertConfig,
    /// Overrides the recipe file location.
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Directory: ~/.config/recipe-timer/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("recipe-timer");
        p
    }

    pub fn default_path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from `path`, returning defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load, falling back to defaults (with a warning) if the file is unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            log::warn!("Using default config: {e}");
            Self::default()
        })
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, data).map_err(io_err)
    }
}
