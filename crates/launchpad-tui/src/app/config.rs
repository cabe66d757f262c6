//! Launcher configuration persistence
//!
//! Timings, carousel size and where the store and log files live.

use std::fs;
use std::path::{Path, PathBuf};

use launchpad_core::{FlowTimings, TILES_PER_PAGE};
use serde::{Deserialize, Serialize};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "launchpad";

/// Environment variable that replaces the configuration directory
pub const CONFIG_DIR_ENV: &str = "LAUNCHPAD_CONFIG_DIR";

/// Launcher configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Keypad and loading delays
    #[serde(default)]
    pub timings: FlowTimings,

    /// Tiles shown on one dashboard page
    #[serde(default = "default_tiles_per_page")]
    pub tiles_per_page: usize,

    /// Store file, relative to the config directory unless absolute
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,

    /// Log file, relative to the config directory unless absolute
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Use the high-contrast palette
    #[serde(default)]
    pub high_contrast: bool,
}

fn default_tiles_per_page() -> usize {
    TILES_PER_PAGE
}

fn default_store_file() -> PathBuf {
    PathBuf::from("store.json")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("launchpad.log")
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            timings: FlowTimings::default(),
            tiles_per_page: default_tiles_per_page(),
            store_file: default_store_file(),
            log_file: default_log_file(),
            high_contrast: false,
        }
    }
}

impl LauncherConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }

        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config).join(CONFIG_DIR_NAME);
            return Some(path);
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Where the key-value store lives
    pub fn store_path(&self) -> Option<PathBuf> {
        Self::resolve(&self.store_file)
    }

    /// Where log output goes
    pub fn log_path(&self) -> Option<PathBuf> {
        Self::resolve(&self.log_file)
    }

    fn resolve(file: &Path) -> Option<PathBuf> {
        if file.is_absolute() {
            Some(file.to_path_buf())
        } else {
            Self::config_dir().map(|d| d.join(file))
        }
    }

    /// Load configuration from disk
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write the current settings out when no config file exists yet, so
    /// there is something to edit
    pub fn save_if_missing(&self) -> Result<bool, ConfigError> {
        let path = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        if path.exists() {
            return Ok(false);
        }
        self.save_to(&path)?;
        Ok(true)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
