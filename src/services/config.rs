//! User configuration service
//!
//! Reads optional settings from `~/.weekgrid/config.json`. Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::services::throttle::FRAME_INTERVAL;
use crate::types::{Result, WeekgridError};

/// Color scheme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeChoice,
    /// Minimum milliseconds between drag recomputations
    pub throttle_ms: u64,
    /// Write logs here while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            throttle_ms: FRAME_INTERVAL.as_millis() as u64,
            log_file: None,
        }
    }
}

impl Config {
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| WeekgridError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Locates the configuration file
pub struct ConfigService {
    config_dir: PathBuf,
}

impl ConfigService {
    /// Service using the default directory (`~/.weekgrid/`)
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| WeekgridError::Config("Cannot determine home directory".into()))?;
        let config_dir = base_dirs.home_dir().join(".weekgrid");
        Ok(Self { config_dir })
    }

    /// Service with a custom directory
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Log file used by the TUI when the config names none
    pub fn default_log_path(&self) -> PathBuf {
        self.config_dir.join("weekgrid.log")
    }

    pub fn load(&self) -> Result<Config> {
        Config::load_from(&self.config_path())
    }
}
