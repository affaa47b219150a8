//! Application configuration management.
//!
//! Holds where the roster comes from, how often it is refreshed, and how many
//! heats each new boat gets.
//!
//! Configuration is stored at `~/.config/lineupmaker/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ingest::RosterSource;

/// Application name used for config directory paths
const APP_NAME: &str = "lineupmaker";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Overrides `roster_url` when set
pub const ROSTER_URL_ENV: &str = "LINEUP_ROSTER_URL";

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
const DEFAULT_HEATS_PER_BOAT: usize = 3;

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_heats_per_boat() -> usize {
    DEFAULT_HEATS_PER_BOAT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Published roster sheet, exported as CSV
    #[serde(default)]
    pub roster_url: Option<String>,
    /// Uploaded roster file, used when no URL is set
    #[serde(default)]
    pub roster_file: Option<PathBuf>,
    /// 0 loads the roster once without polling
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_heats_per_boat")]
    pub heats_per_boat: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster_url: None,
            roster_file: None,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            heats_per_boat: DEFAULT_HEATS_PER_BOAT,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_override(std::env::var(ROSTER_URL_ENV).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            debug!(path = %path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    fn apply_env_override(&mut self, url: Option<String>) {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            debug!(url = %url, "Roster URL from environment");
            self.roster_url = Some(url);
        }
    }

    /// The configured roster source. A URL wins over a file.
    pub fn roster_source(&self) -> Option<RosterSource> {
        match (&self.roster_url, &self.roster_file) {
            (Some(url), _) if !url.trim().is_empty() => Some(RosterSource::Url(url.trim().to_string())),
            (_, Some(path)) => Some(RosterSource::File(path.clone())),
            _ => None,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
