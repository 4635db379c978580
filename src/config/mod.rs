//! Configuration management for Promptlet

use crate::paths;
use crate::storage::FileStorage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "PROMPTLET_STATE_DIR";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Storage key; the state file is named `<storage_key>.json`
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory holding the state file (defaults to the platform data dir)
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// System preference reported to the store while the theme is `system`
    #[serde(default)]
    pub system_prefers_dark: bool,
}

fn default_storage_key() -> String {
    "promptletState".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            state_dir: None,
            system_prefers_dark: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptlet")
            .join("config.json")
    }

    /// Directory holding the state file
    ///
    /// `PROMPTLET_STATE_DIR` wins over the configured directory, which wins
    /// over the platform data directory.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir_with(&mut |key| std::env::var_os(key))
    }

    fn state_dir_with(&self, var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> PathBuf {
        if let Some(dir) = var_os(STATE_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }
        paths::data_local_dir_with(var_os)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptlet")
    }

    /// File storage for the configured key
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::for_key(&self.state_dir(), &self.storage_key)
    }
}
