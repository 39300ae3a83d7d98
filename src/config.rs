//! Configuration management
//!
//! Handles loading, saving, and managing application settings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::obfuscation::ObfuscationType;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Mode used when none is given on the command line
    pub default_mode: ObfuscationType,

    /// Fixed seed for reproducible output; random when unset
    pub seed: Option<u64>,

    /// NFC-normalize input before obfuscating
    pub normalize_input: bool,

    /// Print changed offsets after the text
    pub show_offsets: bool,

    /// Log filter, e.g. "info" or "glyphveil=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: ObfuscationType::Homoglyphs,
            seed: None,
            normalize_input: true,
            show_offsets: false,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to find config directory")?
            .join("glyphveil");

        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, writing the default if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path).context("Failed to read config file")?;
            serde_json::from_str(&data).context("Failed to parse config file")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, data).context("Failed to write config file")?;
        Ok(())
    }
}
