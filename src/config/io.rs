//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Config;
use crate::persistence::write_atomic;

impl Config {
    /// Get the global config directory path (~/.studyxp/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studyxp")
    }

    /// Get the global config file path (~/.studyxp/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_atomic(path, content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Load configuration from `path`, or from ~/.studyxp/config.toml.
    /// The global config is created with defaults if it does not exist yet.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if !global_path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to_file(&global_path) {
                tracing::warn!("Failed to write default config: {}", e);
            } else {
                tracing::info!("Created default config at {}", global_path.display());
            }
            return Ok(config);
        }

        Self::from_file(&global_path)
    }

    /// Write a default config to `path`. Refuses to overwrite unless `force`.
    pub fn init(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        Self::default().save_to_file(path)?;
        Ok(true)
    }
}
