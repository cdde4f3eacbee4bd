//! Configuration loading and management

mod io;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::persistence::{DocumentStore, JsonDirStore, MemoryStore, SqliteStore};
use crate::progress::{DayBoundary, ProgressStore, SystemClock};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where progress documents are kept
    #[serde(default)]
    pub storage: StorageSettings,

    /// How calendar days are determined
    #[serde(default)]
    pub calendar: CalendarSettings,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single SQLite file (`progress.db`)
    #[default]
    Sqlite,
    /// One JSON file per document
    Json,
    /// Nothing is written to disk
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Data directory. Defaults to the global config directory.
    /// A leading `~/` is expanded to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Midnight of which timezone starts a new streak day
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

impl Config {
    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => expand_home(dir),
            None => Self::global_config_dir(),
        }
    }

    /// Build the configured document storage
    pub fn document_store(&self) -> Result<Box<dyn DocumentStore>> {
        let dir = self.data_dir();
        let store: Box<dyn DocumentStore> = match self.storage.backend {
            StorageBackend::Sqlite => {
                let path = dir.join("progress.db");
                Box::new(
                    SqliteStore::open(&path)
                        .with_context(|| format!("Failed to open progress db: {}", path.display()))?,
                )
            }
            StorageBackend::Json => Box::new(
                JsonDirStore::open(&dir)
                    .with_context(|| format!("Failed to open data dir: {}", dir.display()))?,
            ),
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }

    /// Open the progress store with the configured storage and calendar
    pub fn open_store(&self) -> Result<ProgressStore> {
        let storage = self.document_store()?;
        let clock = SystemClock::new(self.calendar.day_boundary);
        ProgressStore::open(Box::new(clock), storage).context("Failed to load progress")
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}
