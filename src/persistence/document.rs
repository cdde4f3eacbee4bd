//! Typed, versioned documents on top of a [`DocumentStore`]

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::PersistenceError;
use super::migrations::{
    migrate, Migration, MigrationOutcome, ACHIEVEMENTS_MIGRATIONS, PROGRESS_MIGRATIONS,
    SETTINGS_MIGRATIONS,
};
use super::storage::DocumentStore;
use crate::progress::{
    AchievementLedger, Preferences, ProgressState, ACHIEVEMENTS_SCHEMA_VERSION,
    PROGRESS_SCHEMA_VERSION, SETTINGS_SCHEMA_VERSION,
};

/// A document type with a stable storage key and its own migration chain
pub trait Versioned: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;
    const SCHEMA_VERSION: u32;

    fn migrations() -> &'static [Migration];
}

impl Versioned for ProgressState {
    const KEY: &'static str = "progress";
    const SCHEMA_VERSION: u32 = PROGRESS_SCHEMA_VERSION;

    fn migrations() -> &'static [Migration] {
        PROGRESS_MIGRATIONS
    }
}

impl Versioned for AchievementLedger {
    const KEY: &'static str = "achievements";
    const SCHEMA_VERSION: u32 = ACHIEVEMENTS_SCHEMA_VERSION;

    fn migrations() -> &'static [Migration] {
        ACHIEVEMENTS_MIGRATIONS
    }
}

impl Versioned for Preferences {
    const KEY: &'static str = "settings";
    const SCHEMA_VERSION: u32 = SETTINGS_SCHEMA_VERSION;

    fn migrations() -> &'static [Migration] {
        SETTINGS_MIGRATIONS
    }
}

/// Where a loaded document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored; creation defaults were used
    Fresh,
    Stored(MigrationOutcome),
}

/// Load `T`, migrating it forward if it was written by older code.
///
/// Documents from newer code are deserialized as-is; fields this version does
/// not know about are dropped.
pub fn load_document<T: Versioned>(
    store: &dyn DocumentStore,
) -> Result<(T, LoadSource), PersistenceError> {
    let Some(raw) = store.load(T::KEY)? else {
        return Ok((T::default(), LoadSource::Fresh));
    };

    let Value::Object(doc) = raw else {
        return Err(PersistenceError::InvalidDocument {
            key: T::KEY.to_string(),
            reason: "expected a JSON object".to_string(),
        });
    };

    let (doc, outcome) = migrate(T::KEY, doc, T::migrations(), T::SCHEMA_VERSION)?;
    match outcome {
        MigrationOutcome::Newer { stored } => tracing::warn!(
            "Document '{}' has schema version {} but this build understands {}; loading as-is",
            T::KEY,
            stored,
            T::SCHEMA_VERSION
        ),
        MigrationOutcome::Migrated { from } => tracing::info!(
            "Migrated document '{}' from v{} to v{}",
            T::KEY,
            from,
            T::SCHEMA_VERSION
        ),
        MigrationOutcome::Current => {}
    }

    let value = serde_json::from_value(Value::Object(doc)).map_err(|source| {
        PersistenceError::Json {
            key: T::KEY.to_string(),
            source,
        }
    })?;
    Ok((value, LoadSource::Stored(outcome)))
}

/// Write `doc` under its key
pub fn save_document<T: Versioned>(
    store: &dyn DocumentStore,
    doc: &T,
) -> Result<(), PersistenceError> {
    let value = serde_json::to_value(doc).map_err(|source| PersistenceError::Json {
        key: T::KEY.to_string(),
        source,
    })?;
    store.save(T::KEY, &value)
}
