//! Schema migrations for persisted documents
//!
//! Each document carries a `schemaVersion`. A document older than the running
//! code is moved forward one version at a time through an ordered chain of
//! pure steps. A document without a version is treated as version 0.

use serde_json::{Map, Value};

use super::error::MigrationError;

/// Name of the version field present in every document
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// One step of a migration chain, from `from` to `from + 1`
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub from: u32,
    pub description: &'static str,
    pub apply: fn(Map<String, Value>) -> Result<Map<String, Value>, String>,
}

/// Outcome of bringing a document up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Stored version matched the running code
    Current,
    /// Document was moved forward from `from`
    Migrated { from: u32 },
    /// Document was written by newer code and was left untouched
    Newer { stored: u32 },
}

/// v0 → v1: documents written before versioning; stamp the version only
fn stamp_v1(doc: Map<String, Value>) -> Result<Map<String, Value>, String> {
    Ok(doc)
}

/// Migrations for the `progress` document
pub static PROGRESS_MIGRATIONS: &[Migration] = &[Migration {
    from: 0,
    description: "stamp schema version",
    apply: stamp_v1,
}];

/// Migrations for the `achievements` document
pub static ACHIEVEMENTS_MIGRATIONS: &[Migration] = &[Migration {
    from: 0,
    description: "stamp schema version",
    apply: stamp_v1,
}];

/// Migrations for the `settings` document
pub static SETTINGS_MIGRATIONS: &[Migration] = &[Migration {
    from: 0,
    description: "stamp schema version",
    apply: stamp_v1,
}];

/// Read the stored schema version. Missing or non-numeric counts as 0.
pub fn stored_version(doc: &Map<String, Value>) -> u32 {
    doc.get(SCHEMA_VERSION_FIELD)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

/// Bring `doc` up to `target` using `chain`
pub fn migrate(
    key: &str,
    mut doc: Map<String, Value>,
    chain: &[Migration],
    target: u32,
) -> Result<(Map<String, Value>, MigrationOutcome), MigrationError> {
    let stored = stored_version(&doc);

    if stored > target {
        return Ok((doc, MigrationOutcome::Newer { stored }));
    }
    if stored == target {
        return Ok((doc, MigrationOutcome::Current));
    }

    for from in stored..target {
        let step = chain
            .iter()
            .find(|m| m.from == from)
            .ok_or_else(|| MigrationError::MissingStep {
                key: key.to_string(),
                from,
            })?;

        tracing::debug!(
            "Migrating '{}' from v{} to v{}: {}",
            key,
            from,
            from + 1,
            step.description
        );

        doc = (step.apply)(doc).map_err(|reason| MigrationError::StepFailed {
            key: key.to_string(),
            from,
            reason,
        })?;
        doc.insert(SCHEMA_VERSION_FIELD.to_string(), Value::from(from + 1));
    }

    Ok((doc, MigrationOutcome::Migrated { from: stored }))
}
