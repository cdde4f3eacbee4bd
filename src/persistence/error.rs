//! Error types for document storage and migration

/// Error type for document storage
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error in document '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to acquire lock on {0}")]
    Lock(String),

    #[error("Invalid document '{key}': {reason}")]
    InvalidDocument { key: String, reason: String },

    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Error type for schema migrations
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("No migration step from version {from} for document '{key}'")]
    MissingStep { key: String, from: u32 },

    #[error("Migration of '{key}' from version {from} failed: {reason}")]
    StepFailed { key: String, from: u32, reason: String },
}
