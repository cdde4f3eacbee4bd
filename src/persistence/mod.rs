//! Persistence for progress documents
//!
//! # Architecture
//!
//! ```text
//! ProgressStore ──► load_document / save_document ──► DocumentStore
//!                        │                              ├─ SqliteStore (~/.studyxp/progress.db)
//!                        ▼                              ├─ JsonDirStore (<key>.json files)
//!                   migrate (per-document chain)        └─ MemoryStore
//! ```

mod document;
mod error;
mod migrations;
mod storage;

pub use document::{load_document, save_document, LoadSource, Versioned};
pub use error::{MigrationError, PersistenceError};
pub use migrations::{
    migrate, stored_version, Migration, MigrationOutcome, ACHIEVEMENTS_MIGRATIONS,
    PROGRESS_MIGRATIONS, SCHEMA_VERSION_FIELD, SETTINGS_MIGRATIONS,
};
pub use storage::{write_atomic, DocumentStore, JsonDirStore, MemoryStore, SqliteStore};
