//! Durable key-value storage for JSON documents
//!
//! Every logical store (`progress`, `achievements`, `settings`) is one JSON
//! document under a stable key.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use fs2::FileExt;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;

use super::error::PersistenceError;

/// Key-value store holding one JSON document per key
pub trait DocumentStore {
    /// Load the document stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError>;

    /// Replace the document stored under `key`
    fn save(&self, key: &str, doc: &Value) -> Result<(), PersistenceError>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, doc: &Value) -> Result<(), PersistenceError> {
        (**self).save(key, doc)
    }
}

fn parse_document(key: &str, body: &str) -> Result<Value, PersistenceError> {
    serde_json::from_str(body).map_err(|source| PersistenceError::Json {
        key: key.to_string(),
        source,
    })
}

fn render_document(key: &str, doc: &Value) -> Result<String, PersistenceError> {
    serde_json::to_string_pretty(doc).map_err(|source| PersistenceError::Json {
        key: key.to_string(),
        source,
    })
}

// ========================================
// MEMORY
// ========================================

/// In-process store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with documents, e.g. to simulate data written by older code
    pub fn with_documents(docs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            docs: Mutex::new(docs.into_iter().collect()),
        }
    }

    fn docs(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.docs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.docs().get(key).cloned())
    }

    fn save(&self, key: &str, doc: &Value) -> Result<(), PersistenceError> {
        self.docs().insert(key.to_string(), doc.clone());
        Ok(())
    }
}

// ========================================
// JSON FILES
// ========================================

/// One `<key>.json` file per document in a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open the store, creating the directory if needed
    pub fn open(dir: &Path) -> Result<Self, PersistenceError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DocumentStore for JsonDirStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        let path = self.path_for(key);
        let body = match std::fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        parse_document(key, &body).map(Some)
    }

    fn save(&self, key: &str, doc: &Value) -> Result<(), PersistenceError> {
        let content = render_document(key, doc)?;
        write_atomic(&self.path_for(key), content.as_bytes())
    }
}

/// Replace `path` with `content` under an exclusive lock on `<path>.lock`.
///
/// The content goes to `<path>.tmp` first and is renamed over `path`, so a
/// crash never leaves a half-written file. The lock is released on return.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let lock_path = sibling(path, "lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)?;
    lock_file
        .lock_exclusive()
        .map_err(|_| PersistenceError::Lock(lock_path.display().to_string()))?;

    let temp_path = sibling(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;
    temp_file.write_all(content)?;
    temp_file.sync_all()?;

    std::fs::rename(&temp_path, path)?;
    Ok(())
}

/// `dir/name.ext` -> `dir/name.ext.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

// ========================================
// SQLITE
// ========================================

/// Documents kept in a single SQLite file
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::init(conn)
    }

    /// Database that lives only as long as the store
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

impl DocumentStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        let body: Option<String> = self
            .conn()
            .query_row("SELECT body FROM documents WHERE key = ?1", [key], |r| {
                r.get(0)
            })
            .optional()?;
        body.map(|b| parse_document(key, &b)).transpose()
    }

    fn save(&self, key: &str, doc: &Value) -> Result<(), PersistenceError> {
        let body = render_document(key, doc)?;
        self.conn().execute(
            r#"
            INSERT INTO documents (key, body, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET body = ?2, updated_at = ?3
            "#,
            (key, &body, Self::now_ms()),
        )?;
        Ok(())
    }
}

/// SQL schema for the document database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY,
    body TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn exercise(store: &dyn DocumentStore) {
        assert!(store.load("progress").unwrap().is_none());

        store.save("progress", &json!({ "schemaVersion": 1, "xp": 5 })).unwrap();
        store.save("progress", &json!({ "schemaVersion": 1, "xp": 7 })).unwrap();
        store.save("settings", &json!({ "schemaVersion": 1 })).unwrap();

        assert_eq!(store.load("progress").unwrap().unwrap()["xp"], 7);
        assert_eq!(store.load("settings").unwrap().unwrap()["schemaVersion"], 1);
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_json_dir_store() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(&dir.path().join("data")).unwrap();
        exercise(&store);
        assert!(store.path_for("progress").exists());
        assert!(!dir.path().join("data/progress.json.tmp").exists());
    }

    #[test]
    fn test_json_dir_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        std::fs::write(store.path_for("progress"), "{ not json").unwrap();
        let err = store.load("progress").unwrap_err();
        assert!(matches!(err, PersistenceError::Json { .. }));
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/notes.toml");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("nested/notes.toml.tmp").exists());
        assert!(dir.path().join("nested/notes.toml.lock").exists());
    }

    #[test]
    fn test_sqlite_store() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("progress.db")).unwrap();
        exercise(&store);
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.save("achievements", &json!({ "schemaVersion": 1 })).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert!(store.load("achievements").unwrap().is_some());
    }

    #[test]
    fn test_sqlite_in_memory() {
        exercise(&SqliteStore::open_in_memory().unwrap());
    }
}
