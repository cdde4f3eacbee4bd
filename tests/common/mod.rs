//! Shared test utilities for progress store tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use studyxp::persistence::{DocumentStore, JsonDirStore, MemoryStore, SqliteStore};
use studyxp::progress::ManualClock;
use studyxp::ProgressStore;

/// Opens a store at noon UTC on `day`, backed by a shared in-memory store
pub fn memory_store_at(day: &str) -> (ProgressStore, ManualClock, Arc<MemoryStore>) {
    let clock = ManualClock::at_day(day).expect("Invalid test day");
    let storage = Arc::new(MemoryStore::new());
    let store = ProgressStore::open(Box::new(clock.clone()), Box::new(storage.clone()))
        .expect("Failed to open store");
    (store, clock, storage)
}

/// Opens a store on an existing storage handle
pub fn reopen(clock: &ManualClock, storage: Arc<dyn DocumentStore>) -> ProgressStore {
    ProgressStore::open(Box::new(clock.clone()), Box::new(storage)).expect("Failed to reopen store")
}

/// SQLite storage in `dir`
pub fn sqlite_storage(dir: &Path) -> Arc<dyn DocumentStore> {
    Arc::new(SqliteStore::open(&dir.join("progress.db")).expect("Failed to open sqlite store"))
}

/// JSON file storage in `dir`
pub fn json_storage(dir: &Path) -> Arc<dyn DocumentStore> {
    Arc::new(JsonDirStore::open(dir).expect("Failed to open json store"))
}
