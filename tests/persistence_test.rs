//! Progress survives reopening on every backend, and old documents migrate

mod common;

use std::sync::Arc;

use common::{json_storage, reopen, sqlite_storage};
use serde_json::json;
use studyxp::persistence::{DocumentStore, MemoryStore};
use studyxp::progress::{ManualClock, PROGRESS_SCHEMA_VERSION};
use tempfile::tempdir;

fn play_and_reopen(storage: Arc<dyn DocumentStore>) {
    let clock = ManualClock::at_day("2025-01-01").unwrap();
    {
        let mut store = reopen(&clock, storage.clone());
        store.award_xp(600, "lessons");
        store.unlock_achievement("first_lesson");
        clock.advance_days(1);
        store.record_activity_if_needed();
        store.update_preferences(|p| p.sound_enabled = false);
    }

    let store = reopen(&clock, storage);
    assert_eq!(store.xp(), 650);
    assert_eq!(store.level(), 2);
    assert_eq!(store.current_streak(), 2);
    assert!(store.has_achievement("first_lesson"));
    assert_eq!(store.xp_history().len(), 2);
    assert!(!store.preferences().sound_enabled);
    assert_eq!(
        store.last_active_day(),
        chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
    );
}

#[test]
fn test_memory_backend_reopen() {
    play_and_reopen(Arc::new(MemoryStore::new()));
}

#[test]
fn test_sqlite_backend_reopen() {
    let dir = tempdir().unwrap();
    play_and_reopen(sqlite_storage(dir.path()));
}

#[test]
fn test_json_backend_reopen() {
    let dir = tempdir().unwrap();
    play_and_reopen(json_storage(dir.path()));
}

#[test]
fn test_unversioned_documents_are_migrated_and_written_back() {
    let storage = Arc::new(MemoryStore::with_documents([
        (
            "progress".to_string(),
            json!({
                "xp": 1234,
                "level": 1,
                "currentStreak": 5,
                "longestStreak": 9,
                "lastActiveDay": "2024-12-31",
                "titles": ["Novice", "Apprentice"],
                "currentTitle": "Apprentice",
                "xpHistory": [
                    { "amount": 34, "reason": "quiz", "timestamp": "2024-12-31T10:00:00Z" }
                ],
            }),
        ),
        (
            "achievements".to_string(),
            json!({ "unlockedAchievementIds": ["first_lesson", "streak_3"] }),
        ),
    ]));
    let clock = ManualClock::at_day("2025-01-01").unwrap();
    let store = reopen(&clock, storage.clone());

    assert_eq!(store.xp(), 1234);
    assert_eq!(store.level(), 3);
    assert_eq!(store.current_streak(), 5);
    assert_eq!(store.current_title(), "Apprentice");
    assert!(store.has_achievement("streak_3"));
    assert!(store.streak_is_active());

    let progress = storage.load("progress").unwrap().unwrap();
    assert_eq!(progress["schemaVersion"], PROGRESS_SCHEMA_VERSION);
    assert_eq!(progress["level"], 3);
    let achievements = storage.load("achievements").unwrap().unwrap();
    assert_eq!(achievements["schemaVersion"], 1);
}

#[test]
fn test_newer_document_loads_as_is() {
    let storage = Arc::new(MemoryStore::with_documents([(
        "progress".to_string(),
        json!({
            "schemaVersion": 99,
            "xp": 42,
            "level": 1,
            "titles": ["Novice"],
            "currentTitle": "Novice",
            "seasonPass": { "tier": 3 },
        }),
    )]));
    let clock = ManualClock::at_day("2025-01-01").unwrap();
    let mut store = reopen(&clock, storage.clone());
    assert_eq!(store.xp(), 42);
    assert_eq!(store.state().schema_version, 99);

    // Reset keeps the stored schema version
    store.reset_progress();
    assert_eq!(store.state().schema_version, 99);
    assert_eq!(storage.load("progress").unwrap().unwrap()["schemaVersion"], 99);
}

#[test]
fn test_newer_document_is_repaired_in_memory_only() {
    let progress = json!({
        "schemaVersion": 99,
        "xp": 1200,
        "level": 1,
        "titles": ["Novice"],
        "currentTitle": "Novice",
        "seasonPass": { "tier": 3 },
    });
    let achievements = json!({
        "schemaVersion": 99,
        "unlockedAchievementIds": ["first_lesson", "first_lesson"],
        "badgeFrames": ["gold"],
    });
    let storage = Arc::new(MemoryStore::with_documents([
        ("progress".to_string(), progress.clone()),
        ("achievements".to_string(), achievements.clone()),
    ]));
    let clock = ManualClock::at_day("2025-01-01").unwrap();
    let store = reopen(&clock, storage.clone());

    assert_eq!(store.level(), 3);
    assert_eq!(store.achievements().len(), 1);
    assert_eq!(storage.load("progress").unwrap(), Some(progress));
    assert_eq!(storage.load("achievements").unwrap(), Some(achievements));
}

#[test]
fn test_corrupt_document_fails_open() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("progress.json"), "{ definitely not json").unwrap();
    let storage = json_storage(dir.path());
    let clock = ManualClock::at_day("2025-01-01").unwrap();
    let result = studyxp::ProgressStore::open(Box::new(clock), Box::new(storage));
    assert!(result.is_err());
}
