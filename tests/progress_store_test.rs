//! End-to-end behavior of the progress store through its public API

mod common;

use common::memory_store_at;
use studyxp::progress::{derive_level, XP_HISTORY_LIMIT, XP_PER_LEVEL};

#[test]
fn test_study_week_scenario() {
    let (mut store, clock, _storage) = memory_store_at("2025-03-03");

    // Monday: a lesson and a problem
    let first = store.award_xp(50, "Lesson: Ownership");
    assert!(first.streak_increased);
    assert!(store.unlock_achievement("first_lesson"));
    store.award_xp(100, "Solved: Two Sum");
    assert_eq!(store.current_streak(), 1);

    // Tuesday and Wednesday
    clock.advance_days(1);
    assert!(store.award_xp(30, "Practice session").streak_increased);
    clock.advance_days(1);
    assert!(store.award_xp(30, "Practice session").streak_increased);
    assert_eq!(store.current_streak(), 3);

    // The collaborator notices the 3-day streak
    if store.current_streak() >= 3 {
        assert!(store.unlock_achievement("streak_3"));
    }
    assert!(!store.unlock_achievement("streak_3"));

    // Skip Thursday, come back Friday
    clock.advance_days(2);
    assert!(!store.award_xp(10, "Review").streak_increased);
    assert_eq!(store.current_streak(), 1);
    assert_eq!(store.longest_streak(), 3);

    assert_eq!(store.level(), derive_level(store.xp()));
    assert_eq!(store.unlocked_achievement_ids(), ["first_lesson", "streak_3"]);
}

#[test]
fn test_level_up_from_480() {
    let (mut store, _clock, _storage) = memory_store_at("2025-01-01");
    store.award_xp(480, "warm up");
    assert_eq!(store.level(), 1);

    let award = store.award_xp(100, "quiz");
    assert_eq!(store.xp(), 580);
    assert_eq!(store.level(), 2);
    assert!(award.leveled_up());
    assert_eq!(store.titles(), ["Novice"]);
}

#[test]
fn test_xp_is_monotonic_and_level_consistent() {
    let (mut store, _clock, _storage) = memory_store_at("2025-01-01");
    let mut expected = 0u64;
    for amount in (1..=40u64).map(|i| i * 37 % 611 + 1) {
        let award = store.award_xp(amount, "step");
        expected += amount;
        assert_eq!(award.total_xp, expected);
        assert_eq!(store.level() as u64, expected / XP_PER_LEVEL + 1);
    }
}

#[test]
fn test_history_bound_and_ordering() {
    let (mut store, _clock, _storage) = memory_store_at("2025-01-01");
    for i in 0..(XP_HISTORY_LIMIT + 25) {
        store.award_xp(1, &format!("award {i}"));
        assert!(store.xp_history().len() <= XP_HISTORY_LIMIT);
        assert_eq!(
            store.xp_history().latest().map(|e| e.reason.clone()),
            Some(format!("award {i}"))
        );
    }
}

#[test]
fn test_streak_across_midnight() {
    let (mut store, clock, _storage) = memory_store_at("2025-01-01");
    clock.set(
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(23, 59, 0))
            .unwrap()
            .and_utc(),
    );
    store.record_activity_if_needed();
    clock.advance(chrono::Duration::minutes(2));
    assert!(store.record_activity_if_needed());
    assert_eq!(store.current_streak(), 2);
}

#[test]
fn test_titles_follow_bands() {
    let (mut store, _clock, _storage) = memory_store_at("2025-01-01");
    assert!(!store.set_current_title("Apprentice"));

    // Level 6
    store.award_xp(5 * XP_PER_LEVEL, "binge");
    assert!(store.set_current_title("Apprentice"));

    // Level 11, then 16, then 21
    for _ in 0..3 {
        store.award_xp(5 * XP_PER_LEVEL, "binge");
    }
    assert_eq!(
        store.titles(),
        ["Novice", "Apprentice", "Practitioner", "Expert", "Master"]
    );
    assert!(store.set_current_title("Master"));
    assert_eq!(store.current_title(), "Master");
}

#[test]
fn test_reset_after_everything() {
    let (mut store, clock, _storage) = memory_store_at("2025-01-01");
    for _ in 0..5 {
        store.award_xp(700, "grind");
        store.unlock_achievement("first_problem");
        clock.advance_days(1);
    }
    store.set_current_title("Apprentice");

    store.reset_progress();

    assert_eq!(store.xp(), 0);
    assert_eq!(store.level(), 1);
    assert_eq!(store.current_streak(), 0);
    assert_eq!(store.longest_streak(), 0);
    assert!(store.unlocked_achievement_ids().is_empty());
    assert!(!store.has_achievement("first_problem"));
    assert_eq!(store.titles(), ["Novice"]);
    assert_eq!(store.current_title(), "Novice");

    // Unlocks work again after a reset
    assert!(store.unlock_achievement("first_problem"));
}
