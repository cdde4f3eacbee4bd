//! Status and history commands

use studyxp::progress::clock::day_string;
use studyxp::ProgressStore;

/// Width of the level progress bar in characters
const BAR_WIDTH: usize = 20;

/// Show XP, level, streak and titles
pub fn status_command(store: &ProgressStore) {
    let progress = store.level_progress();
    let filled = (progress.percentage / 100.0 * BAR_WIDTH as f64) as usize;

    println!("{} - Level {}", store.current_title(), store.level());
    println!(
        "  [{}{}] {}/{} XP ({} to next level)",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.current_in_level,
        progress.needed,
        progress.remaining()
    );
    println!("  Total XP: {}", store.xp());
    println!(
        "  Today: {}/{} XP{}",
        store.daily_xp_earned(),
        store.preferences().daily_xp_goal,
        if store.daily_goal_met() { " (goal met)" } else { "" }
    );

    let last = store
        .last_active_day()
        .map(day_string)
        .unwrap_or_else(|| "never".to_string());
    println!(
        "  Streak: {} day(s){} (best {}, last active {})",
        store.current_streak(),
        if store.streak_is_active() { "" } else { ", inactive" },
        store.longest_streak(),
        last
    );

    println!("  Titles: {}", store.titles().join(", "));
    println!(
        "  Achievements: {}/{}",
        store.unlocked_achievement_ids().len(),
        store.catalog().total_count()
    );
}

/// Show recent XP awards, newest first
pub fn history_command(store: &ProgressStore, limit: usize) {
    if store.xp_history().is_empty() {
        println!("No XP awarded yet.");
        return;
    }

    for event in store.xp_history().iter().take(limit) {
        println!(
            "  {}  +{:>5} XP  {}",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            event.amount,
            event.reason
        );
    }
}
