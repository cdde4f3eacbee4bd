//! Reset command implementation

use studyxp::ProgressStore;

/// Reset progress and achievements. Requires `--yes`.
pub fn reset_command(store: &mut ProgressStore, confirmed: bool) {
    if !confirmed {
        println!(
            "This erases {} XP, a {}-day streak and {} achievement(s). Re-run with --yes to confirm.",
            store.xp(),
            store.current_streak(),
            store.unlocked_achievement_ids().len()
        );
        return;
    }

    store.reset_progress();
    println!("Progress reset.");
}
