//! Award and activity commands

use studyxp::{ProgressStore, XpAward};

/// Award XP and report what changed
pub fn award_command(store: &mut ProgressStore, amount: u64, reason: &str) {
    let award = store.award_xp(amount, reason);
    println!("+{} XP for {} (total {})", award.amount, reason, award.total_xp);
    report_award(store, &award);
}

/// Record today's activity for the streak
pub fn activity_command(store: &mut ProgressStore) {
    if store.record_activity_if_needed() {
        println!("Streak: {} day(s)", store.current_streak());
    } else {
        println!(
            "Activity already recorded (streak {} day(s))",
            store.current_streak()
        );
    }
}

/// Print level-up and streak news for an award
pub(crate) fn report_award(store: &ProgressStore, award: &XpAward) {
    let celebrate = store.preferences().celebrations_enabled;

    if award.leveled_up() {
        if celebrate {
            println!("*** Level up! {} -> {} ***", award.old_level, award.new_level);
        } else {
            println!("Level {} reached", award.new_level);
        }
    }
    if let Some(title) = award.earned_title {
        println!("New title earned: {title}");
    }
    if award.streak_increased {
        println!("Streak: {} day(s)", store.current_streak());
    }
}
