//! Achievement commands

use studyxp::ProgressStore;

use super::award::report_award;

/// Unlock an achievement by id
pub fn unlock_command(store: &mut ProgressStore, id: &str) {
    let Some(unlock) = store.unlock_achievement_with_reward(id) else {
        println!("Already unlocked: {id}");
        return;
    };

    match unlock.definition {
        Some(def) => println!("Unlocked: {} - {}", def.name, def.description),
        None => println!("Unlocked: {id} (not a known achievement, no reward)"),
    }
    if let Some(award) = &unlock.reward {
        println!("+{} XP (total {})", award.amount, award.total_xp);
        report_award(store, award);
    }
}

/// List the catalog with unlock state
pub fn list_command(store: &ProgressStore, locked_only: bool) {
    let catalog = store.catalog();
    println!(
        "Achievements ({}/{}):\n",
        store.unlocked_achievement_ids().len(),
        catalog.total_count()
    );

    for def in catalog.all() {
        let unlocked = store.has_achievement(def.id);
        if locked_only && unlocked {
            continue;
        }

        let mark = if unlocked { "x" } else { " " };
        println!(
            "  [{}] {} ({}) - {} [{}, {}, +{} XP]",
            mark,
            def.name,
            def.id,
            def.description,
            def.category.label(),
            def.rarity.label(),
            def.xp_reward
        );
        if let Some(at) = store.achievements().unlocked_at(def.id) {
            println!("      unlocked {}", at.format("%Y-%m-%d"));
        } else if !unlocked {
            println!("      {}", def.requirement.describe());
        }
    }
}
