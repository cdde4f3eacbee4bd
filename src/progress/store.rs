//! Progress store - owns the progress state and every mutation of it
//!
//! Handles XP awards, level-ups, the daily streak, achievement unlocks, titles
//! and reset. Every mutation is one synchronous transition followed by a
//! write-through of the affected documents. A failed write is logged and does
//! not fail the mutation.

use chrono::NaiveDate;

use super::achievements::{AchievementDefinition, AchievementLedger, Catalog};
use super::clock::Clock;
use super::history::{XpEvent, XpHistory};
use super::levels::{progress_within_level, title_for_level, LevelProgress};
use super::state::{Preferences, ProgressState};
use super::streaks::{StreakChange, StreakUpdate};
use crate::persistence::{
    load_document, save_document, DocumentStore, LoadSource, MigrationOutcome, PersistenceError,
    Versioned,
};

/// Outcome of an XP award
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    pub amount: u64,
    pub total_xp: u64,
    pub old_level: u32,
    pub new_level: u32,
    /// Title added to the earned set by this award, if any
    pub earned_title: Option<&'static str>,
    /// True when the daily-activity check raised the streak
    pub streak_increased: bool,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// An achievement that was just unlocked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementUnlock {
    pub id: String,
    /// None when the id is not in the catalog
    pub definition: Option<&'static AchievementDefinition>,
    /// Reward award, when the definition grants XP
    pub reward: Option<XpAward>,
}

/// Owner of the progress, achievements and settings documents
pub struct ProgressStore {
    state: ProgressState,
    achievements: AchievementLedger,
    preferences: Preferences,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    storage: Box<dyn DocumentStore>,
}

impl ProgressStore {
    /// Load all documents from `storage`, migrating and repairing as needed,
    /// using the built-in achievement catalog.
    pub fn open(
        clock: Box<dyn Clock>,
        storage: Box<dyn DocumentStore>,
    ) -> Result<Self, PersistenceError> {
        Self::open_with_catalog(clock, storage, Catalog::default())
    }

    pub fn open_with_catalog(
        clock: Box<dyn Clock>,
        storage: Box<dyn DocumentStore>,
        catalog: Catalog,
    ) -> Result<Self, PersistenceError> {
        let (mut state, progress_source) = load_document::<ProgressState>(storage.as_ref())?;
        let (mut achievements, achievements_source) =
            load_document::<AchievementLedger>(storage.as_ref())?;
        let (preferences, settings_source) = load_document::<Preferences>(storage.as_ref())?;

        let repairs = state.normalize();
        for repair in &repairs {
            tracing::debug!("Repaired progress document: {}", repair);
        }
        let deduped = achievements.dedup();
        if deduped {
            tracing::debug!("Repaired achievements document: duplicate ids removed");
        }

        let store = Self {
            state,
            achievements,
            preferences,
            catalog,
            clock,
            storage,
        };

        if needs_write(progress_source) || (!repairs.is_empty() && can_repair(progress_source)) {
            store.flush(&store.state);
        }
        if needs_write(achievements_source) || (deduped && can_repair(achievements_source)) {
            store.flush(&store.achievements);
        }
        if needs_write(settings_source) {
            store.flush(&store.preferences);
        }

        tracing::debug!(
            "Opened progress store: {} XP, level {}, streak {}, {} achievements",
            store.state.xp(),
            store.state.level(),
            store.state.streak().current_streak,
            store.achievements.len()
        );

        Ok(store)
    }

    fn flush<T: Versioned>(&self, doc: &T) {
        if let Err(e) = save_document(self.storage.as_ref(), doc) {
            tracing::warn!("Failed to save '{}' document: {}", T::KEY, e);
        }
    }

    // ========================================
    // XP & LEVEL OPERATIONS
    // ========================================

    /// Award XP for `reason`.
    ///
    /// `amount` is expected to be positive; zero is recorded like any other
    /// award. Also runs the daily-activity check.
    pub fn award_xp(&mut self, amount: u64, reason: &str) -> XpAward {
        let award = self.apply_award(amount, reason);
        self.flush(&self.state);
        award
    }

    fn apply_award(&mut self, amount: u64, reason: &str) -> XpAward {
        let now = self.clock.now();
        let old_level = self.state.add_xp(amount);
        let new_level = self.state.level();

        self.state.xp_history.push(XpEvent {
            amount,
            reason: reason.to_string(),
            timestamp: now,
        });

        let mut earned_title = None;
        if new_level > old_level {
            let title = title_for_level(new_level);
            if self.state.earn_title(title) {
                earned_title = Some(title);
            }
            tracing::info!("Level up: {} -> {}", old_level, new_level);
        }

        let streak = self.apply_daily_activity();

        tracing::debug!(
            "Awarded {} XP for '{}' (total {})",
            amount,
            reason,
            self.state.xp()
        );

        XpAward {
            amount,
            total_xp: self.state.xp(),
            old_level,
            new_level,
            earned_title,
            streak_increased: streak.increased(),
        }
    }

    // ========================================
    // STREAK OPERATIONS
    // ========================================

    /// Record today's activity for the streak. Returns true if the streak went up.
    pub fn record_activity_if_needed(&mut self) -> bool {
        let update = self.apply_daily_activity();
        if update.change != StreakChange::AlreadyRecorded {
            self.flush(&self.state);
        }
        update.increased()
    }

    fn apply_daily_activity(&mut self) -> StreakUpdate {
        let today = self.clock.today();
        let update = self.state.streak.record_activity(today);
        match update.change {
            StreakChange::AlreadyRecorded => {}
            StreakChange::Extended => {
                tracing::debug!("Streak extended to {} days", update.current)
            }
            StreakChange::Restarted => {
                tracing::debug!("Streak restarted (was {})", update.previous)
            }
        }
        update
    }

    // ========================================
    // ACHIEVEMENT OPERATIONS
    // ========================================

    /// Unlock an achievement. Returns false if it was already unlocked.
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        self.unlock_achievement_with_reward(id).is_some()
    }

    /// Unlock an achievement and grant its XP reward.
    /// Returns None if it was already unlocked.
    pub fn unlock_achievement_with_reward(&mut self, id: &str) -> Option<AchievementUnlock> {
        if !self.achievements.unlock(id, self.clock.now()) {
            return None;
        }
        self.flush(&self.achievements);

        let definition = self.catalog.get(id);
        let reward = match definition {
            Some(def) if def.xp_reward > 0 => {
                tracing::info!("Achievement unlocked: {} (+{} XP)", def.name, def.xp_reward);
                Some(self.award_xp(def.xp_reward, &format!("Achievement: {}", def.name)))
            }
            Some(def) => {
                tracing::info!("Achievement unlocked: {}", def.name);
                None
            }
            None => {
                tracing::warn!("Unlocked achievement '{}' is not in the catalog", id);
                None
            }
        };

        Some(AchievementUnlock {
            id: id.to_string(),
            definition,
            reward,
        })
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.contains(id)
    }

    // ========================================
    // TITLES
    // ========================================

    /// Wear an earned title. Returns false, changing nothing, if it is not earned.
    pub fn set_current_title(&mut self, title: &str) -> bool {
        if !self.state.has_title(title) {
            return false;
        }
        if self.state.current_title != title {
            self.state.current_title = title.to_string();
            self.flush(&self.state);
        }
        true
    }

    // ========================================
    // RESET
    // ========================================

    /// Return progress and achievements to creation defaults, keeping schema
    /// versions. Preferences are kept.
    pub fn reset_progress(&mut self) {
        self.state = ProgressState::with_schema_version(self.state.schema_version);
        self.achievements.clear();
        self.flush(&self.state);
        self.flush(&self.achievements);
        tracing::info!("Progress reset");
    }

    // ========================================
    // PREFERENCES
    // ========================================

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Change preferences in place and write them through
    pub fn update_preferences(&mut self, update: impl FnOnce(&mut Preferences)) {
        update(&mut self.preferences);
        self.flush(&self.preferences);
    }

    /// XP earned today, per the clock's calendar
    pub fn daily_xp_earned(&self) -> u64 {
        let today = self.clock.today();
        self.state
            .xp_history
            .total_on(today, |ts| self.clock.day_of(*ts))
    }

    /// True once today's XP reaches the daily goal
    pub fn daily_goal_met(&self) -> bool {
        self.daily_xp_earned() >= self.preferences.daily_xp_goal
    }

    // ========================================
    // SELECTORS
    // ========================================

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn xp(&self) -> u64 {
        self.state.xp()
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    pub fn level_progress(&self) -> LevelProgress {
        progress_within_level(self.state.xp())
    }

    pub fn current_streak(&self) -> u32 {
        self.state.streak().current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.state.streak().longest_streak
    }

    pub fn last_active_day(&self) -> Option<NaiveDate> {
        self.state.streak().last_active_day
    }

    /// Activity was recorded today or yesterday
    pub fn streak_is_active(&self) -> bool {
        self.state.streak().is_active(self.clock.today())
    }

    pub fn titles(&self) -> &[String] {
        self.state.titles()
    }

    pub fn current_title(&self) -> &str {
        self.state.current_title()
    }

    pub fn unlocked_achievement_ids(&self) -> &[String] {
        self.achievements.ids()
    }

    pub fn achievements(&self) -> &AchievementLedger {
        &self.achievements
    }

    pub fn xp_history(&self) -> &XpHistory {
        self.state.xp_history()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Fresh and migrated documents are written back so the stored form is current
fn needs_write(source: LoadSource) -> bool {
    matches!(
        source,
        LoadSource::Fresh | LoadSource::Stored(MigrationOutcome::Migrated { .. })
    )
}

/// Repairs to a document written by newer code stay in memory; writing them
/// back would drop the fields this version does not know.
fn can_repair(source: LoadSource) -> bool {
    !matches!(source, LoadSource::Stored(MigrationOutcome::Newer { .. }))
}
