//! Gamification progress engine: XP, levels, titles, streaks and achievements
//!
//! [`ProgressStore`] owns the state and is the only way to change it. The
//! pieces it is built from are pure and usable on their own:
//!
//! - [`levels`]: XP to level, progress within a level, title bands
//! - [`streaks`]: consecutive-day state machine
//! - [`achievements`]: definitions table and insert-once unlock ledger
//! - [`history`]: bounded list of recent awards
//! - [`clock`]: "now" and "today", injectable for tests
//!
//! # Usage
//!
//! ```ignore
//! let mut store = ProgressStore::open(Box::new(SystemClock::default()), Box::new(storage))?;
//!
//! let award = store.award_xp(100, "Solved: Two Sum");
//! if award.leveled_up() {
//!     // celebrate
//! }
//! if store.current_streak() >= 3 {
//!     store.unlock_achievement("streak_3");
//! }
//! ```

pub mod achievements;
pub mod clock;
pub mod history;
pub mod levels;
pub mod state;
pub mod store;
pub mod streaks;

pub use achievements::{
    AchievementCategory, AchievementDefinition, AchievementLedger, Catalog, Rarity, Requirement,
    ACHIEVEMENTS, ACHIEVEMENTS_SCHEMA_VERSION,
};
pub use clock::{Clock, DayBoundary, ManualClock, SystemClock};
pub use history::{XpEvent, XpHistory, XP_HISTORY_LIMIT};
pub use levels::{
    derive_level, progress_within_level, title_for_level, LevelProgress, STARTING_TITLE,
    XP_PER_LEVEL,
};
pub use state::{Preferences, ProgressState, PROGRESS_SCHEMA_VERSION, SETTINGS_SCHEMA_VERSION};
pub use store::{AchievementUnlock, ProgressStore, XpAward};
pub use streaks::{StreakChange, StreakState, StreakUpdate};
