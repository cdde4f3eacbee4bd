//! Achievements: static definitions and the unlock ledger

mod definitions;
mod ledger;

pub use definitions::{
    AchievementCategory, AchievementDefinition, Catalog, Rarity, Requirement, ACHIEVEMENTS,
};
pub use ledger::{AchievementLedger, ACHIEVEMENTS_SCHEMA_VERSION};
