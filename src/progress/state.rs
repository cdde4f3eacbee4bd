//! Persisted progress record and user preferences

use serde::{Deserialize, Serialize};

use super::history::XpHistory;
use super::levels::{derive_level, STARTING_TITLE};
use super::streaks::StreakState;

/// Current schema version of the `progress` document
pub const PROGRESS_SCHEMA_VERSION: u32 = 1;

/// Current schema version of the `settings` document
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// XP, level, streak, titles and recent history.
///
/// `level` is stored for readers of the raw document but is only ever written
/// from `xp`; see [`ProgressState::sync_level`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    pub schema_version: u32,
    #[serde(default)]
    xp: u64,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(flatten)]
    pub(crate) streak: StreakState,
    #[serde(default = "default_titles")]
    pub(crate) titles: Vec<String>,
    #[serde(default = "default_title")]
    pub(crate) current_title: String,
    #[serde(default)]
    pub(crate) xp_history: XpHistory,
}

fn default_level() -> u32 {
    1
}

fn default_titles() -> Vec<String> {
    vec![STARTING_TITLE.to_string()]
}

fn default_title() -> String {
    STARTING_TITLE.to_string()
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::with_schema_version(PROGRESS_SCHEMA_VERSION)
    }
}

impl ProgressState {
    /// Creation defaults stamped with `schema_version`
    pub fn with_schema_version(schema_version: u32) -> Self {
        Self {
            schema_version,
            xp: 0,
            level: 1,
            streak: StreakState::default(),
            titles: default_titles(),
            current_title: default_title(),
            xp_history: XpHistory::default(),
        }
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn xp_history(&self) -> &XpHistory {
        &self.xp_history
    }

    /// Add XP and bring `level` back in line. Returns the level before the change.
    pub(crate) fn add_xp(&mut self, amount: u64) -> u32 {
        let old_level = self.level;
        self.xp = self.xp.saturating_add(amount);
        self.sync_level();
        old_level
    }

    /// The only place `level` is written
    pub(crate) fn sync_level(&mut self) -> bool {
        let derived = derive_level(self.xp);
        let changed = self.level != derived;
        self.level = derived;
        changed
    }

    /// Add `title` to the earned set unless already present
    pub(crate) fn earn_title(&mut self, title: &str) -> bool {
        if self.has_title(title) {
            return false;
        }
        self.titles.push(title.to_string());
        true
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    /// Fix up invariants a stored document may violate. Returns a short label
    /// for each repair made.
    pub(crate) fn normalize(&mut self) -> Vec<&'static str> {
        let mut repairs = Vec::new();
        if self.sync_level() {
            repairs.push("level recomputed from xp");
        }
        if self.streak.repair() {
            repairs.push("longest streak raised to current streak");
        }
        let before = self.titles.len();
        let mut seen = std::collections::HashSet::new();
        self.titles.retain(|t| seen.insert(t.clone()));
        if self.titles.len() != before {
            repairs.push("duplicate titles removed");
        }
        if !self.has_title(STARTING_TITLE) {
            self.titles.insert(0, STARTING_TITLE.to_string());
            repairs.push("starting title restored");
        }
        if !self.has_title(&self.current_title) {
            self.current_title = STARTING_TITLE.to_string();
            repairs.push("unearned current title replaced");
        }
        if self.xp_history.sort_newest_first() {
            repairs.push("xp history reordered newest first");
        }
        if self.xp_history.enforce_limit() {
            repairs.push("xp history truncated");
        }
        repairs
    }
}

/// User preferences, stored in the `settings` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub schema_version: u32,
    #[serde(default = "default_true")]
    pub celebrations_enabled: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_daily_xp_goal")]
    pub daily_xp_goal: u64,
}

fn default_true() -> bool {
    true
}

fn default_daily_xp_goal() -> u64 {
    100
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            celebrations_enabled: true,
            sound_enabled: true,
            daily_xp_goal: default_daily_xp_goal(),
        }
    }
}
