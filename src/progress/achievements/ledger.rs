//! Achievement unlock ledger
//!
//! Insert-once set of unlocked achievement ids. Unlock order is preserved for
//! display.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current schema version of the `achievements` document
pub const ACHIEVEMENTS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementLedger {
    pub schema_version: u32,
    #[serde(default)]
    unlocked_achievement_ids: Vec<String>,
    #[serde(default)]
    unlocked_at: BTreeMap<String, DateTime<Utc>>,
}

impl Default for AchievementLedger {
    fn default() -> Self {
        Self {
            schema_version: ACHIEVEMENTS_SCHEMA_VERSION,
            unlocked_achievement_ids: Vec::new(),
            unlocked_at: BTreeMap::new(),
        }
    }
}

impl AchievementLedger {
    /// Record `id` as unlocked at `now`. Returns false if it was already unlocked.
    pub fn unlock(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        if self.contains(id) {
            return false;
        }
        self.unlocked_achievement_ids.push(id.to_string());
        self.unlocked_at.insert(id.to_string(), now);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.unlocked_achievement_ids.iter().any(|u| u == id)
    }

    /// Unlocked ids in unlock order
    pub fn ids(&self) -> &[String] {
        &self.unlocked_achievement_ids
    }

    /// When `id` was unlocked, if known
    pub fn unlocked_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.unlocked_at.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.unlocked_achievement_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked_achievement_ids.is_empty()
    }

    /// Drop duplicate ids left behind by hand-edited or older documents.
    /// Returns true if anything was removed.
    pub(crate) fn dedup(&mut self) -> bool {
        let before = self.unlocked_achievement_ids.len();
        let mut seen = std::collections::HashSet::new();
        self.unlocked_achievement_ids
            .retain(|id| seen.insert(id.clone()));
        let ids = &self.unlocked_achievement_ids;
        self.unlocked_at.retain(|id, _| ids.contains(id));
        self.unlocked_achievement_ids.len() != before
    }

    /// Clear every unlock, keeping the schema version
    pub(crate) fn clear(&mut self) {
        self.unlocked_achievement_ids.clear();
        self.unlocked_at.clear();
    }
}
