//! Streak tracking system
//!
//! Tracks consecutive calendar days with recorded activity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::days_between;

/// Daily streak counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_active_day: Option<NaiveDate>,
}

/// What a daily-activity check did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Activity was already recorded today
    AlreadyRecorded,
    /// Last activity was yesterday
    Extended,
    /// First activity ever, a gap of two or more days, or a last day in the future
    Restarted,
}

/// Result of a daily-activity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub change: StreakChange,
    pub previous: u32,
    pub current: u32,
}

impl StreakUpdate {
    /// True when the current streak is higher than before the check
    pub fn increased(&self) -> bool {
        self.current > self.previous
    }
}

impl StreakState {
    /// Record activity on `today`. Calling it again on the same day is a no-op.
    pub fn record_activity(&mut self, today: NaiveDate) -> StreakUpdate {
        let previous = self.current_streak;

        let change = match self.last_active_day {
            Some(last) if last == today => {
                return StreakUpdate {
                    change: StreakChange::AlreadyRecorded,
                    previous,
                    current: previous,
                };
            }
            Some(last) if days_between(last, today) == 1 => StreakChange::Extended,
            _ => StreakChange::Restarted,
        };

        self.current_streak = match change {
            StreakChange::Extended => self.current_streak.saturating_add(1),
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_active_day = Some(today);

        StreakUpdate {
            change,
            previous,
            current: self.current_streak,
        }
    }

    /// Check if the streak is still alive (activity today or yesterday)
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let Some(last) = self.last_active_day else {
            return false;
        };
        (0..=1).contains(&days_between(last, today))
    }

    /// Raise `longest_streak` to at least `current_streak`. Returns true if it changed.
    pub(crate) fn repair(&mut self) -> bool {
        if self.longest_streak < self.current_streak {
            self.longest_streak = self.current_streak;
            return true;
        }
        false
    }
}
