//! Recent XP award events
//!
//! Kept for display and auditing only. Level is always derived from the
//! cumulative XP counter, never from this history.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of events retained
pub const XP_HISTORY_LIMIT: usize = 50;

/// A single XP award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpEvent {
    pub amount: u64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Most-recent-first list of XP events, bounded to [`XP_HISTORY_LIMIT`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XpHistory {
    events: VecDeque<XpEvent>,
}

impl XpHistory {
    /// Record an event as the newest entry, evicting the oldest on overflow
    pub fn push(&mut self, event: XpEvent) {
        self.events.push_front(event);
        self.events.truncate(XP_HISTORY_LIMIT);
    }

    /// Newest event, if any
    pub fn latest(&self) -> Option<&XpEvent> {
        self.events.front()
    }

    /// Events, newest first
    pub fn iter(&self) -> impl Iterator<Item = &XpEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total XP of events whose timestamp falls on `day` per `day_of`
    pub fn total_on(&self, day: NaiveDate, day_of: impl Fn(&DateTime<Utc>) -> NaiveDate) -> u64 {
        self.events
            .iter()
            .filter(|e| day_of(&e.timestamp) == day)
            .map(|e| e.amount)
            .sum()
    }

    /// Restore newest-first order. Stable, so same-instant events keep their
    /// relative order. Returns true if the order changed.
    pub(crate) fn sort_newest_first(&mut self) -> bool {
        let sorted = self
            .events
            .iter()
            .zip(self.events.iter().skip(1))
            .all(|(newer, older)| newer.timestamp >= older.timestamp);
        if sorted {
            return false;
        }
        self.events
            .make_contiguous()
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        true
    }

    /// Drop events beyond the limit. Returns true if anything was dropped.
    pub(crate) fn enforce_limit(&mut self) -> bool {
        let before = self.events.len();
        self.events.truncate(XP_HISTORY_LIMIT);
        self.events.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(amount: u64, minute: u32) -> XpEvent {
        XpEvent {
            amount,
            reason: format!("event {amount}"),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 10, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut history = XpHistory::default();
        history.push(event(10, 0));
        history.push(event(20, 1));
        assert_eq!(history.latest().map(|e| e.amount), Some(20));
        let amounts: Vec<u64> = history.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![20, 10]);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut history = XpHistory::default();
        for i in 1..=60u64 {
            history.push(event(i, 0));
        }
        assert_eq!(history.len(), XP_HISTORY_LIMIT);
        assert_eq!(history.latest().map(|e| e.amount), Some(60));
        assert_eq!(history.iter().last().map(|e| e.amount), Some(11));
    }

    #[test]
    fn test_total_on_day() {
        let mut history = XpHistory::default();
        history.push(event(10, 0));
        history.push(event(15, 5));
        history.push(XpEvent {
            amount: 100,
            reason: "yesterday".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap(),
        });
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(history.total_on(day, |ts| ts.date_naive()), 25);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut history: XpHistory = serde_json::from_value(serde_json::json!([
            { "amount": 1, "reason": "old", "timestamp": "2024-06-01T10:00:00Z" },
            { "amount": 2, "reason": "new", "timestamp": "2025-01-01T10:00:00Z" },
        ]))
        .unwrap();
        assert!(history.sort_newest_first());
        assert_eq!(history.latest().map(|e| e.reason.as_str()), Some("new"));
        assert!(!history.sort_newest_first());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut history = XpHistory::default();
        history.push(event(5, 0));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["amount"], 5);
        assert_eq!(json[0]["reason"], "event 5");
    }
}
