//! Clock and calendar-day adapter
//!
//! Streaks are counted in calendar days, not 24h windows. Which calendar is
//! used (local or UTC) is decided by the clock, so tests can move across day
//! boundaries without real time passing.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Format used for calendar days in persisted documents and on the CLI
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of "now" and "today"
pub trait Clock {
    /// Current instant, used to stamp XP history entries
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day an instant falls on
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// Current calendar day
    fn today(&self) -> NaiveDate {
        self.day_of(self.now())
    }
}

/// Which calendar decides where one day ends and the next begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Midnight in the machine's local timezone
    #[default]
    Local,
    /// Midnight UTC
    Utc,
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    boundary: DayBoundary,
}

impl SystemClock {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self.boundary {
            DayBoundary::Local => instant.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => instant.date_naive(),
        }
    }
}

/// Clock that only moves when told to. Clones share the same time, so a test
/// can keep a handle after giving one to the store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Clock set to noon UTC on the given day. Returns None for an invalid day.
    pub fn at_day(day: &str) -> Option<Self> {
        let date = parse_day(day)?;
        let noon = date.and_hms_opt(12, 0, 0)?.and_utc();
        Some(Self::new(noon))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock() = now;
    }

    /// Move to noon UTC on the given day. Invalid days are ignored.
    pub fn set_day(&self, day: &str) {
        if let Some(noon) = parse_day(day).and_then(|d| d.and_hms_opt(12, 0, 0)) {
            self.set(noon.and_utc());
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.lock();
        *now += by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(chrono::Duration::days(days));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock still holds a valid instant
        self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }

    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.date_naive()
    }
}

/// Format a calendar day as "YYYY-MM-DD"
pub fn day_string(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a "YYYY-MM-DD" calendar day
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_FORMAT).ok()
}

/// Signed number of calendar days from `from` to `to`.
/// Negative when `to` is before `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_between() {
        let a = parse_day("2025-01-01").unwrap();
        let b = parse_day("2025-01-04").unwrap();
        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(b, a), -3);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_days_between_crosses_month_and_leap_day() {
        let a = parse_day("2024-02-28").unwrap();
        let b = parse_day("2024-03-01").unwrap();
        assert_eq!(days_between(a, b), 2);
    }

    #[test]
    fn test_day_string_roundtrip_format() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(day_string(day), "2025-03-07");
        assert_eq!(parse_day("2025-03-07"), Some(day));
        assert_eq!(parse_day("07/03/2025"), None);
    }

    #[test]
    fn test_manual_clock_day_boundary() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 23, 59, 0).unwrap());
        assert_eq!(day_string(clock.today()), "2025-01-01");

        clock.advance(chrono::Duration::minutes(2));
        assert_eq!(day_string(clock.today()), "2025-01-02");
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::at_day("2025-01-01").unwrap();
        let handle = clock.clone();
        handle.advance_days(1);
        assert_eq!(day_string(clock.today()), "2025-01-02");
    }

    #[test]
    fn test_system_clock_utc_day_of() {
        let clock = SystemClock::new(DayBoundary::Utc);
        let instant = Utc.with_ymd_and_hms(2025, 6, 30, 23, 30, 0).unwrap();
        assert_eq!(day_string(clock.day_of(instant)), "2025-06-30");
    }

    #[test]
    fn test_day_boundary_serde() {
        let b: DayBoundary = serde_json::from_str("\"utc\"").unwrap();
        assert_eq!(b, DayBoundary::Utc);
        assert_eq!(serde_json::to_string(&DayBoundary::Local).unwrap(), "\"local\"");
    }
}
