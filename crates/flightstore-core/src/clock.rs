//! Source of "today" for the lookahead window.
//!
//! The service asks the clock on every call and never caches the answer,
//! so a request issued just after midnight UTC is checked against the new
//! day. Tests inject a [`FixedClock`] to keep the window deterministic.

use chrono::{NaiveDate, Utc};

/// Provides the current calendar date in UTC.
pub trait Clock: Send + Sync {
    /// Today's date in UTC.
    fn today(&self) -> NaiveDate;
}

/// Reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1);
        assert_eq!(date.map(|d| FixedClock(d).today()), date);
    }

    #[test]
    fn system_clock_matches_utc_date() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        let after = Utc::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
