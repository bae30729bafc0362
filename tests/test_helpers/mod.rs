//! Shared fixtures for integration tests.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock that only moves when a test moves it.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl SteppedClock {
    /// Creates a clock frozen at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Creates a clock frozen at a fixed mid-morning instant.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 5, 4, 10, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::at(start)
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + Days::new(days);
    }

    /// Returns the UTC calendar date of the clock.
    pub fn today(&self) -> NaiveDate {
        self.utc().date_naive()
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the date `days` after `today`.
pub fn days_after(today: NaiveDate, days: u64) -> NaiveDate {
    today + Days::new(days)
}
