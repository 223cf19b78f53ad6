//! Injectable time source.
//!
//! The rollover engine keys everything off the local calendar day, so the
//! current date must be mockable for tests to simulate day boundaries.
//! Production code uses [`SystemClock`]; tests use [`ManualClock`] and
//! advance it explicitly.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Calendar-day key format used throughout the state document.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Source of the current time and local calendar day.
pub trait Clock: Send {
    /// Current instant, used for `completed_at` / `unlocked_at` timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current local calendar day, used for day keys.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation backed by the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually-driven clock for deterministic tests.
///
/// Clones share the same underlying instant, so a test can hand one handle
/// to a [`crate::store::Store`] and keep another to advance time across
/// simulated day boundaries.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock poisoned") = now;
    }

    /// Advance the clock by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().expect("clock poisoned");
        *now += chrono::Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock poisoned")
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
