use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mindcast_core::clock::IClock;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Monday 2026-06-01 09:00 UTC.
    pub fn default_start() -> Self {
        Self::at(Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl IClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
