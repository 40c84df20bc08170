//! Wall-clock abstraction so cache freshness and time windows are testable.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait IClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl IClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
