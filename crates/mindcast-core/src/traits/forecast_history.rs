use chrono::{DateTime, Utc};

use crate::models::{ForecastLogEntry, ForecastWindow, UserId};

/// Record of built forecasts for trend analysis.
pub trait IForecastHistory: Send + Sync {
    fn record(&self, entry: ForecastLogEntry);

    /// Entries for (user, window) generated at or after `since`, oldest first.
    fn entries_since(
        &self,
        user_id: UserId,
        window: ForecastWindow,
        since: DateTime<Utc>,
    ) -> Vec<ForecastLogEntry>;
}
