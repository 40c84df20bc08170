//! Forecast outcome log: user, window, risk, confidence, level, AI flag.
//!
//! Bounded per user (ring buffer behavior). Backs the 7-day trend insight.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use mindcast_core::config::defaults::DEFAULT_FORECAST_LOG_CAPACITY;
use mindcast_core::config::ObservabilityConfig;
use mindcast_core::models::{ForecastLogEntry, ForecastWindow, UserId};
use mindcast_core::traits::IForecastHistory;

/// Concurrent per-user forecast log.
pub struct ForecastLog {
    entries: DashMap<UserId, Vec<ForecastLogEntry>>,
    /// Maximum entries retained per user.
    max_entries_per_user: usize,
}

impl ForecastLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FORECAST_LOG_CAPACITY)
    }

    /// Create with a custom per-user capacity.
    pub fn with_capacity(max_entries_per_user: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries_per_user: max_entries_per_user.max(1),
        }
    }

    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self::with_capacity(config.forecast_log_capacity)
    }

    /// Every retained entry for a user, oldest first.
    pub fn entries_for(&self, user_id: UserId) -> Vec<ForecastLogEntry> {
        self.entries
            .get(&user_id)
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Total retained entries across users.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean overall risk for (user, window) since `since`, if any entries exist.
    pub fn mean_risk_since(
        &self,
        user_id: UserId,
        window: ForecastWindow,
        since: DateTime<Utc>,
    ) -> Option<f64> {
        let entries = self.entries_since(user_id, window, since);
        if entries.is_empty() {
            return None;
        }
        Some(entries.iter().map(|e| e.overall_risk).sum::<f64>() / entries.len() as f64)
    }
}

impl Default for ForecastLog {
    fn default() -> Self {
        Self::new()
    }
}

impl IForecastHistory for ForecastLog {
    fn record(&self, entry: ForecastLogEntry) {
        tracing::trace!(
            event = "forecast_logged",
            user_id = entry.user_id,
            window = %entry.window,
            overall_risk = entry.overall_risk,
            "forecast logged"
        );
        let mut user_entries = self.entries.entry(entry.user_id).or_default();
        user_entries.push(entry);
        if user_entries.len() > self.max_entries_per_user {
            let excess = user_entries.len() - self.max_entries_per_user;
            user_entries.drain(..excess);
        }
    }

    fn entries_since(
        &self,
        user_id: UserId,
        window: ForecastWindow,
        since: DateTime<Utc>,
    ) -> Vec<ForecastLogEntry> {
        self.entries
            .get(&user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.window == window && e.generated_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
