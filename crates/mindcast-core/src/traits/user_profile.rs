use chrono::{DateTime, Utc};

use crate::errors::MindcastResult;
use crate::models::{CopingStrategy, CyclePhase, UserId};

/// Per-user settings and self-tracking data consumed by forecast algorithms.
pub trait IUserProfile: Send + Sync {
    /// Episode types the user tracks.
    fn enabled_episode_types(&self, user_id: UserId) -> MindcastResult<Vec<String>>;

    /// Whether the user opted into biological tracking.
    fn biological_tracking_enabled(&self, user_id: UserId) -> MindcastResult<bool>;

    fn cycle_phase(&self, user_id: UserId, at: DateTime<Utc>) -> MindcastResult<Option<CyclePhase>>;

    /// Mean nightly sleep over the last `days` days, if recorded.
    fn average_sleep_hours(&self, user_id: UserId, days: u32) -> MindcastResult<Option<f64>>;

    /// Strategies ordered by effectiveness, best first.
    fn top_coping_strategies(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> MindcastResult<Vec<CopingStrategy>>;
}
