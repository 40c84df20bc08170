use chrono::{DateTime, Utc};

use crate::errors::MindcastResult;
use crate::models::{DateRange, Episode, EpisodeId, UserId};

/// Append-only log of episode records per user.
pub trait IEpisodeStore: Send + Sync {
    fn get_episode(&self, id: EpisodeId) -> MindcastResult<Option<Episode>>;

    /// Episodes of `user_id` whose date falls within `range`, oldest first.
    fn get_episodes(&self, user_id: UserId, range: DateRange) -> MindcastResult<Vec<Episode>>;

    fn count_episodes(&self, user_id: UserId) -> MindcastResult<u64>;

    /// Users with at least one episode dated at or after `since`.
    fn active_users(&self, since: DateTime<Utc>) -> MindcastResult<Vec<UserId>>;
}
