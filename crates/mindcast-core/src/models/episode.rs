use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type EpisodeId = u64;

/// One user-logged occurrence of a tracked episode type.
///
/// Owned by the episode store; the engines only read it and trust the store
/// to keep `severity_score` within [0, 10].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_id: EpisodeId,
    pub user_id: UserId,
    /// Tag from an open set, e.g. "overthinking", "anxiety".
    pub episode_type: String,
    pub episode_date: DateTime<Utc>,
    pub severity_score: f64,
    pub trigger_category: Option<String>,
    pub location: Option<String>,
    pub has_biological_factors: bool,
}

/// Inclusive time range used for episode queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// `span` before and after `center`.
    pub fn around(center: DateTime<Utc>, span: Duration) -> Self {
        Self {
            from: center - span,
            to: center + span,
        }
    }

    /// From `span` ago up to `now`.
    pub fn trailing(now: DateTime<Utc>, span: Duration) -> Self {
        Self {
            from: now - span,
            to: now,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && at <= self.to
    }
}
