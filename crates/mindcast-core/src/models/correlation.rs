use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::episode::{EpisodeId, UserId};
use crate::errors::{MindcastError, RegistryError};

pub type CorrelationId = u64;

/// Temporal relationship between a primary and a related episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationType {
    Precedes,
    Follows,
    Concurrent,
    Triggers,
    TriggeredBy,
}

impl CorrelationType {
    pub const ALL: [CorrelationType; 5] = [
        Self::Precedes,
        Self::Follows,
        Self::Concurrent,
        Self::Triggers,
        Self::TriggeredBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Precedes => "precedes",
            Self::Follows => "follows",
            Self::Concurrent => "concurrent",
            Self::Triggers => "triggers",
            Self::TriggeredBy => "triggered_by",
        }
    }
}

impl fmt::Display for CorrelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationType {
    type Err = MindcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                RegistryError::UnknownTag {
                    kind: "correlation_type".to_string(),
                    tag: s.to_string(),
                }
                .into()
            })
    }
}

/// Qualitative context shared by both episodes of a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationFactor {
    SameTimeOfDay,
    SameDayOfWeek,
    SameLocation,
    BiologicalFactors,
}

impl CorrelationFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameTimeOfDay => "same_time_of_day",
            Self::SameDayOfWeek => "same_day_of_week",
            Self::SameLocation => "same_location",
            Self::BiologicalFactors => "biological_factors",
        }
    }
}

/// A detected relationship between two episodes of one user.
///
/// At most one row exists per unordered episode pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Assigned by the store; `None` until persisted.
    pub correlation_id: Option<CorrelationId>,
    pub user_id: UserId,
    pub primary_episode_id: EpisodeId,
    pub primary_type: String,
    pub related_episode_id: EpisodeId,
    pub related_type: String,
    pub correlation_type: CorrelationType,
    /// Signed hours from related to primary; negative when primary came first.
    pub time_offset_hours: f64,
    pub correlation_strength: f64,
    pub confidence_score: f64,
    pub factors: BTreeSet<CorrelationFactor>,
    pub discovered_date: DateTime<Utc>,
}

impl Correlation {
    /// Unordered pair key: (lower id, higher id).
    pub fn pair_key(&self) -> (EpisodeId, EpisodeId) {
        pair_key(self.primary_episode_id, self.related_episode_id)
    }

    /// Whether this row links exactly episodes `a` and `b`, in either order.
    pub fn links(&self, a: EpisodeId, b: EpisodeId) -> bool {
        self.pair_key() == pair_key(a, b)
    }
}

/// Order-independent key for an episode pair.
pub fn pair_key(a: EpisodeId, b: EpisodeId) -> (EpisodeId, EpisodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Result of persisting a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(CorrelationId),
    Updated(CorrelationId),
}

impl UpsertOutcome {
    pub fn id(&self) -> CorrelationId {
        match self {
            Self::Inserted(id) | Self::Updated(id) => *id,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Filter for listing a user's correlations.
#[derive(Debug, Clone, Default)]
pub struct CorrelationFilter {
    pub min_strength: Option<f64>,
    pub discovered_since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

/// A correlation group whose primary type currently carries elevated risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRiskFactor {
    pub primary_type: String,
    pub related_type: String,
    pub correlation_type: CorrelationType,
    pub correlation_strength: f64,
    pub occurrences: usize,
    pub average_time_offset_hours: f64,
    /// The primary type's own current risk.
    pub primary_risk: f64,
    /// `primary_risk × correlation_strength`.
    pub risk_increase: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_type_round_trips_through_tags() {
        for t in CorrelationType::ALL {
            assert_eq!(t.as_str().parse::<CorrelationType>().unwrap(), t);
        }
        assert!("sideways".parse::<CorrelationType>().is_err());
    }

    #[test]
    fn pair_key_is_order_independent() {
        assert_eq!(pair_key(7, 3), pair_key(3, 7));
        assert_eq!(pair_key(3, 7), (3, 7));
    }

    #[test]
    fn serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&CorrelationType::TriggeredBy).unwrap();
        assert_eq!(json, "\"triggered_by\"");
    }
}
