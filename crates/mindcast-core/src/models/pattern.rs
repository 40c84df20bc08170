use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::correlation::CorrelationType;
use super::episode::UserId;

/// Maturity of a recurring correlation, keyed by the threshold it crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternLevel {
    Emerging,
    Established,
    Strong,
    Persistent,
}

impl PatternLevel {
    /// Level for the n-th configured threshold (0-based). Thresholds past the
    /// fourth all count as persistent.
    pub fn from_threshold_index(index: usize) -> Self {
        match index {
            0 => Self::Emerging,
            1 => Self::Established,
            2 => Self::Strong,
            _ => Self::Persistent,
        }
    }

    /// Highest level reached by a group of `count` correlations.
    pub fn for_count(count: usize, thresholds: &[u32]) -> Option<Self> {
        thresholds
            .iter()
            .rposition(|&t| count >= t as usize)
            .map(Self::from_threshold_index)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emerging => "emerging",
            Self::Established => "established",
            Self::Strong => "strong",
            Self::Persistent => "persistent",
        }
    }
}

impl fmt::Display for PatternLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring correlation between the same two types in the same direction.
///
/// One row per (user, subtype, correlation type, threshold): each threshold
/// fires exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPattern {
    pub pattern_id: Option<u64>,
    pub user_id: UserId,
    /// Always "correlation" for rows written by the correlation engine.
    pub pattern_type: String,
    /// `{primary_type}_to_{related_type}`.
    pub pattern_subtype: String,
    pub primary_type: String,
    pub related_type: String,
    pub correlation_type: CorrelationType,
    pub level: PatternLevel,
    pub threshold: u32,
    pub occurrence_count: u32,
    pub average_strength: f64,
    pub average_time_offset: f64,
    pub confidence_score: f64,
    pub first_detected: DateTime<Utc>,
    pub last_detected: DateTime<Utc>,
}

impl CorrelationPattern {
    pub fn subtype_for(primary_type: &str, related_type: &str) -> String {
        format!("{primary_type}_to_{related_type}")
    }
}

/// Pattern summaries supplied by the external pattern detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPatterns {
    pub temporal: TemporalPatterns,
    pub cascades: Vec<CascadePattern>,
    pub seasonal: Vec<SeasonalPeak>,
}

/// Hours of day and days of week where episodes cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalPatterns {
    pub peak_hours: Vec<PeakHour>,
    pub peak_days: Vec<PeakDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakHour {
    /// Hour of day (0–23).
    pub hour: u32,
    /// Share of the user's episodes logged in this hour (0–100).
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakDay {
    /// Day of week (Mon=1 .. Sun=7, ISO).
    pub day_of_week: u32,
    /// Share of the user's episodes logged on this day (0–100).
    pub percentage: f64,
}

/// A known sequence where one episode type tends to be followed by another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadePattern {
    pub trigger_type: String,
    pub following_type: String,
    /// Probability the following type occurs after the trigger (0–1).
    pub probability: f64,
    pub average_delay_hours: f64,
    pub occurrences: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPeak {
    /// Month (1–12).
    pub month: u32,
    /// Share of the user's episodes logged in this month (0–100).
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_for_count_picks_highest_crossed_threshold() {
        let thresholds = [3, 5, 10, 20];
        assert_eq!(PatternLevel::for_count(2, &thresholds), None);
        assert_eq!(PatternLevel::for_count(3, &thresholds), Some(PatternLevel::Emerging));
        assert_eq!(PatternLevel::for_count(9, &thresholds), Some(PatternLevel::Established));
        assert_eq!(PatternLevel::for_count(10, &thresholds), Some(PatternLevel::Strong));
        assert_eq!(PatternLevel::for_count(25, &thresholds), Some(PatternLevel::Persistent));
    }

    #[test]
    fn subtype_joins_types() {
        assert_eq!(
            CorrelationPattern::subtype_for("overthinking", "anxiety"),
            "overthinking_to_anxiety"
        );
    }
}
