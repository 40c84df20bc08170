use serde::{Deserialize, Serialize};

use super::correlation::CorrelationType;
use super::pattern::PatternLevel;

/// A summarized correlation group turned into a user-facing insight.
///
/// Strength and offsets stay numeric; wording of strength and time spans is
/// left to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationInsight {
    pub primary_type: String,
    pub related_type: String,
    pub correlation_type: CorrelationType,
    pub occurrences: usize,
    pub average_strength: f64,
    /// Mean absolute time offset in hours.
    pub average_time_offset_hours: f64,
    pub pattern_level: Option<PatternLevel>,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    pub confidence: f64,
}

impl CorrelationInsight {
    /// Sort key: strength weighted by insight confidence.
    pub fn rank(&self) -> f64 {
        self.average_strength * self.confidence
    }
}
