use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::correlation::CorrelationType;
use super::episode::UserId;
use super::forecast::HighRiskPeriod;

/// A correlation proposed by the external AI service.
///
/// Stored separately from engine-detected correlations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCorrelation {
    pub user_id: UserId,
    pub primary_type: String,
    pub related_type: String,
    pub correlation_type: CorrelationType,
    pub strength: f64,
    pub confidence: f64,
    pub time_offset_hours: Option<f64>,
    pub explanation: Option<String>,
    pub discovered_date: DateTime<Utc>,
}

/// Response of the external AI prediction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiPrediction {
    pub predictions: Vec<String>,
    /// Signed adjustment to the overall risk (-1..1).
    pub risk_adjustment: f64,
    pub confidence: f64,
    pub insights: Vec<String>,
    pub high_risk_periods: Vec<HighRiskPeriod>,
}
