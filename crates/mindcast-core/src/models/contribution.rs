use serde::{Deserialize, Serialize};

use super::forecast::HighRiskPeriod;

/// Display and weighting configuration for an episode type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConfig {
    pub display_name: String,
    pub color: String,
    pub weight: f64,
}

/// An episode-type handler's contribution to a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastContribution {
    pub risk_score: f64,
    pub confidence: f64,
    pub weight: f64,
    pub contributing_factors: Vec<String>,
    pub high_risk_periods: Vec<HighRiskPeriod>,
    pub recommendations: Vec<String>,
}

impl ForecastContribution {
    /// A contribution with no periods, factors, or recommendations.
    pub fn scored(risk_score: f64, confidence: f64, weight: f64) -> Self {
        Self {
            risk_score,
            confidence,
            weight,
            contributing_factors: Vec::new(),
            high_risk_periods: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}
