//! Forecast payloads for the external API. Field names are stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mindcast_core::models::{
    AccessDenied, ActivePattern, BiologicalFactor, CascadeWarning, CorrelationRiskFactor,
    EpisodeRisk, Forecast, ForecastInsight, HighRiskPeriod, MembershipTier, PreventionPlan,
    RiskLevel, UserId,
};

/// Either a forecast or the reason it was withheld.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastApiResponse {
    Ok(Box<ForecastApiData>),
    AccessDenied {
        required_tier: MembershipTier,
        current_tier: MembershipTier,
        message: String,
    },
}

impl From<AccessDenied> for ForecastApiResponse {
    fn from(d: AccessDenied) -> Self {
        Self::AccessDenied {
            required_tier: d.required_tier,
            current_tier: d.current_tier,
            message: d.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastApiData {
    pub forecast_id: String,
    pub user_id: UserId,
    pub window: String,
    /// `false` means no episode type had data: show "unknown", not zero.
    pub has_data: bool,
    pub overall_risk: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub risk_color: String,
    pub risk_description: String,
    pub episode_risks: BTreeMap<String, EpisodeRisk>,
    pub high_risk_periods: Vec<HighRiskPeriod>,
    pub correlation_risks: Vec<CorrelationRiskFactor>,
    pub active_patterns: Vec<ActivePattern>,
    pub biological_factors: Vec<BiologicalFactor>,
    pub cascade_warning: Option<CascadeWarning>,
    pub prevention_plan: PreventionPlan,
    pub insights: Vec<ForecastInsight>,
    pub recommendations: Vec<String>,
    pub ai_enhanced: bool,
    pub ai_predictions: Vec<String>,
    /// RFC 3339.
    pub generated_at: String,
    pub expires_at: String,
}

impl From<&Forecast> for ForecastApiData {
    fn from(f: &Forecast) -> Self {
        Self {
            forecast_id: f.forecast_id.to_string(),
            user_id: f.user_id,
            window: f.window.as_str().to_string(),
            has_data: f.has_data(),
            overall_risk: f.overall_risk,
            confidence: f.confidence,
            risk_level: f.risk_level,
            risk_color: f.risk_level.color().to_string(),
            risk_description: f.risk_level.description().to_string(),
            episode_risks: f.episode_risks.clone(),
            high_risk_periods: f.high_risk_periods.clone(),
            correlation_risks: f.correlation_risks.clone(),
            active_patterns: f.active_patterns.clone(),
            biological_factors: f.biological_factors.clone(),
            cascade_warning: f.cascade_warning.clone(),
            prevention_plan: f.prevention_plan.clone(),
            insights: f.insights.clone(),
            recommendations: f.recommendations.clone(),
            ai_enhanced: f.ai_enhanced,
            ai_predictions: f.ai_predictions.clone(),
            generated_at: f.generated_at.to_rfc3339(),
            expires_at: f.expires_at.to_rfc3339(),
        }
    }
}
