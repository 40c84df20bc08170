use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::correlation::CorrelationRiskFactor;
use super::episode::UserId;
use super::profile::{CopingStrategy, CyclePhase};
use super::tier::MembershipTier;
use super::window::ForecastWindow;
use crate::constants::{RISK_CRITICAL_FLOOR, RISK_HIGH_FLOOR, RISK_MODERATE_FLOOR};

/// Categorical banding of an overall risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Fixed bands: [0,0.3) low, [0.3,0.6) moderate, [0.6,0.8) high, [0.8,1] critical.
    pub fn from_score(score: f64) -> Self {
        if score >= RISK_CRITICAL_FLOOR {
            Self::Critical
        } else if score >= RISK_HIGH_FLOOR {
            Self::High
        } else if score >= RISK_MODERATE_FLOOR {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Display color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#4caf50",
            Self::Moderate => "#ff9800",
            Self::High => "#f44336",
            Self::Critical => "#9c27b0",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk. Keep up your current routine.",
            Self::Moderate => "Moderate risk. Extra self-care is recommended.",
            Self::High => "High risk. Activate your coping plan early.",
            Self::Critical => "Critical risk. Reach out to your support contacts now.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time interval with elevated risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub risk_score: f64,
    pub reasons: Vec<String>,
}

impl HighRiskPeriod {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        risk_score: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            risk_score: risk_score.clamp(0.0, 1.0),
            reasons: vec![reason.into()],
        }
    }

    /// Intervals that share at least one instant overlap (touching counts).
    pub fn overlaps(&self, other: &HighRiskPeriod) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// One episode type's contribution to a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRisk {
    pub risk_score: f64,
    pub confidence: f64,
    pub weight: f64,
    pub contributing_factors: Vec<String>,
}

/// A pattern that is currently active and influenced the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePattern {
    /// Stable tag, e.g. "immediate_cascade_risk" or "peak_hour".
    pub name: String,
    pub description: String,
    pub risk_contribution: f64,
}

/// A biological signal that influenced the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "factor", rename_all = "snake_case")]
pub enum BiologicalFactor {
    CyclePhase {
        phase: CyclePhase,
        risk_contribution: f64,
    },
    SleepDeprivation {
        average_sleep_hours: f64,
        risk_contribution: f64,
    },
}

impl BiologicalFactor {
    pub fn risk_contribution(&self) -> f64 {
        match self {
            Self::CyclePhase {
                risk_contribution, ..
            }
            | Self::SleepDeprivation {
                risk_contribution, ..
            } => *risk_contribution,
        }
    }
}

/// Warning that the user is mid-way through a known episode sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeWarning {
    pub trigger_type: String,
    pub expected_next: String,
    pub probability: f64,
    pub hours_since_trigger: f64,
    /// Hours until the following episode typically occurs.
    pub expected_in_hours: f64,
    /// Hours left in which prevention can still interrupt the sequence.
    pub prevention_window_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Positive,
    Info,
    Celebration,
}

/// A human-facing observation attached to a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInsight {
    pub kind: InsightKind,
    /// Stable tag, e.g. "risk_trend_rising".
    pub key: String,
    pub title: String,
    pub message: String,
}

impl ForecastInsight {
    pub fn new(
        kind: InsightKind,
        key: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A suggested action in a prevention plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAction {
    pub key: String,
    pub description: String,
}

impl PlanAction {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Risk-level-appropriate actions and daily practices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreventionPlan {
    pub immediate_actions: Vec<PlanAction>,
    pub daily_practices: Vec<PlanAction>,
    /// The user's historically most effective strategies.
    pub coping_strategies: Vec<CopingStrategy>,
}

/// Cache key for a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastKey {
    pub user_id: UserId,
    pub window: ForecastWindow,
}

impl ForecastKey {
    pub fn new(user_id: UserId, window: ForecastWindow) -> Self {
        Self { user_id, window }
    }
}

/// A unified risk assessment for one user and window.
///
/// An empty `episode_risks` map means no contributor had data: the consuming
/// layer must present that as "unknown", not as zero risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecast_id: uuid::Uuid,
    pub user_id: UserId,
    pub window: ForecastWindow,
    pub overall_risk: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
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
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Forecast {
    pub fn key(&self) -> ForecastKey {
        ForecastKey::new(self.user_id, self.window)
    }

    /// Whether any episode type contributed data.
    pub fn has_data(&self) -> bool {
        !self.episode_risks.is_empty()
    }

    /// Fresh while younger than its window's TTL.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Returned instead of a forecast when the user's tier is too low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessDenied {
    pub user_id: UserId,
    pub window: ForecastWindow,
    pub required_tier: MembershipTier,
    pub current_tier: MembershipTier,
    pub message: String,
}

impl AccessDenied {
    pub fn new(
        user_id: UserId,
        window: ForecastWindow,
        required_tier: MembershipTier,
        current_tier: MembershipTier,
    ) -> Self {
        Self {
            user_id,
            window,
            required_tier,
            current_tier,
            message: format!(
                "The {} forecast requires a {} membership or higher.",
                window, required_tier
            ),
        }
    }
}

/// Result of a forecast request. Callers must check for denial before using
/// forecast fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Ready(Box<Forecast>),
    AccessDenied(AccessDenied),
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            Self::Ready(f) => Some(f),
            Self::AccessDenied(_) => None,
        }
    }

    pub fn into_forecast(self) -> Option<Forecast> {
        match self {
            Self::Ready(f) => Some(*f),
            Self::AccessDenied(_) => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }
}

/// Compact record of a built forecast, kept for trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastLogEntry {
    pub user_id: UserId,
    pub window: ForecastWindow,
    pub overall_risk: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub ai_enhanced: bool,
    pub generated_at: DateTime<Utc>,
}

impl From<&Forecast> for ForecastLogEntry {
    fn from(f: &Forecast) -> Self {
        Self {
            user_id: f.user_id,
            window: f.window,
            overall_risk: f.overall_risk,
            confidence: f.confidence,
            risk_level: f.risk_level,
            ai_enhanced: f.ai_enhanced,
            generated_at: f.generated_at,
        }
    }
}
