//! Named forecast algorithms and their registry.
//!
//! Each window lists the algorithms it applies, in order. Every algorithm
//! follows the same contract: read the context, adjust the draft's risk
//! additively, and append patterns, factors, periods, or insights.

mod biological;
mod cascade;
mod correlation;
mod immediate;
mod seasonal;
mod temporal;
mod trends;
mod weekly;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use mindcast_core::errors::{MindcastResult, RegistryError};
use mindcast_core::models::{
    ActivePattern, Algorithm, BiologicalFactor, CascadeWarning, CorrelationRiskFactor, Episode,
    ForecastInsight, ForecastWindow, HighRiskPeriod, UserId, UserPatterns,
};
use mindcast_core::traits::IUserProfile;

pub use biological::BiologicalCycles;
pub use cascade::CascadePrediction;
pub use correlation::CorrelationRisks;
pub use immediate::ImmediateRisk;
pub use seasonal::SeasonalPatterns;
pub use temporal::TemporalPatterns;
pub use trends::LongTermTrends;
pub use weekly::WeeklyPatterns;

/// Days of episode history loaded for one build.
pub const HISTORY_LOOKBACK_DAYS: i64 = 60;

/// Read-only inputs shared by every algorithm in one build.
pub struct AlgorithmContext<'a> {
    pub user_id: UserId,
    pub window: ForecastWindow,
    pub now: DateTime<Utc>,
    /// The user's recent episodes, oldest first.
    pub episodes: &'a [Episode],
    pub patterns: &'a UserPatterns,
    pub correlation_risks: &'a [CorrelationRiskFactor],
    pub profile: &'a dyn IUserProfile,
}

impl AlgorithmContext<'_> {
    pub fn horizon_end(&self) -> DateTime<Utc> {
        self.now + self.window.horizon()
    }

    pub fn last_episode(&self) -> Option<&Episode> {
        self.episodes.iter().max_by_key(|e| e.episode_date)
    }
}

/// The part of a forecast algorithms may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastDraft {
    pub overall_risk: f64,
    pub active_patterns: Vec<ActivePattern>,
    pub biological_factors: Vec<BiologicalFactor>,
    pub cascade_warning: Option<CascadeWarning>,
    pub high_risk_periods: Vec<HighRiskPeriod>,
    pub insights: Vec<ForecastInsight>,
}

impl ForecastDraft {
    pub fn starting_at(risk: f64) -> Self {
        Self {
            overall_risk: risk.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// Add to the overall risk, keeping it within [0, 1].
    pub fn add_risk(&mut self, delta: f64) {
        if delta.is_finite() {
            self.overall_risk = (self.overall_risk + delta).clamp(0.0, 1.0);
        }
    }

    pub fn activate(&mut self, name: &str, description: impl Into<String>, contribution: f64) {
        self.add_risk(contribution);
        self.active_patterns.push(ActivePattern {
            name: name.to_string(),
            description: description.into(),
            risk_contribution: contribution,
        });
    }
}

/// One named algorithm.
pub trait ForecastAlgorithm: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()>;
}

/// Algorithm tag → handler, checked against every window at construction.
pub struct AlgorithmRegistry {
    handlers: HashMap<Algorithm, Box<dyn ForecastAlgorithm>>,
}

impl AlgorithmRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// All eight built-in algorithms.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ImmediateRisk));
        registry.register(Box::new(TemporalPatterns));
        registry.register(Box::new(BiologicalCycles));
        registry.register(Box::new(CascadePrediction));
        registry.register(Box::new(WeeklyPatterns));
        registry.register(Box::new(CorrelationRisks));
        registry.register(Box::new(SeasonalPatterns));
        registry.register(Box::new(LongTermTrends));
        registry
    }

    /// Add or replace the handler for its algorithm tag.
    pub fn register(&mut self, handler: Box<dyn ForecastAlgorithm>) {
        self.handlers.insert(handler.algorithm(), handler);
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&dyn ForecastAlgorithm> {
        self.handlers.get(&algorithm).map(|h| h.as_ref())
    }

    /// Every algorithm named by any window must have a handler.
    pub fn validate(&self) -> MindcastResult<()> {
        for window in ForecastWindow::ALL {
            for algorithm in window.algorithms() {
                if !self.handlers.contains_key(algorithm) {
                    return Err(RegistryError::MissingAlgorithm {
                        algorithm: algorithm.to_string(),
                        window: window.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(|a| a.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("AlgorithmRegistry")
            .field("handlers", &names)
            .finish()
    }
}
