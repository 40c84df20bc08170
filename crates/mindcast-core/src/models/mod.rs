mod ai;
mod contribution;
mod correlation;
mod episode;
mod forecast;
mod insight;
mod pattern;
mod profile;
mod tier;
mod window;

pub use ai::{AiCorrelation, AiPrediction};
pub use contribution::{ForecastContribution, TypeConfig};
pub use correlation::{
    pair_key, Correlation, CorrelationFactor, CorrelationFilter, CorrelationId,
    CorrelationRiskFactor, CorrelationType, UpsertOutcome,
};
pub use episode::{DateRange, Episode, EpisodeId, UserId};
pub use forecast::{
    AccessDenied, ActivePattern, BiologicalFactor, CascadeWarning, EpisodeRisk, Forecast,
    ForecastInsight, ForecastKey, ForecastLogEntry, ForecastOutcome, HighRiskPeriod, InsightKind,
    PlanAction, PreventionPlan, RiskLevel,
};
pub use insight::CorrelationInsight;
pub use pattern::{
    CascadePattern, CorrelationPattern, PatternLevel, PeakDay, PeakHour, SeasonalPeak,
    TemporalPatterns, UserPatterns,
};
pub use profile::{CopingStrategy, CyclePhase};
pub use tier::MembershipTier;
pub use window::{Algorithm, ForecastWindow, UpdateFrequency};
