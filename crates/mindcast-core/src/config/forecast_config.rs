use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::MembershipTier;

/// Forecast engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Whether the external AI prediction service may enhance forecasts.
    pub ai_enhancement_enabled: bool,
    pub ai_timeout_ms: u64,
    /// Lowest membership tier allowed to receive AI enhancement.
    pub ai_min_tier: MembershipTier,
    /// Scheduled refreshes cover users with an episode in this many days.
    pub active_user_days: i64,
    /// Weight applied to each correlation risk factor's `risk_increase`.
    pub correlation_nudge_factor: f64,
    /// Weight applied to the AI risk adjustment.
    pub ai_blend_factor: f64,
    pub cache_capacity: u64,
    /// Days without a severe episode before a stability insight is shown.
    pub stability_streak_days: i64,
    pub severe_episode_threshold: f64,
    /// Minimum change in mean risk treated as a trend.
    pub trend_threshold: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            ai_enhancement_enabled: defaults::DEFAULT_AI_ENHANCEMENT_ENABLED,
            ai_timeout_ms: defaults::DEFAULT_AI_TIMEOUT_MS,
            ai_min_tier: MembershipTier::Premium,
            active_user_days: defaults::DEFAULT_ACTIVE_USER_DAYS,
            correlation_nudge_factor: defaults::DEFAULT_CORRELATION_NUDGE_FACTOR,
            ai_blend_factor: defaults::DEFAULT_AI_BLEND_FACTOR,
            cache_capacity: defaults::DEFAULT_FORECAST_CACHE_CAPACITY,
            stability_streak_days: defaults::DEFAULT_STABILITY_STREAK_DAYS,
            severe_episode_threshold: defaults::DEFAULT_SEVERE_EPISODE_THRESHOLD,
            trend_threshold: defaults::DEFAULT_TREND_THRESHOLD,
        }
    }
}
