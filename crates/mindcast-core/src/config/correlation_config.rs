use serde::{Deserialize, Serialize};

use super::defaults;

/// Correlation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Users with fewer logged episodes are skipped entirely.
    pub min_episodes_for_correlation: u64,
    /// Days before/after the triggering episode scanned for partners.
    pub correlation_window_days: i64,
    /// Correlations below this strength are not persisted.
    pub min_correlation_strength: f64,
    /// Group sizes at which a pattern row is emitted, ascending.
    pub pattern_thresholds: Vec<u32>,
    /// Whether the external AI correlation service is consulted.
    pub ai_enabled: bool,
    pub ai_window_days: u32,
    /// AI correlations below this confidence are discarded.
    pub ai_min_confidence: f64,
    pub ai_timeout_ms: u64,
    /// Cleanup deletes rows weaker than this...
    pub cleanup_max_strength: f64,
    /// ...and older than this many days.
    pub cleanup_age_days: i64,
    pub risk_factor_min_strength: f64,
    pub risk_factor_lookback_days: i64,
    pub risk_factor_min_occurrences: usize,
    /// A risk factor is emitted only when the primary type's own risk exceeds this.
    pub risk_factor_min_primary_risk: f64,
    /// Maintenance re-scans users with an episode in this many days...
    pub maintenance_active_days: i64,
    /// ...over their episodes from this many days.
    pub maintenance_rescan_days: i64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_episodes_for_correlation: defaults::DEFAULT_MIN_EPISODES_FOR_CORRELATION,
            correlation_window_days: defaults::DEFAULT_CORRELATION_WINDOW_DAYS,
            min_correlation_strength: defaults::DEFAULT_MIN_CORRELATION_STRENGTH,
            pattern_thresholds: defaults::DEFAULT_PATTERN_THRESHOLDS.to_vec(),
            ai_enabled: defaults::DEFAULT_CORRELATION_AI_ENABLED,
            ai_window_days: defaults::DEFAULT_AI_WINDOW_DAYS,
            ai_min_confidence: defaults::DEFAULT_AI_MIN_CONFIDENCE,
            ai_timeout_ms: defaults::DEFAULT_AI_TIMEOUT_MS,
            cleanup_max_strength: defaults::DEFAULT_CLEANUP_MAX_STRENGTH,
            cleanup_age_days: defaults::DEFAULT_CLEANUP_AGE_DAYS,
            risk_factor_min_strength: defaults::DEFAULT_RISK_FACTOR_MIN_STRENGTH,
            risk_factor_lookback_days: defaults::DEFAULT_RISK_FACTOR_LOOKBACK_DAYS,
            risk_factor_min_occurrences: defaults::DEFAULT_RISK_FACTOR_MIN_OCCURRENCES,
            risk_factor_min_primary_risk: defaults::DEFAULT_RISK_FACTOR_MIN_PRIMARY_RISK,
            maintenance_active_days: defaults::DEFAULT_MAINTENANCE_ACTIVE_DAYS,
            maintenance_rescan_days: defaults::DEFAULT_MAINTENANCE_RESCAN_DAYS,
        }
    }
}
