//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

use mindcast_core::models::{
    Correlation, CorrelationPattern, Forecast, ForecastWindow, MembershipTier, UserId,
};

/// Log a persisted correlation.
pub fn correlation_saved(correlation: &Correlation, inserted: bool) {
    tracing::debug!(
        event = "correlation_saved",
        user_id = correlation.user_id,
        primary_episode_id = correlation.primary_episode_id,
        related_episode_id = correlation.related_episode_id,
        correlation_type = %correlation.correlation_type,
        strength = correlation.correlation_strength,
        confidence = correlation.confidence_score,
        inserted = inserted,
        "correlation saved"
    );
}

/// Log a pattern crossing a threshold.
pub fn pattern_discovered(pattern: &CorrelationPattern) {
    tracing::info!(
        event = "pattern_discovered",
        user_id = pattern.user_id,
        subtype = %pattern.pattern_subtype,
        correlation_type = %pattern.correlation_type,
        level = %pattern.level,
        occurrences = pattern.occurrence_count,
        "pattern discovered"
    );
}

/// Log the compact outcome of a built forecast.
pub fn forecast_generated(forecast: &Forecast) {
    tracing::info!(
        event = "forecast_generated",
        user_id = forecast.user_id,
        window = %forecast.window,
        overall_risk = forecast.overall_risk,
        confidence = forecast.confidence,
        risk_level = %forecast.risk_level,
        ai_enhanced = forecast.ai_enhanced,
        has_data = forecast.has_data(),
        "forecast generated"
    );
}

/// Log a forecast request refused for membership tier.
pub fn forecast_access_denied(
    user_id: UserId,
    window: ForecastWindow,
    required: MembershipTier,
    current: MembershipTier,
) {
    tracing::info!(
        event = "forecast_access_denied",
        user_id = user_id,
        window = %window,
        required_tier = %required,
        current_tier = %current,
        "forecast access denied"
    );
}

/// Log an absorbed failure of an optional dependency.
pub fn service_degraded(service: &str, user_id: UserId, failure: &str) {
    tracing::warn!(
        event = "service_degraded",
        service = %service,
        user_id = user_id,
        failure = %failure,
        "external service failed, continuing without it"
    );
}

/// Log the end of a correlation maintenance run.
pub fn maintenance_completed(users: usize, episodes_rescanned: usize, deleted: u64) {
    tracing::info!(
        event = "maintenance_completed",
        users = users,
        episodes_rescanned = episodes_rescanned,
        deleted = deleted,
        "correlation maintenance completed"
    );
}

/// Log the end of a scheduled forecast refresh.
pub fn refresh_completed(cadence: &str, generated: usize, denied: usize, failed: usize) {
    tracing::info!(
        event = "refresh_completed",
        cadence = %cadence,
        generated = generated,
        denied = denied,
        failed = failed,
        "forecast refresh completed"
    );
}
