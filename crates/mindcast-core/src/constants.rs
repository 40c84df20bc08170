/// Mindcast version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pattern type tag written on every correlation-derived pattern row.
pub const CORRELATION_PATTERN_TYPE: &str = "correlation";

/// Service names used in degradation logs and timeout errors.
pub const AI_CORRELATION_SERVICE: &str = "ai_correlation";
pub const AI_PREDICTION_SERVICE: &str = "ai_prediction";

/// Risk level band boundaries (lower bound inclusive).
pub const RISK_MODERATE_FLOOR: f64 = 0.3;
pub const RISK_HIGH_FLOOR: f64 = 0.6;
pub const RISK_CRITICAL_FLOOR: f64 = 0.8;

/// Severity scores are recorded on a 0–10 scale.
pub const MAX_SEVERITY: f64 = 10.0;
