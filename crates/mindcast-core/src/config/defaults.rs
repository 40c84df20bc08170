// Single source of truth for all default values.

// --- Correlation ---
pub const DEFAULT_MIN_EPISODES_FOR_CORRELATION: u64 = 5;
pub const DEFAULT_CORRELATION_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_MIN_CORRELATION_STRENGTH: f64 = 0.3;
pub const DEFAULT_PATTERN_THRESHOLDS: [u32; 4] = [3, 5, 10, 20];
pub const DEFAULT_CORRELATION_AI_ENABLED: bool = false;
pub const DEFAULT_AI_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_AI_MIN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_AI_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CLEANUP_MAX_STRENGTH: f64 = 0.4;
pub const DEFAULT_CLEANUP_AGE_DAYS: i64 = 180;
pub const DEFAULT_RISK_FACTOR_MIN_STRENGTH: f64 = 0.5;
pub const DEFAULT_RISK_FACTOR_LOOKBACK_DAYS: i64 = 90;
pub const DEFAULT_RISK_FACTOR_MIN_OCCURRENCES: usize = 3;
pub const DEFAULT_RISK_FACTOR_MIN_PRIMARY_RISK: f64 = 0.5;
pub const DEFAULT_MAINTENANCE_ACTIVE_DAYS: i64 = 7;
pub const DEFAULT_MAINTENANCE_RESCAN_DAYS: i64 = 30;

// --- Forecast ---
pub const DEFAULT_AI_ENHANCEMENT_ENABLED: bool = false;
pub const DEFAULT_ACTIVE_USER_DAYS: i64 = 30;
pub const DEFAULT_CORRELATION_NUDGE_FACTOR: f64 = 0.1;
pub const DEFAULT_AI_BLEND_FACTOR: f64 = 0.2;
pub const DEFAULT_FORECAST_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_STABILITY_STREAK_DAYS: i64 = 7;
pub const DEFAULT_SEVERE_EPISODE_THRESHOLD: f64 = 7.0;
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.1;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_FORECAST_LOG_CAPACITY: usize = 500;
