use chrono::{Duration, TimeZone, Utc};
use mindcast_core::config::ObservabilityConfig;
use mindcast_core::models::{ForecastLogEntry, ForecastWindow, RiskLevel};
use mindcast_core::traits::IForecastHistory;
use mindcast_observability::ForecastLog;

fn entry(user_id: u64, window: ForecastWindow, risk: f64, hours_ago: i64) -> ForecastLogEntry {
    let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
    ForecastLogEntry {
        user_id,
        window,
        overall_risk: risk,
        confidence: 0.6,
        risk_level: RiskLevel::from_score(risk),
        ai_enhanced: false,
        generated_at: now - Duration::hours(hours_ago),
    }
}

#[test]
fn entries_since_filters_by_window_and_time() {
    let log = ForecastLog::new();
    log.record(entry(1, ForecastWindow::Hours24, 0.2, 200));
    log.record(entry(1, ForecastWindow::Hours24, 0.4, 48));
    log.record(entry(1, ForecastWindow::Days7, 0.9, 24));
    log.record(entry(2, ForecastWindow::Hours24, 0.7, 1));

    let since = Utc.with_ymd_and_hms(2026, 5, 3, 12, 0, 0).unwrap();
    let recent = log.entries_since(1, ForecastWindow::Hours24, since);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].overall_risk, 0.4);
    assert_eq!(log.mean_risk_since(1, ForecastWindow::Days7, since), Some(0.9));
    assert_eq!(log.mean_risk_since(3, ForecastWindow::Days7, since), None);
}

#[test]
fn per_user_capacity_drops_oldest() {
    let config = ObservabilityConfig {
        forecast_log_capacity: 3,
        ..Default::default()
    };
    let log = ForecastLog::from_config(&config);
    for i in 0..5 {
        log.record(entry(1, ForecastWindow::Hours24, i as f64 / 10.0, 10 - i));
    }
    let kept = log.entries_for(1);
    assert_eq!(kept.len(), 3);
    assert_eq!(kept[0].overall_risk, 0.2);
    assert_eq!(log.len(), 3);
}

#[test]
fn init_tracing_is_idempotent() {
    mindcast_observability::init_tracing_with_filter("debug");
    mindcast_observability::init_tracing();
    mindcast_observability::init_tracing_from_config(&Default::default());
    mindcast_observability::tracing_setup::events::service_degraded("ai_prediction", 1, "timeout");
}
