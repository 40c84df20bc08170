//! End-to-end runs over the JSON scenarios in /test-fixtures/scenarios.

mod common;

use std::sync::Arc;

use common::Harness;
use mindcast_core::config::CorrelationConfig;
use mindcast_core::models::{CorrelationType, ForecastWindow, PatternLevel};
use mindcast_core::registry::ContributorRegistry;
use mindcast_correlation::SkipReason;
use test_fixtures::{FixedContributor, Scenario};

fn load(name: &str) -> (Scenario, Harness) {
    let scenario = Scenario::load(name);
    let h = Harness::new(scenario.registry());
    for e in scenario.episodes() {
        h.episodes.record(e);
    }
    h.clock.set(scenario.end());
    (scenario, h)
}

#[test]
fn repeated_concurrent_episodes_become_an_established_pattern() {
    let (scenario, h) = load("concurrent_overthinking_anxiety");
    let engine = h.engine(CorrelationConfig::default());
    engine
        .detect_for_user(scenario.user_id, scenario.start)
        .unwrap();

    let concurrent: Vec<_> = h
        .store
        .correlations()
        .into_iter()
        .filter(|c| c.correlation_type == CorrelationType::Concurrent)
        .collect();
    assert_eq!(
        concurrent.len() as u64,
        scenario.expected["concurrent_rows"].as_u64().unwrap()
    );
    assert!(concurrent.iter().all(|c| c.primary_type == "overthinking"));

    let insights = engine.get_user_correlations(scenario.user_id, 10).unwrap();
    let together = insights
        .iter()
        .find(|i| i.correlation_type == CorrelationType::Concurrent)
        .unwrap();
    assert_eq!(together.occurrences, 5);
    assert_eq!(together.pattern_level, Some(PatternLevel::Established));
    assert!(together.title.contains("Overthinking and Anxiety"));
    assert!(insights
        .windows(2)
        .all(|w| w[0].average_strength * w[0].confidence >= w[1].average_strength * w[1].confidence));

    let levels: Vec<PatternLevel> = h
        .store
        .patterns()
        .into_iter()
        .filter(|p| {
            p.pattern_subtype == "overthinking_to_anxiety"
                && p.correlation_type == CorrelationType::Concurrent
        })
        .map(|p| p.level)
        .collect();
    assert_eq!(levels, vec![PatternLevel::Emerging, PatternLevel::Established]);
}

#[test]
fn risk_factors_need_a_risky_primary_type() {
    let (scenario, h) = load("concurrent_overthinking_anxiety");

    let risky = ContributorRegistry::new()
        .with(Arc::new(FixedContributor::new("overthinking", 0.8, 0.7, 1.0)))
        .unwrap();
    let engine = h
        .engine(CorrelationConfig::default())
        .with_contributors(risky)
        .unwrap();
    engine
        .detect_for_user(scenario.user_id, scenario.start)
        .unwrap();

    let factors = engine
        .get_correlation_risk_factors(scenario.user_id, ForecastWindow::Hours24)
        .unwrap();
    assert!(!factors.is_empty());
    assert!(factors.iter().all(|f| f.primary_type == "overthinking"));
    assert!(factors.iter().all(|f| f.occurrences >= 3));
    let concurrent = factors
        .iter()
        .find(|f| f.correlation_type == CorrelationType::Concurrent)
        .unwrap();
    assert!((concurrent.risk_increase - 0.8 * concurrent.correlation_strength).abs() < 1e-9);

    let calm = ContributorRegistry::new()
        .with(Arc::new(FixedContributor::new("overthinking", 0.4, 0.7, 1.0)))
        .unwrap();
    let calm_engine = h
        .engine(CorrelationConfig::default())
        .with_contributors(calm)
        .unwrap();
    assert!(calm_engine
        .get_correlation_risk_factors(scenario.user_id, ForecastWindow::Hours24)
        .unwrap()
        .is_empty());
}

#[test]
fn sparse_history_skips_the_whole_user() {
    let (scenario, h) = load("sparse_history");
    let summary = h
        .engine(CorrelationConfig::default())
        .detect_for_user(scenario.user_id, scenario.start)
        .unwrap();
    assert_eq!(
        summary.skipped,
        Some(SkipReason::InsufficientEpisodes { logged: 3, required: 5 })
    );
    assert!(h.store.correlations().is_empty());
}

#[test]
fn daily_maintenance_is_idempotent() {
    let (scenario, h) = load("concurrent_overthinking_anxiety");
    let engine = h.engine(CorrelationConfig::default());

    let first = engine.run_daily_maintenance().unwrap();
    assert_eq!(first.users_scanned, 1);
    assert_eq!(first.users_failed, 0);
    assert_eq!(first.episodes_rescanned, scenario.episodes.len());
    assert!(first.patterns_emitted >= 2);
    let rows = h.store.correlations().len();
    let patterns = h.store.patterns().len();

    let second = engine.run_daily_maintenance().unwrap();
    assert_eq!(second.patterns_emitted, 0);
    assert_eq!(h.store.correlations().len(), rows);
    assert_eq!(h.store.patterns().len(), patterns);
    assert!(!second.already_running);
}
