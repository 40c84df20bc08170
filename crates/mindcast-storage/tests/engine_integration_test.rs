//! The correlation engine running on the SQLite store instead of the
//! in-memory fixtures.

use std::sync::Arc;

use chrono::Duration;
use mindcast_core::config::CorrelationConfig;
use mindcast_core::models::CorrelationFilter;
use mindcast_core::traits::{IClock, ICorrelationStore};
use mindcast_correlation::CorrelationEngine;
use mindcast_storage::SqliteStore;
use test_fixtures::{EpisodeBuilder, FixedClock, RecordingSink, StaticTypeRegistry};

#[test]
fn detection_persists_and_redetection_updates() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let clock = Arc::new(FixedClock::default_start());
    let sink = Arc::new(RecordingSink::new());
    let registry = Arc::new(
        StaticTypeRegistry::new()
            .with_type("overthinking", "Overthinking", 1.0)
            .with_type("anxiety", "Anxiety", 1.0)
            .with_pair("overthinking", "anxiety", 0.7),
    );

    let start = clock.now();
    let trigger = store
        .insert_episode(&EpisodeBuilder::new(1, "overthinking", start).severity(6.0).build())
        .unwrap();
    for i in 1..=6 {
        store
            .insert_episode(
                &EpisodeBuilder::new(1, "anxiety", start + Duration::minutes(5 * i))
                    .severity(6.0)
                    .build(),
            )
            .unwrap();
    }

    let engine = CorrelationEngine::new(
        store.clone(),
        store.clone(),
        registry,
        sink.clone(),
        clock,
        CorrelationConfig::default(),
    );

    let first = engine.detect_correlations(trigger).unwrap();
    assert_eq!(first.inserted, 6);
    let second = engine.detect_correlations(trigger).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 6);
    assert_eq!(second.patterns_emitted, 0);

    let rows = store
        .correlations_for_user(1, &CorrelationFilter::default())
        .unwrap();
    assert_eq!(rows.len(), 6);

    let mut thresholds: Vec<u32> = store
        .patterns_for_user(1)
        .unwrap()
        .iter()
        .map(|p| p.threshold)
        .collect();
    thresholds.sort();
    assert_eq!(thresholds, vec![3, 5]);
    assert_eq!(sink.count("pattern_discovered"), 2);
}
