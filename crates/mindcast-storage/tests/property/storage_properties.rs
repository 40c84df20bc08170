//! Property tests for pair-keyed correlation upserts.

use std::collections::{BTreeSet, HashSet};

use chrono::{TimeZone, Utc};
use mindcast_core::models::{pair_key, Correlation, CorrelationFilter, CorrelationType};
use mindcast_core::traits::ICorrelationStore;
use mindcast_storage::SqliteStore;
use proptest::prelude::*;

fn row(a: u64, b: u64, strength: f64) -> Correlation {
    Correlation {
        correlation_id: None,
        user_id: 1,
        primary_episode_id: a,
        primary_type: "a".to_string(),
        related_episode_id: b,
        related_type: "b".to_string(),
        correlation_type: CorrelationType::Concurrent,
        time_offset_hours: 0.0,
        correlation_strength: strength,
        confidence_score: 0.5,
        factors: BTreeSet::new(),
        discovered_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn one_row_per_unordered_pair(
        pairs in prop::collection::vec((1u64..8, 1u64..8, 0.3f64..1.0), 1..25)
    ) {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut distinct = HashSet::new();
        for &(a, b, strength) in &pairs {
            if a == b {
                continue;
            }
            let outcome = store.upsert_correlation(&row(a, b, strength)).unwrap();
            prop_assert_eq!(outcome.is_insert(), distinct.insert(pair_key(a, b)));
        }
        let rows = store.correlations_for_user(1, &CorrelationFilter::default()).unwrap();
        prop_assert_eq!(rows.len(), distinct.len());
        for w in rows.windows(2) {
            prop_assert!(w[0].correlation_strength >= w[1].correlation_strength);
        }
    }
}
