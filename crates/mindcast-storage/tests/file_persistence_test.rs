//! File-backed store: restart survival, WAL mode, and read-pool visibility.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use chrono::{Duration, TimeZone, Utc};
use mindcast_core::models::{
    Correlation, CorrelationFilter, CorrelationType, DateRange,
};
use mindcast_core::traits::{ICorrelationStore, IEpisodeStore};
use mindcast_storage::migrations::LATEST_VERSION;
use mindcast_storage::SqliteStore;
use test_fixtures::EpisodeBuilder;

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mindcast.db");
    let at = Utc.with_ymd_and_hms(2026, 5, 1, 22, 15, 0).unwrap();

    let (a, b) = {
        let store = SqliteStore::open(&path).unwrap();
        let a = store
            .insert_episode(&EpisodeBuilder::new(1, "overthinking", at).build())
            .unwrap();
        let b = store
            .insert_episode(&EpisodeBuilder::new(1, "anxiety", at + Duration::hours(2)).build())
            .unwrap();
        store
            .upsert_correlation(&Correlation {
                correlation_id: None,
                user_id: 1,
                primary_episode_id: a,
                primary_type: "overthinking".to_string(),
                related_episode_id: b,
                related_type: "anxiety".to_string(),
                correlation_type: CorrelationType::Precedes,
                time_offset_hours: -2.0,
                correlation_strength: 0.66,
                confidence_score: 0.3,
                factors: BTreeSet::new(),
                discovered_date: at,
            })
            .unwrap();
        (a, b)
    };

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.schema_version().unwrap(), LATEST_VERSION);
    let episodes = reopened
        .get_episodes(1, DateRange::around(at, Duration::days(1)))
        .unwrap();
    assert_eq!(episodes.len(), 2);
    let row = reopened.find_by_pair(1, a, b).unwrap().unwrap();
    assert_eq!(row.correlation_strength, 0.66);
}

#[test]
fn file_store_runs_in_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("wal.db")).unwrap();
    assert_eq!(store.connections().journal_mode().unwrap(), "wal");
    assert_eq!(store.connections().reader_count(), 4);
}

#[test]
fn readers_see_committed_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(&dir.path().join("readers.db")).unwrap());
    let at = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();

    let writers: Vec<_> = (0..4u64)
        .map(|user| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10 {
                    store
                        .insert_episode(
                            &EpisodeBuilder::new(user + 1, "stress", at + Duration::minutes(i))
                                .build(),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in writers {
        handle.join().unwrap();
    }

    for user in 1..=4 {
        assert_eq!(store.count_episodes(user).unwrap(), 10);
    }
    assert_eq!(store.active_users(at).unwrap(), vec![1, 2, 3, 4]);
    assert!(store
        .correlations_for_user(1, &CorrelationFilter::default())
        .unwrap()
        .is_empty());
}
