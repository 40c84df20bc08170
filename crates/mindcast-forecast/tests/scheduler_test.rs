mod common;

use std::sync::Arc;

use chrono::Duration;

use common::Harness;
use mindcast_core::config::ForecastConfig;
use mindcast_core::models::MembershipTier;
use mindcast_core::traits::IClock;
use mindcast_forecast::{ForecastEngine, RefreshReport};
use test_fixtures::{EpisodeBuilder, FixedContributor, StaticMembership, StaticProfile};

/// User 1 on basic, user 2 with no membership, user 3 on platinum, user 4
/// inactive for two months.
fn setup() -> (Harness, ForecastEngine) {
    let membership = StaticMembership::new()
        .grant(1, MembershipTier::Basic)
        .grant(3, MembershipTier::Platinum)
        .grant(4, MembershipTier::Platinum);
    let h = Harness::new(membership, StaticProfile::tracking(&["anxiety"]));
    let now = h.clock.now();
    for user in [1, 2, 3] {
        h.episodes
            .record(EpisodeBuilder::new(user, "anxiety", now - Duration::days(2)).build());
    }
    h.episodes
        .record(EpisodeBuilder::new(4, "anxiety", now - Duration::days(60)).build());

    let engine = h.engine(
        Harness::contributors(vec![Arc::new(FixedContributor::new("anxiety", 0.4, 0.6, 1.0))]),
        ForecastConfig::default(),
    );
    (h, engine)
}

#[test]
fn hourly_refresh_covers_active_entitled_users() {
    let (h, engine) = setup();
    let report = engine.run_hourly_refresh().unwrap();
    assert_eq!(
        report,
        RefreshReport {
            users_scanned: 3,
            generated: 2,
            denied: 1,
            failed: 0,
        }
    );
    assert_eq!(h.history.entries_for(1).len(), 1);
    assert!(h.history.entries_for(4).is_empty());
}

#[test]
fn daily_refresh_runs_daily_and_six_hour_windows() {
    let (_h, engine) = setup();
    let report = engine.run_daily_refresh().unwrap();
    // 7_day: user 3 only. 3_day: users 1 and 3.
    assert_eq!(report.generated, 3);
    assert_eq!(report.denied, 3);
    assert_eq!(report.users_scanned, 3);
}

#[test]
fn weekly_refresh_is_platinum_only() {
    let (_h, engine) = setup();
    let report = engine.run_weekly_refresh().unwrap();
    assert_eq!(report.generated, 1);
    assert_eq!(report.denied, 2);
}

#[test]
fn refresh_rebuilds_even_when_cached() {
    let (h, engine) = setup();
    engine.run_hourly_refresh().unwrap();
    engine.run_hourly_refresh().unwrap();
    assert_eq!(h.history.entries_for(3).len(), 2);
}

#[test]
fn store_outage_fails_the_sweep() {
    let (h, engine) = setup();
    h.episodes.fail_all();
    assert!(engine.run_hourly_refresh().is_err());
}
