use chrono::{Duration, TimeZone, Utc};
use mindcast_core::models::{CorrelationType, Episode};
use mindcast_correlation::scoring::{classify, PairHistory};
use mindcast_correlation::score_pair;
use proptest::prelude::*;

fn episode(id: u64, minutes: i64, severity: f64, trigger: Option<&str>) -> Episode {
    Episode {
        episode_id: id,
        user_id: 1,
        episode_type: if id == 1 { "overthinking" } else { "anxiety" }.to_string(),
        episode_date: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
            + Duration::minutes(minutes),
        severity_score: severity,
        trigger_category: trigger.map(str::to_string),
        location: None,
        has_biological_factors: false,
    }
}

proptest! {
    #[test]
    fn correlation_type_matches_offset_bucket(offset in -2000.0f64..2000.0) {
        let kind = classify(offset);
        let abs = offset.abs();
        let expected = if abs <= 4.0 {
            CorrelationType::Concurrent
        } else if offset < 0.0 && abs <= 24.0 {
            CorrelationType::Triggers
        } else if offset < 0.0 {
            CorrelationType::Precedes
        } else if abs <= 24.0 {
            CorrelationType::TriggeredBy
        } else {
            CorrelationType::Follows
        };
        prop_assert_eq!(kind, expected);
    }

    #[test]
    fn scored_type_agrees_with_episode_order(minutes in -100_000i64..100_000) {
        let a = episode(1, 0, 5.0, None);
        let b = episode(2, minutes, 5.0, None);
        let c = score_pair(&a, &b, 0.5, &PairHistory::new(), a.episode_date);
        let primary_first = b.episode_date > a.episode_date;
        match c.correlation_type {
            CorrelationType::Triggers | CorrelationType::Precedes => prop_assert!(primary_first),
            CorrelationType::TriggeredBy | CorrelationType::Follows => prop_assert!(!primary_first),
            CorrelationType::Concurrent => prop_assert!(c.time_offset_hours.abs() <= 4.0),
        }
    }

    #[test]
    fn strength_and_confidence_stay_in_unit_range(
        minutes in -60_000i64..60_000,
        sev_a in 0.0f64..=10.0,
        sev_b in 0.0f64..=10.0,
        base in -5.0f64..5.0,
        history in prop::collection::vec(0.0f64..=1.0, 0..30),
        shared in any::<bool>(),
    ) {
        let trigger = if shared { Some("work") } else { None };
        let a = episode(1, 0, sev_a, trigger);
        let b = episode(2, minutes, sev_b, trigger);
        let mut h = PairHistory::new();
        for s in history {
            h.push(CorrelationType::Concurrent, s);
        }
        let c = score_pair(&a, &b, base, &h, a.episode_date);
        prop_assert!((0.0..=1.0).contains(&c.correlation_strength));
        prop_assert!((0.0..=1.0).contains(&c.confidence_score));
    }
}
