//! Property tests for risk clamping and period merging.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use mindcast_core::models::{
    Algorithm, CascadePattern, CorrelationRiskFactor, CorrelationType, CyclePhase, Episode,
    ForecastWindow, HighRiskPeriod, PeakDay, PeakHour, SeasonalPeak, TemporalPatterns,
    UserPatterns,
};
use mindcast_forecast::algorithms::{AlgorithmContext, AlgorithmRegistry, ForecastDraft};
use mindcast_forecast::merge_periods;
use test_fixtures::StaticProfile;

fn episodes(now: chrono::DateTime<Utc>, count: usize) -> Vec<Episode> {
    (0..count)
        .map(|i| Episode {
            episode_id: i as u64 + 1,
            user_id: 1,
            episode_type: if i % 2 == 0 { "overthinking" } else { "anxiety" }.to_string(),
            episode_date: now - Duration::hours((count - i) as i64),
            severity_score: 9.0,
            trigger_category: None,
            location: None,
            has_biological_factors: true,
        })
        .collect()
}

fn firing_patterns(now: chrono::DateTime<Utc>, pct: f64) -> UserPatterns {
    use chrono::{Datelike, Timelike};
    UserPatterns {
        temporal: TemporalPatterns {
            peak_hours: vec![PeakHour { hour: now.hour(), percentage: pct }],
            peak_days: vec![PeakDay {
                day_of_week: now.weekday().number_from_monday(),
                percentage: pct,
            }],
        },
        cascades: vec![CascadePattern {
            trigger_type: "anxiety".to_string(),
            following_type: "panic".to_string(),
            probability: 0.9,
            average_delay_hours: 6.0,
            occurrences: 10,
        }],
        seasonal: vec![SeasonalPeak { month: now.month(), percentage: pct }],
    }
}

proptest! {
    #[test]
    fn every_algorithm_firing_stays_in_unit_range(
        start in 0.0f64..=1.0,
        pct in 0.0f64..=100.0,
        count in 3usize..12,
        window_idx in 0usize..4,
    ) {
        let now = Utc.with_ymd_and_hms(2026, 6, 3, 21, 0, 0).unwrap();
        let episodes = episodes(now, count);
        let patterns = firing_patterns(now, pct);
        let risks = vec![CorrelationRiskFactor {
            primary_type: "overthinking".to_string(),
            related_type: "anxiety".to_string(),
            correlation_type: CorrelationType::Concurrent,
            correlation_strength: 0.9,
            occurrences: 8,
            average_time_offset_hours: 1.0,
            primary_risk: 0.9,
            risk_increase: 0.81,
        }];
        let profile = StaticProfile::tracking(&["anxiety"])
            .with_biology(Some(CyclePhase::Luteal), Some(4.0));
        let ctx = AlgorithmContext {
            user_id: 1,
            window: ForecastWindow::ALL[window_idx],
            now,
            episodes: &episodes,
            patterns: &patterns,
            correlation_risks: &risks,
            profile: &profile,
        };

        let registry = AlgorithmRegistry::standard();
        let mut draft = ForecastDraft::starting_at(start);
        for algorithm in Algorithm::ALL {
            registry.get(algorithm).unwrap().apply(&ctx, &mut draft).unwrap();
            prop_assert!((0.0..=1.0).contains(&draft.overall_risk));
        }
    }

    #[test]
    fn merged_periods_are_sorted_and_disjoint(
        raw in prop::collection::vec((0i64..200, 1i64..24, 0.0f64..=1.0), 0..20),
    ) {
        let t0 = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let input: Vec<HighRiskPeriod> = raw
            .iter()
            .map(|&(start, len, risk)| {
                HighRiskPeriod::new(
                    t0 + Duration::hours(start),
                    t0 + Duration::hours(start + len),
                    risk,
                    format!("r{start}"),
                )
            })
            .collect();
        let merged = merge_periods(input.clone());

        for pair in merged.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
        for p in &input {
            let cover = merged.iter().find(|m| m.start <= p.start && p.end <= m.end);
            prop_assert!(cover.is_some());
            prop_assert!(cover.unwrap().risk_score >= p.risk_score);
        }
    }
}
