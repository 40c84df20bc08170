//! Proximity factors and qualitative context tags.

use std::collections::BTreeSet;

use chrono::{Datelike, Timelike};

use mindcast_core::models::{CorrelationFactor, Episode};

/// Minutes apart within a day still counted as the same time of day.
const SAME_TIME_WINDOW_MINUTES: i64 = 120;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Step function over absolute hours apart.
pub fn time_factor(abs_hours: f64) -> f64 {
    match abs_hours {
        h if h <= 1.0 => 1.0,
        h if h <= 4.0 => 0.9,
        h if h <= 12.0 => 0.8,
        h if h <= 24.0 => 0.7,
        h if h <= 48.0 => 0.5,
        h if h <= 72.0 => 0.3,
        _ => 0.1,
    }
}

/// Step function over absolute severity difference.
pub fn severity_factor(delta: f64) -> f64 {
    match delta {
        d if d <= 1.0 => 0.9,
        d if d <= 2.0 => 0.7,
        d if d <= 3.0 => 0.5,
        d if d <= 4.0 => 0.3,
        _ => 0.1,
    }
}

pub fn collect_factors(a: &Episode, b: &Episode) -> BTreeSet<CorrelationFactor> {
    let mut factors = BTreeSet::new();

    let minutes = |e: &Episode| {
        (e.episode_date.hour() * 60 + e.episode_date.minute()) as i64
    };
    let diff = (minutes(a) - minutes(b)).abs();
    // Wraps around midnight: 23:30 and 00:30 are an hour apart.
    if diff.min(MINUTES_PER_DAY - diff) <= SAME_TIME_WINDOW_MINUTES {
        factors.insert(CorrelationFactor::SameTimeOfDay);
    }

    if a.episode_date.weekday() == b.episode_date.weekday() {
        factors.insert(CorrelationFactor::SameDayOfWeek);
    }

    if let (Some(x), Some(y)) = (&a.location, &b.location) {
        if x == y {
            factors.insert(CorrelationFactor::SameLocation);
        }
    }

    if a.has_biological_factors && b.has_biological_factors {
        factors.insert(CorrelationFactor::BiologicalFactors);
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(d: u32, h: u32, m: u32) -> Episode {
        Episode {
            episode_id: 1,
            user_id: 1,
            episode_type: "anxiety".to_string(),
            episode_date: Utc.with_ymd_and_hms(2026, 3, d, h, m, 0).unwrap(),
            severity_score: 5.0,
            trigger_category: None,
            location: Some("home".to_string()),
            has_biological_factors: true,
        }
    }

    #[test]
    fn factor_steps() {
        assert_eq!(time_factor(0.5), 1.0);
        assert_eq!(time_factor(72.0), 0.3);
        assert_eq!(time_factor(1000.0), 0.1);
        assert_eq!(severity_factor(0.0), 0.9);
        assert_eq!(severity_factor(10.0), 0.1);
    }

    #[test]
    fn time_of_day_wraps_midnight() {
        let f = collect_factors(&at(2, 23, 30), &at(4, 0, 30));
        assert!(f.contains(&CorrelationFactor::SameTimeOfDay));
        assert!(!f.contains(&CorrelationFactor::SameDayOfWeek));
        assert!(f.contains(&CorrelationFactor::SameLocation));
        assert!(f.contains(&CorrelationFactor::BiologicalFactors));
    }

    #[test]
    fn same_weekday_a_week_apart() {
        let f = collect_factors(&at(2, 9, 0), &at(9, 15, 0));
        assert!(f.contains(&CorrelationFactor::SameDayOfWeek));
        assert!(!f.contains(&CorrelationFactor::SameTimeOfDay));
    }
}
