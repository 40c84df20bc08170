//! High-risk period post-processing.

use mindcast_core::models::HighRiskPeriod;

/// Sort by start and merge overlapping or touching intervals into a minimal
/// disjoint set. A merged interval keeps the highest risk score and the union
/// of reasons, in first-seen order.
pub fn merge_periods(mut periods: Vec<HighRiskPeriod>) -> Vec<HighRiskPeriod> {
    periods.retain(|p| p.start <= p.end);
    periods.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut merged: Vec<HighRiskPeriod> = Vec::with_capacity(periods.len());
    for period in periods {
        match merged.last_mut() {
            Some(last) if last.overlaps(&period) => {
                last.end = last.end.max(period.end);
                last.risk_score = last.risk_score.max(period.risk_score);
                for reason in period.reasons {
                    if !last.reasons.contains(&reason) {
                        last.reasons.push(reason);
                    }
                }
            }
            _ => merged.push(period),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn overlapping_pair_collapses_to_max_risk() {
        let t0 = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let merged = merge_periods(vec![
            HighRiskPeriod::new(t0 + Duration::hours(1), t0 + Duration::hours(3), 0.7, "b"),
            HighRiskPeriod::new(t0, t0 + Duration::hours(2), 0.5, "a"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, t0);
        assert_eq!(merged[0].end, t0 + Duration::hours(3));
        assert_eq!(merged[0].risk_score, 0.7);
        assert_eq!(merged[0].reasons, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn contained_interval_does_not_shrink_outer() {
        let t0 = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let merged = merge_periods(vec![
            HighRiskPeriod::new(t0, t0 + Duration::hours(10), 0.3, "outer"),
            HighRiskPeriod::new(t0 + Duration::hours(2), t0 + Duration::hours(4), 0.9, "outer"),
            HighRiskPeriod::new(t0 + Duration::hours(12), t0 + Duration::hours(13), 0.2, "late"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].end, t0 + Duration::hours(10));
        assert_eq!(merged[0].risk_score, 0.9);
        assert_eq!(merged[0].reasons.len(), 1);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(merge_periods(vec![]).is_empty());
    }
}
