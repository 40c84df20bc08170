//! Pattern thresholds: recurring correlations between the same two types in
//! the same direction.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use mindcast_core::constants::CORRELATION_PATTERN_TYPE;
use mindcast_core::models::{Correlation, CorrelationPattern, CorrelationType, PatternLevel};

use crate::scoring::evidence_confidence;

/// Aggregate of one (user, primary type, related type, correlation type) group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub occurrences: usize,
    pub average_strength: f64,
    /// Mean of the absolute offsets.
    pub average_time_offset: f64,
    pub first_detected: DateTime<Utc>,
    pub last_detected: DateTime<Utc>,
}

/// Summarize a non-empty group. Returns `None` for an empty slice.
pub fn summarize(rows: &[&Correlation]) -> Option<GroupSummary> {
    let first = rows.first()?;
    let n = rows.len() as f64;
    let mut first_detected = first.discovered_date;
    let mut last_detected = first.discovered_date;
    for c in rows {
        first_detected = first_detected.min(c.discovered_date);
        last_detected = last_detected.max(c.discovered_date);
    }
    Some(GroupSummary {
        occurrences: rows.len(),
        average_strength: rows.iter().map(|c| c.correlation_strength).sum::<f64>() / n,
        average_time_offset: rows.iter().map(|c| c.time_offset_hours.abs()).sum::<f64>() / n,
        first_detected,
        last_detected,
    })
}

/// Thresholds at or below `count` that have not been recorded yet, with
/// their index into `thresholds`.
///
/// Every crossed threshold is returned, not only the highest, so a group that
/// jumps from 2 to 6 in one pass still records both emerging and established.
pub fn thresholds_crossed(
    count: usize,
    thresholds: &[u32],
    recorded: &BTreeSet<u32>,
) -> Vec<(usize, u32)> {
    thresholds
        .iter()
        .enumerate()
        .filter(|(_, t)| (**t as usize) <= count && !recorded.contains(t))
        .map(|(i, t)| (i, *t))
        .collect()
}

/// Build the pattern row for a crossed threshold.
pub fn build_pattern(
    user_id: u64,
    primary_type: &str,
    related_type: &str,
    correlation_type: CorrelationType,
    threshold_index: usize,
    threshold: u32,
    summary: &GroupSummary,
) -> CorrelationPattern {
    CorrelationPattern {
        pattern_id: None,
        user_id,
        pattern_type: CORRELATION_PATTERN_TYPE.to_string(),
        pattern_subtype: CorrelationPattern::subtype_for(primary_type, related_type),
        primary_type: primary_type.to_string(),
        related_type: related_type.to_string(),
        correlation_type,
        level: PatternLevel::from_threshold_index(threshold_index),
        threshold,
        occurrence_count: summary.occurrences as u32,
        average_strength: summary.average_strength,
        average_time_offset: summary.average_time_offset,
        confidence_score: evidence_confidence(summary.occurrences, summary.average_strength),
        first_detected: summary.first_detected,
        last_detected: summary.last_detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_reports_each_missing_threshold_once() {
        let t = [3, 5, 10, 20];
        let mut recorded = BTreeSet::new();
        assert!(thresholds_crossed(2, &t, &recorded).is_empty());
        assert_eq!(thresholds_crossed(6, &t, &recorded), vec![(0, 3), (1, 5)]);
        recorded.insert(3);
        recorded.insert(5);
        assert!(thresholds_crossed(9, &t, &recorded).is_empty());
        assert_eq!(thresholds_crossed(25, &t, &recorded), vec![(2, 10), (3, 20)]);
    }
}
