//! Grouping of strong recent correlations into forecast risk factors.

use std::collections::BTreeMap;

use mindcast_core::models::{Correlation, CorrelationRiskFactor, CorrelationType};

use crate::patterns::{summarize, GroupSummary};

/// (primary type, related type, correlation type).
pub type GroupKey = (String, String, CorrelationType);

/// Group rows by type orientation and correlation type, keeping groups with
/// at least `min_occurrences` rows.
pub fn recurring_groups(
    rows: &[Correlation],
    min_occurrences: usize,
) -> Vec<(GroupKey, GroupSummary)> {
    let mut groups: BTreeMap<GroupKey, Vec<&Correlation>> = BTreeMap::new();
    for c in rows {
        groups
            .entry((c.primary_type.clone(), c.related_type.clone(), c.correlation_type))
            .or_default()
            .push(c);
    }
    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= min_occurrences)
        .filter_map(|(key, members)| summarize(&members).map(|s| (key, s)))
        .collect()
}

/// A risk factor when the primary type is currently risky enough.
pub fn risk_factor(
    key: &GroupKey,
    summary: &GroupSummary,
    primary_risk: f64,
    min_primary_risk: f64,
) -> Option<CorrelationRiskFactor> {
    if primary_risk <= min_primary_risk {
        return None;
    }
    let (primary_type, related_type, correlation_type) = key;
    Some(CorrelationRiskFactor {
        primary_type: primary_type.clone(),
        related_type: related_type.clone(),
        correlation_type: *correlation_type,
        correlation_strength: summary.average_strength,
        occurrences: summary.occurrences,
        average_time_offset_hours: summary.average_time_offset,
        primary_risk,
        risk_increase: (primary_risk * summary.average_strength).clamp(0.0, 1.0),
    })
}
