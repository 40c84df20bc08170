//! Grouped correlation summaries rendered as insights.

use mindcast_core::models::{CorrelationInsight, CorrelationType, PatternLevel};

use crate::patterns::GroupSummary;
use crate::scoring::evidence_confidence;

/// Build the insight for one group. `primary_name`/`related_name` are display
/// names from the type registry.
pub fn build_insight(
    primary_type: &str,
    related_type: &str,
    primary_name: &str,
    related_name: &str,
    correlation_type: CorrelationType,
    summary: &GroupSummary,
    pattern_level: Option<PatternLevel>,
) -> CorrelationInsight {
    let n = summary.occurrences;
    let (title, description) = match correlation_type {
        CorrelationType::Concurrent => (
            format!("{primary_name} and {related_name} tend to happen together"),
            format!(
                "{primary_name} and {related_name} were logged within a few hours of each other {n} times."
            ),
        ),
        CorrelationType::Triggers => (
            format!("{primary_name} often leads to {related_name}"),
            format!("{related_name} followed {primary_name} within a day {n} times."),
        ),
        CorrelationType::Precedes => (
            format!("{primary_name} tends to come before {related_name}"),
            format!("{related_name} showed up a day or more after {primary_name} {n} times."),
        ),
        CorrelationType::TriggeredBy => (
            format!("{primary_name} often follows {related_name}"),
            format!("{primary_name} came within a day after {related_name} {n} times."),
        ),
        CorrelationType::Follows => (
            format!("{primary_name} tends to come after {related_name}"),
            format!("{primary_name} showed up a day or more after {related_name} {n} times."),
        ),
    };

    CorrelationInsight {
        primary_type: primary_type.to_string(),
        related_type: related_type.to_string(),
        correlation_type,
        occurrences: n,
        average_strength: summary.average_strength,
        average_time_offset_hours: summary.average_time_offset,
        pattern_level,
        title,
        description,
        action_items: action_items(correlation_type, primary_name, related_name),
        confidence: evidence_confidence(n, summary.average_strength),
    }
}

fn action_items(kind: CorrelationType, primary: &str, related: &str) -> Vec<String> {
    match kind {
        CorrelationType::Concurrent => vec![
            format!("Treat {primary} and {related} as one combined episode when planning coping steps"),
            "Look for a shared trigger in the hours around these episodes".to_string(),
            "Use a grounding technique as soon as either one starts".to_string(),
        ],
        CorrelationType::Triggers | CorrelationType::TriggeredBy => {
            let (first, second) = if kind == CorrelationType::Triggers {
                (primary, related)
            } else {
                (related, primary)
            };
            vec![
                format!("After {first}, plan a calming activity for the next few hours"),
                format!("Note early signs of {second} so you can act sooner"),
                "Reach out to someone you trust when the first episode ends".to_string(),
            ]
        }
        CorrelationType::Precedes | CorrelationType::Follows => {
            let (first, second) = if kind == CorrelationType::Precedes {
                (primary, related)
            } else {
                (related, primary)
            };
            vec![
                format!("Schedule extra self-care in the days after {first}"),
                format!("Check in with yourself daily for signs of {second}"),
            ]
        }
    }
}

/// Sort by `strength × confidence`, highest first.
pub fn rank(insights: &mut [CorrelationInsight]) {
    insights.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
}
