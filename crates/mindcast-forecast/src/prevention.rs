//! Prevention plan templates keyed by risk level.

use mindcast_core::models::{
    BiologicalFactor, CopingStrategy, PlanAction, PreventionPlan, RiskLevel, UserPatterns,
};

use crate::algorithms::ForecastDraft;

pub const TOP_STRATEGIES: usize = 3;
/// Peak hours below this share of episodes are too weak to remind about.
const REMINDER_MIN_PERCENTAGE: f64 = 15.0;

/// Immediate actions for the level, the user's best strategies, and daily
/// practices tied to the user's recurring patterns.
pub fn build_plan(
    level: RiskLevel,
    draft: &ForecastDraft,
    patterns: &UserPatterns,
    mut strategies: Vec<CopingStrategy>,
) -> PreventionPlan {
    strategies.sort_by(|a, b| b.effectiveness.total_cmp(&a.effectiveness));
    strategies.truncate(TOP_STRATEGIES);

    let mut immediate_actions = immediate_actions(level);
    if level == RiskLevel::High {
        immediate_actions.extend(strategies.iter().map(|s| {
            PlanAction::new(
                "use_coping_strategy",
                format!("Use {}: it has worked for you before", s.name),
            )
        }));
    }

    PreventionPlan {
        immediate_actions,
        daily_practices: daily_practices(draft, patterns),
        coping_strategies: strategies,
    }
}

fn immediate_actions(level: RiskLevel) -> Vec<PlanAction> {
    match level {
        RiskLevel::Critical => vec![
            PlanAction::new(
                "contact_support",
                "Reach out to a crisis contact or trusted person now",
            ),
            PlanAction::new(
                "safe_environment",
                "Move to a calm, safe place and remove immediate stressors",
            ),
        ],
        RiskLevel::High => vec![PlanAction::new(
            "crisis_plan",
            "Review your crisis plan and keep it within reach",
        )],
        RiskLevel::Moderate => vec![
            PlanAction::new("self_care", "Schedule time for rest and self-care today"),
            PlanAction::new("monitor_triggers", "Watch for your known triggers"),
        ],
        RiskLevel::Low => Vec::new(),
    }
}

fn daily_practices(draft: &ForecastDraft, patterns: &UserPatterns) -> Vec<PlanAction> {
    let mut practices: Vec<PlanAction> = patterns
        .temporal
        .peak_hours
        .iter()
        .filter(|peak| peak.percentage >= REMINDER_MIN_PERCENTAGE)
        .map(|peak| {
            PlanAction::new(
                "peak_hour_reminder",
                format!(
                    "Set a check-in reminder for {:02}:00, before a usual high-risk hour",
                    (peak.hour + 23) % 24
                ),
            )
        })
        .collect();
    if draft
        .biological_factors
        .iter()
        .any(|f| matches!(f, BiologicalFactor::SleepDeprivation { .. }))
    {
        practices.push(PlanAction::new(
            "sleep_hygiene",
            "Keep a regular bedtime and avoid screens in the hour before sleep",
        ));
    }
    if let Some(cascade) = &draft.cascade_warning {
        practices.push(PlanAction::new(
            "interrupt_cascade",
            format!(
                "{} often follows {}: use a grounding exercise in the next {:.0} hours",
                cascade.expected_next, cascade.trigger_type, cascade.prevention_window_hours
            ),
        ));
    }
    practices
}
