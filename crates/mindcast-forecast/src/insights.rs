//! Forecast-level insights: risk trend, pattern load, strongest correlation,
//! and stability streaks.

use chrono::{DateTime, Duration, Utc};

use mindcast_core::config::ForecastConfig;
use mindcast_core::models::{
    CorrelationRiskFactor, CorrelationType, Episode, ForecastInsight, ForecastLogEntry,
    InsightKind,
};

const TREND_DAYS: i64 = 7;
const MULTI_PATTERN_MIN: usize = 3;

pub struct InsightInputs<'a> {
    pub now: DateTime<Utc>,
    pub overall_risk: f64,
    pub active_pattern_count: usize,
    /// Earlier forecasts for the same user and window.
    pub history: &'a [ForecastLogEntry],
    pub correlation_risks: &'a [CorrelationRiskFactor],
    pub episodes: &'a [Episode],
}

pub fn generate(inputs: &InsightInputs<'_>, config: &ForecastConfig) -> Vec<ForecastInsight> {
    let mut out = Vec::new();

    if let Some(insight) = risk_trend(inputs, config.trend_threshold) {
        out.push(insight);
    }

    if inputs.active_pattern_count >= MULTI_PATTERN_MIN {
        out.push(ForecastInsight::new(
            InsightKind::Warning,
            "multiple_patterns",
            "Several risk patterns are active",
            format!(
                "{} of your known patterns are active at the same time.",
                inputs.active_pattern_count
            ),
        ));
    }

    if let Some(strongest) = inputs
        .correlation_risks
        .iter()
        .max_by(|a, b| a.risk_increase.total_cmp(&b.risk_increase))
    {
        out.push(ForecastInsight::new(
            InsightKind::Info,
            "strongest_correlation",
            format!(
                "{} is linked to {}",
                strongest.primary_type, strongest.related_type
            ),
            correlation_message(strongest),
        ));
    }

    if let Some(days) = stability_streak(inputs, config) {
        out.push(ForecastInsight::new(
            InsightKind::Celebration,
            "stability_streak",
            format!("{days} days without a severe episode"),
            "Your recent stretch has been steady. Keep doing what works.",
        ));
    }
    out
}

fn risk_trend(inputs: &InsightInputs<'_>, threshold: f64) -> Option<ForecastInsight> {
    let since = inputs.now - Duration::days(TREND_DAYS);
    let recent: Vec<f64> = inputs
        .history
        .iter()
        .filter(|e| e.generated_at >= since)
        .map(|e| e.overall_risk)
        .collect();
    if recent.is_empty() {
        return None;
    }
    let mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let delta = inputs.overall_risk - mean;
    if delta > threshold {
        Some(ForecastInsight::new(
            InsightKind::Warning,
            "risk_trend_rising",
            "Risk is rising",
            "Your forecast risk is higher than over the past week.",
        ))
    } else if delta < -threshold {
        Some(ForecastInsight::new(
            InsightKind::Positive,
            "risk_trend_falling",
            "Risk is falling",
            "Your forecast risk is lower than over the past week. Nice work.",
        ))
    } else {
        None
    }
}

/// Whole days since the last severe episode, when at least the streak length.
/// With no severe episode on record, counts from the oldest loaded episode.
fn stability_streak(inputs: &InsightInputs<'_>, config: &ForecastConfig) -> Option<i64> {
    let anchor = inputs
        .episodes
        .iter()
        .filter(|e| e.severity_score >= config.severe_episode_threshold)
        .map(|e| e.episode_date)
        .max()
        .or_else(|| inputs.episodes.iter().map(|e| e.episode_date).min())?;
    let days = (inputs.now - anchor).num_days();
    (days >= config.stability_streak_days).then_some(days)
}

fn correlation_message(factor: &CorrelationRiskFactor) -> String {
    let (primary, related) = (&factor.primary_type, &factor.related_type);
    let n = factor.occurrences;
    let hours = factor.average_time_offset_hours.abs();
    match factor.correlation_type {
        CorrelationType::Concurrent => format!(
            "{primary} and {related} have happened together {n} times, about {hours:.1} hours apart."
        ),
        CorrelationType::Triggers | CorrelationType::Precedes => format!(
            "{primary} has been followed by {related} {n} times, about {hours:.1} hours later."
        ),
        CorrelationType::TriggeredBy | CorrelationType::Follows => format!(
            "{primary} has come after {related} {n} times, about {hours:.1} hours later."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mindcast_core::models::{ForecastWindow, RiskLevel};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap()
    }

    fn entry(days_ago: i64, risk: f64) -> ForecastLogEntry {
        ForecastLogEntry {
            user_id: 1,
            window: ForecastWindow::Hours24,
            overall_risk: risk,
            confidence: 0.5,
            risk_level: RiskLevel::from_score(risk),
            ai_enhanced: false,
            generated_at: now() - Duration::days(days_ago),
        }
    }

    fn episode(days_ago: i64, severity: f64) -> Episode {
        Episode {
            episode_id: 1,
            user_id: 1,
            episode_type: "anxiety".to_string(),
            episode_date: now() - Duration::days(days_ago),
            severity_score: severity,
            trigger_category: None,
            location: None,
            has_biological_factors: false,
        }
    }

    fn inputs<'a>(
        risk: f64,
        history: &'a [ForecastLogEntry],
        risks: &'a [CorrelationRiskFactor],
        episodes: &'a [Episode],
    ) -> InsightInputs<'a> {
        InsightInputs {
            now: now(),
            overall_risk: risk,
            active_pattern_count: 0,
            history,
            correlation_risks: risks,
            episodes,
        }
    }

    #[test]
    fn rising_and_falling_trends() {
        let history = vec![entry(2, 0.3), entry(1, 0.3), entry(20, 0.9)];
        let config = ForecastConfig::default();
        let up = generate(&inputs(0.5, &history, &[], &[]), &config);
        assert_eq!(up[0].key, "risk_trend_rising");
        let down = generate(&inputs(0.1, &history, &[], &[]), &config);
        assert_eq!(down[0].kind, InsightKind::Positive);
        assert!(generate(&inputs(0.35, &history, &[], &[]), &config).is_empty());
    }

    #[test]
    fn strongest_correlation_surfaces_offset() {
        let risks = vec![
            CorrelationRiskFactor {
                primary_type: "overthinking".into(),
                related_type: "anxiety".into(),
                correlation_type: CorrelationType::Concurrent,
                correlation_strength: 0.7,
                occurrences: 5,
                average_time_offset_hours: -1.5,
                primary_risk: 0.8,
                risk_increase: 0.56,
            },
            CorrelationRiskFactor {
                primary_type: "panic".into(),
                related_type: "anxiety".into(),
                correlation_type: CorrelationType::Precedes,
                correlation_strength: 0.6,
                occurrences: 3,
                average_time_offset_hours: 30.0,
                primary_risk: 0.6,
                risk_increase: 0.36,
            },
        ];
        let out = generate(&inputs(0.5, &[], &risks, &[]), &ForecastConfig::default());
        assert_eq!(out.len(), 1);
        assert!(out[0].title.starts_with("overthinking"));
        assert!(out[0].message.contains("1.5 hours"));
        assert!(out[0].message.contains("happened together"));
    }

    #[test]
    fn correlation_wording_follows_direction() {
        let factor = |correlation_type| CorrelationRiskFactor {
            primary_type: "anxiety".into(),
            related_type: "overthinking".into(),
            correlation_type,
            correlation_strength: 0.6,
            occurrences: 4,
            average_time_offset_hours: 6.0,
            primary_risk: 0.5,
            risk_increase: 0.3,
        };
        let message = |kind| {
            let risks = vec![factor(kind)];
            generate(&inputs(0.5, &[], &risks, &[]), &ForecastConfig::default())[0]
                .message
                .clone()
        };
        let after = "anxiety has come after overthinking";
        assert!(message(CorrelationType::TriggeredBy).starts_with(after));
        assert!(message(CorrelationType::Follows).starts_with(after));
        let before = "anxiety has been followed by overthinking";
        assert!(message(CorrelationType::Triggers).starts_with(before));
        assert!(message(CorrelationType::Concurrent).contains("happened together"));
    }

    #[test]
    fn streak_counts_from_last_severe_episode() {
        let config = ForecastConfig::default();
        let calm = vec![episode(20, 8.0), episode(3, 4.0)];
        let out = generate(&inputs(0.2, &[], &[], &calm), &config);
        assert_eq!(out[0].key, "stability_streak");
        assert!(out[0].title.starts_with("20 days"));

        let recent = vec![episode(2, 9.0)];
        assert!(generate(&inputs(0.2, &[], &[], &recent), &config).is_empty());
        assert!(generate(&inputs(0.2, &[], &[], &[]), &config).is_empty());
    }
}
