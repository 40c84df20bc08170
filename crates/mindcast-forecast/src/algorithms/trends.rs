//! Month-over-month change in episode frequency and severity.

use chrono::Duration;

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, Episode, ForecastInsight, InsightKind};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const PERIOD_DAYS: i64 = 30;
/// Relative change in episode count treated as a trend.
const FREQUENCY_CHANGE: f64 = 0.25;
const MIN_RECENT_EPISODES: usize = 3;
const RISING_FREQUENCY_RISK: f64 = 0.1;
const FALLING_FREQUENCY_RELIEF: f64 = -0.05;
/// Rise in mean severity (0–10 scale) treated as worsening.
const SEVERITY_CHANGE: f64 = 1.0;
const RISING_SEVERITY_RISK: f64 = 0.05;

pub struct LongTermTrends;

impl ForecastAlgorithm for LongTermTrends {
    fn algorithm(&self) -> Algorithm {
        Algorithm::LongTermTrends
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        let split = ctx.now - Duration::days(PERIOD_DAYS);
        let earliest = split - Duration::days(PERIOD_DAYS);
        let (recent, prior): (Vec<&Episode>, Vec<&Episode>) = ctx
            .episodes
            .iter()
            .filter(|e| e.episode_date >= earliest && e.episode_date <= ctx.now)
            .partition(|e| e.episode_date >= split);

        if prior.is_empty() {
            return Ok(());
        }
        let change = (recent.len() as f64 - prior.len() as f64) / prior.len() as f64;
        if change >= FREQUENCY_CHANGE && recent.len() >= MIN_RECENT_EPISODES {
            draft.activate(
                "rising_frequency",
                format!(
                    "{} episodes in the last 30 days, up from {}",
                    recent.len(),
                    prior.len()
                ),
                RISING_FREQUENCY_RISK,
            );
            draft.insights.push(ForecastInsight::new(
                InsightKind::Warning,
                "rising_frequency",
                "Episodes are becoming more frequent",
                "You have logged noticeably more episodes this month than last month.",
            ));
        } else if change <= -FREQUENCY_CHANGE {
            draft.add_risk(FALLING_FREQUENCY_RELIEF);
            draft.insights.push(ForecastInsight::new(
                InsightKind::Positive,
                "falling_frequency",
                "Fewer episodes this month",
                "You have logged fewer episodes this month than last month.",
            ));
        }

        if let (Some(now_sev), Some(then_sev)) = (mean_severity(&recent), mean_severity(&prior)) {
            if now_sev - then_sev >= SEVERITY_CHANGE {
                draft.activate(
                    "rising_severity",
                    format!("Average severity rose from {then_sev:.1} to {now_sev:.1}"),
                    RISING_SEVERITY_RISK,
                );
            }
        }
        Ok(())
    }
}

fn mean_severity(episodes: &[&Episode]) -> Option<f64> {
    if episodes.is_empty() {
        return None;
    }
    Some(episodes.iter().map(|e| e.severity_score).sum::<f64>() / episodes.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, Profile};
    use super::*;
    use chrono::{TimeZone, Utc};
    use mindcast_core::models::{ForecastWindow, UserPatterns};

    fn ep(days_ago: i64, severity: f64, now: chrono::DateTime<Utc>) -> Episode {
        Episode {
            episode_id: 1,
            user_id: 1,
            episode_type: "anxiety".to_string(),
            episode_date: now - Duration::days(days_ago),
            severity_score: severity,
            trigger_category: None,
            location: None,
            has_biological_factors: false,
        }
    }

    #[test]
    fn worsening_month_adds_risk_and_warns() {
        let now = Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap();
        let episodes: Vec<Episode> = [45, 50, 2, 5, 9, 14]
            .iter()
            .map(|&d| ep(d, if d < 30 { 7.0 } else { 4.0 }, now))
            .collect();
        let patterns = UserPatterns::default();
        let profile = Profile::default();
        let ctx = context(ForecastWindow::Days30, now, &episodes, &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.3);
        LongTermTrends.apply(&ctx, &mut draft).unwrap();

        assert!((draft.overall_risk - 0.45).abs() < 1e-9);
        assert_eq!(draft.insights[0].key, "rising_frequency");
        assert_eq!(draft.active_patterns.len(), 2);
    }

    #[test]
    fn no_prior_month_means_no_trend() {
        let now = Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap();
        let episodes = vec![ep(1, 9.0, now), ep(2, 9.0, now), ep(3, 9.0, now)];
        let patterns = UserPatterns::default();
        let profile = Profile::default();
        let ctx = context(ForecastWindow::Days30, now, &episodes, &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.3);
        LongTermTrends.apply(&ctx, &mut draft).unwrap();
        assert_eq!(draft.overall_risk, 0.3);
    }
}
