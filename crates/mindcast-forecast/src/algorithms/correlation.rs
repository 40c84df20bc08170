//! Expected follow-up episodes from the user's recurring correlations.

use chrono::Duration;

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, CorrelationType, HighRiskPeriod};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const PERIOD_MARGIN_HOURS: i64 = 2;

pub struct CorrelationRisks;

impl ForecastAlgorithm for CorrelationRisks {
    fn algorithm(&self) -> Algorithm {
        Algorithm::CorrelationRisks
    }

    /// The overall nudge for each factor is applied before any algorithm runs;
    /// this one only places the expected episodes on the timeline.
    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        for factor in ctx.correlation_risks {
            let (anchor_type, expected_type) = match factor.correlation_type {
                CorrelationType::Follows | CorrelationType::TriggeredBy => {
                    (&factor.related_type, &factor.primary_type)
                }
                _ => (&factor.primary_type, &factor.related_type),
            };
            draft.activate(
                &format!("correlation_{}_{}", anchor_type, expected_type),
                format!(
                    "{} has been linked to {} {} times",
                    anchor_type, expected_type, factor.occurrences
                ),
                0.0,
            );

            let Some(anchor) = ctx
                .episodes
                .iter()
                .filter(|e| &e.episode_type == anchor_type)
                .max_by_key(|e| e.episode_date)
            else {
                continue;
            };
            let expected_at = anchor.episode_date
                + Duration::minutes((factor.average_time_offset_hours.abs() * 60.0).round() as i64);
            if expected_at < ctx.now || expected_at > ctx.horizon_end() {
                continue;
            }
            draft.high_risk_periods.push(HighRiskPeriod::new(
                (expected_at - Duration::hours(PERIOD_MARGIN_HOURS)).max(ctx.now),
                expected_at + Duration::hours(PERIOD_MARGIN_HOURS),
                factor.risk_increase,
                format!("{expected_type} often follows {anchor_type}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, Profile};
    use super::*;
    use chrono::{TimeZone, Utc};
    use mindcast_core::models::{CorrelationRiskFactor, Episode, ForecastWindow, UserPatterns};

    #[test]
    fn expected_episode_placed_after_anchor() {
        let now = Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap();
        let episodes = vec![Episode {
            episode_id: 1,
            user_id: 1,
            episode_type: "overthinking".to_string(),
            episode_date: now - Duration::hours(10),
            severity_score: 6.0,
            trigger_category: None,
            location: None,
            has_biological_factors: false,
        }];
        let risks = vec![CorrelationRiskFactor {
            primary_type: "overthinking".to_string(),
            related_type: "anxiety".to_string(),
            correlation_type: CorrelationType::Precedes,
            correlation_strength: 0.6,
            occurrences: 4,
            average_time_offset_hours: -30.0,
            primary_risk: 0.7,
            risk_increase: 0.42,
        }];
        let patterns = UserPatterns::default();
        let profile = Profile::default();
        let ctx = context(ForecastWindow::Days3, now, &episodes, &patterns, &risks, &profile);
        let mut draft = ForecastDraft::starting_at(0.4);
        CorrelationRisks.apply(&ctx, &mut draft).unwrap();

        assert_eq!(draft.overall_risk, 0.4);
        assert_eq!(draft.active_patterns.len(), 1);
        let period = &draft.high_risk_periods[0];
        assert_eq!(period.start, now + Duration::hours(18));
        assert_eq!(period.risk_score, 0.42);
    }
}
