//! Known episode sequences that are currently under way.

use chrono::Duration;

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, CascadePattern, CascadeWarning, Episode, HighRiskPeriod};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const CASCADE_RISK: f64 = 0.25;
/// A sequence counts as under way until this multiple of its usual delay.
const DELAY_GRACE: f64 = 1.5;
/// Half-width of the expected-episode period.
const PERIOD_MARGIN_HOURS: i64 = 2;

pub struct CascadePrediction;

impl ForecastAlgorithm for CascadePrediction {
    fn algorithm(&self) -> Algorithm {
        Algorithm::CascadePrediction
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        let active = ctx
            .patterns
            .cascades
            .iter()
            .filter_map(|c| in_progress(c, ctx.episodes, ctx.now).map(|hours| (c, hours)))
            .max_by(|(a, _), (b, _)| a.probability.total_cmp(&b.probability));
        let Some((cascade, hours_since)) = active else {
            return Ok(());
        };

        let horizon_hours = (ctx.horizon_end() - ctx.now).num_minutes() as f64 / 60.0;
        let expected_in = (cascade.average_delay_hours - hours_since)
            .max(0.0)
            .min(horizon_hours);
        draft.activate(
            "cascade_in_progress",
            format!(
                "{} is often followed by {}",
                cascade.trigger_type, cascade.following_type
            ),
            CASCADE_RISK,
        );
        draft.cascade_warning = Some(CascadeWarning {
            trigger_type: cascade.trigger_type.clone(),
            expected_next: cascade.following_type.clone(),
            probability: cascade.probability,
            hours_since_trigger: hours_since,
            expected_in_hours: expected_in,
            prevention_window_hours: expected_in,
        });

        let expected_at = Duration::try_minutes((expected_in * 60.0).round() as i64)
            .and_then(|offset| ctx.now.checked_add_signed(offset))
            .unwrap_or_else(|| ctx.horizon_end());
        let start = (expected_at - Duration::hours(PERIOD_MARGIN_HOURS)).max(ctx.now);
        draft.high_risk_periods.push(HighRiskPeriod::new(
            start,
            expected_at + Duration::hours(PERIOD_MARGIN_HOURS),
            cascade.probability,
            format!("{} may follow recent {}", cascade.following_type, cascade.trigger_type),
        ));
        Ok(())
    }
}

/// Hours since the sequence's trigger when the follow-up has not happened yet
/// and the usual delay (with grace) has not run out. Sequences without a
/// finite positive delay are ignored.
fn in_progress(
    cascade: &CascadePattern,
    episodes: &[Episode],
    now: chrono::DateTime<chrono::Utc>,
) -> Option<f64> {
    if !cascade.average_delay_hours.is_finite() || cascade.average_delay_hours <= 0.0 {
        return None;
    }
    let trigger = episodes
        .iter()
        .filter(|e| e.episode_type == cascade.trigger_type && e.episode_date <= now)
        .max_by_key(|e| e.episode_date)?;
    let followed = episodes.iter().any(|e| {
        e.episode_type == cascade.following_type && e.episode_date > trigger.episode_date
    });
    if followed {
        return None;
    }
    let hours = (now - trigger.episode_date).num_minutes() as f64 / 60.0;
    (hours <= cascade.average_delay_hours * DELAY_GRACE).then_some(hours)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, Profile};
    use super::*;
    use chrono::{TimeZone, Utc};
    use mindcast_core::models::{ForecastWindow, UserPatterns};

    fn ep(kind: &str, at: chrono::DateTime<Utc>) -> Episode {
        Episode {
            episode_id: 1,
            user_id: 1,
            episode_type: kind.to_string(),
            episode_date: at,
            severity_score: 5.0,
            trigger_category: None,
            location: None,
            has_biological_factors: false,
        }
    }

    fn patterns() -> UserPatterns {
        with_delay(8.0)
    }

    fn with_delay(average_delay_hours: f64) -> UserPatterns {
        UserPatterns {
            cascades: vec![CascadePattern {
                trigger_type: "overthinking".to_string(),
                following_type: "anxiety".to_string(),
                probability: 0.7,
                average_delay_hours,
                occurrences: 6,
            }],
            ..UserPatterns::default()
        }
    }

    #[test]
    fn open_sequence_warns() {
        let now = Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap();
        let episodes = vec![ep("overthinking", now - Duration::hours(3))];
        let patterns = patterns();
        let profile = Profile::default();
        let ctx = context(ForecastWindow::Hours24, now, &episodes, &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.3);
        CascadePrediction.apply(&ctx, &mut draft).unwrap();

        assert!((draft.overall_risk - 0.55).abs() < 1e-9);
        let warning = draft.cascade_warning.unwrap();
        assert_eq!(warning.expected_next, "anxiety");
        assert!((warning.expected_in_hours - 5.0).abs() < 1e-9);
        assert_eq!(draft.high_risk_periods[0].start, now + Duration::hours(3));
    }

    #[test]
    fn completed_sequence_is_ignored() {
        let now = Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap();
        let episodes = vec![
            ep("overthinking", now - Duration::hours(3)),
            ep("anxiety", now - Duration::hours(1)),
        ];
        let patterns = patterns();
        let profile = Profile::default();
        let ctx = context(ForecastWindow::Hours24, now, &episodes, &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.3);
        CascadePrediction.apply(&ctx, &mut draft).unwrap();
        assert!(draft.cascade_warning.is_none());
        assert_eq!(draft.overall_risk, 0.3);
    }

    #[test]
    fn unusable_delays_are_skipped() {
        let now = Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap();
        let episodes = vec![ep("overthinking", now - Duration::hours(3))];
        let profile = Profile::default();
        for delay in [f64::INFINITY, f64::NAN, 0.0, -4.0] {
            let patterns = with_delay(delay);
            let ctx = context(ForecastWindow::Hours24, now, &episodes, &patterns, &[], &profile);
            let mut draft = ForecastDraft::starting_at(0.3);
            CascadePrediction.apply(&ctx, &mut draft).unwrap();
            assert!(draft.cascade_warning.is_none(), "delay {delay}");
            assert!(draft.high_risk_periods.is_empty());
        }
    }

    #[test]
    fn huge_delay_is_clamped_to_the_horizon() {
        let now = Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap();
        let episodes = vec![ep("overthinking", now - Duration::hours(3))];
        let patterns = with_delay(1e300);
        let profile = Profile::default();
        let ctx = context(ForecastWindow::Hours24, now, &episodes, &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.3);
        CascadePrediction.apply(&ctx, &mut draft).unwrap();

        let warning = draft.cascade_warning.unwrap();
        assert!((warning.expected_in_hours - 24.0).abs() < 1e-9);
        assert_eq!(
            draft.high_risk_periods[0].start,
            now + Duration::hours(24 - PERIOD_MARGIN_HOURS)
        );
    }
}
