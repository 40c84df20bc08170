//! Short-term burst and cascade proximity.

use chrono::Duration;

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, HighRiskPeriod};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const BURST_WINDOW_HOURS: i64 = 48;
const BURST_MIN_EPISODES: usize = 3;
const BURST_RISK: f64 = 0.2;
const CASCADE_WINDOW_HOURS: i64 = 6;
const CASCADE_RISK: f64 = 0.1;

pub struct ImmediateRisk;

impl ForecastAlgorithm for ImmediateRisk {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ImmediateRisk
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        let burst_start = ctx.now - Duration::hours(BURST_WINDOW_HOURS);
        let recent = ctx
            .episodes
            .iter()
            .filter(|e| e.episode_date >= burst_start && e.episode_date <= ctx.now)
            .count();
        if recent >= BURST_MIN_EPISODES {
            draft.activate(
                "episode_burst",
                format!("{recent} episodes in the last {BURST_WINDOW_HOURS} hours"),
                BURST_RISK,
            );
        }

        if let Some(last) = ctx.last_episode() {
            let since = ctx.now - last.episode_date;
            if since >= Duration::zero() && since < Duration::hours(CASCADE_WINDOW_HOURS) {
                draft.activate(
                    "immediate_cascade_risk",
                    format!("A {} episode was logged in the last few hours", last.episode_type),
                    CASCADE_RISK,
                );
                draft.high_risk_periods.push(HighRiskPeriod::new(
                    ctx.now,
                    last.episode_date + Duration::hours(CASCADE_WINDOW_HOURS),
                    draft.overall_risk,
                    "Follow-up episodes are likely shortly after a recent episode",
                ));
            }
        }
        Ok(())
    }
}
