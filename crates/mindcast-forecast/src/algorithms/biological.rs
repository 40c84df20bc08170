//! Cycle phase and sleep deprivation, for users who opted in.

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, BiologicalFactor};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const SLEEP_LOOKBACK_DAYS: u32 = 7;
const SLEEP_DEPRIVED_HOURS: f64 = 6.0;
const SLEEP_DEPRIVATION_RISK: f64 = 0.15;

pub struct BiologicalCycles;

impl ForecastAlgorithm for BiologicalCycles {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BiologicalCycles
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        if !ctx.profile.biological_tracking_enabled(ctx.user_id)? {
            return Ok(());
        }

        if let Some(phase) = ctx.profile.cycle_phase(ctx.user_id, ctx.now)? {
            let risk = phase.risk();
            if risk > 0.0 {
                draft.add_risk(risk);
                draft.biological_factors.push(BiologicalFactor::CyclePhase {
                    phase,
                    risk_contribution: risk,
                });
            }
        }

        if let Some(hours) = ctx
            .profile
            .average_sleep_hours(ctx.user_id, SLEEP_LOOKBACK_DAYS)?
        {
            if hours < SLEEP_DEPRIVED_HOURS {
                draft.add_risk(SLEEP_DEPRIVATION_RISK);
                draft.biological_factors.push(BiologicalFactor::SleepDeprivation {
                    average_sleep_hours: hours,
                    risk_contribution: SLEEP_DEPRIVATION_RISK,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, Profile};
    use super::*;
    use chrono::Utc;
    use mindcast_core::models::{CyclePhase, ForecastWindow, UserPatterns};

    #[test]
    fn opt_out_ignores_everything() {
        let patterns = UserPatterns::default();
        let profile = Profile {
            bio: false,
            phase: Some(CyclePhase::Luteal),
            sleep: Some(4.0),
        };
        let ctx = context(ForecastWindow::Hours24, Utc::now(), &[], &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.0);
        BiologicalCycles.apply(&ctx, &mut draft).unwrap();
        assert_eq!(draft.overall_risk, 0.0);
        assert!(draft.biological_factors.is_empty());
    }

    #[test]
    fn luteal_phase_and_short_sleep_stack() {
        let patterns = UserPatterns::default();
        let profile = Profile {
            bio: true,
            phase: Some(CyclePhase::Luteal),
            sleep: Some(5.5),
        };
        let ctx = context(ForecastWindow::Days3, Utc::now(), &[], &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.1);
        BiologicalCycles.apply(&ctx, &mut draft).unwrap();
        assert!((draft.overall_risk - 0.55).abs() < 1e-9);
        assert_eq!(draft.biological_factors.len(), 2);
    }

    #[test]
    fn follicular_phase_adds_no_factor() {
        let patterns = UserPatterns::default();
        let profile = Profile {
            bio: true,
            phase: Some(CyclePhase::Follicular),
            sleep: Some(8.0),
        };
        let ctx = context(ForecastWindow::Days3, Utc::now(), &[], &patterns, &[], &profile);
        let mut draft = ForecastDraft::starting_at(0.1);
        BiologicalCycles.apply(&ctx, &mut draft).unwrap();
        assert!(draft.biological_factors.is_empty());
    }
}
