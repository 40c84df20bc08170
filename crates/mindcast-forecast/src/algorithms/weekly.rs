//! Peak weekdays projected across the coming week.

use chrono::{Datelike, Duration};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, HighRiskPeriod};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const WEEKLY_WEIGHT: f64 = 0.15;

pub struct WeeklyPatterns;

impl ForecastAlgorithm for WeeklyPatterns {
    fn algorithm(&self) -> Algorithm {
        Algorithm::WeeklyPatterns
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        let peaks = &ctx.patterns.temporal.peak_days;
        let Some(strongest) = peaks.iter().max_by(|a, b| a.percentage.total_cmp(&b.percentage))
        else {
            return Ok(());
        };

        let horizon_end = ctx.horizon_end();
        let today = ctx.now.date_naive();
        let days = ctx.window.horizon().num_days().max(1);
        for offset in 0..days {
            let date = today + Duration::days(offset);
            let weekday = date.weekday().number_from_monday();
            let Some(peak) = peaks.iter().find(|p| p.day_of_week == weekday) else {
                continue;
            };
            let Some(midnight) = date.and_hms_opt(0, 0, 0).map(|t| t.and_utc()) else {
                continue;
            };
            let start = midnight.max(ctx.now);
            let end = (midnight + Duration::days(1)).min(horizon_end);
            if start < end {
                draft.high_risk_periods.push(HighRiskPeriod::new(
                    start,
                    end,
                    peak.percentage / 100.0,
                    format!("{} is one of your higher-risk days", date.weekday()),
                ));
            }
        }

        draft.activate(
            "weekly_peak",
            format!(
                "{:.0}% of episodes fall on your most difficult weekday",
                strongest.percentage
            ),
            strongest.percentage / 100.0 * WEEKLY_WEIGHT,
        );
        Ok(())
    }
}
