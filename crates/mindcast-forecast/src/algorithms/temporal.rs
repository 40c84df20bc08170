//! Recurring high-risk hours and weekdays from the pattern detector.

use chrono::{Datelike, Duration, Timelike};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, HighRiskPeriod};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const HOUR_MATCH_WEIGHT: f64 = 0.3;
const DAY_MATCH_WEIGHT: f64 = 0.2;
/// Upcoming peak hours are only projected this far ahead.
const PROJECTION_DAYS: i64 = 3;

pub struct TemporalPatterns;

impl ForecastAlgorithm for TemporalPatterns {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TemporalPatterns
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        let temporal = &ctx.patterns.temporal;
        let hour = ctx.now.hour();
        let weekday = ctx.now.weekday().number_from_monday();

        if let Some(peak) = temporal.peak_hours.iter().find(|p| p.hour == hour) {
            draft.activate(
                "peak_hour",
                format!("{:.0}% of episodes start around {:02}:00", peak.percentage, peak.hour),
                peak.percentage / 100.0 * HOUR_MATCH_WEIGHT,
            );
        }
        if let Some(peak) = temporal.peak_days.iter().find(|p| p.day_of_week == weekday) {
            draft.activate(
                "peak_day",
                format!("{:.0}% of episodes fall on this weekday", peak.percentage),
                peak.percentage / 100.0 * DAY_MATCH_WEIGHT,
            );
        }

        // Project the next occurrences of each peak hour inside the horizon.
        let horizon_end = ctx.horizon_end().min(ctx.now + Duration::days(PROJECTION_DAYS));
        let today = ctx.now.date_naive();
        for peak in &temporal.peak_hours {
            for day in 0..=PROJECTION_DAYS {
                let Some(start) = (today + Duration::days(day))
                    .and_hms_opt(peak.hour, 0, 0)
                    .map(|t| t.and_utc())
                else {
                    continue;
                };
                if start < ctx.now || start >= horizon_end {
                    continue;
                }
                draft.high_risk_periods.push(HighRiskPeriod::new(
                    start,
                    start + Duration::hours(1),
                    peak.percentage / 100.0,
                    format!("Recurring high-risk hour ({:02}:00)", peak.hour),
                ));
            }
        }
        Ok(())
    }
}
