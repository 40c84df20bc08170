//! Month-of-year peaks within the horizon.

use chrono::{Datelike, Duration, NaiveDate};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{Algorithm, HighRiskPeriod};

use super::{AlgorithmContext, ForecastAlgorithm, ForecastDraft};

const SEASONAL_WEIGHT: f64 = 0.2;

pub struct SeasonalPatterns;

impl ForecastAlgorithm for SeasonalPatterns {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SeasonalPatterns
    }

    fn apply(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) -> MindcastResult<()> {
        let horizon_end = ctx.horizon_end();
        let mut strongest: Option<f64> = None;

        let mut month_start = first_of_month(ctx.now.date_naive());
        while let Some(start) = month_start {
            let Some(start_at) = start.and_hms_opt(0, 0, 0).map(|t| t.and_utc()) else {
                break;
            };
            if start_at >= horizon_end {
                break;
            }
            let next = next_month(start);
            let end_at = next
                .and_then(|n| n.and_hms_opt(0, 0, 0))
                .map(|t| t.and_utc())
                .unwrap_or(horizon_end)
                .min(horizon_end);

            if let Some(peak) = ctx.patterns.seasonal.iter().find(|p| p.month == start.month()) {
                strongest = Some(strongest.map_or(peak.percentage, |s| s.max(peak.percentage)));
                let from = start_at.max(ctx.now);
                if from < end_at {
                    draft.high_risk_periods.push(HighRiskPeriod::new(
                        from,
                        end_at,
                        peak.percentage / 100.0,
                        format!("Episodes are more common in month {}", peak.month),
                    ));
                }
            }
            month_start = next;
        }

        if let Some(pct) = strongest {
            draft.activate(
                "seasonal_peak",
                format!("{pct:.0}% of episodes fall in a month inside this window"),
                pct / 100.0 * SEASONAL_WEIGHT,
            );
        }
        Ok(())
    }
}

fn first_of_month(d: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1)
}

fn next_month(first: NaiveDate) -> Option<NaiveDate> {
    (first + Duration::days(32)).with_day(1)
}
