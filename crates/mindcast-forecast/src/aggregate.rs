//! Weighted combination of per-episode-type contributions.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use mindcast_core::models::{EpisodeRisk, ForecastWindow, HighRiskPeriod, UserId};
use mindcast_core::registry::ContributorRegistry;

/// Combined contributor output for one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// `Σ risk×weight / Σ weight`; 0 when nothing contributed.
    pub overall_risk: f64,
    /// Mean confidence across contributing types.
    pub confidence: f64,
    pub episode_risks: BTreeMap<String, EpisodeRisk>,
    pub high_risk_periods: Vec<HighRiskPeriod>,
    pub recommendations: Vec<String>,
}

/// Ask each enabled type's contributor for its share of the forecast.
///
/// Types without a contributor are skipped; a failing contributor is logged
/// and left out of the average.
pub fn aggregate(
    contributors: &ContributorRegistry,
    enabled_types: &[String],
    user_id: UserId,
    window: ForecastWindow,
) -> Aggregate {
    let mut out = Aggregate::default();
    let mut weighted_risk = 0.0;
    let mut total_weight = 0.0;
    let mut confidence_sum = 0.0;

    for episode_type in enabled_types {
        let Some(contributor) = contributors.get(episode_type) else {
            debug!(user_id, episode_type = %episode_type, "no contributor registered");
            continue;
        };
        let contribution = match contributor.contribute_to_forecast(user_id, window) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    user_id,
                    episode_type = %episode_type,
                    window = %window,
                    error = %e,
                    "contributor failed, leaving type out of forecast"
                );
                continue;
            }
        };

        let risk = unit(contribution.risk_score);
        let confidence = unit(contribution.confidence);
        let weight = if contribution.weight.is_finite() {
            contribution.weight.max(0.0)
        } else {
            0.0
        };
        weighted_risk += risk * weight;
        total_weight += weight;
        confidence_sum += confidence;

        out.high_risk_periods.extend(contribution.high_risk_periods);
        for rec in contribution.recommendations {
            if !out.recommendations.contains(&rec) {
                out.recommendations.push(rec);
            }
        }
        out.episode_risks.insert(
            episode_type.clone(),
            EpisodeRisk {
                risk_score: risk,
                confidence,
                weight,
                contributing_factors: contribution.contributing_factors,
            },
        );
    }

    let n = out.episode_risks.len();
    if n > 0 {
        out.overall_risk = if total_weight > 0.0 {
            (weighted_risk / total_weight).clamp(0.0, 1.0)
        } else {
            // Every weight was zero: fall back to a plain mean.
            out.episode_risks.values().map(|r| r.risk_score).sum::<f64>() / n as f64
        };
        out.confidence = confidence_sum / n as f64;
    }
    out
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
