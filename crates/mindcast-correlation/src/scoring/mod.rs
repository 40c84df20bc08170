//! Pure pair scoring. No I/O; the engine supplies the registry prior and the
//! user's history for the type pair.

pub mod classification;
pub mod confidence;
pub mod factors;

use chrono::{DateTime, Utc};

use mindcast_core::models::{Correlation, CorrelationType, Episode};

pub use classification::{classify, signed_offset_hours};
pub use confidence::{evidence_confidence, frequency_confidence};
pub use factors::{collect_factors, severity_factor, time_factor};

const BASE_WEIGHT: f64 = 0.4;
const TIME_WEIGHT: f64 = 0.2;
const SEVERITY_WEIGHT: f64 = 0.2;
const SHARED_TRIGGER_BONUS: f64 = 0.1;
const HISTORY_WEIGHT: f64 = 0.1;

/// The user's past rows for one (primary type, related type) orientation,
/// excluding the pair being scored.
#[derive(Debug, Clone, Default)]
pub struct PairHistory {
    strengths: Vec<(CorrelationType, f64)>,
}

impl PairHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored rows, dropping the row for the pair being scored so
    /// re-detection does not count itself as evidence.
    pub fn from_rows(rows: &[Correlation], primary: &Episode, related: &Episode) -> Self {
        let strengths = rows
            .iter()
            .filter(|c| !c.links(primary.episode_id, related.episode_id))
            .map(|c| (c.correlation_type, c.correlation_strength))
            .collect();
        Self { strengths }
    }

    pub fn push(&mut self, correlation_type: CorrelationType, strength: f64) {
        self.strengths.push((correlation_type, strength));
    }

    /// Mean strength across all correlation types; 0 with no history.
    pub fn average_strength(&self) -> f64 {
        if self.strengths.is_empty() {
            return 0.0;
        }
        self.strengths.iter().map(|(_, s)| s).sum::<f64>() / self.strengths.len() as f64
    }

    /// Prior rows with exactly this correlation type.
    pub fn prior_count(&self, correlation_type: CorrelationType) -> usize {
        self.strengths
            .iter()
            .filter(|(t, _)| *t == correlation_type)
            .count()
    }
}

/// Score `primary` against `related`.
///
/// The returned row has no id; the store assigns one on insert.
pub fn score_pair(
    primary: &Episode,
    related: &Episode,
    base_strength: f64,
    history: &PairHistory,
    discovered: DateTime<Utc>,
) -> Correlation {
    let offset = signed_offset_hours(primary.episode_date, related.episode_date);
    let abs_hours = offset.abs();
    let correlation_type = classify(offset);

    let shared_trigger = match (&primary.trigger_category, &related.trigger_category) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    let raw = BASE_WEIGHT * finite_or_zero(base_strength)
        + TIME_WEIGHT * time_factor(abs_hours)
        + SEVERITY_WEIGHT * severity_factor((primary.severity_score - related.severity_score).abs())
        + if shared_trigger { SHARED_TRIGGER_BONUS } else { 0.0 }
        + HISTORY_WEIGHT * finite_or_zero(history.average_strength());

    Correlation {
        correlation_id: None,
        user_id: primary.user_id,
        primary_episode_id: primary.episode_id,
        primary_type: primary.episode_type.clone(),
        related_episode_id: related.episode_id,
        related_type: related.episode_type.clone(),
        correlation_type,
        time_offset_hours: offset,
        correlation_strength: finite_or_zero(raw).clamp(0.0, 1.0),
        confidence_score: frequency_confidence(history.prior_count(correlation_type)),
        factors: collect_factors(primary, related),
        discovered_date: discovered,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ep(id: u64, kind: &str, hours: i64, severity: f64) -> Episode {
        Episode {
            episode_id: id,
            user_id: 7,
            episode_type: kind.to_string(),
            episode_date: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
                + Duration::hours(hours),
            severity_score: severity,
            trigger_category: Some("work".to_string()),
            location: None,
            has_biological_factors: false,
        }
    }

    #[test]
    fn close_similar_pair_scores_high() {
        let a = ep(1, "overthinking", 0, 6.0);
        let b = ep(2, "anxiety", 1, 6.5);
        let c = score_pair(&a, &b, 0.8, &PairHistory::new(), a.episode_date);
        // 0.32 + 0.2 + 0.18 + 0.1 + 0
        assert!((c.correlation_strength - 0.8).abs() < 1e-9);
        assert_eq!(c.correlation_type, CorrelationType::Concurrent);
        assert_eq!(c.confidence_score, 0.45);
        assert_eq!(c.time_offset_hours, -1.0);
    }

    #[test]
    fn history_excludes_the_scored_pair() {
        let a = ep(1, "overthinking", 0, 6.0);
        let b = ep(2, "anxiety", 1, 6.0);
        let mut same = score_pair(&a, &b, 0.5, &PairHistory::new(), a.episode_date);
        same.correlation_id = Some(10);
        let mut other = same.clone();
        other.correlation_id = Some(11);
        other.primary_episode_id = 3;
        other.related_episode_id = 4;
        other.correlation_strength = 0.6;

        let history = PairHistory::from_rows(&[same, other], &a, &b);
        assert_eq!(history.prior_count(CorrelationType::Concurrent), 1);
        assert!((history.average_strength() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn non_finite_base_strength_is_ignored() {
        let a = ep(1, "overthinking", 0, 6.0);
        let b = ep(2, "anxiety", 500, 0.0);
        let c = score_pair(&a, &b, f64::NAN, &PairHistory::new(), a.episode_date);
        assert!((0.0..=1.0).contains(&c.correlation_strength));
    }
}
