use chrono::{TimeZone, Utc};
use mindcast_core::models::*;
use mindcast_core::registry::ContributorRegistry;
use mindcast_core::traits::{IEpisodeTypeRegistry, IForecastContributor};
use mindcast_core::MindcastResult;
use std::sync::Arc;

struct Types;

impl IEpisodeTypeRegistry for Types {
    fn can_correlate(&self, _a: &str, _b: &str) -> bool {
        true
    }
    fn base_correlation_strength(&self, _a: &str, _b: &str) -> f64 {
        0.5
    }
    fn type_config(&self, episode_type: &str) -> Option<TypeConfig> {
        (episode_type == "anxiety").then(|| TypeConfig {
            display_name: "Anxiety".to_string(),
            color: "#ff0000".to_string(),
            weight: 1.0,
        })
    }
}

struct Fixed(&'static str);

impl IForecastContributor for Fixed {
    fn episode_type(&self) -> &str {
        self.0
    }
    fn contribute_to_forecast(
        &self,
        _user_id: UserId,
        _window: ForecastWindow,
    ) -> MindcastResult<ForecastContribution> {
        Ok(ForecastContribution::scored(0.5, 0.5, 1.0))
    }
}

#[test]
fn contributor_registry_rejects_unknown_types() {
    let registry = ContributorRegistry::new()
        .with(Arc::new(Fixed("anxiety")))
        .unwrap()
        .with(Arc::new(Fixed("daydreaming")))
        .unwrap();
    assert!(registry.validate(&Types).is_err());
}

#[test]
fn contributor_registry_rejects_duplicates() {
    let registry = ContributorRegistry::new().with(Arc::new(Fixed("anxiety"))).unwrap();
    assert!(registry.with(Arc::new(Fixed("anxiety"))).is_err());
}

#[test]
fn display_name_falls_back_to_tag() {
    assert_eq!(Types.display_name("anxiety"), "Anxiety");
    assert_eq!(Types.display_name("unknown"), "unknown");
}

#[test]
fn forecast_outcome_serializes_with_status_tag() {
    let denied = ForecastOutcome::AccessDenied(AccessDenied::new(
        9,
        ForecastWindow::Days7,
        MembershipTier::Premium,
        MembershipTier::Basic,
    ));
    let json = serde_json::to_value(&denied).unwrap();
    assert_eq!(json["status"], "access_denied");
    assert_eq!(json["required_tier"], "premium");
    assert!(denied.forecast().is_none());
}

#[test]
fn date_range_is_inclusive() {
    let center = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let range = DateRange::around(center, chrono::Duration::days(7));
    assert!(range.contains(center - chrono::Duration::days(7)));
    assert!(range.contains(center + chrono::Duration::days(7)));
    assert!(!range.contains(center + chrono::Duration::days(8)));
}

#[test]
fn every_window_algorithm_is_unique_within_window() {
    for window in ForecastWindow::ALL {
        let algs = window.algorithms();
        let mut sorted = algs.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), algs.len(), "duplicate algorithm in {window}");
    }
}
