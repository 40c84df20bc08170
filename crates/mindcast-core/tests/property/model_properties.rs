//! Property tests for risk banding and tier ordering.

use chrono::{Duration, TimeZone, Utc};
use mindcast_core::models::{HighRiskPeriod, MembershipTier, RiskLevel};
use proptest::prelude::*;

fn tier() -> impl Strategy<Value = MembershipTier> {
    prop_oneof![
        Just(MembershipTier::Free),
        Just(MembershipTier::Basic),
        Just(MembershipTier::Premium),
        Just(MembershipTier::Platinum),
    ]
}

proptest! {
    #[test]
    fn risk_level_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(RiskLevel::from_score(lo) <= RiskLevel::from_score(hi));
    }

    #[test]
    fn period_risk_is_clamped(risk in -5.0f64..5.0, hours in 0i64..72) {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let period = HighRiskPeriod::new(start, start + Duration::hours(hours), risk, "r");
        prop_assert!((0.0..=1.0).contains(&period.risk_score));
        prop_assert!(period.overlaps(&period));
    }

    #[test]
    fn highest_tier_meets_every_active_tier(tiers in prop::collection::vec(tier(), 0..6)) {
        let best = MembershipTier::highest(tiers.iter().copied());
        for t in &tiers {
            prop_assert!(best.meets(*t));
        }
        if tiers.is_empty() {
            prop_assert_eq!(best, MembershipTier::Free);
        }
    }
}
