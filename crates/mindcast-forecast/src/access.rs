//! Membership gating for forecast windows and AI enhancement.

use mindcast_core::config::ForecastConfig;
use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{AccessDenied, ForecastWindow, MembershipTier, UserId};
use mindcast_core::traits::IMembershipService;

/// Outcome of the access check that precedes every forecast request.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Granted(MembershipTier),
    Denied(AccessDenied),
}

/// Compare the user's highest active tier with the window's minimum.
pub fn check(
    membership: &dyn IMembershipService,
    user_id: UserId,
    window: ForecastWindow,
) -> MindcastResult<AccessDecision> {
    let current = membership.user_tier(user_id)?;
    let required = window.min_membership();
    if current.meets(required) {
        Ok(AccessDecision::Granted(current))
    } else {
        Ok(AccessDecision::Denied(AccessDenied::new(
            user_id, window, required, current,
        )))
    }
}

/// Whether a user on `tier` may receive AI-enhanced forecasts.
pub fn ai_allowed(tier: MembershipTier, config: &ForecastConfig) -> bool {
    config.ai_enhancement_enabled && tier.meets(config.ai_min_tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneTier(Vec<MembershipTier>);

    impl IMembershipService for OneTier {
        fn active_tiers(&self, _: UserId) -> MindcastResult<Vec<MembershipTier>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn premium_reaches_seven_days_but_not_thirty() {
        let m = OneTier(vec![MembershipTier::Basic, MembershipTier::Premium]);
        assert_eq!(
            check(&m, 1, ForecastWindow::Days7).unwrap(),
            AccessDecision::Granted(MembershipTier::Premium)
        );
        match check(&m, 1, ForecastWindow::Days30).unwrap() {
            AccessDecision::Denied(d) => {
                assert_eq!(d.required_tier, MembershipTier::Platinum);
                assert_eq!(d.current_tier, MembershipTier::Premium);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn no_membership_is_denied_everything() {
        let m = OneTier(vec![]);
        for window in ForecastWindow::ALL {
            assert!(matches!(
                check(&m, 1, window).unwrap(),
                AccessDecision::Denied(_)
            ));
        }
    }

    #[test]
    fn ai_needs_flag_and_tier() {
        let mut config = ForecastConfig::default();
        assert!(!ai_allowed(MembershipTier::Platinum, &config));
        config.ai_enhancement_enabled = true;
        assert!(ai_allowed(MembershipTier::Premium, &config));
        assert!(!ai_allowed(MembershipTier::Basic, &config));
    }
}
