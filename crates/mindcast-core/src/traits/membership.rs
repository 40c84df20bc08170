use crate::errors::MindcastResult;
use crate::models::{MembershipTier, UserId};

/// Membership / entitlement lookup.
pub trait IMembershipService: Send + Sync {
    /// Every tier the user currently holds.
    fn active_tiers(&self, user_id: UserId) -> MindcastResult<Vec<MembershipTier>>;

    /// The highest active tier; `Free` when none.
    fn user_tier(&self, user_id: UserId) -> MindcastResult<MembershipTier> {
        Ok(MembershipTier::highest(self.active_tiers(user_id)?))
    }
}
