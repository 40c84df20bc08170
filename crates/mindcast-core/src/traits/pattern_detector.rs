use crate::errors::MindcastResult;
use crate::models::{UserId, UserPatterns};

/// External temporal/cascade pattern detector. Only its output is consumed.
pub trait IPatternDetector: Send + Sync {
    fn get_user_patterns(&self, user_id: UserId) -> MindcastResult<UserPatterns>;
}
