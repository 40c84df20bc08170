use chrono::{DateTime, Utc};

use crate::errors::MindcastResult;
use crate::models::{
    AiCorrelation, Correlation, CorrelationFilter, CorrelationPattern, EpisodeId, UpsertOutcome,
    UserId,
};

/// Correlation, pattern, and AI-correlation tables.
pub trait ICorrelationStore: Send + Sync {
    /// The row linking `a` and `b` in either orientation, if any.
    fn find_by_pair(
        &self,
        user_id: UserId,
        a: EpisodeId,
        b: EpisodeId,
    ) -> MindcastResult<Option<Correlation>>;

    /// Insert, or update strength/confidence/type/offset/factors of the
    /// existing row for the same unordered pair.
    fn upsert_correlation(&self, correlation: &Correlation) -> MindcastResult<UpsertOutcome>;

    /// All rows with exactly this primary/related type orientation.
    fn correlations_between_types(
        &self,
        user_id: UserId,
        primary_type: &str,
        related_type: &str,
    ) -> MindcastResult<Vec<Correlation>>;

    /// A user's rows, strongest first.
    fn correlations_for_user(
        &self,
        user_id: UserId,
        filter: &CorrelationFilter,
    ) -> MindcastResult<Vec<Correlation>>;

    /// Conditional insert keyed on (user, subtype, correlation type, threshold).
    /// Returns `false` when that threshold was already recorded.
    fn insert_pattern_if_absent(&self, pattern: &CorrelationPattern) -> MindcastResult<bool>;

    fn patterns_for_user(&self, user_id: UserId) -> MindcastResult<Vec<CorrelationPattern>>;

    fn save_ai_correlation(&self, correlation: &AiCorrelation) -> MindcastResult<()>;

    /// Delete rows weaker than `max_strength` discovered before `older_than`.
    fn delete_weak_correlations(
        &self,
        max_strength: f64,
        older_than: DateTime<Utc>,
    ) -> MindcastResult<u64>;
}
