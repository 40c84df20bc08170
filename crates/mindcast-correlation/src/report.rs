//! Outcome summaries for detection and maintenance runs.

use serde::{Deserialize, Serialize};

use mindcast_core::models::EpisodeId;

/// Why a detection pass did nothing. Not an error: thin data is the normal
/// state for new users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    EpisodeNotFound,
    InsufficientEpisodes { logged: u64, required: u64 },
}

/// Counters from one or more detection passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub episode_id: Option<EpisodeId>,
    pub skipped: Option<SkipReason>,
    /// Episodes whose neighbourhood was scanned.
    pub episodes_scanned: usize,
    /// Nearby episodes considered (excluding the trigger itself).
    pub candidates: usize,
    pub incompatible: usize,
    pub below_threshold: usize,
    pub inserted: usize,
    pub updated: usize,
    pub patterns_emitted: usize,
    pub ai_correlations_saved: usize,
}

impl DetectionSummary {
    pub fn for_episode(episode_id: EpisodeId) -> Self {
        Self {
            episode_id: Some(episode_id),
            episodes_scanned: 1,
            ..Self::default()
        }
    }

    pub fn skipped(episode_id: EpisodeId, reason: SkipReason) -> Self {
        Self {
            episode_id: Some(episode_id),
            skipped: Some(reason),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> usize {
        self.inserted + self.updated
    }

    /// Fold another pass into this one. The episode id and skip reason of
    /// a merged summary are cleared.
    pub fn absorb(&mut self, other: &DetectionSummary) {
        self.episode_id = None;
        self.skipped = None;
        self.episodes_scanned += other.episodes_scanned;
        self.candidates += other.candidates;
        self.incompatible += other.incompatible;
        self.below_threshold += other.below_threshold;
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.patterns_emitted += other.patterns_emitted;
        self.ai_correlations_saved += other.ai_correlations_saved;
    }
}

/// Result of a daily maintenance run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub users_scanned: usize,
    pub users_failed: usize,
    pub episodes_rescanned: usize,
    pub correlations_saved: usize,
    pub patterns_emitted: usize,
    pub correlations_deleted: u64,
    /// Another run was already in progress; nothing was done.
    pub already_running: bool,
}
