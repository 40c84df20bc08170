//! SqliteStore: owns the database connections and implements `IEpisodeStore` and
//! `ICorrelationStore`.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{
    AiCorrelation, Correlation, CorrelationFilter, CorrelationPattern, DateRange, Episode,
    EpisodeId, UpsertOutcome, UserId,
};
use mindcast_core::traits::{ICorrelationStore, IEpisodeStore};

use crate::migrations;
use crate::connections::{Connections, DEFAULT_READERS};
use crate::queries::{ai_ops, correlation_ops, episode_ops, pattern_ops};

pub struct SqliteStore {
    conns: Connections,
}

impl SqliteStore {
    /// Open (creating if needed) a WAL-mode database file.
    pub fn open(path: &Path) -> MindcastResult<Self> {
        Self::open_with_readers(path, DEFAULT_READERS)
    }

    pub fn open_with_readers(path: &Path, readers: usize) -> MindcastResult<Self> {
        let store = Self {
            conns: Connections::open(path, readers)?,
        };
        store.initialize()?;
        debug!(path = %path.display(), readers = store.conns.reader_count(), "sqlite store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> MindcastResult<Self> {
        let store = Self {
            conns: Connections::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> MindcastResult<()> {
        self.conns.write(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    pub fn connections(&self) -> &Connections {
        &self.conns
    }

    pub fn schema_version(&self) -> MindcastResult<u32> {
        self.conns.write(migrations::current_version)
    }

    /// Append an episode. Episodes are owned by the host application; this
    /// exists for imports and tests.
    pub fn insert_episode(&self, episode: &Episode) -> MindcastResult<EpisodeId> {
        self.conns.write(|conn| episode_ops::insert_episode(conn, episode))
    }

    pub fn ai_correlations_for_user(&self, user_id: UserId) -> MindcastResult<Vec<AiCorrelation>> {
        self.conns.read(|conn| ai_ops::ai_correlations_for_user(conn, user_id))
    }

}

impl IEpisodeStore for SqliteStore {
    fn get_episode(&self, id: EpisodeId) -> MindcastResult<Option<Episode>> {
        self.conns.read(|conn| episode_ops::get_episode(conn, id))
    }

    fn get_episodes(&self, user_id: UserId, range: DateRange) -> MindcastResult<Vec<Episode>> {
        self.conns.read(|conn| episode_ops::get_episodes(conn, user_id, range))
    }

    fn count_episodes(&self, user_id: UserId) -> MindcastResult<u64> {
        self.conns.read(|conn| episode_ops::count_episodes(conn, user_id))
    }

    fn active_users(&self, since: DateTime<Utc>) -> MindcastResult<Vec<UserId>> {
        self.conns.read(|conn| episode_ops::active_users(conn, since))
    }
}

impl ICorrelationStore for SqliteStore {
    fn find_by_pair(
        &self,
        user_id: UserId,
        a: EpisodeId,
        b: EpisodeId,
    ) -> MindcastResult<Option<Correlation>> {
        self.conns.read(|conn| correlation_ops::find_by_pair(conn, user_id, a, b))
    }

    fn upsert_correlation(&self, correlation: &Correlation) -> MindcastResult<UpsertOutcome> {
        self.conns.write(|conn| correlation_ops::upsert_correlation(conn, correlation))
    }

    fn correlations_between_types(
        &self,
        user_id: UserId,
        primary_type: &str,
        related_type: &str,
    ) -> MindcastResult<Vec<Correlation>> {
        self.conns.read(|conn| {
            correlation_ops::correlations_between_types(conn, user_id, primary_type, related_type)
        })
    }

    fn correlations_for_user(
        &self,
        user_id: UserId,
        filter: &CorrelationFilter,
    ) -> MindcastResult<Vec<Correlation>> {
        self.conns.read(|conn| correlation_ops::correlations_for_user(conn, user_id, filter))
    }

    fn insert_pattern_if_absent(&self, pattern: &CorrelationPattern) -> MindcastResult<bool> {
        self.conns.write(|conn| pattern_ops::insert_pattern_if_absent(conn, pattern))
    }

    fn patterns_for_user(&self, user_id: UserId) -> MindcastResult<Vec<CorrelationPattern>> {
        self.conns.read(|conn| pattern_ops::patterns_for_user(conn, user_id))
    }

    fn save_ai_correlation(&self, correlation: &AiCorrelation) -> MindcastResult<()> {
        self.conns.write(|conn| ai_ops::save_ai_correlation(conn, correlation))
    }

    fn delete_weak_correlations(
        &self,
        max_strength: f64,
        older_than: DateTime<Utc>,
    ) -> MindcastResult<u64> {
        self.conns.write(|conn| {
            correlation_ops::delete_weak_correlations(conn, max_strength, older_than)
        })
    }
}
