//! In-memory stores with the same contracts as the SQLite backend.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};
use mindcast_core::errors::{MindcastResult, StoreError};
use mindcast_core::models::{
    AiCorrelation, Correlation, CorrelationFilter, CorrelationPattern, DateRange, Episode,
    EpisodeId, UpsertOutcome, UserId,
};
use mindcast_core::traits::{ICorrelationStore, IEpisodeStore};

#[derive(Debug)]
pub struct InMemoryEpisodeStore {
    episodes: RwLock<Vec<Episode>>,
    next_id: AtomicU64,
    fail: AtomicBool,
}

impl Default for InMemoryEpisodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEpisodeStore {
    pub fn new() -> Self {
        Self {
            episodes: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail: AtomicBool::new(false),
        }
    }

    /// Store an episode, assigning an id when it has none. Returns the id.
    pub fn record(&self, mut episode: Episode) -> EpisodeId {
        if episode.episode_id == 0 {
            episode.episode_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        let id = episode.episode_id;
        self.episodes.write().unwrap().push(episode);
        id
    }

    pub fn all(&self) -> Vec<Episode> {
        self.episodes.read().unwrap().clone()
    }

    /// Make every call fail with a backend error.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> MindcastResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Backend {
                message: "episode store offline".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEpisodeStore for InMemoryEpisodeStore {
    fn get_episode(&self, id: EpisodeId) -> MindcastResult<Option<Episode>> {
        self.check()?;
        Ok(self
            .episodes
            .read()
            .unwrap()
            .iter()
            .find(|e| e.episode_id == id)
            .cloned())
    }

    fn get_episodes(&self, user_id: UserId, range: DateRange) -> MindcastResult<Vec<Episode>> {
        self.check()?;
        let mut found: Vec<Episode> = self
            .episodes
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.episode_date))
            .cloned()
            .collect();
        found.sort_by_key(|e| (e.episode_date, e.episode_id));
        Ok(found)
    }

    fn count_episodes(&self, user_id: UserId) -> MindcastResult<u64> {
        self.check()?;
        Ok(self
            .episodes
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .count() as u64)
    }

    fn active_users(&self, since: DateTime<Utc>) -> MindcastResult<Vec<UserId>> {
        self.check()?;
        let users: BTreeSet<UserId> = self
            .episodes
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.episode_date >= since)
            .map(|e| e.user_id)
            .collect();
        Ok(users.into_iter().collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCorrelationStore {
    correlations: Mutex<Vec<Correlation>>,
    patterns: Mutex<Vec<CorrelationPattern>>,
    ai: Mutex<Vec<AiCorrelation>>,
    next_id: AtomicU64,
}

impl InMemoryCorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correlations(&self) -> Vec<Correlation> {
        self.correlations.lock().unwrap().clone()
    }

    pub fn patterns(&self) -> Vec<CorrelationPattern> {
        self.patterns.lock().unwrap().clone()
    }

    pub fn ai_correlations(&self) -> Vec<AiCorrelation> {
        self.ai.lock().unwrap().clone()
    }

    /// Insert a row directly, bypassing the engine.
    pub fn seed(&self, mut correlation: Correlation) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        correlation.correlation_id = Some(id);
        self.correlations.lock().unwrap().push(correlation);
        id
    }
}

impl ICorrelationStore for InMemoryCorrelationStore {
    fn find_by_pair(
        &self,
        user_id: UserId,
        a: EpisodeId,
        b: EpisodeId,
    ) -> MindcastResult<Option<Correlation>> {
        Ok(self
            .correlations
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id && c.links(a, b))
            .cloned())
    }

    fn upsert_correlation(&self, correlation: &Correlation) -> MindcastResult<UpsertOutcome> {
        let mut rows = self.correlations.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|c| {
            c.user_id == correlation.user_id
                && c.links(correlation.primary_episode_id, correlation.related_episode_id)
        }) {
            row.correlation_type = correlation.correlation_type;
            row.time_offset_hours = correlation.time_offset_hours;
            row.correlation_strength = correlation.correlation_strength;
            row.confidence_score = correlation.confidence_score;
            row.factors = correlation.factors.clone();
            let id = row.correlation_id.unwrap_or_default();
            return Ok(UpsertOutcome::Updated(id));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut row = correlation.clone();
        row.correlation_id = Some(id);
        rows.push(row);
        Ok(UpsertOutcome::Inserted(id))
    }

    fn correlations_between_types(
        &self,
        user_id: UserId,
        primary_type: &str,
        related_type: &str,
    ) -> MindcastResult<Vec<Correlation>> {
        Ok(self
            .correlations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.user_id == user_id && c.primary_type == primary_type && c.related_type == related_type
            })
            .cloned()
            .collect())
    }

    fn correlations_for_user(
        &self,
        user_id: UserId,
        filter: &CorrelationFilter,
    ) -> MindcastResult<Vec<Correlation>> {
        let mut rows: Vec<Correlation> = self
            .correlations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| filter.min_strength.map_or(true, |m| c.correlation_strength >= m))
            .filter(|c| filter.discovered_since.map_or(true, |s| c.discovered_date >= s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.correlation_strength.total_cmp(&a.correlation_strength));
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn insert_pattern_if_absent(&self, pattern: &CorrelationPattern) -> MindcastResult<bool> {
        let mut rows = self.patterns.lock().unwrap();
        let exists = rows.iter().any(|p| {
            p.user_id == pattern.user_id
                && p.pattern_subtype == pattern.pattern_subtype
                && p.correlation_type == pattern.correlation_type
                && p.threshold == pattern.threshold
        });
        if exists {
            return Ok(false);
        }
        let mut row = pattern.clone();
        row.pattern_id = Some(rows.len() as u64 + 1);
        rows.push(row);
        Ok(true)
    }

    fn patterns_for_user(&self, user_id: UserId) -> MindcastResult<Vec<CorrelationPattern>> {
        Ok(self
            .patterns
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn save_ai_correlation(&self, correlation: &AiCorrelation) -> MindcastResult<()> {
        self.ai.lock().unwrap().push(correlation.clone());
        Ok(())
    }

    fn delete_weak_correlations(
        &self,
        max_strength: f64,
        older_than: DateTime<Utc>,
    ) -> MindcastResult<u64> {
        let mut rows = self.correlations.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| !(c.correlation_strength < max_strength && c.discovered_date < older_than));
        Ok((before - rows.len()) as u64)
    }
}
