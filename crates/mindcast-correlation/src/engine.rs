//! CorrelationEngine: scans a new episode's neighbourhood, persists
//! significant correlations, emits patterns.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use mindcast_core::config::CorrelationConfig;
use mindcast_core::errors::MindcastResult;
use mindcast_core::events::EngineEvent;
use mindcast_core::models::{
    Correlation, CorrelationFilter, CorrelationInsight, CorrelationPattern, CorrelationRiskFactor,
    CorrelationType, DateRange, Episode, EpisodeId, ForecastWindow, PatternLevel, UpsertOutcome,
    UserId,
};
use mindcast_core::registry::ContributorRegistry;
use mindcast_core::traits::{
    IAiCorrelationService, IClock, ICorrelationStore, IEpisodeStore, IEpisodeTypeRegistry,
    IEventSink,
};
use mindcast_observability::detection_span;
use mindcast_observability::tracing_setup::events;

use crate::locks::UserLocks;
use crate::patterns::{self, summarize};
use crate::report::{DetectionSummary, SkipReason};
use crate::scoring::{score_pair, PairHistory};
use crate::{ai, insights, risk_factors};

/// Correlation engine. Cheap to share behind an `Arc`; all state is either
/// injected collaborators or per-user locks.
pub struct CorrelationEngine {
    pub(crate) episodes: Arc<dyn IEpisodeStore>,
    pub(crate) store: Arc<dyn ICorrelationStore>,
    types: Arc<dyn IEpisodeTypeRegistry>,
    events: Arc<dyn IEventSink>,
    pub(crate) clock: Arc<dyn IClock>,
    contributors: ContributorRegistry,
    ai_service: Option<Arc<dyn IAiCorrelationService>>,
    pub(crate) config: CorrelationConfig,
    locks: UserLocks,
    pub(crate) maintenance_running: AtomicBool,
}

impl CorrelationEngine {
    pub fn new(
        episodes: Arc<dyn IEpisodeStore>,
        store: Arc<dyn ICorrelationStore>,
        types: Arc<dyn IEpisodeTypeRegistry>,
        events: Arc<dyn IEventSink>,
        clock: Arc<dyn IClock>,
        config: CorrelationConfig,
    ) -> Self {
        Self {
            episodes,
            store,
            types,
            events,
            clock,
            contributors: ContributorRegistry::new(),
            ai_service: None,
            config,
            locks: UserLocks::new(),
            maintenance_running: AtomicBool::new(false),
        }
    }

    /// Per-type risk handlers used by [`Self::get_correlation_risk_factors`].
    /// Fails if a contributor serves a type the registry does not know.
    pub fn with_contributors(mut self, contributors: ContributorRegistry) -> MindcastResult<Self> {
        contributors.validate(self.types.as_ref())?;
        self.contributors = contributors;
        Ok(self)
    }

    /// Optional AI discovery, used only when `ai_enabled` is set.
    pub fn with_ai_service(mut self, service: Arc<dyn IAiCorrelationService>) -> Self {
        self.ai_service = Some(service);
        self
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Score a pair without persisting, using the user's stored history for
    /// the type orientation.
    pub fn calculate_correlation(
        &self,
        primary: &Episode,
        related: &Episode,
    ) -> MindcastResult<Correlation> {
        let rows = self.store.correlations_between_types(
            primary.user_id,
            &primary.episode_type,
            &related.episode_type,
        )?;
        let history = PairHistory::from_rows(&rows, primary, related);
        let base = self
            .types
            .base_correlation_strength(&primary.episode_type, &related.episode_type);
        Ok(score_pair(primary, related, base, &history, self.clock.now()))
    }

    /// Detect and persist correlations around one episode.
    ///
    /// Missing episodes and users with too little data are skipped, not errors.
    pub fn detect_correlations(&self, episode_id: EpisodeId) -> MindcastResult<DetectionSummary> {
        let _span = detection_span!(episode_id).entered();

        let Some(episode) = self.episodes.get_episode(episode_id)? else {
            debug!(episode_id, "episode not found, skipping detection");
            return Ok(DetectionSummary::skipped(episode_id, SkipReason::EpisodeNotFound));
        };
        let user_id = episode.user_id;

        let logged = self.episodes.count_episodes(user_id)?;
        if logged < self.config.min_episodes_for_correlation {
            debug!(user_id, logged, "not enough episodes for correlation");
            return Ok(DetectionSummary::skipped(
                episode_id,
                SkipReason::InsufficientEpisodes {
                    logged,
                    required: self.config.min_episodes_for_correlation,
                },
            ));
        }

        let range = DateRange::around(
            episode.episode_date,
            Duration::days(self.config.correlation_window_days),
        );
        let nearby = self.episodes.get_episodes(user_id, range)?;

        let mut summary = DetectionSummary::for_episode(episode_id);
        self.locks.run_exclusive(user_id, || {
            for other in nearby.iter().filter(|e| e.episode_id != episode_id) {
                summary.candidates += 1;
                if !self
                    .types
                    .can_correlate(&episode.episode_type, &other.episode_type)
                {
                    summary.incompatible += 1;
                    continue;
                }
                self.correlate_pair(&episode, other, &mut summary)?;
            }
            Ok(())
        })?;

        if self.config.ai_enabled {
            if let Some(service) = &self.ai_service {
                summary.ai_correlations_saved =
                    ai::discover(service, self.store.as_ref(), user_id, &self.config);
            }
        }

        debug!(
            episode_id,
            candidates = summary.candidates,
            inserted = summary.inserted,
            updated = summary.updated,
            patterns = summary.patterns_emitted,
            "detection pass complete"
        );
        Ok(summary)
    }

    /// Score, persist, and pattern-check one compatible pair. Caller holds the
    /// user's lock.
    fn correlate_pair(
        &self,
        trigger: &Episode,
        other: &Episode,
        summary: &mut DetectionSummary,
    ) -> MindcastResult<()> {
        let existing = self
            .store
            .find_by_pair(trigger.user_id, trigger.episode_id, other.episode_id)?;

        // An existing row fixes the orientation so re-detection from either
        // side updates the same primary/related assignment.
        let (primary, related) = match &existing {
            Some(row) if row.primary_episode_id == other.episode_id => (other, trigger),
            _ => (trigger, other),
        };

        let mut correlation = self.calculate_correlation(primary, related)?;
        if correlation.correlation_strength < self.config.min_correlation_strength {
            summary.below_threshold += 1;
            return Ok(());
        }
        if let Some(row) = &existing {
            correlation.correlation_id = row.correlation_id;
            correlation.discovered_date = row.discovered_date;
        }

        let outcome = self.store.upsert_correlation(&correlation)?;
        correlation.correlation_id = Some(outcome.id());
        events::correlation_saved(&correlation, outcome.is_insert());
        match outcome {
            UpsertOutcome::Inserted(_) => {
                summary.inserted += 1;
                self.events.publish(&EngineEvent::CorrelationDiscovered {
                    correlation: correlation.clone(),
                });
            }
            UpsertOutcome::Updated(_) => summary.updated += 1,
        }

        summary.patterns_emitted += self.check_patterns(&correlation)?.len();
        Ok(())
    }

    /// Record every threshold the correlation's group has reached but not yet
    /// recorded. Caller holds the user's lock.
    fn check_patterns(&self, correlation: &Correlation) -> MindcastResult<Vec<CorrelationPattern>> {
        let rows = self.store.correlations_between_types(
            correlation.user_id,
            &correlation.primary_type,
            &correlation.related_type,
        )?;
        let group: Vec<&Correlation> = rows
            .iter()
            .filter(|c| {
                c.correlation_type == correlation.correlation_type
                    && c.correlation_strength >= self.config.min_correlation_strength
            })
            .collect();
        let Some(group_summary) = summarize(&group) else {
            return Ok(Vec::new());
        };

        let subtype =
            CorrelationPattern::subtype_for(&correlation.primary_type, &correlation.related_type);
        let recorded: BTreeSet<u32> = self
            .store
            .patterns_for_user(correlation.user_id)?
            .into_iter()
            .filter(|p| {
                p.pattern_subtype == subtype && p.correlation_type == correlation.correlation_type
            })
            .map(|p| p.threshold)
            .collect();

        let mut emitted = Vec::new();
        for (index, threshold) in patterns::thresholds_crossed(
            group_summary.occurrences,
            &self.config.pattern_thresholds,
            &recorded,
        ) {
            let pattern = patterns::build_pattern(
                correlation.user_id,
                &correlation.primary_type,
                &correlation.related_type,
                correlation.correlation_type,
                index,
                threshold,
                &group_summary,
            );
            if self.store.insert_pattern_if_absent(&pattern)? {
                events::pattern_discovered(&pattern);
                self.events.publish(&EngineEvent::PatternDiscovered {
                    pattern: pattern.clone(),
                });
                emitted.push(pattern);
            }
        }
        Ok(emitted)
    }

    /// Re-run detection over a user's episodes dated at or after `since`.
    /// Idempotent: existing pairs are updated in place.
    pub fn detect_for_user(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
    ) -> MindcastResult<DetectionSummary> {
        let episodes = self
            .episodes
            .get_episodes(user_id, DateRange::new(since, self.clock.now()))?;
        let mut total = DetectionSummary::default();
        for episode in &episodes {
            let pass = self.detect_correlations(episode.episode_id)?;
            // Every episode of the user would skip for the same reason.
            if let Some(reason @ SkipReason::InsufficientEpisodes { .. }) = pass.skipped {
                total.skipped = Some(reason);
                break;
            }
            total.absorb(&pass);
        }
        Ok(total)
    }

    /// Insights for a user's correlations, grouped by type orientation and
    /// correlation type, strongest-and-most-certain first. `limit` caps the
    /// number of insights.
    pub fn get_user_correlations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> MindcastResult<Vec<CorrelationInsight>> {
        let rows = self
            .store
            .correlations_for_user(user_id, &CorrelationFilter::default())?;

        let mut groups: BTreeMap<(String, String, CorrelationType), Vec<&Correlation>> =
            BTreeMap::new();
        for c in &rows {
            groups
                .entry((c.primary_type.clone(), c.related_type.clone(), c.correlation_type))
                .or_default()
                .push(c);
        }

        let mut levels: HashMap<(String, CorrelationType), PatternLevel> = HashMap::new();
        for p in self.store.patterns_for_user(user_id)? {
            let slot = levels
                .entry((p.pattern_subtype.clone(), p.correlation_type))
                .or_insert(p.level);
            *slot = (*slot).max(p.level);
        }

        let mut out: Vec<CorrelationInsight> = groups
            .into_iter()
            .filter_map(|((primary, related, kind), members)| {
                let summary = summarize(&members)?;
                let level = levels
                    .get(&(CorrelationPattern::subtype_for(&primary, &related), kind))
                    .copied();
                Some(insights::build_insight(
                    &primary,
                    &related,
                    &self.types.display_name(&primary),
                    &self.types.display_name(&related),
                    kind,
                    &summary,
                    level,
                ))
            })
            .collect();
        insights::rank(&mut out);
        out.truncate(limit);
        Ok(out)
    }

    /// Risk factors for the forecast: strong, recent, recurring correlations
    /// whose primary type is currently risky.
    ///
    /// A primary type with no contributor, or whose contributor fails, yields
    /// no factor.
    pub fn get_correlation_risk_factors(
        &self,
        user_id: UserId,
        window: ForecastWindow,
    ) -> MindcastResult<Vec<CorrelationRiskFactor>> {
        let filter = CorrelationFilter {
            min_strength: Some(self.config.risk_factor_min_strength),
            discovered_since: Some(
                self.clock.now() - Duration::days(self.config.risk_factor_lookback_days),
            ),
            limit: None,
        };
        let rows = self.store.correlations_for_user(user_id, &filter)?;
        let groups =
            risk_factors::recurring_groups(&rows, self.config.risk_factor_min_occurrences);

        let mut primary_risk: HashMap<String, Option<f64>> = HashMap::new();
        let mut factors = Vec::new();
        for (key, summary) in &groups {
            let risk = *primary_risk
                .entry(key.0.clone())
                .or_insert_with(|| self.current_risk(user_id, &key.0, window));
            let Some(risk) = risk else { continue };
            if let Some(f) = risk_factors::risk_factor(
                key,
                summary,
                risk,
                self.config.risk_factor_min_primary_risk,
            ) {
                factors.push(f);
            }
        }
        factors.sort_by(|a, b| b.risk_increase.total_cmp(&a.risk_increase));
        Ok(factors)
    }

    fn current_risk(&self, user_id: UserId, episode_type: &str, window: ForecastWindow) -> Option<f64> {
        let contributor = self.contributors.get(episode_type)?;
        match contributor.contribute_to_forecast(user_id, window) {
            Ok(c) => Some(c.risk_score),
            Err(e) => {
                warn!(user_id, episode_type, error = %e, "primary type risk unavailable");
                None
            }
        }
    }
}
