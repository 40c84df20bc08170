//! ForecastEngine: access check, cache, build, AI blend, and bookkeeping
//! for one (user, window) forecast.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tracing::{debug, warn};

use mindcast_core::config::ForecastConfig;
use mindcast_core::errors::MindcastResult;
use mindcast_core::events::EngineEvent;
use mindcast_core::models::{
    DateRange, Forecast, ForecastKey, ForecastLogEntry, ForecastOutcome, ForecastWindow,
    MembershipTier, RiskLevel, UserId, UserPatterns,
};
use mindcast_core::registry::ContributorRegistry;
use mindcast_core::traits::{
    IAiPredictionService, IClock, IEpisodeStore, IEpisodeTypeRegistry, IEventSink,
    IForecastCache, IForecastHistory, IMembershipService, IPatternDetector, IUserProfile,
};
use mindcast_correlation::CorrelationEngine;
use mindcast_observability::forecast_span;
use mindcast_observability::tracing_setup::events;

use crate::access::{self, AccessDecision};
use crate::aggregate::aggregate;
use crate::algorithms::{AlgorithmContext, AlgorithmRegistry, ForecastDraft, HISTORY_LOOKBACK_DAYS};
use crate::api::{ForecastApiData, ForecastApiResponse};
use crate::enhancement;
use crate::insights::{self, InsightInputs};
use crate::periods::merge_periods;
use crate::prevention::{self, TOP_STRATEGIES};

/// Everything the forecast engine reads from or writes to.
pub struct ForecastCollaborators {
    pub membership: Arc<dyn IMembershipService>,
    pub profile: Arc<dyn IUserProfile>,
    pub episodes: Arc<dyn IEpisodeStore>,
    pub types: Arc<dyn IEpisodeTypeRegistry>,
    pub detector: Arc<dyn IPatternDetector>,
    pub correlations: Arc<CorrelationEngine>,
    pub cache: Arc<dyn IForecastCache>,
    pub history: Arc<dyn IForecastHistory>,
    pub events: Arc<dyn IEventSink>,
    pub clock: Arc<dyn IClock>,
}

/// Forecast engine. Stateless apart from its cache and history collaborators,
/// so one instance serves every user concurrently.
pub struct ForecastEngine {
    membership: Arc<dyn IMembershipService>,
    profile: Arc<dyn IUserProfile>,
    pub(crate) episodes: Arc<dyn IEpisodeStore>,
    types: Arc<dyn IEpisodeTypeRegistry>,
    detector: Arc<dyn IPatternDetector>,
    correlations: Arc<CorrelationEngine>,
    cache: Arc<dyn IForecastCache>,
    history: Arc<dyn IForecastHistory>,
    events: Arc<dyn IEventSink>,
    pub(crate) clock: Arc<dyn IClock>,
    contributors: ContributorRegistry,
    ai_service: Option<Arc<dyn IAiPredictionService>>,
    algorithms: AlgorithmRegistry,
    pub(crate) config: ForecastConfig,
}

impl ForecastEngine {
    /// Build an engine with the standard algorithm set and no contributors.
    pub fn new(collaborators: ForecastCollaborators, config: ForecastConfig) -> Self {
        let ForecastCollaborators {
            membership,
            profile,
            episodes,
            types,
            detector,
            correlations,
            cache,
            history,
            events,
            clock,
        } = collaborators;
        Self {
            membership,
            profile,
            episodes,
            types,
            detector,
            correlations,
            cache,
            history,
            events,
            clock,
            contributors: ContributorRegistry::new(),
            ai_service: None,
            algorithms: AlgorithmRegistry::standard(),
            config,
        }
    }

    /// Per-type handlers. Fails if a handler serves an unregistered type.
    pub fn with_contributors(mut self, contributors: ContributorRegistry) -> MindcastResult<Self> {
        contributors.validate(self.types.as_ref())?;
        self.contributors = contributors;
        Ok(self)
    }

    /// Replace the algorithm set. Fails if any window names an algorithm
    /// without a handler.
    pub fn with_algorithms(mut self, algorithms: AlgorithmRegistry) -> MindcastResult<Self> {
        algorithms.validate()?;
        self.algorithms = algorithms;
        Ok(self)
    }

    /// Optional AI enhancement, used only when enabled and the tier allows.
    pub fn with_ai_service(mut self, service: Arc<dyn IAiPredictionService>) -> Self {
        self.ai_service = Some(service);
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Serve a fresh cached forecast or build a new one.
    ///
    /// A tier below the window's minimum yields `ForecastOutcome::AccessDenied`
    /// and nothing is computed.
    pub fn generate_unified_forecast(
        &self,
        user_id: UserId,
        window: ForecastWindow,
    ) -> MindcastResult<ForecastOutcome> {
        let _span = forecast_span!(user_id, window).entered();

        let tier = match self.check_access(user_id, window)? {
            AccessDecision::Granted(tier) => tier,
            AccessDecision::Denied(denied) => return Ok(ForecastOutcome::AccessDenied(denied)),
        };

        let key = ForecastKey::new(user_id, window);
        if let Some(cached) = self.cache.get(&key) {
            if cached.is_fresh(self.clock.now()) {
                debug!(user_id, window = %window, "serving cached forecast");
                return Ok(ForecastOutcome::Ready(Box::new(cached)));
            }
        }

        let forecast = self.build_and_store(user_id, window, tier)?;
        Ok(ForecastOutcome::Ready(Box::new(forecast)))
    }

    /// Rebuild regardless of the cache. Still subject to the access check.
    pub fn refresh_forecast(
        &self,
        user_id: UserId,
        window: ForecastWindow,
    ) -> MindcastResult<ForecastOutcome> {
        let _span = forecast_span!(user_id, window).entered();
        match self.check_access(user_id, window)? {
            AccessDecision::Granted(tier) => {
                let forecast = self.build_and_store(user_id, window, tier)?;
                Ok(ForecastOutcome::Ready(Box::new(forecast)))
            }
            AccessDecision::Denied(denied) => Ok(ForecastOutcome::AccessDenied(denied)),
        }
    }

    /// Same data as [`Self::generate_unified_forecast`], shaped for the
    /// external API.
    pub fn get_forecast_api_data(
        &self,
        user_id: UserId,
        window: ForecastWindow,
    ) -> MindcastResult<ForecastApiResponse> {
        Ok(match self.generate_unified_forecast(user_id, window)? {
            ForecastOutcome::Ready(forecast) => {
                ForecastApiResponse::Ok(Box::new(ForecastApiData::from(forecast.as_ref())))
            }
            ForecastOutcome::AccessDenied(denied) => ForecastApiResponse::from(denied),
        })
    }

    /// Drop every cached forecast for `user_id`, e.g. after a new episode.
    pub fn invalidate(&self, user_id: UserId) {
        self.cache.invalidate_user(user_id);
    }

    fn check_access(&self, user_id: UserId, window: ForecastWindow) -> MindcastResult<AccessDecision> {
        let decision = access::check(self.membership.as_ref(), user_id, window)?;
        if let AccessDecision::Denied(d) = &decision {
            events::forecast_access_denied(user_id, window, d.required_tier, d.current_tier);
        }
        Ok(decision)
    }

    fn build_and_store(
        &self,
        user_id: UserId,
        window: ForecastWindow,
        tier: MembershipTier,
    ) -> MindcastResult<Forecast> {
        let forecast = self.build(user_id, window, tier)?;

        let ttl = window.ttl().to_std().unwrap_or(StdDuration::ZERO);
        self.cache.set(forecast.key(), forecast.clone(), ttl);
        self.history.record(ForecastLogEntry::from(&forecast));
        events::forecast_generated(&forecast);

        self.events.publish(&EngineEvent::ForecastGenerated {
            user_id,
            window,
            overall_risk: forecast.overall_risk,
            risk_level: forecast.risk_level,
        });
        if forecast.risk_level >= RiskLevel::High {
            self.events.publish(&EngineEvent::HighRiskForecast {
                user_id,
                window,
                overall_risk: forecast.overall_risk,
                risk_level: forecast.risk_level,
            });
        }
        Ok(forecast)
    }

    fn build(
        &self,
        user_id: UserId,
        window: ForecastWindow,
        tier: MembershipTier,
    ) -> MindcastResult<Forecast> {
        let now = self.clock.now();

        let enabled = self.profile.enabled_episode_types(user_id)?;
        let agg = aggregate(&self.contributors, &enabled, user_id, window);

        let correlation_risks = self
            .correlations
            .get_correlation_risk_factors(user_id, window)
            .unwrap_or_else(|e| {
                warn!(user_id, error = %e, "correlation risk factors unavailable");
                Vec::new()
            });
        let mut draft = ForecastDraft::starting_at(agg.overall_risk);
        for factor in &correlation_risks {
            draft.add_risk(factor.risk_increase * self.config.correlation_nudge_factor);
        }

        let episodes = self.episodes.get_episodes(
            user_id,
            DateRange::trailing(now, Duration::days(HISTORY_LOOKBACK_DAYS)),
        )?;
        let patterns = self.detector.get_user_patterns(user_id).unwrap_or_else(|e| {
            warn!(user_id, error = %e, "pattern detector unavailable");
            UserPatterns::default()
        });

        let ctx = AlgorithmContext {
            user_id,
            window,
            now,
            episodes: &episodes,
            patterns: &patterns,
            correlation_risks: &correlation_risks,
            profile: self.profile.as_ref(),
        };
        self.run_algorithms(&ctx, &mut draft);

        let history = self.history.entries_since(user_id, window, now - Duration::days(7));
        let mut forecast_insights = std::mem::take(&mut draft.insights);
        forecast_insights.extend(insights::generate(
            &InsightInputs {
                now,
                overall_risk: draft.overall_risk,
                active_pattern_count: draft.active_patterns.len(),
                history: &history,
                correlation_risks: &correlation_risks,
                episodes: &episodes,
            },
            &self.config,
        ));

        let mut high_risk_periods = agg.high_risk_periods;
        high_risk_periods.append(&mut draft.high_risk_periods);

        let mut forecast = Forecast {
            forecast_id: uuid::Uuid::new_v4(),
            user_id,
            window,
            overall_risk: draft.overall_risk,
            confidence: agg.confidence,
            risk_level: RiskLevel::from_score(draft.overall_risk),
            episode_risks: agg.episode_risks,
            high_risk_periods,
            correlation_risks,
            active_patterns: draft.active_patterns.clone(),
            biological_factors: draft.biological_factors.clone(),
            cascade_warning: draft.cascade_warning.clone(),
            prevention_plan: Default::default(),
            insights: forecast_insights,
            recommendations: agg.recommendations,
            ai_enhanced: false,
            ai_predictions: Vec::new(),
            generated_at: now,
            expires_at: now + window.ttl(),
        };

        if let Some(service) = self.ai_service.as_ref() {
            if access::ai_allowed(tier, &self.config) {
                enhancement::enhance(
                    service,
                    &mut forecast,
                    StdDuration::from_millis(self.config.ai_timeout_ms),
                    self.config.ai_blend_factor,
                );
            }
        }

        forecast.risk_level = RiskLevel::from_score(forecast.overall_risk);
        forecast.high_risk_periods = merge_periods(std::mem::take(&mut forecast.high_risk_periods));
        let strategies = self
            .profile
            .top_coping_strategies(user_id, TOP_STRATEGIES)
            .unwrap_or_else(|e| {
                warn!(user_id, error = %e, "coping strategies unavailable");
                Vec::new()
            });
        forecast.prevention_plan =
            prevention::build_plan(forecast.risk_level, &draft, &patterns, strategies);
        Ok(forecast)
    }

    /// Apply the window's algorithms in order. A failing algorithm is logged
    /// and skipped; the rest still run.
    fn run_algorithms(&self, ctx: &AlgorithmContext<'_>, draft: &mut ForecastDraft) {
        for &algorithm in ctx.window.algorithms() {
            let Some(handler) = self.algorithms.get(algorithm) else {
                warn!(algorithm = %algorithm, "no handler registered");
                continue;
            };
            if let Err(e) = handler.apply(ctx, draft) {
                warn!(
                    user_id = ctx.user_id,
                    algorithm = %algorithm,
                    error = %e,
                    "forecast algorithm failed"
                );
            }
        }
    }
}
