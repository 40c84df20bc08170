//! Fakes for the registry, contributor, pattern, membership, profile, and
//! event contracts.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use mindcast_core::errors::{MindcastResult, ServiceError};
use mindcast_core::events::EngineEvent;
use mindcast_core::models::{
    CopingStrategy, CyclePhase, ForecastContribution, ForecastWindow, HighRiskPeriod,
    MembershipTier, TypeConfig, UserId, UserPatterns,
};
use mindcast_core::traits::{
    IEpisodeTypeRegistry, IEventSink, IForecastContributor, IMembershipService, IPatternDetector,
    IUserProfile,
};

/// Registry where only explicitly declared pairs may correlate.
#[derive(Debug, Default, Clone)]
pub struct StaticTypeRegistry {
    types: BTreeMap<String, TypeConfig>,
    pairs: BTreeMap<(String, String), f64>,
}

impl StaticTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, tag: &str, display_name: &str, weight: f64) -> Self {
        self.types.insert(
            tag.to_string(),
            TypeConfig {
                display_name: display_name.to_string(),
                color: "#6c5ce7".to_string(),
                weight,
            },
        );
        self
    }

    /// Allow `a` and `b` to correlate (in either order) with a base strength.
    pub fn with_pair(mut self, a: &str, b: &str, base_strength: f64) -> Self {
        self.pairs.insert(Self::key(a, b), base_strength);
        self
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

impl IEpisodeTypeRegistry for StaticTypeRegistry {
    fn can_correlate(&self, type_a: &str, type_b: &str) -> bool {
        self.pairs.contains_key(&Self::key(type_a, type_b))
    }

    fn base_correlation_strength(&self, type_a: &str, type_b: &str) -> f64 {
        self.pairs
            .get(&Self::key(type_a, type_b))
            .copied()
            .unwrap_or(0.0)
    }

    fn type_config(&self, episode_type: &str) -> Option<TypeConfig> {
        self.types.get(episode_type).cloned()
    }
}

/// Contributor returning the same contribution for every user and window.
#[derive(Debug)]
pub struct FixedContributor {
    episode_type: String,
    contribution: ForecastContribution,
    calls: AtomicUsize,
}

impl FixedContributor {
    pub fn new(episode_type: &str, risk: f64, confidence: f64, weight: f64) -> Self {
        Self {
            episode_type: episode_type.to_string(),
            contribution: ForecastContribution::scored(risk, confidence, weight),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_period(mut self, period: HighRiskPeriod) -> Self {
        self.contribution.high_risk_periods.push(period);
        self
    }

    pub fn with_factor(mut self, factor: &str) -> Self {
        self.contribution.contributing_factors.push(factor.to_string());
        self
    }

    pub fn with_recommendation(mut self, text: &str) -> Self {
        self.contribution.recommendations.push(text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IForecastContributor for FixedContributor {
    fn episode_type(&self) -> &str {
        &self.episode_type
    }

    fn contribute_to_forecast(
        &self,
        _user_id: UserId,
        _window: ForecastWindow,
    ) -> MindcastResult<ForecastContribution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.contribution.clone())
    }
}

/// Contributor whose every call fails.
#[derive(Debug)]
pub struct FailingContributor {
    episode_type: String,
}

impl FailingContributor {
    pub fn new(episode_type: &str) -> Self {
        Self {
            episode_type: episode_type.to_string(),
        }
    }
}

impl IForecastContributor for FailingContributor {
    fn episode_type(&self) -> &str {
        &self.episode_type
    }

    fn contribute_to_forecast(
        &self,
        _user_id: UserId,
        _window: ForecastWindow,
    ) -> MindcastResult<ForecastContribution> {
        Err(ServiceError::Failed {
            service: format!("contributor:{}", self.episode_type),
            reason: "handler crashed".to_string(),
        }
        .into())
    }
}

#[derive(Debug, Default)]
pub struct StaticPatternDetector {
    patterns: UserPatterns,
}

impl StaticPatternDetector {
    pub fn new(patterns: UserPatterns) -> Self {
        Self { patterns }
    }
}

impl IPatternDetector for StaticPatternDetector {
    fn get_user_patterns(&self, _user_id: UserId) -> MindcastResult<UserPatterns> {
        Ok(self.patterns.clone())
    }
}

/// Membership lookup backed by a map. Users with no entry hold no tier.
#[derive(Debug, Default)]
pub struct StaticMembership {
    tiers: Mutex<HashMap<UserId, Vec<MembershipTier>>>,
    lookups: AtomicUsize,
}

impl StaticMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(self, user_id: UserId, tier: MembershipTier) -> Self {
        self.tiers
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(tier);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl IMembershipService for StaticMembership {
    fn active_tiers(&self, user_id: UserId) -> MindcastResult<Vec<MembershipTier>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tiers
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Same profile for every user.
#[derive(Debug, Clone, Default)]
pub struct StaticProfile {
    pub episode_types: Vec<String>,
    pub biological_tracking: bool,
    pub cycle_phase: Option<CyclePhase>,
    pub average_sleep_hours: Option<f64>,
    pub coping_strategies: Vec<CopingStrategy>,
}

impl StaticProfile {
    pub fn tracking(types: &[&str]) -> Self {
        Self {
            episode_types: types.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_biology(mut self, phase: Option<CyclePhase>, sleep_hours: Option<f64>) -> Self {
        self.biological_tracking = true;
        self.cycle_phase = phase;
        self.average_sleep_hours = sleep_hours;
        self
    }

    pub fn with_strategy(mut self, name: &str, effectiveness: f64, times_used: u32) -> Self {
        self.coping_strategies.push(CopingStrategy {
            name: name.to_string(),
            effectiveness,
            times_used,
        });
        self
    }
}

impl IUserProfile for StaticProfile {
    fn enabled_episode_types(&self, _user_id: UserId) -> MindcastResult<Vec<String>> {
        Ok(self.episode_types.clone())
    }

    fn biological_tracking_enabled(&self, _user_id: UserId) -> MindcastResult<bool> {
        Ok(self.biological_tracking)
    }

    fn cycle_phase(&self, _user_id: UserId, _at: DateTime<Utc>) -> MindcastResult<Option<CyclePhase>> {
        Ok(self.cycle_phase)
    }

    fn average_sleep_hours(&self, _user_id: UserId, _days: u32) -> MindcastResult<Option<f64>> {
        Ok(self.average_sleep_hours)
    }

    fn top_coping_strategies(
        &self,
        _user_id: UserId,
        limit: usize,
    ) -> MindcastResult<Vec<CopingStrategy>> {
        let mut strategies = self.coping_strategies.clone();
        strategies.sort_by(|a, b| b.effectiveness.total_cmp(&a.effectiveness));
        strategies.truncate(limit);
        Ok(strategies)
    }
}

/// Event sink that keeps everything it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }
}

impl IEventSink for RecordingSink {
    fn publish(&self, event: &EngineEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
