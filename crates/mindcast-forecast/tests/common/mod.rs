#![allow(dead_code)]

use std::sync::Arc;

use mindcast_core::config::{CorrelationConfig, ForecastConfig};
use mindcast_core::models::{MembershipTier, UserId, UserPatterns};
use mindcast_core::registry::ContributorRegistry;
use mindcast_core::traits::IForecastContributor;
use mindcast_correlation::CorrelationEngine;
use mindcast_forecast::{ForecastCache, ForecastCollaborators, ForecastEngine};
use mindcast_observability::ForecastLog;
use test_fixtures::{
    FixedClock, InMemoryCorrelationStore, InMemoryEpisodeStore, RecordingSink, StaticMembership,
    StaticPatternDetector, StaticProfile, StaticTypeRegistry,
};

pub struct Harness {
    pub episodes: Arc<InMemoryEpisodeStore>,
    pub store: Arc<InMemoryCorrelationStore>,
    pub membership: Arc<StaticMembership>,
    pub profile: Arc<StaticProfile>,
    pub detector: Arc<StaticPatternDetector>,
    pub cache: Arc<ForecastCache>,
    pub history: Arc<ForecastLog>,
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<FixedClock>,
    pub registry: Arc<StaticTypeRegistry>,
}

impl Harness {
    pub fn new(membership: StaticMembership, profile: StaticProfile) -> Self {
        Self::with_patterns(membership, profile, UserPatterns::default())
    }

    pub fn with_patterns(
        membership: StaticMembership,
        profile: StaticProfile,
        patterns: UserPatterns,
    ) -> Self {
        Self {
            episodes: Arc::new(InMemoryEpisodeStore::new()),
            store: Arc::new(InMemoryCorrelationStore::new()),
            membership: Arc::new(membership),
            profile: Arc::new(profile),
            detector: Arc::new(StaticPatternDetector::new(patterns)),
            cache: Arc::new(ForecastCache::from_config(&ForecastConfig::default())),
            history: Arc::new(ForecastLog::new()),
            sink: Arc::new(RecordingSink::new()),
            clock: Arc::new(FixedClock::default_start()),
            registry: Arc::new(
                StaticTypeRegistry::new()
                    .with_type("overthinking", "Overthinking", 1.0)
                    .with_type("anxiety", "Anxiety", 1.0)
                    .with_pair("overthinking", "anxiety", 0.7),
            ),
        }
    }

    /// One user on one tier.
    pub fn member(user_id: UserId, tier: MembershipTier) -> StaticMembership {
        StaticMembership::new().grant(user_id, tier)
    }

    pub fn contributors(list: Vec<Arc<dyn IForecastContributor>>) -> ContributorRegistry {
        let mut registry = ContributorRegistry::new();
        for c in list {
            registry.register(c).unwrap();
        }
        registry
    }

    pub fn engine(&self, contributors: ContributorRegistry, config: ForecastConfig) -> ForecastEngine {
        let correlations = CorrelationEngine::new(
            self.episodes.clone(),
            self.store.clone(),
            self.registry.clone(),
            self.sink.clone(),
            self.clock.clone(),
            CorrelationConfig::default(),
        )
        .with_contributors(contributors.clone())
        .unwrap();

        ForecastEngine::new(
            ForecastCollaborators {
                membership: self.membership.clone(),
                profile: self.profile.clone(),
                episodes: self.episodes.clone(),
                types: self.registry.clone(),
                detector: self.detector.clone(),
                correlations: Arc::new(correlations),
                cache: self.cache.clone(),
                history: self.history.clone(),
                events: self.sink.clone(),
                clock: self.clock.clone(),
            },
            config,
        )
        .with_contributors(contributors)
        .unwrap()
    }
}
