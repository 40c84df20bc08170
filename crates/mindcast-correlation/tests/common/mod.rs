#![allow(dead_code)]

use std::sync::Arc;

use mindcast_core::config::CorrelationConfig;
use mindcast_correlation::CorrelationEngine;
use test_fixtures::{
    FixedClock, InMemoryCorrelationStore, InMemoryEpisodeStore, RecordingSink, StaticTypeRegistry,
};

pub struct Harness {
    pub episodes: Arc<InMemoryEpisodeStore>,
    pub store: Arc<InMemoryCorrelationStore>,
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<FixedClock>,
    pub registry: Arc<StaticTypeRegistry>,
}

impl Harness {
    pub fn new(registry: StaticTypeRegistry) -> Self {
        Self {
            episodes: Arc::new(InMemoryEpisodeStore::new()),
            store: Arc::new(InMemoryCorrelationStore::new()),
            sink: Arc::new(RecordingSink::new()),
            clock: Arc::new(FixedClock::default_start()),
            registry: Arc::new(registry),
        }
    }

    pub fn default_registry() -> StaticTypeRegistry {
        StaticTypeRegistry::new()
            .with_type("overthinking", "Overthinking", 1.0)
            .with_type("anxiety", "Anxiety", 1.0)
            .with_type("panic", "Panic", 1.0)
            .with_pair("overthinking", "anxiety", 0.7)
    }

    pub fn engine(&self, config: CorrelationConfig) -> CorrelationEngine {
        CorrelationEngine::new(
            self.episodes.clone(),
            self.store.clone(),
            self.registry.clone(),
            self.sink.clone(),
            self.clock.clone(),
            config,
        )
    }
}
