//! Explicit tag → handler map for per-episode-type forecast contributors.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{MindcastResult, RegistryError};
use crate::traits::{IEpisodeTypeRegistry, IForecastContributor};

/// Contributors keyed by the episode type they serve.
#[derive(Clone, Default)]
pub struct ContributorRegistry {
    contributors: BTreeMap<String, Arc<dyn IForecastContributor>>,
}

impl ContributorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contributor. Rejects a second handler for the same type.
    pub fn register(&mut self, contributor: Arc<dyn IForecastContributor>) -> MindcastResult<()> {
        let episode_type = contributor.episode_type().to_string();
        if self.contributors.contains_key(&episode_type) {
            return Err(RegistryError::DuplicateContributor { episode_type }.into());
        }
        self.contributors.insert(episode_type, contributor);
        Ok(())
    }

    /// Builder-style registration.
    pub fn with(mut self, contributor: Arc<dyn IForecastContributor>) -> MindcastResult<Self> {
        self.register(contributor)?;
        Ok(self)
    }

    /// Every registered type must be known to the episode type registry.
    pub fn validate(&self, types: &dyn IEpisodeTypeRegistry) -> MindcastResult<()> {
        for episode_type in self.contributors.keys() {
            if !types.is_registered(episode_type) {
                return Err(RegistryError::UnknownEpisodeType {
                    episode_type: episode_type.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn get(&self, episode_type: &str) -> Option<&Arc<dyn IForecastContributor>> {
        self.contributors.get(episode_type)
    }

    pub fn episode_types(&self) -> impl Iterator<Item = &str> {
        self.contributors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }
}

impl std::fmt::Debug for ContributorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributorRegistry")
            .field("episode_types", &self.contributors.keys().collect::<Vec<_>>())
            .finish()
    }
}
