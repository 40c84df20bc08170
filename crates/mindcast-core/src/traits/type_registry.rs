use crate::models::TypeConfig;

/// Registry of known episode types and which pairs may correlate.
pub trait IEpisodeTypeRegistry: Send + Sync {
    fn can_correlate(&self, type_a: &str, type_b: &str) -> bool;

    /// Prior strength for the pair (0–1), independent of any user data.
    fn base_correlation_strength(&self, type_a: &str, type_b: &str) -> f64;

    fn type_config(&self, episode_type: &str) -> Option<TypeConfig>;

    fn is_registered(&self, episode_type: &str) -> bool {
        self.type_config(episode_type).is_some()
    }

    /// Human-readable name, falling back to the tag itself.
    fn display_name(&self, episode_type: &str) -> String {
        self.type_config(episode_type)
            .map(|c| c.display_name)
            .unwrap_or_else(|| episode_type.to_string())
    }
}
