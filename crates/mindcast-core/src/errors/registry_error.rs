/// Startup validation failures for type and algorithm registries.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown episode type: {episode_type}")]
    UnknownEpisodeType { episode_type: String },

    #[error("duplicate contributor for episode type: {episode_type}")]
    DuplicateContributor { episode_type: String },

    #[error("no handler registered for algorithm {algorithm} (window {window})")]
    MissingAlgorithm { algorithm: String, window: String },

    #[error("unknown {kind} tag: {tag}")]
    UnknownTag { kind: String, tag: String },
}
