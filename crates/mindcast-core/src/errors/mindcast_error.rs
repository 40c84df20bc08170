use super::{RegistryError, ServiceError, StoreError};

/// Top-level error type for the Mindcast engines.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum MindcastError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("external service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

/// Convenience type alias.
pub type MindcastResult<T> = Result<T, MindcastError>;
