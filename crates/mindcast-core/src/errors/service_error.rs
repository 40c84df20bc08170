/// Failures of optional external services (AI correlation / prediction).
///
/// These never reach engine callers; they are logged and absorbed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    #[error("{service} failed: {reason}")]
    Failed { service: String, reason: String },

    #[error("{service} is not available: {reason}")]
    Unavailable { service: String, reason: String },
}
