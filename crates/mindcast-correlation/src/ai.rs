//! Best-effort AI correlation discovery. Never fails the caller.

use std::sync::Arc;
use std::time::Duration;

use mindcast_core::config::CorrelationConfig;
use mindcast_core::constants::AI_CORRELATION_SERVICE;
use mindcast_core::external::call_with_timeout;
use mindcast_core::models::{AiCorrelation, UserId};
use mindcast_core::traits::{IAiCorrelationService, ICorrelationStore};
use mindcast_observability::tracing_setup::events;

/// Ask the AI service for correlations and persist the confident ones.
/// Returns how many were saved; every failure is logged and swallowed.
pub fn discover(
    service: &Arc<dyn IAiCorrelationService>,
    store: &dyn ICorrelationStore,
    user_id: UserId,
    config: &CorrelationConfig,
) -> usize {
    let svc = Arc::clone(service);
    let window_days = config.ai_window_days;
    let found = match call_with_timeout(
        AI_CORRELATION_SERVICE,
        Duration::from_millis(config.ai_timeout_ms),
        move || svc.detect_correlations(user_id, window_days),
    ) {
        Ok(found) => found,
        Err(e) => {
            events::service_degraded(AI_CORRELATION_SERVICE, user_id, &e.to_string());
            return 0;
        }
    };

    let mut saved = 0;
    for candidate in confident(found, config.ai_min_confidence) {
        match store.save_ai_correlation(&candidate) {
            Ok(()) => saved += 1,
            Err(e) => events::service_degraded(AI_CORRELATION_SERVICE, user_id, &e.to_string()),
        }
    }
    saved
}

fn confident(found: Vec<AiCorrelation>, min_confidence: f64) -> impl Iterator<Item = AiCorrelation> {
    found.into_iter().filter(move |c| c.confidence >= min_confidence)
}
