//! Tracing setup: structured JSON logging, span macros, and named events.

pub mod events;
pub mod spans;

use mindcast_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MINDCAST_LOG";

/// Install the JSON subscriber.
///
/// `MINDCAST_LOG` takes precedence; otherwise the level is `info`. Calling
/// this more than once is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    install(filter);
}

/// Like [`init_tracing`], falling back to `config.log_level` when
/// `MINDCAST_LOG` is unset.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    install(filter);
}

/// Initialize tracing with an explicit filter string (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

fn install(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}
