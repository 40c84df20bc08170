//! # mindcast-observability
//!
//! Structured logging for the correlation and forecast engines.
//!
//! ## Modules
//!
//! - `tracing_setup`: subscriber initialization, span macros, named log events
//! - `forecast_log`: `ForecastLog`, the compact per-user record of built
//!   forecasts used for trend insights

pub mod forecast_log;
pub mod tracing_setup;

pub use forecast_log::ForecastLog;
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
