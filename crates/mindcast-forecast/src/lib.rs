//! # mindcast-forecast
//!
//! Unified, membership-gated episode risk forecasts per user and window.
//!
//! ## Build pipeline
//!
//! | Step | Source |
//! |------|--------|
//! | Weighted average of per-type contributions | episode type contributors |
//! | Correlation nudge (`risk_increase × 0.1` each) | correlation engine |
//! | Window's algorithm list, in order | [`algorithms::AlgorithmRegistry`] |
//! | Risk level, prevention plan, insights | fixed bands and templates |
//! | Optional AI blend (`adjustment × confidence × 0.2`) | external prediction service |
//! | High-risk period merge | sorted sweep |
//!
//! Fresh forecasts are served from cache until their window's TTL passes.

pub mod access;
pub mod aggregate;
pub mod algorithms;
pub mod api;
pub mod cache;
pub mod engine;
pub mod enhancement;
pub mod insights;
pub mod periods;
pub mod prevention;
pub mod scheduler;

pub use access::AccessDecision;
pub use api::{ForecastApiData, ForecastApiResponse};
pub use cache::ForecastCache;
pub use engine::{ForecastCollaborators, ForecastEngine};
pub use periods::merge_periods;
pub use scheduler::RefreshReport;
