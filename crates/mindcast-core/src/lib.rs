//! # mindcast-core
//!
//! Foundation crate for the Mindcast correlation and forecast engines.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod external;
pub mod models;
pub mod registry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use clock::SystemClock;
pub use config::MindcastConfig;
pub use errors::{MindcastError, MindcastResult};
pub use events::{EngineEvent, EventBus};
pub use models::{
    Correlation, CorrelationType, Episode, EpisodeId, Forecast, ForecastOutcome, ForecastWindow,
    MembershipTier, RiskLevel, UserId,
};
pub use registry::ContributorRegistry;
