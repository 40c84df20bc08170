//! Collaborator contracts injected into the engines at construction.

mod ai_service;
mod contributor;
mod correlation_store;
mod episode_store;
mod event_sink;
mod forecast_cache;
mod forecast_history;
mod membership;
mod pattern_detector;
mod type_registry;
mod user_profile;

pub use crate::clock::IClock;
pub use ai_service::{IAiCorrelationService, IAiPredictionService};
pub use contributor::IForecastContributor;
pub use correlation_store::ICorrelationStore;
pub use episode_store::IEpisodeStore;
pub use event_sink::IEventSink;
pub use forecast_cache::IForecastCache;
pub use forecast_history::IForecastHistory;
pub use membership::IMembershipService;
pub use pattern_detector::IPatternDetector;
pub use type_registry::IEpisodeTypeRegistry;
pub use user_profile::IUserProfile;
