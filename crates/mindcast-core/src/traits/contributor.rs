use crate::errors::MindcastResult;
use crate::models::{ForecastContribution, ForecastWindow, UserId};

/// Per-episode-type forecast handler.
pub trait IForecastContributor: Send + Sync {
    /// Episode type tag this handler serves.
    fn episode_type(&self) -> &str;

    fn contribute_to_forecast(
        &self,
        user_id: UserId,
        window: ForecastWindow,
    ) -> MindcastResult<ForecastContribution>;
}
