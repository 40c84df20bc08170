use crate::errors::MindcastResult;
use crate::models::{AiCorrelation, AiPrediction, Forecast, ForecastWindow, UserId};

/// Optional AI correlation discovery. Always called through a bounded timeout.
pub trait IAiCorrelationService: Send + Sync {
    fn detect_correlations(
        &self,
        user_id: UserId,
        window_days: u32,
    ) -> MindcastResult<Vec<AiCorrelation>>;
}

/// Optional AI risk prediction. Always called through a bounded timeout.
pub trait IAiPredictionService: Send + Sync {
    /// `forecast` is the engine's own forecast, passed as context.
    fn predict_episode_risk(
        &self,
        user_id: UserId,
        window: ForecastWindow,
        forecast: &Forecast,
    ) -> MindcastResult<AiPrediction>;
}
