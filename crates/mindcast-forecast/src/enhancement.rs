//! Optional AI blend on top of a built forecast.

use std::sync::Arc;
use std::time::Duration;

use mindcast_core::constants::AI_PREDICTION_SERVICE;
use mindcast_core::external::call_with_timeout;
use mindcast_core::models::{AiPrediction, Forecast, ForecastInsight, InsightKind};
use mindcast_core::traits::IAiPredictionService;
use mindcast_observability::tracing_setup::events;

/// Ask the prediction service for an adjustment and fold it into `forecast`.
///
/// Returns whether the forecast was enhanced. Failures and timeouts leave the
/// forecast untouched.
pub fn enhance(
    service: &Arc<dyn IAiPredictionService>,
    forecast: &mut Forecast,
    timeout: Duration,
    blend_factor: f64,
) -> bool {
    let svc = Arc::clone(service);
    let user_id = forecast.user_id;
    let window = forecast.window;
    let context = forecast.clone();
    let result = call_with_timeout(AI_PREDICTION_SERVICE, timeout, move || {
        svc.predict_episode_risk(user_id, window, &context)
    });

    match result {
        Ok(prediction) => {
            apply(forecast, prediction, blend_factor);
            true
        }
        Err(e) => {
            events::service_degraded(AI_PREDICTION_SERVICE, user_id, &e.to_string());
            false
        }
    }
}

/// Blend `adjustment × confidence × blend_factor` into the risk and append
/// the service's insights, periods, and predictions.
pub fn apply(forecast: &mut Forecast, prediction: AiPrediction, blend_factor: f64) {
    let adjustment = prediction.risk_adjustment.clamp(-1.0, 1.0)
        * prediction.confidence.clamp(0.0, 1.0)
        * blend_factor;
    if adjustment.is_finite() {
        forecast.overall_risk = (forecast.overall_risk + adjustment).clamp(0.0, 1.0);
    }
    forecast.insights.extend(
        prediction
            .insights
            .into_iter()
            .map(|text| ForecastInsight::new(InsightKind::Info, "ai_insight", "AI insight", text)),
    );
    forecast.high_risk_periods.extend(prediction.high_risk_periods);
    forecast.ai_predictions = prediction.predictions;
    forecast.ai_enhanced = true;
}
