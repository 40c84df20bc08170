//! AI service fakes: fixed answers, hard failures, and calls that hang.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mindcast_core::errors::{MindcastResult, ServiceError};
use mindcast_core::models::{AiCorrelation, AiPrediction, Forecast, ForecastWindow, UserId};
use mindcast_core::traits::{IAiCorrelationService, IAiPredictionService};

#[derive(Debug, Default)]
pub struct FixedAiPredictor {
    prediction: AiPrediction,
    calls: AtomicUsize,
}

impl FixedAiPredictor {
    pub fn new(prediction: AiPrediction) -> Self {
        Self {
            prediction,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IAiPredictionService for FixedAiPredictor {
    fn predict_episode_risk(
        &self,
        _user_id: UserId,
        _window: ForecastWindow,
        _forecast: &Forecast,
    ) -> MindcastResult<AiPrediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.prediction.clone())
    }
}

/// Fails every call.
#[derive(Debug, Default)]
pub struct FailingAiPredictor {
    calls: AtomicUsize,
}

impl FailingAiPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IAiPredictionService for FailingAiPredictor {
    fn predict_episode_risk(
        &self,
        _user_id: UserId,
        _window: ForecastWindow,
        _forecast: &Forecast,
    ) -> MindcastResult<AiPrediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ServiceError::Failed {
            service: "ai_prediction".to_string(),
            reason: "upstream returned 500".to_string(),
        }
        .into())
    }
}

/// Answers only after `delay`.
#[derive(Debug)]
pub struct SlowAiPredictor {
    delay: Duration,
}

impl SlowAiPredictor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl IAiPredictionService for SlowAiPredictor {
    fn predict_episode_risk(
        &self,
        _user_id: UserId,
        _window: ForecastWindow,
        _forecast: &Forecast,
    ) -> MindcastResult<AiPrediction> {
        std::thread::sleep(self.delay);
        Ok(AiPrediction {
            risk_adjustment: 1.0,
            confidence: 1.0,
            ..AiPrediction::default()
        })
    }
}

#[derive(Debug, Default)]
pub struct FixedAiCorrelator {
    found: Vec<AiCorrelation>,
}

impl FixedAiCorrelator {
    pub fn new(found: Vec<AiCorrelation>) -> Self {
        Self { found }
    }
}

impl IAiCorrelationService for FixedAiCorrelator {
    fn detect_correlations(
        &self,
        _user_id: UserId,
        _window_days: u32,
    ) -> MindcastResult<Vec<AiCorrelation>> {
        Ok(self.found.clone())
    }
}

#[derive(Debug, Default)]
pub struct FailingAiCorrelator;

impl IAiCorrelationService for FailingAiCorrelator {
    fn detect_correlations(
        &self,
        _user_id: UserId,
        _window_days: u32,
    ) -> MindcastResult<Vec<AiCorrelation>> {
        Err(ServiceError::Timeout {
            service: "ai_correlation".to_string(),
            timeout_ms: 1,
        }
        .into())
    }
}
