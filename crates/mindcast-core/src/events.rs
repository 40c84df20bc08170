//! Engine events and an in-process bus that rendering and notification
//! layers subscribe to.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::models::{Correlation, CorrelationPattern, ForecastWindow, RiskLevel, UserId};
use crate::traits::IEventSink;

/// Something observers may want to react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    CorrelationDiscovered {
        correlation: Correlation,
    },
    PatternDiscovered {
        pattern: CorrelationPattern,
    },
    ForecastGenerated {
        user_id: UserId,
        window: ForecastWindow,
        overall_risk: f64,
        risk_level: RiskLevel,
    },
    HighRiskForecast {
        user_id: UserId,
        window: ForecastWindow,
        overall_risk: f64,
        risk_level: RiskLevel,
    },
}

impl EngineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CorrelationDiscovered { .. } => "correlation_discovered",
            Self::PatternDiscovered { .. } => "pattern_discovered",
            Self::ForecastGenerated { .. } => "forecast_generated",
            Self::HighRiskForecast { .. } => "high_risk_forecast",
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Self::CorrelationDiscovered { correlation } => correlation.user_id,
            Self::PatternDiscovered { pattern } => pattern.user_id,
            Self::ForecastGenerated { user_id, .. } | Self::HighRiskForecast { user_id, .. } => {
                *user_id
            }
        }
    }
}

type Subscriber = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

/// Fan-out of engine events to registered callbacks.
#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked for every published event.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        match self.subscribers.write() {
            Ok(mut subs) => subs.push(Arc::new(callback)),
            Err(poisoned) => poisoned.into_inner().push(Arc::new(callback)),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        match self.subscribers.read() {
            Ok(subs) => subs.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl IEventSink for EventBus {
    fn publish(&self, event: &EngineEvent) {
        // Snapshot so callbacks may subscribe without deadlocking.
        let subs: Vec<Subscriber> = match self.subscribers.read() {
            Ok(subs) => subs.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        tracing::trace!(
            event = event.name(),
            user_id = event.user_id(),
            subscribers = subs.len(),
            "publishing engine event"
        );
        for sub in subs {
            sub(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_subscriber_receives_each_event() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            bus.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        bus.publish(&EngineEvent::ForecastGenerated {
            user_id: 1,
            window: ForecastWindow::Hours24,
            overall_risk: 0.4,
            risk_level: RiskLevel::Moderate,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
