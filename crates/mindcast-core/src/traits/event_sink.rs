use crate::events::EngineEvent;

/// Receiver of engine events (pattern discovered, forecast generated, ...).
pub trait IEventSink: Send + Sync {
    fn publish(&self, event: &EngineEvent);
}
