use crate::models::{Forecast, ForecastKey, UserId};

/// Keyed forecast cache. Freshness is judged by the engine against
/// `Forecast::expires_at`; `ttl` lets a backend evict on its own schedule.
pub trait IForecastCache: Send + Sync {
    fn get(&self, key: &ForecastKey) -> Option<Forecast>;
    fn set(&self, key: ForecastKey, forecast: Forecast, ttl: std::time::Duration);
    fn invalidate_user(&self, user_id: UserId);
}
