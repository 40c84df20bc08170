//! Forecast cache with per-window TTL.
//!
//! Uses `moka::sync::Cache` with an `Expiry` policy so each entry lives as
//! long as its window's update cadence. The engine still checks
//! `Forecast::is_fresh` against its own clock; moka eviction only bounds
//! memory. Tracks hits/misses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::sync::Cache;
use moka::Expiry;

use mindcast_core::config::defaults::DEFAULT_FORECAST_CACHE_CAPACITY;
use mindcast_core::config::ForecastConfig;
use mindcast_core::models::{Forecast, ForecastKey, ForecastWindow, UserId};
use mindcast_core::traits::IForecastCache;

#[derive(Clone)]
struct CachedForecast {
    forecast: Arc<Forecast>,
    ttl: Duration,
}

struct WindowExpiry;

impl Expiry<ForecastKey, CachedForecast> for WindowExpiry {
    fn expire_after_create(
        &self,
        _key: &ForecastKey,
        value: &CachedForecast,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &ForecastKey,
        value: &CachedForecast,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process forecast cache keyed by (user, window).
pub struct ForecastCache {
    cache: Cache<ForecastKey, CachedForecast>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ForecastCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FORECAST_CACHE_CAPACITY)
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::with_capacity(config.cache_capacity)
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(WindowExpiry)
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = (self.hits() + self.misses()) as f64;
        if total == 0.0 {
            0.0
        } else {
            self.hits() as f64 / total
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new()
    }
}

impl IForecastCache for ForecastCache {
    fn get(&self, key: &ForecastKey) -> Option<Forecast> {
        match self.cache.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.forecast.as_ref().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, key: ForecastKey, forecast: Forecast, ttl: Duration) {
        self.cache.insert(
            key,
            CachedForecast {
                forecast: Arc::new(forecast),
                ttl,
            },
        );
    }

    fn invalidate_user(&self, user_id: UserId) {
        for window in ForecastWindow::ALL {
            self.cache.invalidate(&ForecastKey::new(user_id, window));
        }
    }
}
