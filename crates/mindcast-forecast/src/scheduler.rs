//! Scheduled forecast regeneration by update cadence.

use chrono::Duration;
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{ForecastOutcome, ForecastWindow, UpdateFrequency};
use mindcast_observability::refresh_span;
use mindcast_observability::tracing_setup::events;

use crate::engine::ForecastEngine;

/// Counts from one refresh sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    pub users_scanned: usize,
    pub generated: usize,
    /// (user, window) pairs skipped by the access check.
    pub denied: usize,
    pub failed: usize,
}

impl RefreshReport {
    fn absorb(&mut self, other: &RefreshReport) {
        self.users_scanned = self.users_scanned.max(other.users_scanned);
        self.generated += other.generated;
        self.denied += other.denied;
        self.failed += other.failed;
    }
}

impl ForecastEngine {
    /// Rebuild every window on `frequency` for users active within
    /// `active_user_days`. Per-user failures are logged and counted.
    pub fn refresh(&self, frequency: UpdateFrequency) -> MindcastResult<RefreshReport> {
        let _span = refresh_span!(frequency.as_str()).entered();

        let windows = ForecastWindow::with_frequency(frequency);
        if windows.is_empty() {
            return Ok(RefreshReport::default());
        }
        let since = self.clock.now() - Duration::days(self.config.active_user_days);
        let users = self.episodes.active_users(since)?;

        let per_user: Vec<RefreshReport> = users
            .par_iter()
            .map(|&user_id| {
                let mut report = RefreshReport {
                    users_scanned: 1,
                    ..RefreshReport::default()
                };
                for &window in &windows {
                    match self.refresh_forecast(user_id, window) {
                        Ok(ForecastOutcome::Ready(_)) => report.generated += 1,
                        Ok(ForecastOutcome::AccessDenied(_)) => report.denied += 1,
                        Err(e) => {
                            warn!(user_id, window = %window, error = %e, "forecast refresh failed");
                            report.failed += 1;
                        }
                    }
                }
                report
            })
            .collect();

        let mut report = RefreshReport::default();
        for r in &per_user {
            report.generated += r.generated;
            report.denied += r.denied;
            report.failed += r.failed;
        }
        report.users_scanned = users.len();

        events::refresh_completed(
            frequency.as_str(),
            report.generated,
            report.denied,
            report.failed,
        );
        Ok(report)
    }

    /// Hourly job: the 24-hour window.
    pub fn run_hourly_refresh(&self) -> MindcastResult<RefreshReport> {
        self.refresh(UpdateFrequency::Hourly)
    }

    /// Daily job: the daily and 6-hour cadences.
    pub fn run_daily_refresh(&self) -> MindcastResult<RefreshReport> {
        let mut report = self.refresh(UpdateFrequency::Daily)?;
        report.absorb(&self.refresh(UpdateFrequency::SixHours)?);
        Ok(report)
    }

    /// Weekly job: the 30-day window.
    pub fn run_weekly_refresh(&self) -> MindcastResult<RefreshReport> {
        self.refresh(UpdateFrequency::Weekly)
    }
}
