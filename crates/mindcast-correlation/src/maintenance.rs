//! Daily maintenance: re-scan recently active users, then prune weak rows.

use std::sync::atomic::Ordering;

use chrono::Duration;
use rayon::prelude::*;
use tracing::{info, warn};

use mindcast_core::errors::MindcastResult;
use mindcast_observability::maintenance_span;
use mindcast_observability::tracing_setup::events;

use crate::engine::CorrelationEngine;
use crate::report::{DetectionSummary, MaintenanceReport};

impl CorrelationEngine {
    /// Delete correlations weaker than `cleanup_max_strength` discovered more
    /// than `cleanup_age_days` ago.
    pub fn cleanup_weak_correlations(&self) -> MindcastResult<u64> {
        let cutoff = self.clock.now() - Duration::days(self.config.cleanup_age_days);
        let deleted = self
            .store
            .delete_weak_correlations(self.config.cleanup_max_strength, cutoff)?;
        info!(deleted, cutoff = %cutoff, "weak correlations removed");
        Ok(deleted)
    }

    /// Re-detect for users active in the last `maintenance_active_days` over
    /// their last `maintenance_rescan_days` of episodes, in parallel across
    /// users, then clean up. A user whose pass fails is logged and counted.
    ///
    /// Overlapping runs are refused: the second caller gets a report with
    /// `already_running` set.
    pub fn run_daily_maintenance(&self) -> MindcastResult<MaintenanceReport> {
        if self
            .maintenance_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("correlation maintenance already running, skipping");
            return Ok(MaintenanceReport {
                already_running: true,
                ..MaintenanceReport::default()
            });
        }

        let result = self.maintenance_pass();
        self.maintenance_running.store(false, Ordering::Release);
        result
    }

    fn maintenance_pass(&self) -> MindcastResult<MaintenanceReport> {
        let now = self.clock.now();
        let users = self
            .episodes
            .active_users(now - Duration::days(self.config.maintenance_active_days))?;
        let _span = maintenance_span!(users.len()).entered();
        let since = now - Duration::days(self.config.maintenance_rescan_days);

        let passes: Vec<Option<DetectionSummary>> = users
            .par_iter()
            .map(|&user_id| match self.detect_for_user(user_id, since) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!(user_id, error = %e, "maintenance re-scan failed for user");
                    None
                }
            })
            .collect();

        let mut report = MaintenanceReport {
            users_scanned: users.len(),
            ..MaintenanceReport::default()
        };
        for pass in &passes {
            match pass {
                Some(s) => {
                    report.episodes_rescanned += s.episodes_scanned;
                    report.correlations_saved += s.saved();
                    report.patterns_emitted += s.patterns_emitted;
                }
                None => report.users_failed += 1,
            }
        }

        report.correlations_deleted = self.cleanup_weak_correlations()?;
        events::maintenance_completed(
            report.users_scanned,
            report.episodes_rescanned,
            report.correlations_deleted,
        );
        Ok(report)
    }
}
