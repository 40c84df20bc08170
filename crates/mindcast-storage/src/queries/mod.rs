//! Query modules: free functions over a borrowed connection.

pub mod ai_ops;
pub mod correlation_ops;
pub mod episode_ops;
pub mod pattern_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use mindcast_core::errors::{MindcastError, StoreError};

/// Timestamps are stored as fixed-width RFC 3339 so text order matches time order.
pub(crate) fn ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(table: &str, raw: &str) -> Result<DateTime<Utc>, MindcastError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| invalid_row(table, format!("timestamp {raw:?}: {e}")))
}

pub(crate) fn invalid_row(table: &str, details: String) -> MindcastError {
    StoreError::InvalidRow {
        table: table.to_string(),
        details,
    }
    .into()
}

/// Row ids are INTEGER in SQLite; ids beyond i64 are rejected on write.
pub(crate) fn to_sql_id(id: u64) -> Result<i64, MindcastError> {
    i64::try_from(id).map_err(|_| crate::to_storage_err(format!("id {id} out of range")))
}
