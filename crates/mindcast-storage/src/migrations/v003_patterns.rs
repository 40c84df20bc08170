//! v003: correlation_patterns, one row per crossed threshold.

use rusqlite::Connection;

use mindcast_core::errors::MindcastResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MindcastResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS correlation_patterns (
            pattern_id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id              INTEGER NOT NULL,
            pattern_type         TEXT NOT NULL,
            pattern_subtype      TEXT NOT NULL,
            primary_type         TEXT NOT NULL,
            related_type         TEXT NOT NULL,
            correlation_type     TEXT NOT NULL,
            level                TEXT NOT NULL,
            threshold            INTEGER NOT NULL,
            occurrence_count     INTEGER NOT NULL,
            average_strength     REAL NOT NULL,
            average_time_offset  REAL NOT NULL,
            confidence_score     REAL NOT NULL,
            first_detected       TEXT NOT NULL,
            last_detected        TEXT NOT NULL,
            UNIQUE (user_id, pattern_subtype, correlation_type, threshold)
        );

        CREATE INDEX IF NOT EXISTS idx_patterns_user ON correlation_patterns(user_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
