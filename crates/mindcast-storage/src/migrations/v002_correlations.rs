//! v002: correlations, one row per unordered episode pair.

use rusqlite::Connection;

use mindcast_core::errors::MindcastResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MindcastResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS correlations (
            correlation_id        INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id               INTEGER NOT NULL,
            primary_episode_id    INTEGER NOT NULL,
            primary_type          TEXT NOT NULL,
            related_episode_id    INTEGER NOT NULL,
            related_type          TEXT NOT NULL,
            correlation_type      TEXT NOT NULL,
            time_offset_hours     REAL NOT NULL,
            correlation_strength  REAL NOT NULL,
            confidence_score      REAL NOT NULL,
            factors               TEXT NOT NULL DEFAULT '[]',
            discovered_date       TEXT NOT NULL,
            pair_low              INTEGER NOT NULL,
            pair_high             INTEGER NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_correlations_pair ON correlations(pair_low, pair_high);
        CREATE INDEX IF NOT EXISTS idx_correlations_types
            ON correlations(user_id, primary_type, related_type);
        CREATE INDEX IF NOT EXISTS idx_correlations_strength
            ON correlations(correlation_strength, discovered_date);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
