//! v004: ai_correlations, kept apart from engine-detected rows.

use rusqlite::Connection;

use mindcast_core::errors::MindcastResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MindcastResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS ai_correlations (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL,
            primary_type       TEXT NOT NULL,
            related_type       TEXT NOT NULL,
            correlation_type   TEXT NOT NULL,
            strength           REAL NOT NULL,
            confidence         REAL NOT NULL,
            time_offset_hours  REAL,
            explanation        TEXT,
            discovered_date    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_ai_correlations_user ON ai_correlations(user_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
