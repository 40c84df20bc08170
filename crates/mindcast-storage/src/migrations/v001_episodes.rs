//! v001: schema_version, episodes.

use rusqlite::Connection;

use mindcast_core::errors::MindcastResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MindcastResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS episodes (
            episode_id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id                 INTEGER NOT NULL,
            episode_type            TEXT NOT NULL,
            episode_date            TEXT NOT NULL,
            severity_score          REAL NOT NULL,
            trigger_category        TEXT,
            location                TEXT,
            has_biological_factors  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_episodes_user_date ON episodes(user_id, episode_date);
        CREATE INDEX IF NOT EXISTS idx_episodes_date ON episodes(episode_date);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
