//! Migration runner: version tracking, forward-only, transactional per migration.

mod v001_episodes;
mod v002_correlations;
mod v003_patterns;
mod v004_ai_correlations;

use rusqlite::Connection;
use tracing::{debug, info, warn};

use mindcast_core::errors::{MindcastResult, StoreError};

use crate::to_storage_err;

pub const LATEST_VERSION: u32 = 4;

type MigrationFn = fn(&Connection) -> MindcastResult<()>;

const MIGRATIONS: [(u32, &str, MigrationFn); 4] = [
    (1, "episodes", v001_episodes::migrate),
    (2, "correlations", v002_correlations::migrate),
    (3, "patterns", v003_patterns::migrate),
    (4, "ai_correlations", v004_ai_correlations::migrate),
];

/// Current schema version; 0 before the first migration.
pub fn current_version(conn: &Connection) -> MindcastResult<u32> {
    let exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version'")
        .and_then(|mut stmt| stmt.exists([]))
        .map_err(|e| to_storage_err(e.to_string()))?;
    if !exists {
        return Ok(0);
    }
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration, each in its own transaction. Returns how
/// many were applied.
pub fn run_migrations(conn: &Connection) -> MindcastResult<u32> {
    let current = current_version(conn)?;
    if current >= LATEST_VERSION {
        debug!("database schema is up to date (v{current})");
        return Ok(0);
    }
    info!("running migrations: v{current} → v{LATEST_VERSION}");

    let mut applied = 0;
    for &(version, name, migrate_fn) in &MIGRATIONS {
        if version <= current {
            continue;
        }
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| to_storage_err(format!("begin transaction for v{version:03}: {e}")))?;

        let result = migrate_fn(conn).and_then(|()| {
            conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
                .map(|_| ())
                .map_err(|e| to_storage_err(format!("record version v{version:03}: {e}")))
        });
        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| to_storage_err(format!("commit v{version:03}: {e}")))?;
                debug!("applied migration v{version:03}: {name}");
                applied += 1;
            }
            Err(e) => {
                warn!("migration v{version:03} failed: {e}, rolling back");
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StoreError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }
    info!("applied {applied} migration(s), now at v{LATEST_VERSION}");
    Ok(applied)
}
