//! Episode log reads and inserts.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{DateRange, Episode, EpisodeId, UserId};

use super::{invalid_row, parse_ts, to_sql_id, ts};
use crate::to_storage_err;

const COLUMNS: &str = "episode_id, user_id, episode_type, episode_date, severity_score,
     trigger_category, location, has_biological_factors";

/// Insert an episode. A zero `episode_id` lets SQLite assign one.
pub fn insert_episode(conn: &Connection, episode: &Episode) -> MindcastResult<EpisodeId> {
    let id = match episode.episode_id {
        0 => None,
        id => Some(to_sql_id(id)?),
    };
    conn.execute(
        "INSERT INTO episodes (episode_id, user_id, episode_type, episode_date, severity_score,
             trigger_category, location, has_biological_factors)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            id,
            to_sql_id(episode.user_id)?,
            episode.episode_type,
            ts(episode.episode_date),
            episode.severity_score,
            episode.trigger_category,
            episode.location,
            episode.has_biological_factors,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid() as EpisodeId)
}

pub fn get_episode(conn: &Connection, id: EpisodeId) -> MindcastResult<Option<Episode>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM episodes WHERE episode_id = ?1"),
            params![to_sql_id(id)?],
            read_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawEpisode::into_episode).transpose()
}

pub fn get_episodes(
    conn: &Connection,
    user_id: UserId,
    range: DateRange,
) -> MindcastResult<Vec<Episode>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM episodes
             WHERE user_id = ?1 AND episode_date >= ?2 AND episode_date <= ?3
             ORDER BY episode_date, episode_id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![to_sql_id(user_id)?, ts(range.from), ts(range.to)],
            read_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut episodes = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        episodes.push(raw.into_episode()?);
    }
    Ok(episodes)
}

pub fn count_episodes(conn: &Connection, user_id: UserId) -> MindcastResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM episodes WHERE user_id = ?1",
            params![to_sql_id(user_id)?],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}

pub fn active_users(conn: &Connection, since: DateTime<Utc>) -> MindcastResult<Vec<UserId>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT DISTINCT user_id FROM episodes WHERE episode_date >= ?1 ORDER BY user_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![ts(since)], |row| row.get::<_, i64>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.map(|r| {
        r.map(|id| id as UserId)
            .map_err(|e| to_storage_err(e.to_string()))
    })
    .collect()
}

struct RawEpisode {
    episode_id: i64,
    user_id: i64,
    episode_type: String,
    episode_date: String,
    severity_score: f64,
    trigger_category: Option<String>,
    location: Option<String>,
    has_biological_factors: bool,
}

impl RawEpisode {
    fn into_episode(self) -> MindcastResult<Episode> {
        if !(0.0..=10.0).contains(&self.severity_score) {
            return Err(invalid_row(
                "episodes",
                format!(
                    "episode {} has severity {} outside [0, 10]",
                    self.episode_id, self.severity_score
                ),
            ));
        }
        Ok(Episode {
            episode_id: self.episode_id as EpisodeId,
            user_id: self.user_id as UserId,
            episode_type: self.episode_type,
            episode_date: parse_ts("episodes", &self.episode_date)?,
            severity_score: self.severity_score,
            trigger_category: self.trigger_category,
            location: self.location,
            has_biological_factors: self.has_biological_factors,
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawEpisode> {
    Ok(RawEpisode {
        episode_id: row.get(0)?,
        user_id: row.get(1)?,
        episode_type: row.get(2)?,
        episode_date: row.get(3)?,
        severity_score: row.get(4)?,
        trigger_category: row.get(5)?,
        location: row.get(6)?,
        has_biological_factors: row.get(7)?,
    })
}
