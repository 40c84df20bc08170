//! Correlation rows. One row per unordered episode pair, keyed on
//! (pair_low, pair_high).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{
    pair_key, Correlation, CorrelationFactor, CorrelationFilter, CorrelationId, CorrelationType,
    EpisodeId, UpsertOutcome, UserId,
};

use super::{invalid_row, parse_ts, to_sql_id, ts};
use crate::to_storage_err;

const TABLE: &str = "correlations";

const COLUMNS: &str = "correlation_id, user_id, primary_episode_id, primary_type,
     related_episode_id, related_type, correlation_type, time_offset_hours,
     correlation_strength, confidence_score, factors, discovered_date";

pub fn find_by_pair(
    conn: &Connection,
    user_id: UserId,
    a: EpisodeId,
    b: EpisodeId,
) -> MindcastResult<Option<Correlation>> {
    let (low, high) = pair_key(a, b);
    let raw = conn
        .query_row(
            &format!(
                "SELECT {COLUMNS} FROM correlations
                 WHERE user_id = ?1 AND pair_low = ?2 AND pair_high = ?3"
            ),
            params![to_sql_id(user_id)?, to_sql_id(low)?, to_sql_id(high)?],
            read_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawCorrelation::into_correlation).transpose()
}

/// Insert a new row, or refresh the scoring columns of the row already
/// linking the same pair. The existing row keeps its orientation and
/// discovery date.
pub fn upsert_correlation(
    conn: &Connection,
    correlation: &Correlation,
) -> MindcastResult<UpsertOutcome> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let (low, high) = correlation.pair_key();
    let factors = encode_factors(&correlation.factors)?;
    let existing: Option<i64> = tx
        .query_row(
            "SELECT correlation_id FROM correlations
             WHERE user_id = ?1 AND pair_low = ?2 AND pair_high = ?3",
            params![to_sql_id(correlation.user_id)?, to_sql_id(low)?, to_sql_id(high)?],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let outcome = match existing {
        Some(id) => {
            tx.execute(
                "UPDATE correlations
                 SET correlation_type = ?2, time_offset_hours = ?3, correlation_strength = ?4,
                     confidence_score = ?5, factors = ?6
                 WHERE correlation_id = ?1",
                params![
                    id,
                    correlation.correlation_type.as_str(),
                    correlation.time_offset_hours,
                    correlation.correlation_strength,
                    correlation.confidence_score,
                    factors,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            UpsertOutcome::Updated(id as CorrelationId)
        }
        None => {
            tx.execute(
                "INSERT INTO correlations (user_id, primary_episode_id, primary_type,
                     related_episode_id, related_type, correlation_type, time_offset_hours,
                     correlation_strength, confidence_score, factors, discovered_date,
                     pair_low, pair_high)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    to_sql_id(correlation.user_id)?,
                    to_sql_id(correlation.primary_episode_id)?,
                    correlation.primary_type,
                    to_sql_id(correlation.related_episode_id)?,
                    correlation.related_type,
                    correlation.correlation_type.as_str(),
                    correlation.time_offset_hours,
                    correlation.correlation_strength,
                    correlation.confidence_score,
                    factors,
                    ts(correlation.discovered_date),
                    to_sql_id(low)?,
                    to_sql_id(high)?,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            UpsertOutcome::Inserted(tx.last_insert_rowid() as CorrelationId)
        }
    };

    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(outcome)
}

pub fn correlations_between_types(
    conn: &Connection,
    user_id: UserId,
    primary_type: &str,
    related_type: &str,
) -> MindcastResult<Vec<Correlation>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM correlations
             WHERE user_id = ?1 AND primary_type = ?2 AND related_type = ?3
             ORDER BY correlation_id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![to_sql_id(user_id)?, primary_type, related_type], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(rows)
}

pub fn correlations_for_user(
    conn: &Connection,
    user_id: UserId,
    filter: &CorrelationFilter,
) -> MindcastResult<Vec<Correlation>> {
    let limit = filter
        .limit
        .map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM correlations
             WHERE user_id = ?1
               AND (?2 IS NULL OR correlation_strength >= ?2)
               AND (?3 IS NULL OR discovered_date >= ?3)
             ORDER BY correlation_strength DESC, correlation_id
             LIMIT ?4"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![
                to_sql_id(user_id)?,
                filter.min_strength,
                filter.discovered_since.map(ts),
                limit,
            ],
            read_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(rows)
}

pub fn delete_weak_correlations(
    conn: &Connection,
    max_strength: f64,
    older_than: DateTime<Utc>,
) -> MindcastResult<u64> {
    let deleted = conn
        .execute(
            "DELETE FROM correlations WHERE correlation_strength < ?1 AND discovered_date < ?2",
            params![max_strength, ts(older_than)],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(deleted as u64)
}

fn encode_factors(factors: &BTreeSet<CorrelationFactor>) -> MindcastResult<String> {
    serde_json::to_string(factors).map_err(|e| to_storage_err(e.to_string()))
}

fn collect(
    rows: impl Iterator<Item = rusqlite::Result<RawCorrelation>>,
) -> MindcastResult<Vec<Correlation>> {
    let mut out = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(raw.into_correlation()?);
    }
    Ok(out)
}

struct RawCorrelation {
    correlation_id: i64,
    user_id: i64,
    primary_episode_id: i64,
    primary_type: String,
    related_episode_id: i64,
    related_type: String,
    correlation_type: String,
    time_offset_hours: f64,
    correlation_strength: f64,
    confidence_score: f64,
    factors: String,
    discovered_date: String,
}

impl RawCorrelation {
    fn into_correlation(self) -> MindcastResult<Correlation> {
        let correlation_type: CorrelationType = self
            .correlation_type
            .parse()
            .map_err(|e| invalid_row(TABLE, format!("row {}: {e}", self.correlation_id)))?;
        let factors: BTreeSet<CorrelationFactor> = serde_json::from_str(&self.factors)
            .map_err(|e| invalid_row(TABLE, format!("row {} factors: {e}", self.correlation_id)))?;
        Ok(Correlation {
            correlation_id: Some(self.correlation_id as CorrelationId),
            user_id: self.user_id as UserId,
            primary_episode_id: self.primary_episode_id as EpisodeId,
            primary_type: self.primary_type,
            related_episode_id: self.related_episode_id as EpisodeId,
            related_type: self.related_type,
            correlation_type,
            time_offset_hours: self.time_offset_hours,
            correlation_strength: self.correlation_strength,
            confidence_score: self.confidence_score,
            factors,
            discovered_date: parse_ts(TABLE, &self.discovered_date)?,
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawCorrelation> {
    Ok(RawCorrelation {
        correlation_id: row.get(0)?,
        user_id: row.get(1)?,
        primary_episode_id: row.get(2)?,
        primary_type: row.get(3)?,
        related_episode_id: row.get(4)?,
        related_type: row.get(5)?,
        correlation_type: row.get(6)?,
        time_offset_hours: row.get(7)?,
        correlation_strength: row.get(8)?,
        confidence_score: row.get(9)?,
        factors: row.get(10)?,
        discovered_date: row.get(11)?,
    })
}
