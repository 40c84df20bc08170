//! AI-proposed correlations, append-only.

use rusqlite::{params, Connection, Row};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{AiCorrelation, CorrelationType, UserId};

use super::{invalid_row, parse_ts, to_sql_id, ts};
use crate::to_storage_err;

const TABLE: &str = "ai_correlations";

pub fn save_ai_correlation(conn: &Connection, correlation: &AiCorrelation) -> MindcastResult<()> {
    conn.execute(
        "INSERT INTO ai_correlations (user_id, primary_type, related_type, correlation_type,
             strength, confidence, time_offset_hours, explanation, discovered_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            to_sql_id(correlation.user_id)?,
            correlation.primary_type,
            correlation.related_type,
            correlation.correlation_type.as_str(),
            correlation.strength,
            correlation.confidence,
            correlation.time_offset_hours,
            correlation.explanation,
            ts(correlation.discovered_date),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn ai_correlations_for_user(
    conn: &Connection,
    user_id: UserId,
) -> MindcastResult<Vec<AiCorrelation>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, user_id, primary_type, related_type, correlation_type, strength,
                 confidence, time_offset_hours, explanation, discovered_date
             FROM ai_correlations WHERE user_id = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![to_sql_id(user_id)?], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let correlation_type: CorrelationType = raw
            .correlation_type
            .parse()
            .map_err(|e| invalid_row(TABLE, format!("row {id}: {e}")))?;
        out.push(AiCorrelation {
            user_id: raw.user_id as UserId,
            primary_type: raw.primary_type,
            related_type: raw.related_type,
            correlation_type,
            strength: raw.strength,
            confidence: raw.confidence,
            time_offset_hours: raw.time_offset_hours,
            explanation: raw.explanation,
            discovered_date: parse_ts(TABLE, &raw.discovered_date)?,
        });
    }
    Ok(out)
}

struct RawAiCorrelation {
    user_id: i64,
    primary_type: String,
    related_type: String,
    correlation_type: String,
    strength: f64,
    confidence: f64,
    time_offset_hours: Option<f64>,
    explanation: Option<String>,
    discovered_date: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<(i64, RawAiCorrelation)> {
    Ok((
        row.get(0)?,
        RawAiCorrelation {
            user_id: row.get(1)?,
            primary_type: row.get(2)?,
            related_type: row.get(3)?,
            correlation_type: row.get(4)?,
            strength: row.get(5)?,
            confidence: row.get(6)?,
            time_offset_hours: row.get(7)?,
            explanation: row.get(8)?,
            discovered_date: row.get(9)?,
        },
    ))
}
