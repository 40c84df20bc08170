//! Correlation pattern rows.

use rusqlite::{params, Connection, Row};

use mindcast_core::errors::MindcastResult;
use mindcast_core::models::{CorrelationPattern, CorrelationType, PatternLevel, UserId};

use super::{invalid_row, parse_ts, to_sql_id, ts};
use crate::to_storage_err;

const TABLE: &str = "correlation_patterns";

/// Insert unless (user, subtype, correlation type, threshold) already exists.
/// Relies on the table's UNIQUE constraint, so concurrent writers cannot
/// record the same threshold twice.
pub fn insert_pattern_if_absent(
    conn: &Connection,
    pattern: &CorrelationPattern,
) -> MindcastResult<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO correlation_patterns (user_id, pattern_type, pattern_subtype,
                 primary_type, related_type, correlation_type, level, threshold,
                 occurrence_count, average_strength, average_time_offset, confidence_score,
                 first_detected, last_detected)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                to_sql_id(pattern.user_id)?,
                pattern.pattern_type,
                pattern.pattern_subtype,
                pattern.primary_type,
                pattern.related_type,
                pattern.correlation_type.as_str(),
                pattern.level.as_str(),
                pattern.threshold,
                pattern.occurrence_count,
                pattern.average_strength,
                pattern.average_time_offset,
                pattern.confidence_score,
                ts(pattern.first_detected),
                ts(pattern.last_detected),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}

pub fn patterns_for_user(
    conn: &Connection,
    user_id: UserId,
) -> MindcastResult<Vec<CorrelationPattern>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT pattern_id, user_id, pattern_type, pattern_subtype, primary_type,
                 related_type, correlation_type, level, threshold, occurrence_count,
                 average_strength, average_time_offset, confidence_score,
                 first_detected, last_detected
             FROM correlation_patterns
             WHERE user_id = ?1
             ORDER BY pattern_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![to_sql_id(user_id)?], read_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut patterns = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        patterns.push(raw.into_pattern()?);
    }
    Ok(patterns)
}

fn parse_level(raw: &str) -> Option<PatternLevel> {
    [
        PatternLevel::Emerging,
        PatternLevel::Established,
        PatternLevel::Strong,
        PatternLevel::Persistent,
    ]
    .into_iter()
    .find(|l| l.as_str() == raw)
}

struct RawPattern {
    pattern_id: i64,
    user_id: i64,
    pattern_type: String,
    pattern_subtype: String,
    primary_type: String,
    related_type: String,
    correlation_type: String,
    level: String,
    threshold: u32,
    occurrence_count: u32,
    average_strength: f64,
    average_time_offset: f64,
    confidence_score: f64,
    first_detected: String,
    last_detected: String,
}

impl RawPattern {
    fn into_pattern(self) -> MindcastResult<CorrelationPattern> {
        let correlation_type: CorrelationType = self
            .correlation_type
            .parse()
            .map_err(|e| invalid_row(TABLE, format!("row {}: {e}", self.pattern_id)))?;
        let level = parse_level(&self.level).ok_or_else(|| {
            invalid_row(TABLE, format!("row {}: unknown level {:?}", self.pattern_id, self.level))
        })?;
        Ok(CorrelationPattern {
            pattern_id: Some(self.pattern_id as u64),
            user_id: self.user_id as UserId,
            pattern_type: self.pattern_type,
            pattern_subtype: self.pattern_subtype,
            primary_type: self.primary_type,
            related_type: self.related_type,
            correlation_type,
            level,
            threshold: self.threshold,
            occurrence_count: self.occurrence_count,
            average_strength: self.average_strength,
            average_time_offset: self.average_time_offset,
            confidence_score: self.confidence_score,
            first_detected: parse_ts(TABLE, &self.first_detected)?,
            last_detected: parse_ts(TABLE, &self.last_detected)?,
        })
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawPattern> {
    Ok(RawPattern {
        pattern_id: row.get(0)?,
        user_id: row.get(1)?,
        pattern_type: row.get(2)?,
        pattern_subtype: row.get(3)?,
        primary_type: row.get(4)?,
        related_type: row.get(5)?,
        correlation_type: row.get(6)?,
        level: row.get(7)?,
        threshold: row.get(8)?,
        occurrence_count: row.get(9)?,
        average_strength: row.get(10)?,
        average_time_offset: row.get(11)?,
        confidence_score: row.get(12)?,
        first_detected: row.get(13)?,
        last_detected: row.get(14)?,
    })
}
