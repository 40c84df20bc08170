//! Correlation type from the signed time offset.

use chrono::{DateTime, Utc};

use mindcast_core::models::CorrelationType;

/// Offsets at or under this many hours are concurrent.
pub const CONCURRENT_HOURS: f64 = 4.0;
/// Offsets at or under this many hours are direct triggers.
pub const TRIGGER_HOURS: f64 = 24.0;

/// Hours from `related` to `primary`. Negative when `primary` came first.
pub fn signed_offset_hours(primary: DateTime<Utc>, related: DateTime<Utc>) -> f64 {
    (primary - related).num_seconds() as f64 / 3600.0
}

/// Six buckets over the signed offset, with no gaps or overlaps:
///
/// | offset | type |
/// |--------|------|
/// | `|h| <= 4` | concurrent |
/// | `-24 <= h < -4` | triggers |
/// | `h < -24` | precedes |
/// | `4 < h <= 24` | triggered_by |
/// | `h > 24` | follows |
pub fn classify(offset_hours: f64) -> CorrelationType {
    let abs = offset_hours.abs();
    if abs <= CONCURRENT_HOURS {
        CorrelationType::Concurrent
    } else if offset_hours < 0.0 {
        if abs <= TRIGGER_HOURS {
            CorrelationType::Triggers
        } else {
            CorrelationType::Precedes
        }
    } else if abs <= TRIGGER_HOURS {
        CorrelationType::TriggeredBy
    } else {
        CorrelationType::Follows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        assert_eq!(classify(0.0), CorrelationType::Concurrent);
        assert_eq!(classify(-4.0), CorrelationType::Concurrent);
        assert_eq!(classify(4.0), CorrelationType::Concurrent);
        assert_eq!(classify(-4.5), CorrelationType::Triggers);
        assert_eq!(classify(-24.0), CorrelationType::Triggers);
        assert_eq!(classify(-24.5), CorrelationType::Precedes);
        assert_eq!(classify(4.5), CorrelationType::TriggeredBy);
        assert_eq!(classify(24.0), CorrelationType::TriggeredBy);
        assert_eq!(classify(30.0), CorrelationType::Follows);
    }
}
