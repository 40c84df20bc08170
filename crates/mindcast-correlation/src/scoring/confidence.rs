//! Confidence formulas. Both are about evidence volume, not strength alone.

/// Step function over prior rows for the same (user, types, correlation type).
pub fn frequency_confidence(prior_count: usize) -> f64 {
    match prior_count {
        n if n >= 10 => 0.95,
        n if n >= 7 => 0.85,
        n if n >= 5 => 0.75,
        n if n >= 3 => 0.65,
        n if n >= 2 => 0.55,
        _ => 0.45,
    }
}

/// Confidence of a grouped summary: 0.5 base, up to 0.3 for volume (saturating
/// at 10 occurrences), up to 0.2 for average strength. Capped at 1.
pub fn evidence_confidence(occurrences: usize, average_strength: f64) -> f64 {
    let volume = (occurrences as f64 / 10.0).min(1.0) * 0.3;
    let strength = average_strength.clamp(0.0, 1.0) * 0.2;
    (0.5 + volume + strength).min(1.0)
}
