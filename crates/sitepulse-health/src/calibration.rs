//! Shared score calibration.
//!
//! The constants here are hand-tuned and have no derivation beyond matching
//! historical audits. They push raw scores down so the `good` tier stays
//! rare.

pub const REALITY_MULTIPLIER: f64 = 0.75;
/// Raw scores at or above this take an extra [`OPTIMISM_PENALTY`].
pub const OPTIMISM_THRESHOLD: f64 = 80.0;
pub const OPTIMISM_PENALTY: f64 = 6.0;

pub const GEO_FEW_MENTIONS_BELOW: u32 = 3;
pub const GEO_FEW_MENTIONS_PENALTY: f64 = 18.0;
pub const GEO_NO_MENTIONS_PENALTY: f64 = 10.0;
pub const GEO_NO_SCHEMA_PENALTY: f64 = 12.0;
pub const GEO_NO_SERVICE_AREA_PENALTY: f64 = 10.0;

/// Applies the shared downward bias to a raw 0–100 axis value.
#[must_use]
pub fn reality_adjust(raw: f64) -> f64 {
    let adjusted = raw * REALITY_MULTIPLIER;
    if raw >= OPTIMISM_THRESHOLD {
        adjusted - OPTIMISM_PENALTY
    } else {
        adjusted
    }
}

/// Clamps to `[0, 100]` and rounds. NaN scores zero.
#[must_use]
pub fn final_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // In range after the clamp, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = value.clamp(0.0, 100.0).round() as u8;
    score
}

/// Upstream scores are nominally 0–100 but arrive unchecked.
#[must_use]
pub(crate) fn bounded(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
