//! Angle normalization helpers shared by the metrics, detector and refiner.

/// Degrees in a full turn.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Normalize an angle to [0, 360) degrees.
///
/// A negative input a hair below zero rounds to exactly 360.0 after the
/// addition; that case is folded back to 0.0 so the result never sits on
/// the upper edge.
pub fn normalize_360(deg: f64) -> f64 {
    normalize_mod(deg, FULL_TURN_DEG)
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Reduce `value` into [0, modulus).
pub fn normalize_mod(value: f64, modulus: f64) -> f64 {
    let r = value % modulus;
    let r = if r < 0.0 { r + modulus } else { r };
    if r >= modulus { 0.0 } else { r }
}

/// The representative `value + k * modulus` closest to `reference`.
pub fn unwrap_near(value: f64, reference: f64, modulus: f64) -> f64 {
    let k = ((reference - value) / modulus).round();
    value + k * modulus
}
