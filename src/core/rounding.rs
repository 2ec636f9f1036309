//! Emission-point rounding.
//!
//! Every number that leaves the engine passes through exactly one of these
//! functions, once. Intermediate values stay at full `f64` precision.

pub const DISPLAY_DECIMALS: u32 = 2;
pub const NATIVE_TOKEN_DECIMALS: u32 = 8;

/// Non-finite values are returned unchanged; serde_json writes them as
/// `null`, which is how an overflowed amount reaches callers.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid emitting -0.0 for tiny negative residues.
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn round2(value: f64) -> f64 {
    round_to(value, DISPLAY_DECIMALS)
}

pub fn round8(value: f64) -> f64 {
    round_to(value, NATIVE_TOKEN_DECIMALS)
}

/// Scales a fractional ratio to a percentage, then rounds.
pub fn percent(fraction: f64) -> f64 {
    round2(fraction * 100.0)
}
