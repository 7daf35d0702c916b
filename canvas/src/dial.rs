//! Rotation knob angle math.

#[cfg(test)]
#[path = "dial_test.rs"]
mod dial_test;

use crate::geometry::Point;

/// Offset that makes "straight up" from the knob center read as 0°.
pub const KNOB_ZERO_OFFSET_DEG: f64 = 90.0;

/// Wrap any finite angle into `[0, 360)`. Non-finite input maps to 0.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a raw `atan2` result in degrees to a knob reading in `[0, 360)`.
#[must_use]
pub fn knob_degrees_from_atan2(raw_deg: f64) -> f64 {
    let mut degrees = raw_deg + KNOB_ZERO_OFFSET_DEG;
    if degrees < 0.0 {
        degrees += 360.0;
    }
    normalize_degrees_360(degrees)
}

/// Absolute knob angle for a pointer position, rounded to whole degrees.
#[must_use]
pub fn knob_angle(center: Point, pointer: Point) -> f64 {
    let raw = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees();
    normalize_degrees_360(knob_degrees_from_atan2(raw).round())
}
