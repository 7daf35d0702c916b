//! Percentage-space geometry for drags.
//!
//! Panel and object positions are stored as percentages of their container.
//! Pointer input arrives in device pixels at the current zoom, so every drag
//! frame converts a pixel delta into a percent delta against the container's
//! un-zoomed size. Everything here is stateless.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in device (screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Remove the zoom factor from a rendered size.
    #[must_use]
    pub fn unzoomed(self, zoom: f64) -> Self {
        Self { width: self.width / zoom, height: self.height / zoom }
    }
}

/// Convert one axis of a pointer delta to a percent delta.
///
/// `reference_px` is the container dimension at zoom 1.0. The result is exact;
/// callers round it. A degenerate reference or zoom yields 0 rather than an
/// infinity leaking into the document.
#[must_use]
pub fn percent_delta(delta_px: f64, reference_px: f64, zoom: f64) -> f64 {
    let scaled = reference_px * zoom;
    if scaled.abs() < f64::EPSILON || !scaled.is_finite() {
        return 0.0;
    }
    (delta_px / scaled) * 100.0
}

/// Round to one decimal place.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp a zoom factor into the supported range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return ZOOM_MIN;
    }
    round_to_tenth(zoom.clamp(ZOOM_MIN, ZOOM_MAX))
}

/// Zoom one step in.
#[must_use]
pub fn zoom_in(zoom: f64) -> f64 {
    clamp_zoom(zoom + ZOOM_STEP)
}

/// Zoom one step out.
#[must_use]
pub fn zoom_out(zoom: f64) -> f64 {
    clamp_zoom(zoom - ZOOM_STEP)
}
