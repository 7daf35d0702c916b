#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn percent_delta_at_unit_zoom() {
    assert_eq!(percent_delta(50.0, 500.0, 1.0), 10.0);
    assert_eq!(percent_delta(-25.0, 500.0, 1.0), -5.0);
}

#[test]
fn percent_delta_scales_with_zoom() {
    // At 2x the same pixel delta covers half the distance.
    assert_eq!(percent_delta(50.0, 500.0, 2.0), 5.0);
    assert!((percent_delta(5.0, 500.0, 0.1) - 10.0).abs() < 1e-9);
}

#[test]
fn percent_delta_degenerate_reference_is_zero() {
    assert_eq!(percent_delta(50.0, 0.0, 1.0), 0.0);
    assert_eq!(percent_delta(50.0, 500.0, 0.0), 0.0);
    assert_eq!(percent_delta(50.0, f64::INFINITY, 1.0), 0.0);
}

#[test]
fn round_to_tenth_keeps_one_decimal() {
    assert_eq!(round_to_tenth(12.34), 12.3);
    assert_eq!(round_to_tenth(12.36), 12.4);
    assert_eq!(round_to_tenth(-3.26), -3.3);
}

#[test]
fn size_unzoomed_divides_by_zoom() {
    let size = Size::new(400.0, 300.0).unzoomed(2.0);
    assert_eq!(size, Size::new(200.0, 150.0));
}

#[test]
fn zoom_steps_and_clamps() {
    assert_eq!(zoom_in(0.8), 0.9);
    assert_eq!(zoom_out(0.8), 0.7);
    assert_eq!(zoom_in(3.0), 3.0);
    assert_eq!(zoom_out(0.1), 0.1);
    assert_eq!(clamp_zoom(9.0), 3.0);
    assert_eq!(clamp_zoom(f64::NAN), 0.1);
}
