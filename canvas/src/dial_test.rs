#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn normalize_degrees_360_wraps_values() {
    assert_eq!(normalize_degrees_360(0.0), 0.0);
    assert_eq!(normalize_degrees_360(370.0), 10.0);
    assert_eq!(normalize_degrees_360(-10.0), 350.0);
    assert_eq!(normalize_degrees_360(360.0), 0.0);
}

#[test]
fn normalize_degrees_360_maps_non_finite_to_zero() {
    assert_eq!(normalize_degrees_360(f64::NAN), 0.0);
    assert_eq!(normalize_degrees_360(f64::INFINITY), 0.0);
}

#[test]
fn knob_reading_for_negative_atan2_is_in_range() {
    let deg = knob_degrees_from_atan2(-170.0);
    assert!((0.0..360.0).contains(&deg));
    assert_eq!(deg, 280.0);
}

#[test]
fn knob_reading_offsets_by_ninety() {
    assert_eq!(knob_degrees_from_atan2(0.0), 90.0);
    assert_eq!(knob_degrees_from_atan2(-90.0), 0.0);
    assert_eq!(knob_degrees_from_atan2(180.0), 270.0);
}

#[test]
fn knob_angle_up_is_zero() {
    let center = Point::new(50.0, 50.0);
    assert_eq!(knob_angle(center, Point::new(50.0, 0.0)), 0.0);
}

#[test]
fn knob_angle_cardinal_directions() {
    let center = Point::new(0.0, 0.0);
    assert_eq!(knob_angle(center, Point::new(10.0, 0.0)), 90.0);
    assert_eq!(knob_angle(center, Point::new(0.0, 10.0)), 180.0);
    assert_eq!(knob_angle(center, Point::new(-10.0, 0.0)), 270.0);
}

#[test]
fn knob_angle_never_reaches_360() {
    let center = Point::new(0.0, 0.0);
    // Just left of straight up rounds to 360 before wrapping.
    let deg = knob_angle(center, Point::new(-0.001, -100.0));
    assert_eq!(deg, 0.0);
}
