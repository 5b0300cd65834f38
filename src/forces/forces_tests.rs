use approx::assert_abs_diff_eq;

use crate::assert_float_eq;
use crate::axis::AxisVectors;
use crate::forces::{compute_move_forces, external_forces};
use crate::models::{Move, Point3D};
use crate::utils::MarbleConstants;

fn level_axes() -> AxisVectors {
    AxisVectors { side: Point3D::X, motion: Point3D::Y, up: Point3D::Z }
}

#[test]
fn test_centered_stick_requests_nothing() {
    let c = MarbleConstants::default();
    let intent = compute_move_forces(&Move::default(), Point3D::new(3.0, 0.0, 0.0), &level_axes(), &c);
    assert!(intent.is_centered);
    assert_eq!(intent.control_accel, Point3D::ZERO);
    assert_eq!(intent.desired_omega, Point3D::ZERO);
}

#[test]
fn test_full_forward_from_rest() {
    let c = MarbleConstants::default();
    // 0.65 deflection is full speed after scaling.
    let intent = compute_move_forces(&Move::with_stick(0.0, 0.65), Point3D::ZERO, &level_axes(), &c);

    assert!(!intent.is_centered);
    // Rolling toward +Y at 15 with radius 0.2 spins at -75 about X.
    assert_abs_diff_eq!(intent.desired_omega, Point3D::new(-75.0, 0.0, 0.0), epsilon = 1e-4);
    assert_float_eq(intent.control_accel.len(), c.angular_acceleration, 1e-9, Some("clamped to angular acceleration"));
}

#[test]
fn test_input_clamped_to_unit_circle() {
    let c = MarbleConstants::default();
    let intent = compute_move_forces(&Move::with_stick(1.0, 1.0), Point3D::ZERO, &level_axes(), &c);
    let desired_speed = intent.desired_omega.len() * c.radius;
    assert_float_eq(desired_speed, c.max_roll_velocity, 1e-9, None);
}

#[test]
fn test_faster_roll_is_not_reduced() {
    let c = MarbleConstants::default();
    // Already rolling toward +Y at 20, faster than the 15 maximum.
    let omega = Point3D::new(-100.0, 0.0, 0.0);
    let intent = compute_move_forces(&Move::with_stick(0.0, 1.0), omega, &level_axes(), &c);

    assert_abs_diff_eq!(intent.desired_omega, omega, epsilon = 1e-9);
    assert_abs_diff_eq!(intent.control_accel, Point3D::ZERO, epsilon = 1e-9);
}

#[test]
fn test_reverse_input_brakes_forward_roll() {
    let c = MarbleConstants::default();
    let omega = Point3D::new(-10.0, 0.0, 0.0);
    let intent = compute_move_forces(&Move::with_stick(0.0, -0.2), omega, &level_axes(), &c);
    assert!(intent.control_accel.x > 0.0);
}

#[test]
fn test_external_forces_gravity_only_on_ground() {
    let c = MarbleConstants::default();
    let accel = external_forces(&Move::with_stick(1.0, 1.0), &level_axes(), &c, true, false);
    assert_eq!(accel, Point3D::new(0.0, 0.0, -c.gravity));
}

#[test]
fn test_external_forces_air_control() {
    let c = MarbleConstants::default();
    let accel = external_forces(&Move::with_stick(0.5, -1.0), &level_axes(), &c, false, false);
    assert_abs_diff_eq!(accel, Point3D::new(2.5, -5.0, -20.0), epsilon = 1e-12);

    let restricted = external_forces(&Move::with_stick(0.5, -1.0), &level_axes(), &c, false, true);
    assert_eq!(restricted, Point3D::new(0.0, 0.0, -20.0));
}

#[test]
fn test_external_velocity_change_scales_with_step() {
    let c = MarbleConstants::default();
    let accel = external_forces(&Move::default(), &level_axes(), &c, false, false);
    let short = accel * 0.004;
    let long = accel * 0.008;
    assert_abs_diff_eq!(long, short * 2.0, epsilon = 1e-15);
}
