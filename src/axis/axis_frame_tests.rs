use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;

use crate::assert_float_eq;
use crate::axis::{AxisFrame, CameraOrientation};
use crate::models::{Point3D, Quaternion};

fn assert_orthonormal(side: Point3D, motion: Point3D, up: Point3D) {
    assert_float_eq(side.len(), 1.0, 1e-9, Some("side is unit length"));
    assert_float_eq(motion.len(), 1.0, 1e-9, Some("motion is unit length"));
    assert_float_eq(up.len(), 1.0, 1e-9, Some("up is unit length"));
    assert_float_eq(side.dot(motion), 0.0, 1e-9, Some("side/motion"));
    assert_float_eq(side.dot(up), 0.0, 1e-9, Some("side/up"));
    assert_float_eq(motion.dot(up), 0.0, 1e-9, Some("motion/up"));
}

#[test]
fn test_identity_frame_level_camera() {
    let mut frame = AxisFrame::default();
    let axes = frame.resolve(CameraOrientation::default());

    assert_abs_diff_eq!(axes.side, Point3D::X, epsilon = 1e-12);
    assert_abs_diff_eq!(axes.motion, Point3D::Y, epsilon = 1e-12);
    assert_abs_diff_eq!(axes.up, Point3D::Z, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.gravity_dir(), -Point3D::Z, epsilon = 1e-12);
}

#[test]
fn test_pitch_does_not_tilt_motion() {
    let mut frame = AxisFrame::default();
    let axes = frame.resolve(CameraOrientation::new(0.0, 0.8));

    assert_abs_diff_eq!(axes.motion, Point3D::Y, epsilon = 1e-12);
    assert_orthonormal(axes.side, axes.motion, axes.up);
}

#[test]
fn test_yaw_rotates_motion_clockwise_from_above() {
    let mut frame = AxisFrame::default();
    let axes = frame.resolve(CameraOrientation::new(FRAC_PI_2, 0.0));

    assert_abs_diff_eq!(axes.motion, Point3D::X, epsilon = 1e-12);
    assert_abs_diff_eq!(axes.side, -Point3D::Y, epsilon = 1e-12);
}

#[test]
fn test_cached_until_invalidated() {
    let mut frame = AxisFrame::default();
    let first = frame.resolve(CameraOrientation::new(0.3, 0.1));
    assert!(frame.is_valid());

    let second = frame.resolve(CameraOrientation::new(2.0, -0.2));
    assert_eq!(first, second, "camera change alone must not rebuild the frame");

    frame.invalidate();
    assert!(!frame.is_valid());
    let third = frame.resolve(CameraOrientation::new(2.0, -0.2));
    assert_ne!(first.motion, third.motion);
}

#[test]
fn test_gravity_frame_change_flips_up() {
    let mut frame = AxisFrame::default();
    frame.resolve(CameraOrientation::default());

    // Upside-down gravity: rotate half a turn about X.
    frame.set_gravity_frame(Quaternion::from_axis_angle(Point3D::X, PI));
    assert!(!frame.is_valid());
    assert_abs_diff_eq!(frame.gravity_dir(), Point3D::Z, epsilon = 1e-12);

    let axes = frame.resolve(CameraOrientation::default());
    assert_abs_diff_eq!(axes.up, -Point3D::Z, epsilon = 1e-12);
    assert_orthonormal(axes.side, axes.motion, axes.up);
}

#[test]
fn test_degenerate_pitch_reuses_previous_side() {
    let mut frame = AxisFrame::default();
    let level = frame.resolve(CameraOrientation::new(0.4, 0.0));

    frame.invalidate();
    let straight_down = frame.resolve(CameraOrientation::new(0.4, FRAC_PI_2));

    assert!(straight_down.side.is_finite());
    assert_abs_diff_eq!(straight_down.side, level.side, epsilon = 1e-9);
    assert_orthonormal(straight_down.side, straight_down.motion, straight_down.up);
}

#[test]
fn test_degenerate_pitch_without_previous_frame() {
    let mut frame = AxisFrame::default();
    let axes = frame.resolve(CameraOrientation::new(FRAC_PI_2, -FRAC_PI_2));

    // Yawed +X for a quarter turn is -Y.
    assert_abs_diff_eq!(axes.side, -Point3D::Y, epsilon = 1e-9);
    assert_orthonormal(axes.side, axes.motion, axes.up);
}
