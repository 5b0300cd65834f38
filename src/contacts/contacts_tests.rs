use approx::assert_abs_diff_eq;

use crate::assert_float_eq;
use crate::axis::AxisVectors;
use crate::contacts::{
    apply_contact_forces, best_contact, cancel_velocity, Accelerations, BounceState, Contact,
    ContactForceContext,
};
use crate::forces::{compute_move_forces, MoveIntent};
use crate::models::{Move, ObjectId, Point3D};
use crate::utils::{MarbleConstants, MAX_NO_BOUNCE_PASSES};

fn floor() -> Contact {
    Contact::fixed(Point3D::Z, Point3D::ZERO, 0.0, ObjectId(1))
}

fn wall(normal: Point3D, id: u32) -> Contact {
    Contact::fixed(normal, Point3D::ZERO, 0.0, ObjectId(id))
}

fn level_axes() -> AxisVectors {
    AxisVectors { side: Point3D::X, motion: Point3D::Y, up: Point3D::Z }
}

fn context(constants: &MarbleConstants) -> ContactForceContext<'_> {
    ContactForceContext { constants, up: Point3D::Z, restricted: false, time_step: 0.008 }
}

#[test]
fn test_no_bounce_projects_out_normal_velocity() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(1.0, 0.0, -3.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    let report = cancel_velocity(&[floor()], &mut v, &mut w, &c, false, true, &mut state);

    assert_eq!(v, Point3D::new(1.0, 0.0, 0.0));
    assert_eq!(w, Point3D::ZERO);
    assert!(report.bounce_speed.is_none());
    assert!(!state.bounced_yet);
}

#[test]
fn test_shallow_approach_slides_and_keeps_speed() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(4.0, 0.0, -1.0);
    let speed = v.len();
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    cancel_velocity(&[floor()], &mut v, &mut w, &c, false, false, &mut state);

    assert_float_eq(v.z, 0.0, 1e-12, None);
    assert_float_eq(v.len(), speed, 1e-12, Some("surface slide restores speed"));
    assert!(!state.bounced_yet);
}

#[test]
fn test_used_slide_falls_through_to_bounce() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(4.0, 0.0, -1.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    cancel_velocity(&[floor()], &mut v, &mut w, &c, true, false, &mut state);

    assert!(v.z > 0.0);
    assert!(state.bounced_yet);
}

#[test]
fn test_slow_approach_is_projected_out() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(0.0, 0.0, -0.05);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    cancel_velocity(&[floor()], &mut v, &mut w, &c, true, false, &mut state);

    assert_eq!(v, Point3D::ZERO);
    assert!(!state.bounced_yet);
}

#[test]
fn test_bounce_applies_restitution_once() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(0.0, 0.0, -5.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    let report = cancel_velocity(&[floor()], &mut v, &mut w, &c, false, false, &mut state);

    assert_abs_diff_eq!(v, Point3D::new(0.0, 0.0, 2.5), epsilon = 1e-12);
    assert_eq!(w, Point3D::ZERO);
    assert_eq!(report.bounce_speed, Some(5.0));
    assert_eq!(report.passes, 2);
    assert!(state.bounced_yet);

    // A second bounce in the same tick is silent.
    let mut v = Point3D::new(0.0, 0.0, -5.0);
    let report = cancel_velocity(&[floor()], &mut v, &mut w, &c, false, false, &mut state);
    assert!(report.bounce_speed.is_none());
}

#[test]
fn test_non_restitutive_wall_stops_normal_motion() {
    let c = MarbleConstants::default();
    let mut wall = wall(-Point3D::X, 2);
    wall.restitution = 0.0;
    let mut v = Point3D::new(6.0, 0.0, 0.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    cancel_velocity(&[wall], &mut v, &mut w, &c, false, false, &mut state);

    assert_float_eq(v.x, 0.0, 1e-12, None);
}

#[test]
fn test_bounce_friction_transfers_slip_into_spin() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(3.0, 0.0, -5.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    cancel_velocity(&[floor()], &mut v, &mut w, &c, false, false, &mut state);

    assert_abs_diff_eq!(w, Point3D::new(0.0, 12.5, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(v, Point3D::new(0.5, 0.0, 2.5), epsilon = 1e-9);
}

#[test]
fn test_no_bounce_loop_is_capped() {
    let c = MarbleConstants::default();
    let wedge = [
        wall(Point3D::X, 1),
        wall(Point3D::new(-1.0, 0.2, 0.0).normalized().unwrap(), 2),
    ];
    let mut v = Point3D::new(0.0, -1.0, 0.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    let report = cancel_velocity(&wedge, &mut v, &mut w, &c, false, true, &mut state);

    assert_eq!(report.passes, MAX_NO_BOUNCE_PASSES);
    assert!(!report.pinched);
}

#[test]
fn test_pinch_stops_paths_once() {
    let c = MarbleConstants::default();
    let squeeze = [floor(), wall(-Point3D::Z, 2)];
    let mut v = Point3D::new(1.0, 0.0, 0.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    let report = cancel_velocity(&squeeze, &mut v, &mut w, &c, false, true, &mut state);
    assert!(report.pinched);
    assert!(report.stop_paths);
    assert!(state.stopped_paths);

    let report = cancel_velocity(&squeeze, &mut v, &mut w, &c, false, true, &mut state);
    assert!(report.pinched);
    assert!(!report.stop_paths, "already stopped this tick");
}

#[test]
fn test_fast_marble_is_never_pinched() {
    let c = MarbleConstants::default();
    let squeeze = [floor(), wall(-Point3D::Z, 2)];
    let mut v = Point3D::new(30.0, 0.0, 0.0);
    let mut w = Point3D::ZERO;
    let mut state = BounceState::default();

    let report = cancel_velocity(&squeeze, &mut v, &mut w, &c, false, true, &mut state);
    assert!(!report.pinched);
}

#[test]
fn test_best_contact_tie_keeps_first() {
    let contacts = [floor(), wall(Point3D::Z, 9), wall(Point3D::X, 3)];
    assert_eq!(best_contact(&contacts, Point3D::new(0.0, 0.0, -20.0)), Some((0, 20.0)));
    assert_eq!(best_contact(&contacts, Point3D::new(0.0, 0.0, 5.0)), None);
}

#[test]
fn test_resting_marble_stays_at_rest() {
    let c = MarbleConstants::default();
    let mut v = Point3D::ZERO;
    let mut acc = Accelerations { linear: Point3D::new(0.0, 0.0, -20.0), angular: Point3D::ZERO };
    let mut slip = 0.0;

    let outcome = apply_contact_forces(
        &[floor()], &Move::default(), &MoveIntent::centered(), &mut v, Point3D::ZERO, &context(&c), &mut acc, &mut slip,
    );

    assert_eq!(outcome.best_contact, Some(0));
    assert!(!outcome.jumped);
    assert_abs_diff_eq!(acc.linear, Point3D::ZERO, epsilon = 1e-12);
    assert_abs_diff_eq!(acc.angular, Point3D::ZERO, epsilon = 1e-12);
    assert_eq!(slip, 0.0);
}

#[test]
fn test_forward_input_rolls_without_slip() {
    let c = MarbleConstants::default();
    let mv = Move::with_stick(0.0, 1.0);
    let intent = compute_move_forces(&mv, Point3D::ZERO, &level_axes(), &c);
    let mut v = Point3D::ZERO;
    let mut acc = Accelerations { linear: Point3D::new(0.0, 0.0, -20.0), angular: Point3D::ZERO };
    let mut slip = 0.0;

    apply_contact_forces(&[floor()], &mv, &intent, &mut v, Point3D::ZERO, &context(&c), &mut acc, &mut slip);

    assert_abs_diff_eq!(acc.linear, Point3D::new(0.0, 15.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(acc.angular, Point3D::new(-75.0, 0.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_restricted_marble_gets_no_traction() {
    let c = MarbleConstants::default();
    let mv = Move::with_stick(0.0, 1.0);
    let intent = compute_move_forces(&mv, Point3D::ZERO, &level_axes(), &c);
    let mut v = Point3D::ZERO;
    let mut acc = Accelerations { linear: Point3D::new(0.0, 0.0, -20.0), angular: Point3D::ZERO };
    let mut slip = 0.0;
    let ctx = ContactForceContext { restricted: true, ..context(&c) };

    apply_contact_forces(&[floor()], &mv, &intent, &mut v, Point3D::ZERO, &ctx, &mut acc, &mut slip);

    assert_abs_diff_eq!(acc.linear, Point3D::ZERO, epsilon = 1e-9);
    assert_abs_diff_eq!(acc.angular, Point3D::new(-75.0, 0.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_jump_raises_normal_speed() {
    let c = MarbleConstants::default();
    let mv = Move::default().with_jump();
    let mut v = Point3D::new(1.0, 0.0, 0.0);
    let mut acc = Accelerations { linear: Point3D::new(0.0, 0.0, -20.0), angular: Point3D::ZERO };
    let mut slip = 0.0;

    let outcome = apply_contact_forces(
        &[floor()], &mv, &MoveIntent::centered(), &mut v, Point3D::ZERO, &context(&c), &mut acc, &mut slip,
    );

    assert!(outcome.jumped);
    assert_float_eq(v.z, c.jump_impulse, 1e-12, None);
    // Separating now, so gravity is no longer cancelled by the floor.
    assert_float_eq(acc.linear.z, -20.0, 1e-12, None);
}

#[test]
fn test_jump_without_contact_does_nothing() {
    let c = MarbleConstants::default();
    let mv = Move::default().with_jump();
    let mut v = Point3D::ZERO;
    let mut acc = Accelerations { linear: Point3D::new(0.0, 0.0, -20.0), angular: Point3D::ZERO };
    let mut slip = 0.0;

    let outcome = apply_contact_forces(&[], &mv, &MoveIntent::centered(), &mut v, Point3D::ZERO, &context(&c), &mut acc, &mut slip);

    assert!(!outcome.jumped);
    assert_eq!(outcome.best_contact, None);
    assert_eq!(v, Point3D::ZERO);
}

#[test]
fn test_kinetic_friction_on_sliding_marble() {
    let c = MarbleConstants::default();
    let mut v = Point3D::new(5.0, 0.0, 0.0);
    let mut acc = Accelerations { linear: Point3D::new(0.0, 0.0, -20.0), angular: Point3D::ZERO };
    let mut slip = 0.0;

    apply_contact_forces(&[floor()], &Move::default(), &MoveIntent::centered(), &mut v, Point3D::ZERO, &context(&c), &mut acc, &mut slip);

    assert_abs_diff_eq!(acc.linear, Point3D::new(-14.0, 0.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(acc.angular, Point3D::new(0.0, 175.0, 0.0), epsilon = 1e-9);
    assert_float_eq(slip, 5.0 - 0.392, 1e-9, Some("remaining slip accumulates"));
}
