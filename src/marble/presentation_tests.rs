use crate::marble::{ConsoleVariables, MarbleObserver, MovePath, PathBreakpoint, PresentationDelta};
use crate::models::Point3D;

#[test]
fn test_presentation_delta_interpolates_backward() {
    let mut delta = PresentationDelta::default();
    delta.begin(Point3D::new(1.0, 0.0, 0.0));
    delta.finish(Point3D::new(3.0, 0.0, 0.0));

    assert_eq!(delta.pos, Point3D::new(3.0, 0.0, 0.0));
    assert_eq!(delta.pos_vec, Point3D::new(-2.0, 0.0, 0.0));
    assert_eq!(delta.interpolate(0.0), Point3D::new(3.0, 0.0, 0.0));
    assert_eq!(delta.interpolate(0.5), Point3D::new(2.0, 0.0, 0.0));
    assert_eq!(delta.interpolate(1.0), Point3D::new(1.0, 0.0, 0.0));
}

#[test]
fn test_move_path_respects_capacity() {
    let mut path = MovePath::with_capacity(1);
    let bp = PathBreakpoint { position: Point3D::X, time_fraction: 0.5 };
    assert!(path.try_push(bp));
    assert!(!path.try_push(bp));
    assert_eq!(path.len(), 1);

    path.clear();
    assert!(path.is_empty());
    assert!(path.has_room());

    let mut none = MovePath::with_capacity(0);
    assert!(!none.try_push(bp));
}

#[test]
fn test_console_variables_record_outputs() {
    let mut console = ConsoleVariables::new();
    console.set_float_variable("testCount", 0.25);
    console.set_float_variable("testCount", 0.5);
    console.play_bounce_sound(3.0);
    console.play_jump_sound();
    console.update_roll_sound(0.5, 1.5);

    assert_eq!(console.get("testCount"), Some(0.5));
    assert_eq!(console.get("missing"), None);
    assert_eq!(console.variables().len(), 1);
    assert_eq!(console.bounce_speeds, vec![3.0]);
    assert_eq!(console.jumps, 1);
    assert_eq!(console.roll_sound, Some((0.5, 1.5)));

    // The unit observer accepts everything and keeps nothing.
    ().play_jump_sound();
    ().set_float_variable("x", 1.0);
}
