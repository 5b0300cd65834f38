use crate::axis::AxisVectors;
use crate::models::{Move, Point3D};
use crate::utils::{MarbleConstants, MOVE_INPUT_SCALE};

/// What the player is asking the marble to do this sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    /// Angular acceleration toward `desired_omega`, clamped to the angular limit.
    pub control_accel: Point3D,
    /// Spin that would roll the marble at the requested speed.
    pub desired_omega: Point3D,
    /// True when the stick is centred and the marble should brake.
    pub is_centered: bool,
}

impl MoveIntent {
    pub fn centered() -> Self {
        Self { control_accel: Point3D::ZERO, desired_omega: Point3D::ZERO, is_centered: true }
    }
}

/// Converts stick input into a target spin.
///
/// The marble is driven by torque: the requested roll velocity `v` becomes
/// `ω = R × v / |R|²` with `R` the up vector scaled by the radius, and the
/// control acceleration steers the current spin toward it.
pub fn compute_move_forces(
    mv: &Move,
    omega: Point3D,
    axes: &AxisVectors,
    constants: &MarbleConstants,
) -> MoveIntent {
    let r = axes.up * constants.radius;
    let roll_velocity = omega.cross(r);
    let current_y = roll_velocity.dot(axes.motion);
    let current_x = roll_velocity.dot(axes.side);

    let (mut input_x, mut input_y) = (mv.x * MOVE_INPUT_SCALE, mv.y * MOVE_INPUT_SCALE);
    let input_len = (input_x * input_x + input_y * input_y).sqrt();
    if input_len > 1.0 {
        input_x /= input_len;
        input_y /= input_len;
    }

    let mut desired_y = constants.max_roll_velocity * input_y;
    let mut desired_x = constants.max_roll_velocity * input_x;
    if desired_x == 0.0 && desired_y == 0.0 {
        return MoveIntent::centered();
    }

    // Never slow down a marble already rolling faster in the requested direction.
    if (desired_y > 0.0 && current_y > desired_y) || (desired_y < 0.0 && current_y < desired_y) {
        desired_y = current_y;
    }
    if (desired_x > 0.0 && current_x > desired_x) || (desired_x < 0.0 && current_x < desired_x) {
        desired_x = current_x;
    }

    let desired_velocity = axes.motion * desired_y + axes.side * desired_x;
    let desired_omega = r.cross(desired_velocity) / r.len_squared();

    let mut control_accel = desired_omega - omega;
    let magnitude = control_accel.len();
    if magnitude > constants.angular_acceleration {
        control_accel *= constants.angular_acceleration / magnitude;
    }

    MoveIntent { control_accel, desired_omega, is_centered: false }
}
