use crate::axis::AxisVectors;
use crate::models::{Move, Point3D};
use crate::utils::MarbleConstants;

/// Linear acceleration from gravity, plus air control while airborne.
///
/// The integrator multiplies the result by the sub-step duration, so the
/// resulting velocity change is linear in the step length.
pub fn external_forces(
    mv: &Move,
    axes: &AxisVectors,
    constants: &MarbleConstants,
    has_contacts: bool,
    restricted: bool,
) -> Point3D {
    let mut accel = -axes.up * constants.gravity;

    if !has_contacts && !restricted {
        accel += (axes.side * mv.x + axes.motion * mv.y) * constants.air_acceleration;
    }

    accel
}
