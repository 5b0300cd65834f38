use crate::contacts::Contact;
use crate::forces::MoveIntent;
use crate::models::{Move, Point3D};
use crate::utils::{MarbleConstants, CONTACT_TOLERANCE};

/// Linear (`linear`) and angular (`angular`) acceleration accumulated for one sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accelerations {
    pub linear: Point3D,
    pub angular: Point3D,
}

/// Per-sub-step inputs that are not part of the marble state.
#[derive(Debug, Clone, Copy)]
pub struct ContactForceContext<'a> {
    pub constants: &'a MarbleConstants,
    pub up: Point3D,
    pub restricted: bool,
    pub time_step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactForceOutcome {
    /// Index of the contact carrying the strongest normal force.
    pub best_contact: Option<usize>,
    /// The jump impulse was applied.
    pub jumped: bool,
}

/// Index of the contact pushing back hardest against `linear`.
/// Only contacts with a positive normal force qualify; ties keep the earlier one.
pub fn best_contact(contacts: &[Contact], linear: Point3D) -> Option<(usize, f64)> {
    let mut best = None;
    let mut force = 0.0;
    for (index, contact) in contacts.iter().enumerate() {
        let normal_force = -contact.normal.dot(linear);
        if normal_force > force {
            force = normal_force;
            best = Some((index, normal_force));
        }
    }
    best
}

/// Resolves contact reaction, friction, jumping and rolling control.
///
/// `acc.linear` must already hold the external forces. On return it holds
/// the net linear acceleration, and `acc.angular` the net angular one,
/// including the player's control torque. Slip left over at the best
/// contact is added to `slip_amount`.
pub fn apply_contact_forces(
    contacts: &[Contact],
    mv: &Move,
    intent: &MoveIntent,
    velocity: &mut Point3D,
    omega: Point3D,
    ctx: &ContactForceContext,
    acc: &mut Accelerations,
    slip_amount: &mut f64,
) -> ContactForceOutcome {
    let constants = ctx.constants;
    let mut outcome = ContactForceOutcome::default();
    let mut control = intent.control_accel;

    let best = best_contact(contacts, acc.linear);
    outcome.best_contact = best.map(|(index, _)| index);

    if mv.jump() {
        if let Some((index, _)) = best {
            let contact = &contacts[index];
            let normal_speed = contact.approach_speed(*velocity).max(0.0);
            if normal_speed < constants.jump_impulse {
                *velocity += contact.normal * (constants.jump_impulse - normal_speed);
                outcome.jumped = true;
            }
        }
    }

    for contact in contacts {
        let normal_force = -contact.normal.dot(acc.linear);
        if normal_force > 0.0 && contact.approach_speed(*velocity) <= CONTACT_TOLERANCE {
            acc.linear += contact.normal * normal_force;
        }
    }

    if let Some((index, force)) = best {
        let contact = &contacts[index];
        let radius = constants.radius;
        let contact_arm = -contact.normal * radius;
        let mut contact_slip = *velocity + omega.cross(contact_arm) - contact.surface_velocity;
        // Friction acts in the contact plane only; a fresh jump is not slip.
        contact_slip -= contact.normal * contact.normal.dot(contact_slip);
        let slip_speed = contact_slip.len();

        let mut slipping = false;
        let mut friction_angular = Point3D::ZERO;
        let mut friction_linear = Point3D::ZERO;

        if slip_speed != 0.0 {
            slipping = true;
            let friction = constants.kinetic_friction * contact.friction;
            let mut angular_magnitude = friction * 5.0 * force / (2.0 * radius);
            let mut linear_magnitude = force * friction;
            let total_delta_v = (angular_magnitude * radius + linear_magnitude) * ctx.time_step;

            // Friction may stop the slip but never reverse it.
            if total_delta_v > slip_speed {
                let fraction = slip_speed / total_delta_v;
                angular_magnitude *= fraction;
                linear_magnitude *= fraction;
                slipping = false;
            }

            let slip_dir = contact_slip / slip_speed;
            friction_angular = (-contact.normal).cross(-slip_dir) * angular_magnitude;
            friction_linear = -slip_dir * linear_magnitude;
            *slip_amount += (slip_speed - total_delta_v).max(0.0);
        }

        if !slipping {
            let r = ctx.up * radius;
            let gravity_spin = r.cross(acc.linear) / r.len_squared();

            if intent.is_centered {
                let next_omega = omega + acc.angular * ctx.time_step;
                control = intent.desired_omega - next_omega;
                let magnitude = control.len();
                if magnitude > constants.braking_acceleration {
                    control *= constants.braking_acceleration / magnitude;
                }
            }

            let mut control_linear = -control.cross(contact_arm);
            let at_contact = (gravity_spin.cross(contact_arm) + control_linear).len();

            let static_friction = if ctx.restricted { 0.0 } else { constants.static_friction * contact.friction };
            if at_contact > static_friction * force {
                let kinetic_friction = if ctx.restricted { 0.0 } else { constants.kinetic_friction * contact.friction };
                control_linear *= kinetic_friction * force / at_contact;
            }

            acc.linear += control_linear;
            acc.angular += gravity_spin;
        }

        acc.linear += friction_linear;
        acc.angular += friction_angular;
    }

    acc.angular += control;
    outcome
}
