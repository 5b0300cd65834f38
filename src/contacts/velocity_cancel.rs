use crate::contacts::Contact;
use crate::models::Point3D;
use crate::utils::{
    MarbleConstants, MAX_BOUNCE_PASSES, MAX_NO_BOUNCE_PASSES, PINCH_NORMAL_SUM_SQUARED,
    PINCH_SPEED_SQUARED,
};

/// Approach speed that keeps the cancel loop going after its first pass.
const LOOPED_APPROACH_THRESHOLD: f64 = -0.001;

/// Tick-scoped flags shared by every cancel pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BounceState {
    /// Set by the first real bounce of the tick.
    pub bounced_yet: bool,
    /// Set once platform candidates have been stopped by a pinch.
    pub stopped_paths: bool,
}

/// What a cancel call wants the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CancelReport {
    /// Impact speed of the tick's first bounce, if this call produced it.
    pub bounce_speed: Option<f64>,
    /// Opposing contact normals cancel out around a slow marble.
    pub pinched: bool,
    /// Platform candidates must be stopped for the rest of the tick.
    pub stop_paths: bool,
    /// Number of passes over the contact set.
    pub passes: u32,
}

/// Removes or reflects velocity that would drive the marble into a contact.
///
/// Loops over `contacts` until none reports an approaching normal velocity.
/// With `no_bounce` every approach is simply projected out. Otherwise a
/// shallow approach to static geometry slides (once per call, keeping the
/// speed), a slow approach is projected out, and anything else bounces.
/// `surface_slide` marks the slide as already used.
pub fn cancel_velocity(
    contacts: &[Contact],
    velocity: &mut Point3D,
    omega: &mut Point3D,
    constants: &MarbleConstants,
    mut surface_slide: bool,
    no_bounce: bool,
    bounce_state: &mut BounceState,
) -> CancelReport {
    let mut report = CancelReport::default();
    let max_passes = if no_bounce { MAX_NO_BOUNCE_PASSES } else { MAX_BOUNCE_PASSES };
    let mut looped = false;

    loop {
        let mut done = true;
        report.passes += 1;

        for contact in contacts {
            let surface_dot = contact.approach_speed(*velocity);
            let approaching = if looped {
                surface_dot < LOOPED_APPROACH_THRESHOLD
            } else {
                surface_dot < 0.0
            };
            if !approaching {
                continue;
            }

            let speed = velocity.len();
            let normal_velocity = contact.normal * surface_dot;

            if no_bounce {
                *velocity -= normal_velocity;
            } else if contact.is_static()
                && !surface_slide
                && surface_dot > -constants.max_dot_slide * speed
            {
                *velocity -= normal_velocity;
                if let Some(direction) = velocity.normalized() {
                    *velocity = direction * speed;
                }
                surface_slide = true;
            } else if surface_dot >= -constants.min_bounce_vel {
                *velocity -= normal_velocity;
            } else {
                bounce(contact, velocity, omega, constants, surface_dot);
                if !bounce_state.bounced_yet {
                    bounce_state.bounced_yet = true;
                    report.bounce_speed = Some(-surface_dot);
                }
            }
            done = false;
        }

        looped = true;
        if done || report.passes >= max_passes {
            break;
        }
    }

    if velocity.len_squared() < PINCH_SPEED_SQUARED {
        let mut normal_sum = Point3D::ZERO;
        for contact in contacts {
            normal_sum += contact.normal;
            if normal_sum.len_squared() < PINCH_NORMAL_SUM_SQUARED {
                report.pinched = true;
            }
        }
        if report.pinched && !bounce_state.stopped_paths {
            bounce_state.stopped_paths = true;
            report.stop_paths = true;
        }
    }

    report
}

/// Restitution along the normal plus a friction kick that converts some of
/// the tangential slip at the contact point into spin.
fn bounce(
    contact: &Contact,
    velocity: &mut Point3D,
    omega: &mut Point3D,
    constants: &MarbleConstants,
    surface_dot: f64,
) {
    let radius = constants.radius;
    let relative = *velocity - contact.surface_velocity;
    let restitution = constants.bounce_restitution * contact.restitution;
    let velocity_add = contact.normal * (-(1.0 + restitution) * surface_dot);

    let contact_arm = -contact.normal * radius;
    let mut slip = relative + omega.cross(contact_arm);
    slip -= contact.normal * contact.normal.dot(relative);

    let slip_speed = slip.len();
    if slip_speed != 0.0 {
        let friction = constants.bounce_kinetic_friction * contact.friction;
        let normal_speed = -surface_dot;
        let spin = (friction * 5.0 * normal_speed / (2.0 * radius)).min(slip_speed / radius);

        let slip_dir = slip / slip_speed;
        let delta_omega = (-contact.normal).cross(-slip_dir) * spin;
        *omega += delta_omega;
        *velocity -= (-delta_omega).cross(contact_arm);
    }

    *velocity += velocity_add;
}
