// src/utils/constants.rs

use crate::models::ObjectMask;
use crate::utils::MarbleConstants;

/// Target sub-step duration in seconds.
///
/// The solver has always used the single-precision literal widened to double,
/// so the value is `0.00800000037997961` rather than exactly `0.008`.
pub const SUB_STEP_SECONDS: f64 = 0.008_f32 as f64;

/// Hard cap on sub-steps per tick. Time left after the last one is dropped.
pub const MAX_SUB_STEPS: u32 = 11;

/// Multiplier applied to the tick displacement when extruding the swept box.
pub const SWEEP_INFLATION: f64 = 1.1_f32 as f64;

/// Fixed swept-box margin, in world units per second of simulated time.
pub const SWEEP_MARGIN_PER_SECOND: f64 = 25.0;

/// A truncated sub-step records a path breakpoint only if it travelled less
/// than this fraction of the step...
pub const BREAKPOINT_STEP_FRACTION: f64 = 0.99;

/// ...and more than this many seconds.
pub const BREAKPOINT_MIN_MOVE_TIME: f64 = 0.001_f32 as f64;

/// Scale from raw stick input to roll intent; 65% deflection is full speed.
pub const MOVE_INPUT_SCALE: f64 = 1.538461565971375;

/// Distance beyond the radius at which a surface still counts as a contact.
pub const CONTACT_TOLERANCE: f64 = 1.0e-4;

/// Squared speed below which opposing contacts are checked for a pinch.
pub const PINCH_SPEED_SQUARED: f64 = 625.0;

/// Squared length of the running normal sum that counts as "cancelled out".
pub const PINCH_NORMAL_SUM_SQUARED: f64 = 0.01;

/// Passes after which the post-force cancel loop gives up.
pub const MAX_NO_BOUNCE_PASSES: u32 = 7;

/// Safety cap for the bouncing cancel loop.
pub const MAX_BOUNCE_PASSES: u32 = 64;

/// Objects the swept motion collides with.
pub const COLLISION_MASK: ObjectMask = ObjectMask::STATIC
    .union(ObjectMask::ATLAS)
    .union(ObjectMask::INTERIOR_MAP)
    .union(ObjectMask::SHAPE_BASE)
    .union(ObjectMask::PLAYER)
    .union(ObjectMask::VEHICLE_BLOCKER);

/// Objects that produce contacts. Same set as the collision mask.
pub const CONTACT_MASK: ObjectMask = COLLISION_MASK;

/// Named output receiving the per-tick contact ratio.
pub const CONTACT_PERCENTAGE_VARIABLE: &str = "testCount";

/// Named output receiving the current look pitch.
pub const LOOK_PITCH_VARIABLE: &str = "marblePitch";

pub const DEFAULT_MARBLE_CONSTANTS: MarbleConstants = MarbleConstants {
    radius: 0.2,
    mass: 1.0,
    gravity: 20.0,
    max_roll_velocity: 15.0,
    angular_acceleration: 75.0,
    braking_acceleration: 30.0,
    air_acceleration: 5.0,
    static_friction: 1.1,
    kinetic_friction: 0.7,
    bounce_kinetic_friction: 0.2,
    max_dot_slide: 0.5,
    min_bounce_vel: 0.1,
    bounce_restitution: 0.5,
    jump_impulse: 7.5,
    min_look_pitch: -0.35,
    max_look_pitch: 1.5,
    max_path_breakpoints: 1,
};
