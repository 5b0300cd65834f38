// src/utils/constants_config.rs

use crate::errors::PhysicsError;
use crate::utils::DEFAULT_MARBLE_CONSTANTS;

/// Tunable marble parameters, the equivalent of a game datablock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarbleConstants {
    pub radius: f64,
    pub mass: f64,
    /// Magnitude of the gravity acceleration along the gravity frame's -Z.
    pub gravity: f64,
    pub max_roll_velocity: f64,
    pub angular_acceleration: f64,
    pub braking_acceleration: f64,
    pub air_acceleration: f64,
    pub static_friction: f64,
    pub kinetic_friction: f64,
    pub bounce_kinetic_friction: f64,
    /// Approach steeper than this fraction of the speed bounces instead of sliding.
    pub max_dot_slide: f64,
    pub min_bounce_vel: f64,
    pub bounce_restitution: f64,
    pub jump_impulse: f64,
    pub min_look_pitch: f64,
    pub max_look_pitch: f64,
    /// Capacity of the per-tick path breakpoint list.
    pub max_path_breakpoints: usize,
}

impl Default for MarbleConstants {
    fn default() -> Self {
        DEFAULT_MARBLE_CONSTANTS
    }
}

impl MarbleConstants {
    /// Creates a set of constants, overriding the defaults that are given.
    ///
    /// # Errors
    /// Returns an error if the resulting set fails [`MarbleConstants::validate`].
    ///
    /// # Example
    /// ```
    /// use marble_physics::utils::MarbleConstants;
    ///
    /// let low_gravity = MarbleConstants::new(None, Some(8.0), None).unwrap();
    /// assert_eq!(low_gravity.gravity, 8.0);
    /// assert_eq!(low_gravity.radius, 0.2);
    ///
    /// assert!(MarbleConstants::new(Some(-1.0), None, None).is_err());
    /// ```
    pub fn new(
        radius: Option<f64>,
        gravity: Option<f64>,
        max_roll_velocity: Option<f64>,
    ) -> Result<Self, PhysicsError> {
        let default = DEFAULT_MARBLE_CONSTANTS;
        let constants = Self {
            radius: radius.unwrap_or(default.radius),
            gravity: gravity.unwrap_or(default.gravity),
            max_roll_velocity: max_roll_velocity.unwrap_or(default.max_roll_velocity),
            ..default
        };
        constants.validate()?;
        Ok(constants)
    }

    /// Checks that every field is usable by the solver.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.radius > 0.0) || !self.radius.is_finite() { return Err(PhysicsError::InvalidRadius); }
        if !(self.mass > 0.0) || !self.mass.is_finite() { return Err(PhysicsError::InvalidMass); }

        let non_negative = [
            ("gravity", self.gravity),
            ("max_roll_velocity", self.max_roll_velocity),
            ("angular_acceleration", self.angular_acceleration),
            ("braking_acceleration", self.braking_acceleration),
            ("air_acceleration", self.air_acceleration),
            ("static_friction", self.static_friction),
            ("kinetic_friction", self.kinetic_friction),
            ("bounce_kinetic_friction", self.bounce_kinetic_friction),
            ("min_bounce_vel", self.min_bounce_vel),
            ("jump_impulse", self.jump_impulse),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(PhysicsError::InvalidCoefficient(name));
            }
        }

        if !(0.0..=1.0).contains(&self.max_dot_slide) { return Err(PhysicsError::InvalidCoefficient("max_dot_slide")); }
        if !(0.0..=1.0).contains(&self.bounce_restitution) { return Err(PhysicsError::InvalidCoefficient("bounce_restitution")); }
        if !(self.min_look_pitch <= self.max_look_pitch) { return Err(PhysicsError::InvalidCoefficient("look_pitch")); }

        Ok(())
    }
}
