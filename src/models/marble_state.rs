use std::ops::BitOr;

use crate::errors::PhysicsError;
use crate::models::{Box3D, Point3D, Point3F};

/// Network dirty bits raised by state setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskBits(pub u32);

impl MaskBits {
    pub const NONE: Self = Self(0);
    /// Velocity or angular velocity changed.
    pub const MOVE: Self = Self(1 << 0);
    /// Position changed.
    pub const POSITION: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MaskBits {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Marble mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarbleMode(pub u32);

impl MarbleMode {
    pub const NORMAL: Self = Self(0);
    /// Linear motion is locked; the marble may only spin.
    pub const RESTRICT_XYZ: Self = Self(1 << 0);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

/// Single-precision view of the state, for renderers and replication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub position: Point3F,
    pub velocity: Point3F,
    pub omega: Point3F,
}

/// Canonical double-precision marble state.
///
/// Fields are private so every change goes through a setter that raises
/// the matching dirty bit and keeps the world box in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct MarbleState {
    position: Point3D,
    velocity: Point3D,
    omega: Point3D,
    radius: f64,
    world_box: Box3D,
    mode: MarbleMode,
    dirty: MaskBits,
}

fn check_finite(v: Point3D) -> Result<Point3D, PhysicsError> {
    if v.is_finite() { Ok(v) } else { Err(PhysicsError::NonFiniteVector) }
}

impl MarbleState {
    pub fn new(position: Point3D, radius: f64) -> Result<Self, PhysicsError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(PhysicsError::InvalidRadius);
        }
        let position = check_finite(position)?;
        Ok(Self {
            position,
            velocity: Point3D::ZERO,
            omega: Point3D::ZERO,
            radius,
            world_box: Box3D::around_sphere(position, radius),
            mode: MarbleMode::NORMAL,
            dirty: MaskBits::NONE,
        })
    }

    pub fn position(&self) -> Point3D { self.position }
    pub fn velocity(&self) -> Point3D { self.velocity }
    pub fn omega(&self) -> Point3D { self.omega }
    pub fn radius(&self) -> f64 { self.radius }
    pub fn world_box(&self) -> Box3D { self.world_box }
    pub fn mode(&self) -> MarbleMode { self.mode }
    pub fn dirty_bits(&self) -> MaskBits { self.dirty }

    pub fn is_restricted(&self) -> bool {
        self.mode.contains(MarbleMode::RESTRICT_XYZ)
    }

    pub fn set_position(&mut self, position: Point3D) -> Result<(), PhysicsError> {
        self.position = check_finite(position)?;
        self.world_box = Box3D::around_sphere(self.position, self.radius);
        self.dirty = self.dirty | MaskBits::POSITION;
        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: Point3D) -> Result<(), PhysicsError> {
        self.velocity = check_finite(velocity)?;
        self.dirty = self.dirty | MaskBits::MOVE;
        Ok(())
    }

    pub fn set_omega(&mut self, omega: Point3D) -> Result<(), PhysicsError> {
        self.omega = check_finite(omega)?;
        self.dirty = self.dirty | MaskBits::MOVE;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: MarbleMode) {
        self.mode = mode;
    }

    /// Mutable access for the integrator. The position is published by
    /// `commit_position` at the end of the tick.
    pub(crate) fn motion_mut(&mut self) -> (&mut Point3D, &mut Point3D, &mut Point3D) {
        (&mut self.position, &mut self.velocity, &mut self.omega)
    }

    /// Publishes the integrated position: refreshes the world box and
    /// raises `POSITION`.
    pub(crate) fn commit_position(&mut self) {
        self.world_box = Box3D::around_sphere(self.position, self.radius);
        self.dirty = self.dirty | MaskBits::POSITION;
    }

    /// Raises `MOVE` when the tick left velocity or angular velocity changed.
    pub(crate) fn commit_motion(&mut self, start_velocity: Point3D, start_omega: Point3D) {
        if self.velocity != start_velocity || self.omega != start_omega {
            self.dirty = self.dirty | MaskBits::MOVE;
        }
    }

    /// Returns and clears the accumulated dirty bits.
    pub fn take_dirty_bits(&mut self) -> MaskBits {
        std::mem::take(&mut self.dirty)
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            position: self.position.to_f32(),
            velocity: self.velocity.to_f32(),
            omega: self.omega.to_f32(),
        }
    }
}
