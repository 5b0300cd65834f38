use crate::models::{ObjectId, ObjectMask, ObjectRef, Point3D};

/// A surface touching (or within tolerance of) the marble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the surface toward the marble centre.
    pub normal: Point3D,
    /// Closest point on the surface.
    pub point: Point3D,
    /// How far the sphere reaches past the surface. Negative while still
    /// separated but within the contact tolerance.
    pub penetration: f64,
    /// Velocity of the surface itself; zero for static geometry.
    pub surface_velocity: Point3D,
    /// Surface friction multiplier.
    pub friction: f64,
    /// Surface restitution multiplier.
    pub restitution: f64,
    pub object: ObjectRef,
}

impl Contact {
    /// Contact against motionless geometry with unit friction and restitution.
    pub fn fixed(normal: Point3D, point: Point3D, penetration: f64, id: ObjectId) -> Self {
        Self {
            normal,
            point,
            penetration,
            surface_velocity: Point3D::ZERO,
            friction: 1.0,
            restitution: 1.0,
            object: ObjectRef { id, kind: ObjectMask::STATIC },
        }
    }

    /// Normal component of the marble's velocity relative to the surface.
    /// Negative when approaching.
    #[inline]
    pub fn approach_speed(&self, velocity: Point3D) -> f64 {
        self.normal.dot(velocity - self.surface_velocity)
    }

    pub fn is_static(&self) -> bool {
        self.surface_velocity.is_zero()
    }
}
