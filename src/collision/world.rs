use crate::contacts::Contact;
use crate::models::{Box3D, ObjectMask, ObjectRef, Point3D};

/// First obstacle met by a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Normal of the obstacle at the hit, pointing toward the sphere.
    pub normal: Point3D,
    pub object: ObjectRef,
}

/// Outcome of [`CollisionWorld::test_move`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Sphere centre after moving.
    pub position: Point3D,
    /// Time actually travelled, never more than requested.
    pub time: f64,
    pub hit: Option<SweepHit>,
}

impl SweepResult {
    /// Unobstructed move over the full `time`.
    pub fn clear(position: Point3D, velocity: Point3D, time: f64) -> Self {
        Self { position: position + velocity * time, time, hit: None }
    }
}

/// Geometry service used by the solver.
///
/// Implementations keep a working set of candidate polygons between
/// [`reset_objects_and_polys`](CollisionWorld::reset_objects_and_polys)
/// calls; contacts and sweeps only consider that set.
pub trait CollisionWorld {
    /// Rebuilds the working set from every object matching `mask` whose
    /// bounds overlap `bounds`.
    fn reset_objects_and_polys(&mut self, mask: ObjectMask, bounds: &Box3D);

    /// Surfaces within the contact tolerance of the sphere, in working-set order.
    fn find_contacts(&self, mask: ObjectMask, position: Point3D, radius: f64) -> Vec<Contact>;

    /// Moves the sphere along `velocity` for up to `time` seconds, stopping
    /// at the first obstacle.
    fn test_move(
        &self,
        velocity: Point3D,
        position: Point3D,
        time: f64,
        radius: f64,
        mask: ObjectMask,
    ) -> SweepResult;

    /// Called after the marble commits its position for the tick.
    fn object_moved(&mut self, _bounds: &Box3D) {}
}

impl<W: CollisionWorld + ?Sized> CollisionWorld for &mut W {
    fn reset_objects_and_polys(&mut self, mask: ObjectMask, bounds: &Box3D) {
        (**self).reset_objects_and_polys(mask, bounds)
    }

    fn find_contacts(&self, mask: ObjectMask, position: Point3D, radius: f64) -> Vec<Contact> {
        (**self).find_contacts(mask, position, radius)
    }

    fn test_move(&self, velocity: Point3D, position: Point3D, time: f64, radius: f64, mask: ObjectMask) -> SweepResult {
        (**self).test_move(velocity, position, time, radius, mask)
    }

    fn object_moved(&mut self, bounds: &Box3D) {
        (**self).object_moved(bounds)
    }
}
