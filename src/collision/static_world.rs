use log::trace;
use rayon::prelude::*;

use crate::collision::{CollisionWorld, Polygon, SweepHit, SweepResult};
use crate::contacts::Contact;
use crate::errors::PhysicsError;
use crate::models::{Box3D, ObjectId, ObjectMask, ObjectRef, Point3D};

/// Surface counts above this are filtered on the rayon pool.
pub const PARALLEL_BROAD_PHASE_THRESHOLD: usize = 512;

/// Friction and restitution multipliers of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub friction: f64,
    pub restitution: f64,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self { friction: 1.0, restitution: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub polygon: Polygon,
    pub object: ObjectRef,
    pub material: SurfaceMaterial,
}

/// Motionless polygon soup with a broad-phase working set.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    surfaces: Vec<Surface>,
    working_set: Vec<usize>,
    last_moved: Option<Box3D>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Indices into [`StaticWorld::surfaces`] kept by the last broad-phase.
    pub fn working_set(&self) -> &[usize] {
        &self.working_set
    }

    /// Bounds passed to the most recent `object_moved` notification.
    pub fn last_moved(&self) -> Option<Box3D> {
        self.last_moved
    }

    pub fn add_surface(
        &mut self,
        vertices: Vec<Point3D>,
        object: ObjectRef,
        material: SurfaceMaterial,
    ) -> Result<usize, PhysicsError> {
        let polygon = Polygon::new(vertices)?;
        self.surfaces.push(Surface { polygon, object, material });
        Ok(self.surfaces.len() - 1)
    }

    /// Adds the six outward-facing quads of an axis-aligned box.
    pub fn add_box(
        &mut self,
        min: Point3D,
        max: Point3D,
        id: ObjectId,
        material: SurfaceMaterial,
    ) -> Result<(), PhysicsError> {
        let object = ObjectRef { id, kind: ObjectMask::INTERIOR_MAP };
        for face in box_faces(min, max) {
            self.add_surface(face.to_vec(), object, material)?;
        }
        Ok(())
    }

    fn selected(&self, mask: ObjectMask) -> impl Iterator<Item = &Surface> + '_ {
        self.working_set
            .iter()
            .map(move |&i| &self.surfaces[i])
            .filter(move |s| s.object.kind.intersects(mask))
    }
}

/// Outward-wound faces of an axis-aligned box.
pub fn box_faces(min: Point3D, max: Point3D) -> [[Point3D; 4]; 6] {
    let p = |x: f64, y: f64, z: f64| Point3D::new(x, y, z);
    let (a, b) = (min, max);
    [
        [p(a.x, a.y, b.z), p(b.x, a.y, b.z), p(b.x, b.y, b.z), p(a.x, b.y, b.z)], // +Z
        [p(a.x, a.y, a.z), p(a.x, b.y, a.z), p(b.x, b.y, a.z), p(b.x, a.y, a.z)], // -Z
        [p(b.x, a.y, a.z), p(b.x, b.y, a.z), p(b.x, b.y, b.z), p(b.x, a.y, b.z)], // +X
        [p(a.x, a.y, a.z), p(a.x, a.y, b.z), p(a.x, b.y, b.z), p(a.x, b.y, a.z)], // -X
        [p(a.x, b.y, a.z), p(a.x, b.y, b.z), p(b.x, b.y, b.z), p(b.x, b.y, a.z)], // +Y
        [p(a.x, a.y, a.z), p(b.x, a.y, a.z), p(b.x, a.y, b.z), p(a.x, a.y, b.z)], // -Y
    ]
}

impl CollisionWorld for StaticWorld {
    fn reset_objects_and_polys(&mut self, mask: ObjectMask, bounds: &Box3D) {
        let keep = |s: &Surface| s.object.kind.intersects(mask) && s.polygon.bounds().is_overlapped(bounds);

        // Indexed parallel iterators collect in input order, so contact
        // order does not depend on the thread count.
        self.working_set = if self.surfaces.len() > PARALLEL_BROAD_PHASE_THRESHOLD {
            self.surfaces
                .par_iter()
                .enumerate()
                .filter(|(_, s)| keep(*s))
                .map(|(i, _)| i)
                .collect()
        } else {
            self.surfaces
                .iter()
                .enumerate()
                .filter(|(_, s)| keep(*s))
                .map(|(i, _)| i)
                .collect()
        };

        trace!("Broad-phase kept {} of {} surfaces", self.working_set.len(), self.surfaces.len());
    }

    fn find_contacts(&self, mask: ObjectMask, position: Point3D, radius: f64) -> Vec<Contact> {
        self.selected(mask)
            .filter_map(|surface| {
                let (normal, point, penetration) = surface.polygon.sphere_contact(position, radius)?;
                Some(Contact {
                    normal,
                    point,
                    penetration,
                    surface_velocity: Point3D::ZERO,
                    friction: surface.material.friction,
                    restitution: surface.material.restitution,
                    object: surface.object,
                })
            })
            .collect()
    }

    fn test_move(
        &self,
        velocity: Point3D,
        position: Point3D,
        time: f64,
        radius: f64,
        mask: ObjectMask,
    ) -> SweepResult {
        if time <= 0.0 || velocity.is_zero() {
            return SweepResult { position, time: time.max(0.0), hit: None };
        }

        let mut result = SweepResult::clear(position, velocity, time);
        for surface in self.selected(mask) {
            if let Some(sweep) = surface.polygon.sweep_sphere(position, radius, velocity, result.time) {
                if result.hit.is_none() || sweep.time < result.time {
                    result = SweepResult {
                        position: position + velocity * sweep.time,
                        time: sweep.time,
                        hit: Some(SweepHit { normal: sweep.normal, object: surface.object }),
                    };
                }
            }
        }
        result
    }

    fn object_moved(&mut self, bounds: &Box3D) {
        self.last_moved = Some(*bounds);
    }
}
