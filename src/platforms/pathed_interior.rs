use crate::collision::{Polygon, SurfaceMaterial};
use crate::contacts::Contact;
use crate::errors::PhysicsError;
use crate::models::{Box3D, ObjectId, ObjectMask, ObjectRef, Point3D};

/// A moving platform driven along a path.
///
/// During a marble tick the platform is advanced speculatively and rolled
/// back around every sub-step; see [`PlatformTick`](crate::platforms::PlatformTick)
/// for the order in which these are called.
pub trait PathedInterior {
    fn id(&self) -> ObjectId;

    /// World bounds covering the platform's motion over its next step.
    fn extruded_box(&self) -> Box3D;

    /// Saves the path state so the tick can be rolled back.
    fn push_tick_state(&mut self);

    /// Prepares the step for a tick of `time_delta_ms`, setting the velocity
    /// the platform will move with.
    fn compute_next_path_step(&mut self, time_delta_ms: u32);

    /// Restores the path state saved by `push_tick_state`. A stopped
    /// platform stays stopped.
    fn reset_tick_state(&mut self);

    /// Moves the platform `elapsed_ms` along its path from the current state.
    fn advance(&mut self, elapsed_ms: f64);

    /// Discards the state saved by `push_tick_state`.
    fn pop_tick_state(&mut self);

    fn set_stopped(&mut self, stopped: bool);

    fn velocity(&self) -> Point3D;

    /// Contacts against the platform at its current position.
    fn find_contacts(&self, position: Point3D, radius: f64) -> Vec<Contact>;

    /// Earliest time within `move_time` at which the sphere, moving with
    /// `velocity`, touches the moving platform.
    fn first_intersect(&self, position: Point3D, velocity: Point3D, radius: f64, move_time: f64) -> Option<f64>;
}

impl<T: PathedInterior + ?Sized> PathedInterior for Box<T> {
    fn id(&self) -> ObjectId { (**self).id() }
    fn extruded_box(&self) -> Box3D { (**self).extruded_box() }
    fn push_tick_state(&mut self) { (**self).push_tick_state() }
    fn compute_next_path_step(&mut self, time_delta_ms: u32) { (**self).compute_next_path_step(time_delta_ms) }
    fn reset_tick_state(&mut self) { (**self).reset_tick_state() }
    fn advance(&mut self, elapsed_ms: f64) { (**self).advance(elapsed_ms) }
    fn pop_tick_state(&mut self) { (**self).pop_tick_state() }
    fn set_stopped(&mut self, stopped: bool) { (**self).set_stopped(stopped) }
    fn velocity(&self) -> Point3D { (**self).velocity() }
    fn find_contacts(&self, position: Point3D, radius: f64) -> Vec<Contact> { (**self).find_contacts(position, radius) }
    fn first_intersect(&self, position: Point3D, velocity: Point3D, radius: f64, move_time: f64) -> Option<f64> {
        (**self).first_intersect(position, velocity, radius, move_time)
    }
}

/// Point on a platform path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathKeyframe {
    /// Platform offset from its local geometry.
    pub position: Point3D,
    /// Path time at which the offset is reached, in milliseconds.
    pub time_ms: f64,
}

/// Platform moving linearly between keyframes, looping at the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPathedInterior {
    id: ObjectId,
    polygons: Vec<Polygon>,
    local_bounds: Box3D,
    keyframes: Vec<PathKeyframe>,
    material: SurfaceMaterial,
    path_time_ms: f64,
    velocity: Point3D,
    stopped: bool,
    lookahead_ms: f64,
    saved: Vec<f64>,
}

impl LinearPathedInterior {
    /// Creates a platform from local-space faces and a path.
    ///
    /// # Errors
    /// [`PhysicsError::InvalidTime`] if the keyframes are empty, do not start
    /// at time zero or are not strictly increasing; polygon errors for bad faces.
    pub fn new(
        id: ObjectId,
        faces: Vec<Vec<Point3D>>,
        keyframes: Vec<PathKeyframe>,
        material: SurfaceMaterial,
    ) -> Result<Self, PhysicsError> {
        match keyframes.first() {
            Some(first) if first.time_ms == 0.0 => {}
            _ => return Err(PhysicsError::InvalidTime),
        }
        if keyframes.windows(2).any(|w| !(w[1].time_ms > w[0].time_ms)) {
            return Err(PhysicsError::InvalidTime);
        }

        let polygons = faces.into_iter().map(Polygon::new).collect::<Result<Vec<_>, _>>()?;
        let local_bounds = polygons
            .iter()
            .map(Polygon::bounds)
            .reduce(|a, b| a.union(&b))
            .ok_or(PhysicsError::DegeneratePolygon)?;

        Ok(Self {
            id,
            polygons,
            local_bounds,
            keyframes,
            material,
            path_time_ms: 0.0,
            velocity: Point3D::ZERO,
            stopped: false,
            lookahead_ms: 32.0,
            saved: Vec::new(),
        })
    }

    pub fn path_time_ms(&self) -> f64 {
        self.path_time_ms
    }

    pub fn set_path_time_ms(&mut self, time_ms: f64) {
        self.path_time_ms = time_ms;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_tick_pushed(&self) -> bool {
        !self.saved.is_empty()
    }

    fn duration_ms(&self) -> f64 {
        self.keyframes.last().map_or(0.0, |k| k.time_ms)
    }

    /// Path offset at `time_ms`, wrapping past the last keyframe.
    pub fn offset_at(&self, time_ms: f64) -> Point3D {
        let duration = self.duration_ms();
        let t = if duration > 0.0 { time_ms.rem_euclid(duration) } else { 0.0 };

        for pair in self.keyframes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if t <= to.time_ms {
                let fraction = (t - from.time_ms) / (to.time_ms - from.time_ms);
                return from.position + (to.position - from.position) * fraction;
            }
        }
        self.keyframes.first().map_or(Point3D::ZERO, |k| k.position)
    }

    pub fn offset(&self) -> Point3D {
        self.offset_at(self.path_time_ms)
    }

    fn world_polygons(&self) -> impl Iterator<Item = Polygon> + '_ {
        let offset = self.offset();
        self.polygons.iter().map(move |p| p.translated(offset))
    }
}

impl PathedInterior for LinearPathedInterior {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn extruded_box(&self) -> Box3D {
        let start = self.path_time_ms;
        let end = start + self.lookahead_ms;
        let mut bounds = self.local_bounds.translated(self.offset_at(start));
        bounds = bounds.union(&self.local_bounds.translated(self.offset_at(end)));

        // Keyframes passed inside the window are corners of the swept path.
        let duration = self.duration_ms();
        if duration > 0.0 {
            let cycle_start = start - start.rem_euclid(duration);
            for k in &self.keyframes {
                for cycle in [cycle_start, cycle_start + duration] {
                    let t = cycle + k.time_ms;
                    if t > start && t < end {
                        bounds = bounds.union(&self.local_bounds.translated(k.position));
                    }
                }
            }
        }
        bounds
    }

    fn push_tick_state(&mut self) {
        self.saved.push(self.path_time_ms);
    }

    fn compute_next_path_step(&mut self, time_delta_ms: u32) {
        self.lookahead_ms = f64::from(time_delta_ms);
        if self.stopped || time_delta_ms == 0 {
            self.velocity = Point3D::ZERO;
            return;
        }
        let step = f64::from(time_delta_ms);
        let displacement = self.offset_at(self.path_time_ms + step) - self.offset();
        self.velocity = displacement / (step / 1000.0);
    }

    fn reset_tick_state(&mut self) {
        if let Some(&saved) = self.saved.last() {
            self.path_time_ms = saved;
        }
    }

    fn advance(&mut self, elapsed_ms: f64) {
        if !self.stopped {
            self.path_time_ms += elapsed_ms;
        }
    }

    fn pop_tick_state(&mut self) {
        self.saved.pop();
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
        if stopped {
            self.velocity = Point3D::ZERO;
        }
    }

    fn velocity(&self) -> Point3D {
        self.velocity
    }

    fn find_contacts(&self, position: Point3D, radius: f64) -> Vec<Contact> {
        let object = ObjectRef { id: self.id, kind: ObjectMask::PATHED_INTERIOR };
        self.world_polygons()
            .filter_map(|polygon| {
                let (normal, point, penetration) = polygon.sphere_contact(position, radius)?;
                Some(Contact {
                    normal,
                    point,
                    penetration,
                    surface_velocity: self.velocity,
                    friction: self.material.friction,
                    restitution: self.material.restitution,
                    object,
                })
            })
            .collect()
    }

    fn first_intersect(&self, position: Point3D, velocity: Point3D, radius: f64, move_time: f64) -> Option<f64> {
        let relative = velocity - self.velocity;
        self.world_polygons()
            .filter_map(|polygon| polygon.sweep_sphere(position, radius, relative, move_time))
            .map(|hit| hit.time)
            .reduce(f64::min)
    }
}
