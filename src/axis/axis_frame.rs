use log::warn;

use crate::models::{Point3D, Quaternion};

/// Accumulated look direction, in radians.
///
/// `pitch` is positive when looking down, matching the engine's Euler convention.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraOrientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl CameraOrientation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

/// Orthonormal basis used to map stick input onto the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisVectors {
    /// Camera right, perpendicular to up.
    pub side: Point3D,
    /// Camera forward flattened onto the plane perpendicular to up.
    pub motion: Point3D,
    /// Opposite of gravity.
    pub up: Point3D,
}

/// Per-marble camera-relative motion frame.
///
/// The frame is computed lazily by [`AxisFrame::resolve`] and reused until
/// [`AxisFrame::invalidate`] is called, so every sub-step of a tick sees the
/// same axes even if the camera moves mid-tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFrame {
    gravity_frame: Quaternion,
    gravity_dir: Point3D,
    cached: Option<AxisVectors>,
    last_side: Option<Point3D>,
}

impl Default for AxisFrame {
    fn default() -> Self {
        AxisFrame::new(Quaternion::identity())
    }
}

impl AxisFrame {
    pub fn new(gravity_frame: Quaternion) -> Self {
        Self {
            gravity_frame,
            gravity_dir: gravity_frame.rotate(-Point3D::Z),
            cached: None,
            last_side: None,
        }
    }

    /// Drops the cached axes and recomputes the gravity direction from the
    /// current gravity frame.
    pub fn invalidate(&mut self) {
        self.cached = None;
        self.gravity_dir = self.gravity_frame.rotate(-Point3D::Z);
    }

    /// Replaces the gravity frame. Implies [`AxisFrame::invalidate`].
    pub fn set_gravity_frame(&mut self, gravity_frame: Quaternion) {
        self.gravity_frame = gravity_frame;
        self.invalidate();
    }

    pub fn gravity_frame(&self) -> Quaternion {
        self.gravity_frame
    }

    /// Unit gravity direction, `gravity_frame · (0, 0, -1)`.
    pub fn gravity_dir(&self) -> Point3D {
        self.gravity_dir
    }

    pub fn up(&self) -> Point3D {
        -self.gravity_dir
    }

    pub fn is_valid(&self) -> bool {
        self.cached.is_some()
    }

    /// Returns the cached axes, building them from `camera` first if the
    /// frame has been invalidated.
    pub fn resolve(&mut self, camera: CameraOrientation) -> AxisVectors {
        if let Some(axes) = self.cached {
            return axes;
        }

        let up = self.up();
        let camera_rot = self
            .gravity_frame
            .multiply(&Quaternion::euler_z(camera.yaw))
            .multiply(&Quaternion::euler_x(camera.pitch));
        let forward = camera_rot.rotate(Point3D::Y);

        let side = match forward.cross(up).normalized() {
            Some(side) => side,
            None => self.fallback_side(camera, up),
        };
        let motion = up.cross(side);

        let axes = AxisVectors { side, motion, up };
        self.cached = Some(axes);
        self.last_side = Some(side);
        axes
    }

    /// Side vector for a camera looking straight along the up axis.
    fn fallback_side(&self, camera: CameraOrientation, up: Point3D) -> Point3D {
        let orthogonal = |v: Point3D| (v - up * v.dot(up)).normalized();

        if let Some(side) = self.last_side.and_then(orthogonal) {
            warn!("Camera forward is parallel to up, reusing previous side axis");
            return side;
        }

        warn!("Camera forward is parallel to up with no previous frame, using yawed gravity-frame X");
        let yawed_x = self
            .gravity_frame
            .multiply(&Quaternion::euler_z(camera.yaw))
            .rotate(Point3D::X);
        orthogonal(yawed_x).unwrap_or(Point3D::X)
    }
}
