use crate::models::Point3D;

/// Quaternion representation for gravity frames and camera rotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a quaternion from axis-angle representation (right-handed)
    pub fn from_axis_angle(axis: Point3D, angle: f64) -> Self {
        let Some(n) = axis.normalized() else {
            return Quaternion::identity();
        };
        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();

        Quaternion {
            w: half_angle.cos(),
            x: n.x * sin_half,
            y: n.y * sin_half,
            z: n.z * sin_half,
        }
    }

    /// Rotation about +X using the engine's Euler convention.
    ///
    /// Engine Euler angles turn the opposite way to the right-hand rule:
    /// a positive pitch tips +Y toward -Z (looking down).
    pub fn euler_x(pitch: f64) -> Self {
        Quaternion::from_axis_angle(Point3D::X, -pitch)
    }

    /// Rotation about +Z using the engine's Euler convention.
    /// A positive yaw turns +Y toward +X.
    pub fn euler_z(yaw: f64) -> Self {
        Quaternion::from_axis_angle(Point3D::Z, -yaw)
    }

    /// Returns the length/magnitude of the quaternion
    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Multiplies two quaternions (composition of rotations, `other` applied first)
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Returns the conjugate of the quaternion
    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotates a vector using the quaternion
    pub fn rotate(&self, v: Point3D) -> Point3D {
        let p = Quaternion { w: 0.0, x: v.x, y: v.y, z: v.z };

        // q * p * q^-1; for a unit quaternion the inverse is the conjugate
        let q = self.normalized();
        let rotated = q.multiply(&p).multiply(&q.conjugate());

        Point3D::new(rotated.x, rotated.y, rotated.z)
    }
}
