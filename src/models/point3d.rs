use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use approx::AbsDiffEq;

use crate::errors::PhysicsError;
use crate::models::{FromCoordinates, ToCoordinates};
use crate::utils::NORMALIZE_EPSILON;

/// Double-precision 3D vector. All solver state is stored in this form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Single-precision mirror, produced only at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    pub const ZERO: Point3D = Point3D { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Point3D = Point3D { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Point3D = Point3D { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Point3D = Point3D { x: 0.0, y: 0.0, z: 1.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline]
    pub fn len_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn len(self) -> f64 {
        self.len_squared().sqrt()
    }

    /// Unit vector in the same direction, or `None` when the vector is too
    /// short (or not finite) to have a reliable direction.
    ///
    /// # Example
    /// ```
    /// use marble_physics::models::Point3D;
    ///
    /// assert_eq!(Point3D::new(0.0, 3.0, 0.0).normalized(), Some(Point3D::Y));
    /// assert_eq!(Point3D::ZERO.normalized(), None);
    /// ```
    pub fn normalized(self) -> Option<Point3D> {
        let len = self.len();
        if !len.is_finite() || len < NORMALIZE_EPSILON {
            return None;
        }
        Some(self / len)
    }

    /// Normalised vector, or `fallback` if this one has no usable direction.
    #[inline]
    pub fn normalize_or(self, fallback: Point3D) -> Point3D {
        self.normalized().unwrap_or(fallback)
    }

    #[inline]
    pub fn abs(self) -> Point3D {
        Point3D::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn component_min(self, other: Point3D) -> Point3D {
        Point3D::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn component_max(self, other: Point3D) -> Point3D {
        Point3D::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// The single conversion from solver precision to presentation precision.
    #[inline]
    pub fn to_f32(self) -> Point3F {
        Point3F { x: self.x as f32, y: self.y as f32, z: self.z as f32 }
    }
}

impl From<Point3D> for Point3F {
    fn from(p: Point3D) -> Self {
        p.to_f32()
    }
}

impl FromCoordinates<(f64, f64, f64)> for Point3D {
    fn from_coord(position: (f64, f64, f64)) -> Self {
        Point3D::new(position.0, position.1, position.2)
    }
}

impl ToCoordinates<(f64, f64, f64)> for Point3D {
    fn to_coord(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl Add for Point3D {
    type Output = Point3D;
    fn add(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Point3D;
    fn sub(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point3D {
    type Output = Point3D;
    fn neg(self) -> Point3D {
        Point3D::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;
    fn mul(self, rhs: f64) -> Point3D {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Point3D> for f64 {
    type Output = Point3D;
    fn mul(self, rhs: Point3D) -> Point3D {
        rhs * self
    }
}

impl Div<f64> for Point3D {
    type Output = Point3D;
    fn div(self, rhs: f64) -> Point3D {
        Point3D::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Point3D {
    fn add_assign(&mut self, rhs: Point3D) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point3D {
    fn sub_assign(&mut self, rhs: Point3D) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Point3D {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl FromStr for Point3D {
    type Err = PhysicsError;

    /// Parses three whitespace-separated numbers, the console vector format.
    ///
    /// # Example
    /// ```
    /// use marble_physics::models::Point3D;
    ///
    /// let p: Point3D = "1 -2.5 3".parse().unwrap();
    /// assert_eq!(p, Point3D::new(1.0, -2.5, 3.0));
    /// assert!("1 2".parse::<Point3D>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut components = [0.0; 3];
        let mut parts = s.split_whitespace();
        for component in components.iter_mut() {
            let token = parts
                .next()
                .ok_or_else(|| PhysicsError::ParseError(format!("expected three components in {:?}", s)))?;
            *component = token
                .parse::<f64>()
                .map_err(|e| PhysicsError::ParseError(format!("{:?}: {}", token, e)))?;
        }
        if parts.next().is_some() {
            return Err(PhysicsError::ParseError(format!("trailing data in {:?}", s)));
        }
        Ok(Point3D::from_coord((components[0], components[1], components[2])))
    }
}

impl AbsDiffEq for Point3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon)
            && f64::abs_diff_eq(&self.y, &other.y, epsilon)
            && f64::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}
