use crate::models::Point3D;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3D {
    pub min: Point3D,
    pub max: Point3D,
}

impl Box3D {
    pub fn new(min: Point3D, max: Point3D) -> Self {
        Self { min, max }
    }

    /// Tight box around a sphere.
    pub fn around_sphere(center: Point3D, radius: f64) -> Self {
        let r = Point3D::new(radius, radius, radius);
        Self { min: center - r, max: center + r }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Point3D]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Box3D { min: *first, max: *first };
        for p in rest {
            bounds.min = bounds.min.component_min(*p);
            bounds.max = bounds.max.component_max(*p);
        }
        Some(bounds)
    }

    /// Inclusive overlap test; touching boxes overlap.
    ///
    /// # Example
    /// ```
    /// use marble_physics::models::{Box3D, Point3D};
    ///
    /// let a = Box3D::new(Point3D::ZERO, Point3D::new(1.0, 1.0, 1.0));
    /// let b = Box3D::new(Point3D::new(1.0, 0.0, 0.0), Point3D::new(2.0, 1.0, 1.0));
    /// let c = Box3D::new(Point3D::new(1.5, 0.0, 0.0), Point3D::new(2.0, 1.0, 1.0));
    /// assert!(a.is_overlapped(&b));
    /// assert!(!a.is_overlapped(&c));
    /// ```
    pub fn is_overlapped(&self, other: &Box3D) -> bool {
        !(self.min.x > other.max.x
            || self.min.y > other.max.y
            || self.min.z > other.max.z
            || other.min.x > self.max.x
            || other.min.y > self.max.y
            || other.min.z > self.max.z)
    }

    pub fn contains_point(&self, p: Point3D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Stretches the box along `displacement`, growing only the side the
    /// displacement points to on each axis.
    pub fn extruded(&self, displacement: Point3D) -> Box3D {
        let abs = displacement.abs();
        Box3D {
            min: self.min + (displacement - abs) * 0.5,
            max: self.max + (displacement + abs) * 0.5,
        }
    }

    /// Grows every face outward by `margin`.
    pub fn inflated(&self, margin: f64) -> Box3D {
        let m = Point3D::new(margin, margin, margin);
        Box3D { min: self.min - m, max: self.max + m }
    }

    pub fn translated(&self, offset: Point3D) -> Box3D {
        Box3D { min: self.min + offset, max: self.max + offset }
    }

    pub fn union(&self, other: &Box3D) -> Box3D {
        Box3D {
            min: self.min.component_min(other.min),
            max: self.max.component_max(other.max),
        }
    }

    pub fn center(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }
}
