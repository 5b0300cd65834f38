use crate::errors::PhysicsError;
use crate::models::{Box3D, Point3D};
use crate::utils::{closest_point_on_segment, earliest_root, CONTACT_TOLERANCE};

/// Squared-gap slack within which a touching sphere still registers an
/// immediate hit instead of being ignored as overlapping.
const SWEEP_OVERLAP_TOLERANCE: f64 = 1.0e-6;

/// Slack for the point-in-polygon edge test.
const INSIDE_EPSILON: f64 = 1.0e-9;

/// Earliest time a moving sphere touches a polygon, and the touching normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepTime {
    pub time: f64,
    pub normal: Point3D,
}

/// Planar convex polygon, front face given by counter-clockwise winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3D>,
    normal: Point3D,
    plane_distance: f64,
    bounds: Box3D,
}

impl Polygon {
    /// Builds a polygon from at least three non-collinear vertices.
    ///
    /// The normal is computed with Newell's method, so slightly non-planar
    /// input gets a best-fit plane.
    ///
    /// # Example
    /// ```
    /// use marble_physics::collision::Polygon;
    /// use marble_physics::models::Point3D;
    ///
    /// let tri = Polygon::new(vec![
    ///     Point3D::new(0.0, 0.0, 0.0),
    ///     Point3D::new(1.0, 0.0, 0.0),
    ///     Point3D::new(0.0, 1.0, 0.0),
    /// ]).unwrap();
    /// assert_eq!(tri.normal(), Point3D::Z);
    ///
    /// assert!(Polygon::new(vec![Point3D::ZERO, Point3D::X, Point3D::X * 2.0]).is_err());
    /// ```
    pub fn new(vertices: Vec<Point3D>) -> Result<Self, PhysicsError> {
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::NonFiniteVector);
        }
        if vertices.len() < 3 {
            return Err(PhysicsError::DegeneratePolygon);
        }

        let mut newell = Point3D::ZERO;
        for (i, current) in vertices.iter().enumerate() {
            let next = vertices[(i + 1) % vertices.len()];
            newell.x += (current.y - next.y) * (current.z + next.z);
            newell.y += (current.z - next.z) * (current.x + next.x);
            newell.z += (current.x - next.x) * (current.y + next.y);
        }
        let normal = newell.normalized().ok_or(PhysicsError::DegeneratePolygon)?;

        let centroid = vertices.iter().fold(Point3D::ZERO, |acc, v| acc + *v) / vertices.len() as f64;
        let bounds = Box3D::from_points(&vertices).ok_or(PhysicsError::DegeneratePolygon)?;

        Ok(Self { plane_distance: normal.dot(centroid), vertices, normal, bounds })
    }

    pub fn normal(&self) -> Point3D {
        self.normal
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    pub fn bounds(&self) -> Box3D {
        self.bounds
    }

    pub fn translated(&self, offset: Point3D) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|v| *v + offset).collect(),
            normal: self.normal,
            plane_distance: self.plane_distance + self.normal.dot(offset),
            bounds: self.bounds.translated(offset),
        }
    }

    /// Signed distance from the plane, positive on the front side.
    #[inline]
    pub fn signed_distance(&self, p: Point3D) -> f64 {
        self.normal.dot(p) - self.plane_distance
    }

    fn edges(&self) -> impl Iterator<Item = (Point3D, Point3D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Whether a point on the plane lies inside the polygon.
    fn contains_projected(&self, q: Point3D) -> bool {
        self.edges()
            .all(|(a, b)| (b - a).cross(q - a).dot(self.normal) >= -INSIDE_EPSILON)
    }

    pub fn closest_point(&self, p: Point3D) -> Point3D {
        let projected = p - self.normal * self.signed_distance(p);
        if self.contains_projected(projected) {
            return projected;
        }

        let mut best = self.vertices[0];
        let mut best_dist = f64::INFINITY;
        for (a, b) in self.edges() {
            let candidate = closest_point_on_segment(p, a, b);
            let dist = (p - candidate).len_squared();
            if dist < best_dist {
                best_dist = dist;
                best = candidate;
            }
        }
        best
    }

    /// Contact normal, closest point and penetration for a sphere, if the
    /// sphere is on the front side and within the contact tolerance.
    pub fn sphere_contact(&self, center: Point3D, radius: f64) -> Option<(Point3D, Point3D, f64)> {
        if self.signed_distance(center) < 0.0 {
            return None;
        }
        let point = self.closest_point(center);
        let offset = center - point;
        let distance = offset.len();
        if distance > radius + CONTACT_TOLERANCE {
            return None;
        }
        let normal = offset.normalize_or(self.normal);
        Some((normal, point, radius - distance))
    }

    /// Earliest time in `[0, max_time]` at which a sphere moving with
    /// `velocity` touches the polygon's face, an edge or a vertex.
    pub fn sweep_sphere(
        &self,
        center: Point3D,
        radius: f64,
        velocity: Point3D,
        max_time: f64,
    ) -> Option<SweepTime> {
        let mut best: Option<SweepTime> = None;
        let mut consider = |time: f64, at: Point3D| {
            if best.map_or(true, |b| time < b.time) {
                let contact_center = center + velocity * time;
                let normal = (contact_center - at).normalize_or(self.normal);
                best = Some(SweepTime { time, normal });
            }
        };

        // Face: only from the front, and only while approaching.
        let approach = self.normal.dot(velocity);
        let gap = self.signed_distance(center) - radius;
        if approach < 0.0 && gap >= -SWEEP_OVERLAP_TOLERANCE {
            let time = (gap / -approach).max(0.0);
            if time <= max_time {
                let touch = center + velocity * time - self.normal * radius;
                if self.contains_projected(touch) {
                    consider(time, touch);
                }
            }
        }

        let radius_sq = radius * radius;
        let speed_sq = velocity.len_squared();

        for (a, b) in self.edges() {
            let edge = b - a;
            let edge_len_sq = edge.len_squared();
            if edge_len_sq <= 0.0 {
                continue;
            }
            let axis = edge / edge_len_sq.sqrt();
            let rel = center - a;
            let w0 = rel - axis * axis.dot(rel);
            let wv = velocity - axis * axis.dot(velocity);
            let root = earliest_root(
                wv.len_squared(),
                2.0 * w0.dot(wv),
                w0.len_squared() - radius_sq,
                max_time,
                SWEEP_OVERLAP_TOLERANCE,
            );
            if let Some(time) = root {
                let along = (center + velocity * time - a).dot(edge) / edge_len_sq;
                if (0.0..=1.0).contains(&along) {
                    consider(time, a + edge * along);
                }
            }
        }

        for vertex in &self.vertices {
            let rel = center - *vertex;
            let root = earliest_root(
                speed_sq,
                2.0 * rel.dot(velocity),
                rel.len_squared() - radius_sq,
                max_time,
                SWEEP_OVERLAP_TOLERANCE,
            );
            if let Some(time) = root {
                consider(time, *vertex);
            }
        }

        best
    }
}
