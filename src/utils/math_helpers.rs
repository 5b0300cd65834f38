use crate::models::Point3D;

/// Vectors shorter than this are treated as zero when normalising.
pub const NORMALIZE_EPSILON: f64 = 1.0e-9;

/// Smallest non-negative root of `a·t² + b·t + c = 0` that lies in `[0, max_t]`.
///
/// Used for sphere sweeps where `c` is the current squared gap. A slightly
/// negative `c` (already touching, within `overlap_tolerance`) returns `0.0`
/// when the motion closes the gap (`b < 0`); deeper overlap is ignored so the
/// body can move out of it.
#[inline]
pub fn earliest_root(a: f64, b: f64, c: f64, max_t: f64, overlap_tolerance: f64) -> Option<f64> {
    if a <= 0.0 {
        return None;
    }
    if c <= 0.0 {
        return if c > -overlap_tolerance && b < 0.0 { Some(0.0) } else { None };
    }
    if b >= 0.0 {
        // Moving apart or parallel.
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t >= 0.0 && t <= max_t { Some(t) } else { None }
}

/// Closest point to `p` on the segment `a`-`b`.
#[inline]
pub fn closest_point_on_segment(p: Point3D, a: Point3D, b: Point3D) -> Point3D {
    let ab = b - a;
    let len_sq = ab.len_squared();
    if len_sq < NORMALIZE_EPSILON * NORMALIZE_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Clamps `value` into `[min, max]`, returning whether clamping happened.
#[inline]
pub fn clamp_with_flag(value: f64, min: f64, max: f64) -> (f64, bool) {
    if value < min {
        (min, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}
