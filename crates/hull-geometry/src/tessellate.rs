//! Discretizing curves into polylines.

use hull_math::Point3;

use crate::curve::Curve;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Evaluate `curve` at `count` evenly spaced parameters across its domain.
pub fn sample_curve(curve: &dyn Curve, count: usize) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    hull_math::linspace(t_min, t_max, count)
        .into_iter()
        .map(|t| curve.point_at(t))
        .collect()
}

/// Convert a curve to a polyline by adaptive subdivision.
///
/// A parameter interval is split while the curve midpoint deviates from the
/// chord midpoint by more than `tolerance`.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let start = curve.point_at(t_min);
    let end = curve.point_at(t_max);
    let mut points = vec![start];
    subdivide(curve, (t_min, start), (t_max, end), tolerance, &mut points, 0);
    points
}

fn subdivide(
    curve: &dyn Curve,
    (t0, p0): (f64, Point3),
    (t1, p1): (f64, Point3),
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    let t_mid = 0.5 * (t0 + t1);
    let p_mid = curve.point_at(t_mid);
    let deviation = (p_mid - (p0 + p1) * 0.5).length();

    if depth < MAX_DEPTH && deviation > tolerance {
        subdivide(curve, (t0, p0), (t_mid, p_mid), tolerance, points, depth + 1);
        subdivide(curve, (t_mid, p_mid), (t1, p1), tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}
