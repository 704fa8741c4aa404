//! B-spline and NURBS point evaluation over precomputed basis functions.

use hull_math::{DVec3, Point3, Vector3};

use super::knot::{basis_functions, basis_functions_derivs, find_span};

/// Weight sums below this are treated as degenerate.
const WEIGHT_EPSILON: f64 = 1e-15;

/// Evaluate a B-spline curve at `t`.
pub fn curve_point(degree: usize, knots: &[f64], control_points: &[Point3], t: f64) -> Point3 {
    let span = find_span(degree, knots, control_points.len() - 1, t);
    let basis = basis_functions(degree, knots, span, t);
    let first = span - degree;

    basis
        .iter()
        .zip(&control_points[first..=span])
        .fold(DVec3::ZERO, |acc, (&b, &cp)| acc + b * cp)
}

/// First derivative of a B-spline curve at `t`.
pub fn curve_tangent(degree: usize, knots: &[f64], control_points: &[Point3], t: f64) -> Vector3 {
    let span = find_span(degree, knots, control_points.len() - 1, t);
    let (_, dbasis) = basis_functions_derivs(degree, knots, span, t);
    let first = span - degree;

    dbasis
        .iter()
        .zip(&control_points[first..=span])
        .fold(DVec3::ZERO, |acc, (&d, &cp)| acc + d * cp)
}

/// Evaluate a rational B-spline (NURBS) curve at `t`.
pub fn nurbs_curve_point(
    degree: usize,
    knots: &[f64],
    control_points: &[Point3],
    weights: &[f64],
    t: f64,
) -> Point3 {
    let span = find_span(degree, knots, control_points.len() - 1, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = DVec3::ZERO;
    let mut w = 0.0;
    for (j, &b) in basis.iter().enumerate() {
        let idx = span - degree + j;
        let bw = b * weights[idx];
        point += bw * control_points[idx];
        w += bw;
    }

    if w.abs() < WEIGHT_EPSILON {
        point
    } else {
        point / w
    }
}

/// First derivative of a NURBS curve at `t` (quotient rule on the homogeneous form).
pub fn nurbs_curve_tangent(
    degree: usize,
    knots: &[f64],
    control_points: &[Point3],
    weights: &[f64],
    t: f64,
) -> Vector3 {
    let span = find_span(degree, knots, control_points.len() - 1, t);
    let (basis, dbasis) = basis_functions_derivs(degree, knots, span, t);

    let mut a = DVec3::ZERO;
    let mut da = DVec3::ZERO;
    let mut w = 0.0;
    let mut dw = 0.0;
    for j in 0..=degree {
        let idx = span - degree + j;
        let bw = basis[j] * weights[idx];
        let dbw = dbasis[j] * weights[idx];
        a += bw * control_points[idx];
        da += dbw * control_points[idx];
        w += bw;
        dw += dbw;
    }

    if w.abs() < WEIGHT_EPSILON {
        da
    } else {
        (da - dw * (a / w)) / w
    }
}

/// Parameters for a tensor-product evaluation in one direction.
struct Direction {
    span: usize,
    basis: Vec<f64>,
    dbasis: Vec<f64>,
}

impl Direction {
    fn new(degree: usize, knots: &[f64], count: usize, t: f64) -> Self {
        let span = find_span(degree, knots, count - 1, t);
        let (basis, dbasis) = basis_functions_derivs(degree, knots, span, t);
        Self { span, basis, dbasis }
    }
}

/// Homogeneous sums `(A, dA/du, dA/dv, w, dw/du, dw/dv)` of a NURBS surface at `(u, v)`.
#[allow(clippy::too_many_arguments)]
fn surface_sums(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Vec<Point3>],
    weights: &[Vec<f64>],
    u: f64,
    v: f64,
) -> ([DVec3; 3], [f64; 3]) {
    let du_dir = Direction::new(degree_u, knots_u, control_points.len(), u);
    let dv_dir = Direction::new(degree_v, knots_v, control_points[0].len(), v);

    let mut a = [DVec3::ZERO; 3];
    let mut w = [0.0; 3];
    for i in 0..=degree_u {
        let ui = du_dir.span - degree_u + i;
        for j in 0..=degree_v {
            let vj = dv_dir.span - degree_v + j;
            let cp = control_points[ui][vj];
            let wt = weights[ui][vj];

            let terms = [
                du_dir.basis[i] * dv_dir.basis[j] * wt,
                du_dir.dbasis[i] * dv_dir.basis[j] * wt,
                du_dir.basis[i] * dv_dir.dbasis[j] * wt,
            ];
            for (k, term) in terms.into_iter().enumerate() {
                a[k] += term * cp;
                w[k] += term;
            }
        }
    }
    (a, w)
}

/// Evaluate a NURBS surface at `(u, v)` as a tensor-product rational sum.
#[allow(clippy::too_many_arguments)]
pub fn nurbs_surface_point(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Vec<Point3>],
    weights: &[Vec<f64>],
    u: f64,
    v: f64,
) -> Point3 {
    let (a, w) = surface_sums(
        degree_u,
        degree_v,
        knots_u,
        knots_v,
        control_points,
        weights,
        u,
        v,
    );
    if w[0].abs() < WEIGHT_EPSILON {
        a[0]
    } else {
        a[0] / w[0]
    }
}

/// Unit normal of a NURBS surface at `(u, v)`; `+Z` where the surface is degenerate.
#[allow(clippy::too_many_arguments)]
pub fn nurbs_surface_normal(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Vec<Point3>],
    weights: &[Vec<f64>],
    u: f64,
    v: f64,
) -> Vector3 {
    let (a, w) = surface_sums(
        degree_u,
        degree_v,
        knots_u,
        knots_v,
        control_points,
        weights,
        u,
        v,
    );
    if w[0].abs() < WEIGHT_EPSILON {
        return DVec3::Z;
    }

    let c = a[0] / w[0];
    let su = (a[1] - w[1] * c) / w[0];
    let sv = (a[2] - w[2] * c) / w[0];
    su.cross(sv).try_normalize().unwrap_or(DVec3::Z)
}
