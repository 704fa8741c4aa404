//! Bezier curves via the Bernstein basis.

use std::ops::{Add, Mul};

use hull_core::{HullError, Result};
use hull_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// Binomial coefficient `C(n, i)` as a float.
pub fn binomial(n: usize, i: usize) -> f64 {
    if i > n {
        return 0.0;
    }
    let k = i.min(n - i);
    (0..k).fold(1.0, |acc, j| acc * (n - j) as f64 / (j + 1) as f64)
}

/// Bernstein basis polynomial `B_{n,i}(t) = C(n,i) t^i (1-t)^(n-i)`.
///
/// Defined for any real `t`; outside `[0, 1]` this is plain polynomial extrapolation.
pub fn bernstein(n: usize, i: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

/// Evaluate `sum_i B_{n,i}(t) P_i` with `n = points.len() - 1`.
///
/// Works for 2D and 3D points alike. No clamping of `t` is performed.
/// An empty slice yields the default (origin) point.
pub fn evaluate_bezier<P>(control_points: &[P], t: f64) -> P
where
    P: Copy + Default + Add<Output = P> + Mul<f64, Output = P>,
{
    let Some(n) = control_points.len().checked_sub(1) else {
        return P::default();
    };
    control_points
        .iter()
        .enumerate()
        .fold(P::default(), |acc, (i, &p)| acc + p * bernstein(n, i, t))
}

/// A Bezier curve of degree `control_points.len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierCurve {
    control_points: Vec<Point3>,
}

impl BezierCurve {
    pub fn new(control_points: Vec<Point3>) -> Result<Self> {
        if control_points.is_empty() {
            return Err(HullError::degree(0, 0));
        }
        Ok(Self { control_points })
    }

    /// Curve of an explicit `degree`; needs exactly `degree + 1` points.
    pub fn with_degree(degree: usize, control_points: Vec<Point3>) -> Result<Self> {
        if control_points.len() != degree + 1 {
            return Err(HullError::degree(degree, control_points.len()));
        }
        Ok(Self { control_points })
    }

    pub fn quadratic(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self {
            control_points: vec![p0, p1, p2],
        }
    }

    pub fn cubic(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self {
            control_points: vec![p0, p1, p2, p3],
        }
    }

    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }
}

impl Curve for BezierCurve {
    fn point_at(&self, t: f64) -> Point3 {
        evaluate_bezier(&self.control_points, t)
    }

    /// Derivative through the hodograph `n * sum B_{n-1,i}(t) (P_{i+1} - P_i)`.
    fn tangent_at(&self, t: f64) -> Vector3 {
        let n = self.degree();
        if n == 0 {
            return DVec3::ZERO;
        }
        let hodograph: Vec<Vector3> = self
            .control_points
            .windows(2)
            .map(|w| (w[1] - w[0]) * n as f64)
            .collect();
        evaluate_bezier(&hodograph, t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hull_math::DVec2;

    fn sample_points() -> Vec<Point3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(90.0, 25.0, 0.0),
            DVec3::new(180.0, 0.0, 0.0),
            DVec3::new(200.0, -5.0, 3.0),
        ]
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 0), 1.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(5, 3), 10.0);
        assert_eq!(binomial(3, 4), 0.0);
    }

    #[test]
    fn test_bernstein_partition_of_unity() {
        for n in 0..8 {
            for k in -5..=15 {
                let t = k as f64 / 10.0;
                let sum: f64 = (0..=n).map(|i| bernstein(n, i, t)).sum();
                assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_endpoint_interpolation() {
        let pts = sample_points();
        for len in 1..=pts.len() {
            let cps = &pts[..len];
            assert_eq!(evaluate_bezier(cps, 0.0), cps[0]);
            assert!((evaluate_bezier(cps, 1.0) - cps[len - 1]).length() < 1e-12);
        }
    }

    #[test]
    fn test_quadratic_midpoint() {
        let curve = BezierCurve::quadratic(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.5, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        );
        let p = curve.point_at(0.5);
        assert!((p - DVec3::new(0.5, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_extrapolation_is_unclamped() {
        // Linear Bezier extrapolates along the line.
        let cps = [DVec2::new(0.0, 0.0), DVec2::new(2.0, 4.0)];
        assert_eq!(evaluate_bezier(&cps, 1.5), DVec2::new(3.0, 6.0));
        assert_eq!(evaluate_bezier(&cps, -0.5), DVec2::new(-1.0, -2.0));

        // Quadratic matches the polynomial at t = 2
        let cps = [DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0)];
        let t: f64 = 2.0;
        let expected = cps[0] * (1.0 - t).powi(2) + cps[1] * 2.0 * t * (1.0 - t) + cps[2] * t * t;
        assert!((evaluate_bezier(&cps, t) - expected).length() < 1e-12);
    }

    #[test]
    fn test_tangent_matches_finite_difference() {
        let curve = BezierCurve::new(sample_points()).unwrap();
        let h = 1e-6;
        for &t in &[0.1, 0.4, 0.75] {
            let numeric = (curve.point_at(t + h) - curve.point_at(t - h)) / (2.0 * h);
            assert!((curve.tangent_at(t) - numeric).length() < 1e-4);
        }
    }

    #[test]
    fn test_degree_errors() {
        assert!(matches!(
            BezierCurve::new(vec![]),
            Err(HullError::Degree { required: 1, actual: 0 })
        ));
        assert!(matches!(
            BezierCurve::with_degree(3, sample_points()[..3].to_vec()),
            Err(HullError::Degree { required: 4, actual: 3 })
        ));
        assert!(matches!(
            BezierCurve::with_degree(2, sample_points()),
            Err(HullError::Degree { required: 3, actual: 4 })
        ));
        let quad = BezierCurve::with_degree(2, sample_points()[..3].to_vec()).unwrap();
        assert_eq!(quad.degree(), 2);
    }
}
