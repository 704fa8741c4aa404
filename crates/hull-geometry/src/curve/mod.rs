//! Parametric curves: Bezier, B-spline and NURBS.

mod bezier;
mod bspline;

use hull_math::{Point3, Vector3};

pub use bezier::{bernstein, binomial, evaluate_bezier, BezierCurve};
pub use bspline::{BSplineCurve, NurbsCurve};

/// A parametric curve in 3D space. Evaluation has no side effects.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Evaluate the first derivative at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);
}
