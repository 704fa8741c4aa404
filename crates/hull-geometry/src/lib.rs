//! Hull kernel curve engine: Bezier and NURBS curves, surfaces, and spline interpolation.

pub mod curve;
pub mod nurbs;
pub mod surface;
pub mod tessellate;

pub use curve::{BezierCurve, BSplineCurve, Curve, NurbsCurve};
pub use nurbs::{interpolate, InterpolatingSpline, KnotVector};
pub use surface::{NurbsSurface, Surface};
