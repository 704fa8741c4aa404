//! B-spline and NURBS curve implementations.

use hull_core::{HullError, Result};
use hull_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;
use crate::nurbs::{deboor, KnotVector};

/// A B-spline curve defined by degree, knot vector, and control points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BSplineCurve {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<Point3>,
}

impl BSplineCurve {
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point3>) -> Result<Self> {
        let knots = KnotVector::new(knots, degree, control_points.len())?;
        Ok(Self {
            degree,
            knots,
            control_points,
        })
    }

    /// Clamped curve on `[0, 1]` with uniformly spaced interior knots.
    pub fn clamped(degree: usize, control_points: Vec<Point3>) -> Result<Self> {
        let knots = KnotVector::clamped_uniform(degree, control_points.len())?;
        Ok(Self {
            degree,
            knots,
            control_points,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }
}

impl Curve for BSplineCurve {
    fn point_at(&self, t: f64) -> Point3 {
        deboor::curve_point(self.degree, self.knots.as_slice(), &self.control_points, t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        deboor::curve_tangent(self.degree, self.knots.as_slice(), &self.control_points, t)
    }

    fn domain(&self) -> (f64, f64) {
        self.knots.domain(self.degree)
    }
}

/// A NURBS (Non-Uniform Rational B-Spline) curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsCurve {
    degree: usize,
    knots: KnotVector,
    control_points: Vec<Point3>,
    weights: Vec<f64>,
}

impl NurbsCurve {
    pub fn new(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<Point3>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let knots = KnotVector::new(knots, degree, control_points.len())?;
        if weights.len() != control_points.len() {
            return Err(HullError::InvalidParameter(format!(
                "{} weights given for {} control points",
                weights.len(),
                control_points.len()
            )));
        }
        if weights.iter().any(|&w| !(w > 0.0 && w.is_finite())) {
            return Err(HullError::InvalidParameter(
                "NURBS weights must be positive and finite".into(),
            ));
        }
        Ok(Self {
            degree,
            knots,
            control_points,
            weights,
        })
    }

    /// A NURBS curve with every weight 1, i.e. a plain B-spline.
    pub fn unweighted(degree: usize, knots: Vec<f64>, control_points: Vec<Point3>) -> Result<Self> {
        let weights = vec![1.0; control_points.len()];
        Self::new(degree, knots, control_points, weights)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Curve for NurbsCurve {
    fn point_at(&self, t: f64) -> Point3 {
        deboor::nurbs_curve_point(
            self.degree,
            self.knots.as_slice(),
            &self.control_points,
            &self.weights,
            t,
        )
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        deboor::nurbs_curve_tangent(
            self.degree,
            self.knots.as_slice(),
            &self.control_points,
            &self.weights,
            t,
        )
    }

    fn domain(&self) -> (f64, f64) {
        self.knots.domain(self.degree)
    }
}
