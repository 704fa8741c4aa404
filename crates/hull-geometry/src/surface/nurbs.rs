//! Tensor-product NURBS surface.

use hull_core::{HullError, Result};
use hull_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::nurbs::{deboor, KnotVector};

/// A NURBS surface over a grid of control points.
///
/// `control_points[i][j]` is the control point at row `i` (u-direction) and
/// column `j` (v-direction); `weights` has the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsSurface {
    degree_u: usize,
    degree_v: usize,
    knots_u: KnotVector,
    knots_v: KnotVector,
    control_points: Vec<Vec<Point3>>,
    weights: Vec<Vec<f64>>,
}

impl NurbsSurface {
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        control_points: Vec<Vec<Point3>>,
        weights: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let rows = control_points.len();
        let cols = control_points.first().map_or(0, Vec::len);
        if control_points.iter().any(|row| row.len() != cols) {
            return Err(HullError::InvalidParameter(
                "control point grid rows must have equal length".into(),
            ));
        }
        let knots_u = KnotVector::new(knots_u, degree_u, rows)?;
        let knots_v = KnotVector::new(knots_v, degree_v, cols)?;

        let shape_matches =
            weights.len() == rows && weights.iter().all(|row| row.len() == cols);
        if !shape_matches {
            return Err(HullError::InvalidParameter(
                "weight grid must match the control point grid".into(),
            ));
        }
        if weights.iter().flatten().any(|&w| !(w > 0.0 && w.is_finite())) {
            return Err(HullError::InvalidParameter(
                "NURBS weights must be positive and finite".into(),
            ));
        }

        Ok(Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            control_points,
            weights,
        })
    }

    /// Surface with every weight 1 (a pure B-spline surface).
    pub fn unweighted(
        degree_u: usize,
        degree_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        control_points: Vec<Vec<Point3>>,
    ) -> Result<Self> {
        let weights = control_points.iter().map(|row| vec![1.0; row.len()]).collect();
        Self::new(degree_u, degree_v, knots_u, knots_v, control_points, weights)
    }

    pub fn degrees(&self) -> (usize, usize) {
        (self.degree_u, self.degree_v)
    }

    pub fn control_points(&self) -> &[Vec<Point3>] {
        &self.control_points
    }
}

impl Surface for NurbsSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        deboor::nurbs_surface_point(
            self.degree_u,
            self.degree_v,
            self.knots_u.as_slice(),
            self.knots_v.as_slice(),
            &self.control_points,
            &self.weights,
            u,
            v,
        )
    }

    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        deboor::nurbs_surface_normal(
            self.degree_u,
            self.degree_v,
            self.knots_u.as_slice(),
            self.knots_v.as_slice(),
            &self.control_points,
            &self.weights,
            u,
            v,
        )
    }

    fn domain_u(&self) -> (f64, f64) {
        self.knots_u.domain(self.degree_u)
    }

    fn domain_v(&self) -> (f64, f64) {
        self.knots_v.domain(self.degree_v)
    }
}
