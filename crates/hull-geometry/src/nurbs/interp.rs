//! Global B-spline interpolation of scalar data `y(x)`.
//!
//! The knot vector is chosen from the data abscissae: interior knots at the
//! midpoints of the data for degree 2, and the "not-a-knot" placement for odd
//! degrees. With exactly `degree + 1` points the result is the unique
//! interpolating polynomial.

use hull_core::{HullError, Result, Tolerance};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::knot::{basis_functions, find_span, KnotVector};

/// A scalar B-spline function passing through a set of data points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolatingSpline {
    degree: usize,
    knots: KnotVector,
    coefficients: Vec<f64>,
}

impl InterpolatingSpline {
    /// Fit a spline of `degree` through `(xs[i], ys[i])`.
    ///
    /// `xs` must be strictly increasing and at least `degree + 1` long.
    pub fn fit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(HullError::InvalidParameter(format!(
                "interpolation needs matching x/y counts, got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        let n = xs.len();
        if n < degree + 1 {
            return Err(HullError::degree(degree, n));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(HullError::InvalidParameter(
                "interpolation data must be finite".into(),
            ));
        }
        if !Tolerance::default().strictly_increasing(xs) {
            return Err(HullError::InvalidParameter(format!(
                "interpolation abscissae must be strictly increasing: {xs:?}"
            )));
        }

        let knots = KnotVector::new(interpolation_knots(xs, degree)?, degree, n)?;

        // Collocation system: sum_j c_j N_j(x_i) = y_i
        let mut matrix = DMatrix::<f64>::zeros(n, n);
        for (row, &x) in xs.iter().enumerate() {
            let span = find_span(degree, knots.as_slice(), n - 1, x);
            let basis = basis_functions(degree, knots.as_slice(), span, x);
            for (j, b) in basis.into_iter().enumerate() {
                matrix[(row, span - degree + j)] = b;
            }
        }
        let rhs = DVector::from_column_slice(ys);
        let solution = matrix.lu().solve(&rhs).ok_or_else(|| {
            HullError::InvalidParameter("interpolation system is singular".into())
        })?;

        tracing::trace!(degree, points = n, "fitted interpolating spline");

        Ok(Self {
            degree,
            knots,
            coefficients: solution.iter().copied().collect(),
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Range of `x` covered by the data.
    pub fn domain(&self) -> (f64, f64) {
        self.knots.domain(self.degree)
    }

    /// Evaluate the spline at `x`. Outside the data range the end polynomial
    /// pieces are extended.
    pub fn evaluate(&self, x: f64) -> f64 {
        let knots = self.knots.as_slice();
        let span = find_span(self.degree, knots, self.coefficients.len() - 1, x);
        let basis = basis_functions(self.degree, knots, span, x);
        basis
            .iter()
            .zip(&self.coefficients[span - self.degree..=span])
            .map(|(b, c)| b * c)
            .sum()
    }

    /// Evaluate at each of `xs`.
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Shorthand for [`InterpolatingSpline::fit`].
pub fn interpolate(xs: &[f64], ys: &[f64], degree: usize) -> Result<InterpolatingSpline> {
    InterpolatingSpline::fit(xs, ys, degree)
}

fn interpolation_knots(xs: &[f64], degree: usize) -> Result<Vec<f64>> {
    let n = xs.len();
    let (first, last) = (xs[0], xs[n - 1]);

    let interior: Vec<f64> = if degree == 2 {
        // Midpoints between data, dropping the outermost pair.
        xs.windows(2)
            .map(|w| 0.5 * (w[0] + w[1]))
            .skip(1)
            .take(n.saturating_sub(3))
            .collect()
    } else if degree % 2 == 1 {
        let m = (degree - 1) / 2;
        xs[m + 1..n - m - 1].to_vec()
    } else {
        return Err(HullError::InvalidParameter(format!(
            "interpolation supports degree 2 or odd degrees, got {degree}"
        )));
    };

    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(first).take(degree + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat(last).take(degree + 1));
    Ok(knots)
}
