//! Knot vectors and B-spline basis functions.

use hull_core::{HullError, Result};
use serde::{Deserialize, Serialize};

/// A non-decreasing knot vector sized for a given degree and control point count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    /// Wrap `knots`, checking `len == control_count + degree + 1` and monotonicity.
    pub fn new(knots: Vec<f64>, degree: usize, control_count: usize) -> Result<Self> {
        if control_count < degree + 1 {
            return Err(HullError::degree(degree, control_count));
        }
        let expected = control_count + degree + 1;
        if knots.len() != expected {
            return Err(HullError::InvalidParameter(format!(
                "knot vector length must be {expected} ({control_count} control points, degree {degree}), got {}",
                knots.len()
            )));
        }
        if knots.iter().any(|k| !k.is_finite()) {
            return Err(HullError::InvalidParameter(
                "knot vector contains non-finite values".into(),
            ));
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(HullError::InvalidParameter(
                "knot vector must be non-decreasing".into(),
            ));
        }
        Ok(Self(knots))
    }

    /// Clamped uniform knots on `[0, 1]`: `degree + 1` repeated zeros and ones
    /// with evenly spaced interior knots.
    pub fn clamped_uniform(degree: usize, control_count: usize) -> Result<Self> {
        if control_count < degree + 1 {
            return Err(HullError::degree(degree, control_count));
        }
        let interior = control_count - degree - 1;
        let mut knots = Vec::with_capacity(control_count + degree + 1);
        knots.extend(std::iter::repeat(0.0).take(degree + 1));
        knots.extend((1..=interior).map(|i| i as f64 / (interior + 1) as f64));
        knots.extend(std::iter::repeat(1.0).take(degree + 1));
        Ok(Self(knots))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Valid parameter range `[knots[p], knots[m - p]]` for degree `p`.
    pub fn domain(&self, degree: usize) -> (f64, f64) {
        (self.0[degree], self.0[self.0.len() - degree - 1])
    }
}

/// Find the knot span index for parameter `t`.
///
/// Returns `i` with `knots[i] <= t < knots[i+1]`; parameters at or past the
/// upper end of the domain map to the last non-empty span.
///
/// * `n` - number of control points minus 1
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Single basis function `N_{i,degree}(u)` by the Cox–de Boor recursion.
///
/// Terms with a zero-width knot interval are taken as zero. At the final knot
/// the last non-empty span is treated as closed so the basis still sums to one.
pub fn basis_function(knots: &[f64], degree: usize, i: usize, u: f64) -> f64 {
    if degree == 0 {
        let (lo, hi) = (knots[i], knots[i + 1]);
        if lo <= u && u < hi {
            return 1.0;
        }
        let last = knots[knots.len() - 1];
        return if u == last && hi == last && lo < hi { 1.0 } else { 0.0 };
    }

    let mut value = 0.0;

    let left_den = knots[i + degree] - knots[i];
    if left_den > 0.0 {
        value += (u - knots[i]) / left_den * basis_function(knots, degree - 1, i, u);
    }

    let right_den = knots[i + degree + 1] - knots[i + 1];
    if right_den > 0.0 {
        value += (knots[i + degree + 1] - u) / right_den
            * basis_function(knots, degree - 1, i + 1, u);
    }

    value
}

/// Non-vanishing basis functions `N_{span-degree..=span, degree}(t)`, tabular form.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }

    n
}

/// Basis functions and their first derivatives at `t`, as `(N, dN)`.
pub fn basis_functions_derivs(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
) -> (Vec<f64>, Vec<f64>) {
    let p = degree;
    let values = basis_functions(p, knots, span, t);
    if p == 0 {
        return (values, vec![0.0]);
    }

    // dN_{i,p} = p * (N_{i,p-1} / (u_{i+p} - u_i) - N_{i+1,p-1} / (u_{i+p+1} - u_{i+1}))
    let lower = basis_functions(p - 1, knots, span, t);
    let first = span - p;
    let mut derivs = vec![0.0; p + 1];
    for (j, d) in derivs.iter_mut().enumerate() {
        let i = first + j;
        // N_{i,p-1} is lower[j - 1]; N_{i+1,p-1} is lower[j].
        let a = if j >= 1 {
            let den = knots[i + p] - knots[i];
            if den > 0.0 { lower[j - 1] / den } else { 0.0 }
        } else {
            0.0
        };
        let b = if j < p {
            let den = knots[i + p + 1] - knots[i + 1];
            if den > 0.0 { lower[j] / den } else { 0.0 }
        } else {
            0.0
        };
        *d = p as f64 * (a - b);
    }

    (values, derivs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_uniform() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let n = 4;
        let degree = 2;

        assert_eq!(find_span(degree, &knots, n, 0.0), 2);
        assert_eq!(find_span(degree, &knots, n, 0.5), 2);
        assert_eq!(find_span(degree, &knots, n, 1.0), 3);
        assert_eq!(find_span(degree, &knots, n, 2.5), 4);
        assert_eq!(find_span(degree, &knots, n, 3.0), 4);
    }

    #[test]
    fn test_basis_functions_partition_of_unity() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0];
        let degree = 2;
        for &t in &[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            let span = find_span(degree, &knots, 4, t);
            let sum: f64 = basis_functions(degree, &knots, span, t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "sum {} at t={}", sum, t);
        }
    }

    #[test]
    fn test_recursive_basis_matches_tabular() {
        let knots = vec![0.0, 0.0, 0.0, 0.0, 0.4, 1.0, 1.0, 1.0, 1.0];
        let degree = 3;
        let n = 4;
        for k in 0..=20 {
            let t = k as f64 / 20.0;
            let span = find_span(degree, &knots, n, t);
            let table = basis_functions(degree, &knots, span, t);
            for i in 0..=n {
                let expected = if i + degree >= span && i <= span {
                    table[i + degree - span]
                } else {
                    0.0
                };
                let got = basis_function(&knots, degree, i, t);
                assert!(
                    (got - expected).abs() < 1e-12,
                    "N_{},{}({}) = {}, expected {}",
                    i,
                    degree,
                    t,
                    got,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_recursive_basis_sums_to_one_at_end() {
        let knots = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let sum: f64 = (0..3).map(|i| basis_function(&knots, 2, i, 1.0)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(basis_function(&knots, 2, 2, 1.0), 1.0);
    }

    #[test]
    fn test_derivatives_sum_to_zero() {
        let knots = vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0];
        for &t in &[0.1, 0.3, 0.5, 0.9] {
            let span = find_span(3, &knots, 4, t);
            let (_, d) = basis_functions_derivs(3, &knots, span, t);
            let sum: f64 = d.iter().sum();
            assert!(sum.abs() < 1e-10, "derivative sum {} at t={}", sum, t);
        }
    }

    #[test]
    fn test_knot_vector_validation() {
        assert!(KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0], 2, 3).is_ok());
        assert!(matches!(
            KnotVector::new(vec![0.0, 0.0, 1.0, 1.0], 2, 3),
            Err(HullError::InvalidParameter(_))
        ));
        assert!(matches!(
            KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 0.5, 1.0], 2, 3),
            Err(HullError::InvalidParameter(_))
        ));
        assert!(matches!(
            KnotVector::new(vec![0.0, 0.0, 1.0, 1.0], 2, 1),
            Err(HullError::Degree { required: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_clamped_uniform() {
        let kv = KnotVector::clamped_uniform(3, 6).unwrap();
        assert_eq!(kv.len(), 10);
        assert_eq!(
            kv.as_slice(),
            &[0.0, 0.0, 0.0, 0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(kv.domain(3), (0.0, 1.0));
    }
}
