/// Linear tolerance used for geometric comparisons.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-9;

    pub fn new(linear: f64) -> Self {
        Self { linear }
    }

    /// Check if two values are equal within linear tolerance
    pub fn linear_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check that `values` increase strictly by more than the tolerance.
    pub fn strictly_increasing(self, values: &[f64]) -> bool {
        values.windows(2).all(|w| w[1] - w[0] > self.linear)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_eq() {
        let tol = Tolerance::default();
        assert!(tol.linear_eq(1.0, 1.0 + 1e-12));
        assert!(!tol.linear_eq(1.0, 1.001));
        assert!(Tolerance::new(1e-4).linear_eq(1.0, 1.00001));
    }

    #[test]
    fn test_strictly_increasing() {
        let tol = Tolerance::default();
        assert!(tol.strictly_increasing(&[0.0, 12.0, 36.0, 60.0, 72.0]));
        assert!(!tol.strictly_increasing(&[0.0, 12.0, 12.0]));
        assert!(!tol.strictly_increasing(&[0.0, 12.0, 6.0]));
        assert!(tol.strictly_increasing(&[]));
    }
}
