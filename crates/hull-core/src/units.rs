//! Unit conversions. The kernel works in inches; machine output is in millimetres.

pub const INCHES_PER_FOOT: f64 = 12.0;
pub const MM_PER_INCH: f64 = 25.4;
pub const LITRES_PER_CUBIC_INCH: f64 = 0.016_387_064;

pub fn feet_to_inches(feet: f64) -> f64 {
    feet * INCHES_PER_FOOT
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn cubic_inches_to_litres(cubic_inches: f64) -> f64 {
    cubic_inches * LITRES_PER_CUBIC_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(feet_to_inches(7.0), 84.0);
        assert!((inches_to_mm(1.0) - 25.4).abs() < 1e-12);
        assert!((cubic_inches_to_litres(61.023_744) - 1.0).abs() < 1e-6);
    }
}
