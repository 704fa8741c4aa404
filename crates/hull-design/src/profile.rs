//! Synthesis of the rocker, outline, and thickness profiles.

use std::f64::consts::PI;

use hull_core::{HullError, Result, Tolerance};
use hull_geometry::InterpolatingSpline;
use hull_math::{interp, linspace, Point2};
use serde::{Deserialize, Serialize};

use crate::design::{HullDimensions, OUTLINE_SHOULDER};

/// Number of stations each profile is sampled at unless stated otherwise.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Half-width at the tail and nose tips, in inches.
const TAIL_TIP_HALF_WIDTH: f64 = 1.0;
const NOSE_TIP_HALF_WIDTH: f64 = 0.5;

/// Half-width at the tail and nose shoulders, as a fraction of the maximum.
const TAIL_SHOULDER_RATIO: f64 = 0.6;
const NOSE_SHOULDER_RATIO: f64 = 0.4;

/// Closed-form thickness distribution: zero at both tips, `max_thickness` at
/// the apex.
///
/// With the apex at mid-length this is `t(x) = T sin(pi x / L)`. Moving the
/// apex warps the longitudinal coordinate by `u^g`, with `g` chosen so the
/// apex maps to `u = 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessFoil {
    length: f64,
    max_thickness: f64,
    exponent: f64,
}

impl ThicknessFoil {
    /// `apex_offset` shifts the apex toward the tail as a fraction of length.
    pub fn new(length: f64, max_thickness: f64, apex_offset: f64) -> Self {
        let apex = 0.5 - apex_offset;
        let exponent = if Tolerance::default().linear_eq(apex_offset, 0.0) {
            1.0
        } else {
            0.5_f64.ln() / apex.ln()
        };
        Self {
            length,
            max_thickness,
            exponent,
        }
    }

    /// Thickness at station `x`; zero outside `[0, length]`.
    pub fn at(&self, x: f64) -> f64 {
        let u = (x / self.length).clamp(0.0, 1.0);
        let warped = if self.exponent == 1.0 {
            u
        } else {
            u.powf(self.exponent)
        };
        self.max_thickness * (PI * warped).sin()
    }

    /// Station of maximum thickness.
    pub fn apex_x(&self) -> f64 {
        self.length * 0.5_f64.powf(1.0 / self.exponent)
    }
}

/// The three defining profiles of a hull, sampled over its length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSet {
    stations: Vec<f64>,
    rocker: Vec<f64>,
    outline: Vec<f64>,
    rocker_spline: InterpolatingSpline,
    outline_spline: InterpolatingSpline,
    foil: ThicknessFoil,
}

impl ProfileSet {
    /// Fit the rocker and outline splines through their key points and sample
    /// all three profiles at `resolution` evenly spaced stations.
    pub fn synthesize(dims: &HullDimensions, resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(HullError::InvalidParameter(format!(
                "profile resolution must be at least 2, got {resolution}"
            )));
        }
        let length = dims.length;

        let rocker_spline = InterpolatingSpline::fit(
            &[0.0, length / 2.0, length],
            &[dims.tail_rocker, 0.0, dims.nose_rocker],
            2,
        )?;

        let half_width = dims.half_width();
        let outline_spline = InterpolatingSpline::fit(
            &[
                0.0,
                OUTLINE_SHOULDER,
                dims.wide_point_x(),
                length - OUTLINE_SHOULDER,
                length,
            ],
            &[
                TAIL_TIP_HALF_WIDTH,
                TAIL_SHOULDER_RATIO * half_width,
                half_width,
                NOSE_SHOULDER_RATIO * half_width,
                NOSE_TIP_HALF_WIDTH,
            ],
            3,
        )?;

        let stations = linspace(0.0, length, resolution);
        let rocker = rocker_spline.sample(&stations);
        let outline: Vec<f64> = outline_spline
            .sample(&stations)
            .into_iter()
            .map(|w| w.max(0.0))
            .collect();

        Ok(Self {
            stations,
            rocker,
            outline,
            rocker_spline,
            outline_spline,
            foil: ThicknessFoil::new(length, dims.thickness, dims.thick_point_offset),
        })
    }

    pub fn length(&self) -> f64 {
        self.stations[self.stations.len() - 1]
    }

    pub fn resolution(&self) -> usize {
        self.stations.len()
    }

    pub fn stations(&self) -> &[f64] {
        &self.stations
    }

    /// Sampled rocker heights, one per station.
    pub fn rocker(&self) -> &[f64] {
        &self.rocker
    }

    /// Sampled outline half-widths, one per station, never negative.
    pub fn outline(&self) -> &[f64] {
        &self.outline
    }

    pub fn rocker_spline(&self) -> &InterpolatingSpline {
        &self.rocker_spline
    }

    pub fn outline_spline(&self) -> &InterpolatingSpline {
        &self.outline_spline
    }

    pub fn foil(&self) -> &ThicknessFoil {
        &self.foil
    }

    /// Rocker height at `x` by linear interpolation between samples.
    pub fn rocker_at(&self, x: f64) -> f64 {
        interp(x, &self.stations, &self.rocker)
    }

    /// Outline half-width at `x` by linear interpolation between samples.
    pub fn half_width_at(&self, x: f64) -> f64 {
        interp(x, &self.stations, &self.outline)
    }

    pub fn thickness_at(&self, x: f64) -> f64 {
        self.foil.at(x)
    }

    /// Sampled rocker as `(x, height)` points.
    pub fn rocker_points(&self) -> Vec<Point2> {
        zip_points(&self.stations, &self.rocker)
    }

    /// Sampled outline as `(x, half_width)` points.
    pub fn outline_points(&self) -> Vec<Point2> {
        zip_points(&self.stations, &self.outline)
    }

    /// Thickness sampled at the profile stations as `(x, thickness)` points.
    pub fn thickness_points(&self) -> Vec<Point2> {
        self.stations
            .iter()
            .map(|&x| Point2::new(x, self.foil.at(x)))
            .collect()
    }
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<Point2> {
    xs.iter().zip(ys).map(|(&x, &y)| Point2::new(x, y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn profiles(dims: HullDimensions) -> ProfileSet {
        ProfileSet::synthesize(&dims, DEFAULT_RESOLUTION).unwrap()
    }

    #[test]
    fn test_rocker_passes_through_key_points() {
        let dims = HullDimensions::default();
        let p = profiles(dims);
        assert_eq!(p.resolution(), 100);
        assert_abs_diff_eq!(p.rocker()[0], dims.tail_rocker, epsilon = 1e-9);
        assert_abs_diff_eq!(p.rocker()[99], dims.nose_rocker, epsilon = 1e-9);
        assert_abs_diff_eq!(p.rocker_at(0.0), dims.tail_rocker, epsilon = 1e-9);
        assert_abs_diff_eq!(p.rocker_at(dims.length), dims.nose_rocker, epsilon = 1e-9);
        assert_abs_diff_eq!(p.rocker_spline().evaluate(dims.length / 2.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outline_passes_through_key_points() {
        let dims = HullDimensions::default();
        let p = profiles(dims);
        let spline = p.outline_spline();
        assert_abs_diff_eq!(spline.evaluate(0.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(spline.evaluate(12.0), 0.6 * 10.5, epsilon = 1e-9);
        assert_abs_diff_eq!(spline.evaluate(42.0), 10.5, epsilon = 1e-9);
        assert_abs_diff_eq!(spline.evaluate(72.0), 0.4 * 10.5, epsilon = 1e-9);
        assert_abs_diff_eq!(spline.evaluate(84.0), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_outline_never_negative() {
        for &offset in &[-0.2, -0.1, 0.0, 0.1, 0.2] {
            for &length in &[48.0, 72.0, 84.0, 108.0] {
                let dims = HullDimensions {
                    length,
                    wide_point_offset: offset,
                    ..HullDimensions::default()
                };
                let p = profiles(dims);
                assert!(p.outline().iter().all(|&w| w >= 0.0));
                for k in 0..=200 {
                    let x = length * k as f64 / 200.0;
                    assert!(p.half_width_at(x) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_wide_point_offset_moves_outline_peak_tailward() {
        let centered = profiles(HullDimensions::default());
        let shifted = profiles(HullDimensions {
            wide_point_offset: 0.15,
            ..HullDimensions::default()
        });
        let peak = |p: &ProfileSet| {
            p.outline_points()
                .into_iter()
                .fold(Point2::new(0.0, f64::MIN), |best, q| if q.y > best.y { q } else { best })
                .x
        };
        assert!(peak(&shifted) < peak(&centered));
    }

    #[test]
    fn test_thickness_foil_baseline_is_sine() {
        let dims = HullDimensions::default();
        let p = profiles(dims);
        for k in 0..=20 {
            let x = dims.length * k as f64 / 20.0;
            let expected = dims.thickness * (PI * x / dims.length).sin();
            assert_abs_diff_eq!(p.thickness_at(x), expected, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(p.thickness_at(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.thickness_at(dims.length), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.foil().apex_x(), dims.length / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_thickness_apex_offset_shifts_apex() {
        let foil = ThicknessFoil::new(84.0, 2.75, 0.1);
        assert_abs_diff_eq!(foil.apex_x(), 0.4 * 84.0, epsilon = 1e-9);
        assert_abs_diff_eq!(foil.at(foil.apex_x()), 2.75, epsilon = 1e-9);
        assert_abs_diff_eq!(foil.at(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(foil.at(84.0), 0.0, epsilon = 1e-12);
        assert!(foil.at(30.0) > foil.at(54.0));
    }

    #[test]
    fn test_resolution_must_be_at_least_two() {
        let err = ProfileSet::synthesize(&HullDimensions::default(), 1).unwrap_err();
        assert!(matches!(err, HullError::InvalidParameter(_)));
    }
}
