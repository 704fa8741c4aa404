//! Rib cross-sections.
//!
//! A rib is an ellipse-like contour sized by the local outline half-width and
//! local thickness. It is an approximation: real hull sections are not
//! ellipses, but callers only see a closed polygon and do not depend on the
//! shape.

use std::f64::consts::TAU;

use hull_core::{HullError, Result};
use hull_math::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::design::HullDesign;

/// Number of points on every rib contour.
pub const RIB_POINT_COUNT: usize = 60;

/// A closed transverse section at one station.
///
/// Points are `(width, height)` relative to the rib centre, ordered by angle
/// from `0` (first point on the positive width axis); the closing edge back to
/// the first point is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibPolygon {
    station: f64,
    baseline: f64,
    half_width: f64,
    thickness: f64,
    points: Vec<Point2>,
}

impl RibPolygon {
    /// Build the elliptical contour for the given size.
    pub fn ellipse(station: f64, baseline: f64, half_width: f64, thickness: f64) -> Self {
        let half_thickness = thickness / 2.0;
        let points = (0..RIB_POINT_COUNT)
            .map(|i| {
                let theta = TAU * i as f64 / RIB_POINT_COUNT as f64;
                Point2::new(half_width * theta.cos(), half_thickness * theta.sin())
            })
            .collect();
        Self {
            station,
            baseline,
            half_width,
            thickness,
            points,
        }
    }

    /// A rib with an arbitrary contour; its size is taken from the point
    /// extents.
    pub fn from_points(station: f64, baseline: f64, points: Vec<Point2>) -> Self {
        let (mut half_width, mut min_h, mut max_h) = (0.0_f64, 0.0_f64, 0.0_f64);
        for p in &points {
            half_width = half_width.max(p.x.abs());
            min_h = min_h.min(p.y);
            max_h = max_h.max(p.y);
        }
        Self {
            station,
            baseline,
            half_width,
            thickness: max_h - min_h,
            points,
        }
    }

    /// Distance from the tail.
    pub fn station(&self) -> f64 {
        self.station
    }

    /// Rocker height at this station.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area, `pi * a * b`.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.half_width * self.thickness / 2.0
    }

    /// Place the rib in hull space: `x` along the length, `y` across the
    /// width, `z` up, lifted by the rocker baseline.
    pub fn to_3d(&self) -> Vec<Point3> {
        self.points
            .iter()
            .map(|p| Point3::new(self.station, p.x, self.baseline + p.y))
            .collect()
    }
}

/// Cross-section of `design` at `station` inches from the tail.
///
/// Stations outside `[0, length]` are clamped to the nearest tip.
pub fn cross_section_at(design: &HullDesign, station: f64) -> Result<RibPolygon> {
    if !station.is_finite() {
        return Err(HullError::InvalidParameter(format!(
            "station must be finite, got {station}"
        )));
    }
    let length = design.length();
    let x = station.clamp(0.0, length);
    if x != station {
        tracing::debug!(station, clamped = x, "station outside hull length");
    }

    let profiles = design.profiles();
    Ok(RibPolygon::ellipse(
        x,
        profiles.rocker_at(x),
        profiles.half_width_at(x),
        profiles.thickness_at(x),
    ))
}
