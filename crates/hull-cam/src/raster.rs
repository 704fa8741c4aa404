use hull_core::units::{inches_to_mm, MM_PER_INCH};
use hull_core::{HullError, Result, Validate};
use hull_design::HullDesign;
use hull_math::{linspace, Point3};

use crate::program::{Axes, Motion, ToolpathProgram};
use crate::CamSettings;

/// Upper bound on cross-width passes in one raster.
pub const MAX_RASTER_PASSES: usize = 100_000;

/// Zig-zag surfacing of the deck.
///
/// Passes run across the width at stations `stepover` apart along the length,
/// alternating direction. Heights follow the elliptical rib top and are
/// measured down from the highest deck point, so every cutting Z is `<= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckRaster {
    settings: CamSettings,
    samples_per_pass: usize,
}

impl DeckRaster {
    pub fn new(settings: CamSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            samples_per_pass: 25,
        })
    }

    /// Number of points on each cross-width pass, at least 2.
    pub fn with_samples_per_pass(mut self, samples: usize) -> Self {
        self.samples_per_pass = samples.max(2);
        self
    }

    /// Cutter positions in millimetres, pass by pass.
    pub fn passes(&self, design: &HullDesign) -> Result<Vec<Vec<Point3>>> {
        let length_mm = inches_to_mm(design.length());
        let steps = (length_mm / self.settings.stepover).ceil();
        if !steps.is_finite() || steps >= MAX_RASTER_PASSES as f64 {
            return Err(HullError::InvalidParameter(format!(
                "stepover {} mm needs more than {MAX_RASTER_PASSES} passes over {length_mm:.1} mm",
                self.settings.stepover
            )));
        }
        let pass_count = steps as usize + 1;
        if pass_count < 2 {
            return Err(HullError::InsufficientGeometry(format!(
                "hull of {length_mm:.1} mm is too short to raster"
            )));
        }
        let profiles = design.profiles();

        let mut passes: Vec<Vec<Point3>> = linspace(0.0, length_mm, pass_count)
            .into_iter()
            .enumerate()
            .map(|(i, x_mm)| {
                let x = x_mm / MM_PER_INCH;
                let half_width = profiles.half_width_at(x);
                let top = profiles.rocker_at(x);
                let half_thickness = profiles.thickness_at(x) / 2.0;
                let mut ys = linspace(-half_width, half_width, self.samples_per_pass);
                if i % 2 == 1 {
                    ys.reverse();
                }
                ys.into_iter()
                    .map(|y| {
                        let u = if half_width > 0.0 { y / half_width } else { 0.0 };
                        let z = top + half_thickness * (1.0 - u * u).max(0.0).sqrt();
                        Point3::new(x_mm, inches_to_mm(y), inches_to_mm(z))
                    })
                    .collect()
            })
            .collect();

        let highest = passes
            .iter()
            .flatten()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max);
        for p in passes.iter_mut().flatten() {
            p.z -= highest;
        }
        Ok(passes)
    }

    pub fn generate(&self, design: &HullDesign) -> Result<ToolpathProgram> {
        let passes = self.passes(design)?;
        let s = &self.settings;
        let mut points = passes.iter().flatten();
        let Some(first) = points.next() else {
            return Err(HullError::InsufficientGeometry("deck raster is empty".into()));
        };

        let mut motions = Vec::with_capacity(passes.len() * self.samples_per_pass + 5);
        motions.push(Motion::Rapid(Axes::z(s.safe_height)));
        motions.push(Motion::Rapid(Axes::xy(first.x, first.y)));
        motions.push(Motion::Plunge {
            z: first.z,
            feed: s.feed_rate,
        });
        motions.extend(points.map(|p| Motion::Linear {
            to: Axes::xyz(p.x, p.y, p.z),
            feed: None,
        }));
        motions.push(Motion::Rapid(Axes::z(s.safe_height)));
        motions.push(Motion::End);

        tracing::debug!(
            name = design.name(),
            passes = passes.len(),
            stepover = s.stepover,
            "generated deck raster"
        );
        Ok(ToolpathProgram::new(motions))
    }
}
