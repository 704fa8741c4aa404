use std::f64::consts::PI;

use hull_core::units::cubic_inches_to_litres;
use serde::{Deserialize, Serialize};

use crate::design::HullDesign;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub cubic_inches: f64,
    pub litres: f64,
}

/// Integrate the elliptical rib area `pi * a * b` along the length with the
/// trapezoid rule over the design's profile stations.
pub fn estimate_volume(design: &HullDesign) -> VolumeEstimate {
    let profiles = design.profiles();
    let areas: Vec<(f64, f64)> = profiles
        .stations()
        .iter()
        .zip(profiles.outline())
        .map(|(&x, &half_width)| (x, PI * half_width * profiles.thickness_at(x) / 2.0))
        .collect();

    let cubic_inches = areas
        .windows(2)
        .map(|w| 0.5 * (w[0].1 + w[1].1) * (w[1].0 - w[0].0))
        .sum();

    tracing::debug!(name = design.name(), cubic_inches, "estimated volume");
    VolumeEstimate {
        cubic_inches,
        litres: cubic_inches_to_litres(cubic_inches),
    }
}
