//! CNC toolpaths for hull blanks.
//!
//! Generators produce a [`ToolpathProgram`], an ordered list of motions that
//! renders to G-code. All machine output is in millimetres.
//!
//! - [`OutlineCut`]: plan-view profile cut at a fixed depth
//! - [`DeckRaster`]: zig-zag surfacing passes over the deck

mod outline;
mod program;
mod raster;

pub use outline::{plan_outline_mm, OutlineCut};
pub use program::{format_coord, Axes, Motion, ToolpathProgram};
pub use raster::{DeckRaster, MAX_RASTER_PASSES};

use hull_core::{HullError, Result, Validate};
use serde::{Deserialize, Serialize};

/// Machine settings shared by every generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CamSettings {
    /// Cutter diameter (mm). Only its radius is recorded; paths are not
    /// offset by it.
    pub cutter_diameter: f64,
    /// Feed rate for cutting and plunge moves (mm/min).
    pub feed_rate: f64,
    /// Z height for rapid travel (mm).
    pub safe_height: f64,
    /// Z depth of the outline cut (mm).
    pub cut_depth: f64,
    /// Distance between raster passes (mm).
    pub stepover: f64,
}

impl Default for CamSettings {
    fn default() -> Self {
        Self {
            cutter_diameter: 10.0,
            feed_rate: 1200.0,
            safe_height: 50.0,
            cut_depth: -5.0,
            stepover: 25.0,
        }
    }
}

impl CamSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn cutter_radius(&self) -> f64 {
        self.cutter_diameter / 2.0
    }
}

impl Validate for CamSettings {
    fn validate(&self) -> Result<()> {
        let positive = [
            ("cutter_diameter", self.cutter_diameter),
            ("feed_rate", self.feed_rate),
            ("stepover", self.stepover),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HullError::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.safe_height.is_finite() && self.cut_depth.is_finite()) {
            return Err(HullError::InvalidParameter(
                "safe_height and cut_depth must be finite".into(),
            ));
        }
        if self.safe_height <= self.cut_depth {
            return Err(HullError::InvalidParameter(format!(
                "safe height {} must be above cut depth {}",
                self.safe_height, self.cut_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = CamSettings::default();
        assert_eq!(s.cutter_radius(), 5.0);
        assert_eq!(s.feed_rate, 1200.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_settings_json() {
        let s = CamSettings::from_json_str(r#"{"cutter_diameter": 12.7, "safe_height": 30}"#).unwrap();
        assert_eq!(s.cutter_diameter, 12.7);
        assert_eq!(s.safe_height, 30.0);
        assert_eq!(s.stepover, 25.0);

        assert!(CamSettings::from_json_str(r#"{"feed_rate": 0}"#).is_err());
        assert!(CamSettings::from_json_str(r#"{"safe_height": -10}"#).is_err());
    }
}
