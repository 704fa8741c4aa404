//! Design parameters and the immutable [`HullDesign`] snapshot.

use std::path::Path;

use hull_core::units::feet_to_inches;
use hull_core::{HullError, Result, Validate};
use hull_math::Point2;
use serde::{Deserialize, Serialize};

use crate::profile::{ProfileSet, DEFAULT_RESOLUTION};

/// Largest allowed wide/thick point offset, as a fraction of length.
pub const MAX_POINT_OFFSET: f64 = 0.2;

/// Distance of the outline's shoulder key points from each tip, in inches.
pub const OUTLINE_SHOULDER: f64 = 12.0;

/// Unit of the `length` field in [`DesignParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Feet,
    Inches,
}

/// Flat parameter set as produced by a design front end.
///
/// `length` is in feet unless `length_unit` says otherwise; other lengths are
/// inches. Offsets are percentages in `-20..=20`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    pub name: Option<String>,
    pub length: f64,
    pub length_unit: LengthUnit,
    pub width: f64,
    pub thickness: f64,
    pub nose_rocker: f64,
    pub tail_rocker: f64,
    #[serde(rename = "widthOffset")]
    pub width_offset: f64,
    #[serde(rename = "thicknessOffset")]
    pub thickness_offset: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            name: None,
            length: 7.0,
            length_unit: LengthUnit::Feet,
            width: 21.0,
            thickness: 2.75,
            nose_rocker: 4.0,
            tail_rocker: 2.5,
            width_offset: 0.0,
            thickness_offset: 0.0,
        }
    }
}

impl DesignParameters {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalize to inches and fractional offsets. This is the only place a
    /// feet-to-inches conversion happens.
    pub fn to_dimensions(&self) -> HullDimensions {
        let length = match self.length_unit {
            LengthUnit::Feet => feet_to_inches(self.length),
            LengthUnit::Inches => self.length,
        };
        HullDimensions {
            length,
            width: self.width,
            thickness: self.thickness,
            nose_rocker: self.nose_rocker,
            tail_rocker: self.tail_rocker,
            wide_point_offset: self.width_offset / 100.0,
            thick_point_offset: self.thickness_offset / 100.0,
        }
    }

    /// Validate and synthesize a [`HullDesign`] from these parameters.
    pub fn into_design(self) -> Result<HullDesign> {
        HullDesign::from_parameters(&self)
    }
}

/// Named scalar parameters of a hull, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullDimensions {
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
    pub nose_rocker: f64,
    pub tail_rocker: f64,
    /// Shift of the wide point toward the tail, as a fraction of length.
    pub wide_point_offset: f64,
    /// Shift of the thickness apex toward the tail, as a fraction of length.
    pub thick_point_offset: f64,
}

impl HullDimensions {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Longitudinal position of the wide point.
    pub fn wide_point_x(&self) -> f64 {
        self.length / 2.0 - self.wide_point_offset * self.length
    }
}

impl Default for HullDimensions {
    fn default() -> Self {
        DesignParameters::default().to_dimensions()
    }
}

impl Validate for HullDimensions {
    fn validate(&self) -> Result<()> {
        let named = [
            ("length", self.length),
            ("width", self.width),
            ("thickness", self.thickness),
            ("nose_rocker", self.nose_rocker),
            ("tail_rocker", self.tail_rocker),
            ("wide_point_offset", self.wide_point_offset),
            ("thick_point_offset", self.thick_point_offset),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HullError::InvalidParameter(format!("{name} must be finite")));
        }
        for (name, value) in &named[..3] {
            if *value <= 0.0 {
                return Err(HullError::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in &named[5..] {
            if value.abs() > MAX_POINT_OFFSET {
                return Err(HullError::InvalidParameter(format!(
                    "{name} must be within [-{MAX_POINT_OFFSET}, {MAX_POINT_OFFSET}], got {value}"
                )));
            }
        }

        let wide_x = self.wide_point_x();
        if !(OUTLINE_SHOULDER < wide_x && wide_x < self.length - OUTLINE_SHOULDER) {
            return Err(HullError::InvalidParameter(format!(
                "length {} in is too short: wide point at {wide_x:.2} in must lie between the \
                 {OUTLINE_SHOULDER} in shoulder stations",
                self.length
            )));
        }
        Ok(())
    }
}

/// Raw point lists carried over from an imported legacy design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportedCurves {
    pub outline: Vec<Point2>,
    pub bottom: Vec<Point2>,
    pub deck: Vec<Point2>,
}

impl ImportedCurves {
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty() && self.bottom.is_empty() && self.deck.is_empty()
    }
}

/// An immutable hull design with its synthesized profiles.
#[derive(Debug, Clone)]
pub struct HullDesign {
    name: String,
    dimensions: HullDimensions,
    imported: ImportedCurves,
    profiles: ProfileSet,
}

impl HullDesign {
    pub fn new(name: impl Into<String>, dimensions: HullDimensions) -> Result<Self> {
        Self::with_resolution(name, dimensions, DEFAULT_RESOLUTION)
    }

    /// Build a design whose profiles are sampled at `resolution` stations.
    pub fn with_resolution(
        name: impl Into<String>,
        dimensions: HullDimensions,
        resolution: usize,
    ) -> Result<Self> {
        dimensions.validate()?;
        let profiles = ProfileSet::synthesize(&dimensions, resolution)?;
        let name = name.into();
        tracing::debug!(
            name = %name,
            length = dimensions.length,
            width = dimensions.width,
            resolution,
            "synthesized hull profiles"
        );
        Ok(Self {
            name,
            dimensions,
            imported: ImportedCurves::default(),
            profiles,
        })
    }

    pub fn from_parameters(params: &DesignParameters) -> Result<Self> {
        let name = params.name.clone().unwrap_or_else(|| "Untitled".to_string());
        Self::new(name, params.to_dimensions())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_parameters(&DesignParameters::from_json_str(json)?)
    }

    /// Load a design from a JSON parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let design = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), name = %design.name, "loaded design parameters");
        Ok(design)
    }

    /// Attach imported point lists, producing a new design.
    pub fn with_imported(mut self, imported: ImportedCurves) -> Self {
        self.imported = imported;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimensions(&self) -> &HullDimensions {
        &self.dimensions
    }

    pub fn length(&self) -> f64 {
        self.dimensions.length
    }

    pub fn imported(&self) -> &ImportedCurves {
        &self.imported
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    /// The plan-view outline as `(x, half_width)` points: the imported
    /// outline when one exists, otherwise the synthesized profile samples.
    pub fn outline_polyline(&self) -> Vec<Point2> {
        if self.imported.outline.is_empty() {
            self.profiles.outline_points()
        } else {
            self.imported.outline.clone()
        }
    }
}
