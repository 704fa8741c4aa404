//! Single-pass reader turning `.brd` text into a [`LegacyDesign`].

use std::path::Path;

use hull_core::{HullError, Result};
use hull_design::{HullDesign, HullDimensions, ImportedCurves};
use hull_math::Point2;
use serde::{Deserialize, Serialize};

use crate::lexer::{classify, parse_numbers, Line};

// ---------------------------------------------------------------------------
// Property codes
// ---------------------------------------------------------------------------

pub const CODE_NAME: u32 = 8;
pub const CODE_OUTLINE: u32 = 32;
pub const CODE_BOTTOM: u32 = 33;
pub const CODE_DECK: u32 = 34;

/// Point list that control-point lines currently append to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Outline,
    Bottom,
    Deck,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Name and control-point centres read from a legacy file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyDesign {
    pub name: String,
    pub outline_points: Vec<Point2>,
    pub bottom_points: Vec<Point2>,
    pub deck_points: Vec<Point2>,
}

impl Default for LegacyDesign {
    fn default() -> Self {
        Self {
            name: "Imported Board".to_string(),
            outline_points: Vec::new(),
            bottom_points: Vec::new(),
            deck_points: Vec::new(),
        }
    }
}

/// Overall size implied by the imported point lists; zero where a list is
/// missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDimensions {
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
}

impl LegacyDesign {
    fn list_mut(&mut self, target: Target) -> &mut Vec<Point2> {
        match target {
            Target::Outline => &mut self.outline_points,
            Target::Bottom => &mut self.bottom_points,
            Target::Deck => &mut self.deck_points,
        }
    }

    /// Length from the outline's `x` extent, width as twice its largest
    /// half-width, thickness from the highest deck point down to the lowest
    /// bottom point.
    pub fn dimensions(&self) -> LegacyDimensions {
        let length = extent(&self.outline_points, |p| p.x).map_or(0.0, |(lo, hi)| hi - lo);
        let width = extent(&self.outline_points, |p| p.y.abs()).map_or(0.0, |(_, hi)| 2.0 * hi);
        let thickness = match (
            extent(&self.deck_points, |p| p.y),
            extent(&self.bottom_points, |p| p.y),
        ) {
            (Some((_, top)), Some((bottom, _))) => (top - bottom).max(0.0),
            _ => 0.0,
        };
        LegacyDimensions {
            length,
            width,
            thickness,
        }
    }

    /// Build a [`HullDesign`] carrying the imported point lists. Coordinates
    /// are taken as inches. Dimensions the file does not determine come from
    /// `fallback`.
    pub fn into_design(self, fallback: HullDimensions) -> Result<HullDesign> {
        let found = self.dimensions();
        let pick = |v: f64, default: f64| if v > 0.0 { v } else { default };
        let dimensions = HullDimensions {
            length: pick(found.length, fallback.length),
            width: pick(found.width, fallback.width),
            thickness: pick(found.thickness, fallback.thickness),
            ..fallback
        };
        let imported = ImportedCurves {
            outline: self.outline_points,
            bottom: self.bottom_points,
            deck: self.deck_points,
        };
        Ok(HullDesign::new(self.name, dimensions)?.with_imported(imported))
    }
}

/// `(min, max)` of `f` over `points`.
fn extent(points: &[Point2], f: impl Fn(&Point2) -> f64) -> Option<(f64, f64)> {
    points.iter().map(f).fold(None, |acc, v| {
        Some(acc.map_or((v, v), |(lo, hi): (f64, f64)| (lo.min(v), hi.max(v))))
    })
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse legacy design text top to bottom in one pass.
///
/// Unknown property codes are skipped. Control points that appear before any
/// outline/bottom/deck property are dropped.
pub fn parse_str(input: &str) -> Result<LegacyDesign> {
    let mut design = LegacyDesign::default();
    let mut target: Option<Target> = None;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        match classify(line_no, raw)? {
            Line::Blank | Line::Other => {}
            Line::Property { code, value } => match code {
                CODE_NAME => design.name = value.to_string(),
                CODE_OUTLINE => target = Some(Target::Outline),
                CODE_BOTTOM => target = Some(Target::Bottom),
                CODE_DECK => target = Some(Target::Deck),
                _ => tracing::debug!(line = line_no, code, "skipping unknown property"),
            },
            Line::ControlPoint { values } => {
                let Some(target) = target else {
                    tracing::warn!(line = line_no, "control point before any point list, dropped");
                    continue;
                };
                let numbers = parse_numbers(line_no, raw, values)?;
                let [x, y, ..] = numbers.as_slice() else {
                    return Err(HullError::parse(
                        line_no,
                        raw.trim(),
                        format!("control point needs at least 2 numbers, got {}", numbers.len()),
                    ));
                };
                design.list_mut(target).push(Point2::new(*x, *y));
            }
        }
    }

    tracing::debug!(
        name = %design.name,
        outline = design.outline_points.len(),
        bottom = design.bottom_points.len(),
        deck = design.deck_points.len(),
        "parsed legacy design"
    );
    Ok(design)
}

/// Read and parse a legacy design file.
pub fn read_brd(path: impl AsRef<Path>) -> Result<LegacyDesign> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let design = parse_str(&text)?;
    tracing::info!(path = %path.display(), name = %design.name, "read legacy design");
    Ok(design)
}
