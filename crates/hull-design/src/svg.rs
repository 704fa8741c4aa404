//! SVG templates for cutting ribs.

use std::path::Path;

use hull_core::{write_atomic, Result};
use serde::{Deserialize, Serialize};

use crate::section::RibPolygon;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Drawing options for [`rib_svg`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// `min-x min-y width height`, in inches.
    pub view_box: [f64; 4],
    pub stroke_width: f64,
    pub centerline_stroke_width: f64,
    /// Centerline marker runs from `-centerline_half_length` to
    /// `+centerline_half_length`.
    pub centerline_half_length: f64,
    /// Decimal places for path coordinates.
    pub precision: usize,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            view_box: [-20.0, -10.0, 40.0, 20.0],
            stroke_width: 0.05,
            centerline_stroke_width: 0.02,
            centerline_half_length: 5.0,
            precision: 4,
        }
    }
}

impl SvgOptions {
    /// Options whose view box encloses `rib` with `margin` inches to spare.
    pub fn fitted(rib: &RibPolygon, margin: f64) -> Self {
        let half_w = rib.half_width() + margin;
        let half_h = rib.thickness() / 2.0 + margin;
        Self {
            view_box: [-half_w, -half_h, 2.0 * half_w, 2.0 * half_h],
            centerline_half_length: half_h,
            ..Self::default()
        }
    }
}

/// Render `rib` as a minimal SVG document: one closed cut path and a
/// centerline marker.
pub fn rib_svg(rib: &RibPolygon, options: &SvgOptions) -> String {
    let precision = options.precision;
    let path = rib
        .points()
        .iter()
        .map(|p| format!("{:.*},{:.*}", precision, p.x, precision, p.y))
        .collect::<Vec<_>>()
        .join(" L ");
    let path = format!("M {path} Z");

    let [min_x, min_y, width, height] = options.view_box;
    let half = options.centerline_half_length;
    [
        format!(r#"<svg viewBox="{min_x} {min_y} {width} {height}" xmlns="{SVG_NAMESPACE}">"#),
        format!(
            r#"<path d="{path}" fill="none" stroke="black" stroke-width="{}" />"#,
            options.stroke_width
        ),
        format!(
            r#"<line x1="0" y1="{}" x2="0" y2="{half}" stroke="red" stroke-width="{}" />"#,
            -half, options.centerline_stroke_width
        ),
        "</svg>".to_string(),
    ]
    .join("\n")
}

/// Write the SVG for `rib` to `path`.
pub fn write_rib_svg(rib: &RibPolygon, options: &SvgOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_atomic(path, rib_svg(rib, options).as_bytes())?;
    tracing::info!(path = %path.display(), station = rib.station(), "wrote rib template");
    Ok(())
}
