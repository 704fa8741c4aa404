use std::path::Path;

use hull_core::{write_atomic, Result};
use serde::{Deserialize, Serialize};

/// Decimal places for coordinates unless overridden.
const DEFAULT_PRECISION: usize = 3;

/// Axis words of a move; `None` leaves that axis where it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl Axes {
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub fn z(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    fn words(&self, precision: usize) -> String {
        [('X', self.x), ('Y', self.y), ('Z', self.z)]
            .into_iter()
            .filter_map(|(axis, v)| v.map(|v| format!("{axis}{}", format_coord(v, precision))))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One instruction of a machine program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// `G00` travel at machine speed.
    Rapid(Axes),
    /// `G01` cut; the feed word is only written when given.
    Linear { to: Axes, feed: Option<f64> },
    /// `G01` straight down to `z` at `feed`.
    Plunge { z: f64, feed: f64 },
    /// `M30`
    End,
}

impl Motion {
    fn to_line(self, precision: usize) -> String {
        match self {
            Motion::Rapid(to) => format!("G00 {}", to.words(precision)),
            Motion::Linear { to, feed: None } => format!("G01 {}", to.words(precision)),
            Motion::Linear { to, feed: Some(f) } => {
                format!("G01 {} F{f:.0}", to.words(precision))
            }
            Motion::Plunge { z, feed } => {
                format!("G01 Z{} F{feed:.0} (Plunge)", format_coord(z, precision))
            }
            Motion::End => "M30 (End of program)".to_string(),
        }
    }
}

/// Format a coordinate with a fixed number of decimals.
pub fn format_coord(value: f64, precision: usize) -> String {
    let s = format!("{:.prec$}", value, prec = precision);
    // Avoid "-0.000"
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// An ordered, immutable motion list with its G-code rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolpathProgram {
    motions: Vec<Motion>,
    precision: usize,
}

impl ToolpathProgram {
    pub fn new(motions: Vec<Motion>) -> Self {
        Self {
            motions,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// Render as newline-joined G-code: program start, absolute millimetre
    /// mode, then one line per motion.
    pub fn to_gcode(&self) -> String {
        let mut lines = Vec::with_capacity(self.motions.len() + 2);
        lines.push("%".to_string());
        lines.push("G90 G21 (Absolute positioning, Millimeters)".to_string());
        lines.extend(self.motions.iter().map(|m| m.to_line(self.precision)));
        lines.join("\n")
    }

    /// Write the G-code to `path`; the file only appears once complete.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let gcode = self.to_gcode();
        write_atomic(path, gcode.as_bytes())?;
        tracing::info!(path = %path.display(), motions = self.motions.len(), "wrote toolpath");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(1.0, 3), "1.000");
        assert_eq!(format_coord(-0.5, 2), "-0.50");
        assert_eq!(format_coord(-0.0001, 3), "0.000");
        assert_eq!(format_coord(300.0, 1), "300.0");
    }

    #[test]
    fn test_motion_lines() {
        assert_eq!(Motion::Rapid(Axes::z(50.0)).to_line(1), "G00 Z50.0");
        assert_eq!(Motion::Rapid(Axes::xy(0.0, 12.5)).to_line(3), "G00 X0.000 Y12.500");
        assert_eq!(
            Motion::Linear { to: Axes::xyz(1.0, 2.0, -3.0), feed: Some(900.0) }.to_line(1),
            "G01 X1.0 Y2.0 Z-3.0 F900"
        );
        assert_eq!(
            Motion::Plunge { z: -5.0, feed: 1200.0 }.to_line(1),
            "G01 Z-5.0 F1200 (Plunge)"
        );
        assert_eq!(Motion::End.to_line(3), "M30 (End of program)");
    }

    #[test]
    fn test_program_header_and_file() {
        let program = ToolpathProgram::new(vec![Motion::Rapid(Axes::z(50.0)), Motion::End]);
        assert_eq!(
            program.to_gcode(),
            "%\nG90 G21 (Absolute positioning, Millimeters)\nG00 Z50.000\nM30 (End of program)"
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.nc");
        program.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), program.to_gcode());
    }
}
