use hull_core::units::inches_to_mm;
use hull_core::{HullError, Result, Validate};
use hull_math::Point2;

use crate::program::{Axes, Motion, ToolpathProgram};
use crate::CamSettings;

/// Profile cut that follows an outline at a single depth.
///
/// Points are cut in the given order with no cutter-radius compensation; the
/// radius is kept for reporting only.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineCut {
    settings: CamSettings,
    cutter_radius: f64,
}

impl OutlineCut {
    pub fn new(settings: CamSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            cutter_radius: settings.cutter_radius(),
            settings,
        })
    }

    pub fn cutter_radius(&self) -> f64 {
        self.cutter_radius
    }

    pub fn settings(&self) -> &CamSettings {
        &self.settings
    }

    /// Build the program for `outline`, given in millimetres.
    pub fn generate(&self, outline: &[Point2]) -> Result<ToolpathProgram> {
        let Some((start, rest)) = outline.split_first() else {
            return Err(HullError::InsufficientGeometry(
                "outline cut needs at least one point".into(),
            ));
        };
        let s = &self.settings;

        let mut motions = Vec::with_capacity(outline.len() + 4);
        motions.push(Motion::Rapid(Axes::z(s.safe_height)));
        motions.push(Motion::Rapid(Axes::xy(start.x, start.y)));
        motions.push(Motion::Plunge {
            z: s.cut_depth,
            feed: s.feed_rate,
        });
        motions.extend(rest.iter().map(|p| Motion::Linear {
            to: Axes::xy(p.x, p.y),
            feed: None,
        }));
        motions.push(Motion::Rapid(Axes::z(s.safe_height)));
        motions.push(Motion::End);

        tracing::debug!(
            points = outline.len(),
            cutter_radius = self.cutter_radius,
            "generated outline cut"
        );
        Ok(ToolpathProgram::new(motions))
    }
}

/// Closed plan-view loop in millimetres from `(x, half_width)` samples in
/// inches: out along one rail, back along the mirrored rail, and closed on
/// the first point.
pub fn plan_outline_mm(half_outline: &[Point2]) -> Vec<Point2> {
    let to_mm = |x: f64, y: f64| Point2::new(inches_to_mm(x), inches_to_mm(y));
    let mut points: Vec<Point2> = half_outline.iter().map(|p| to_mm(p.x, p.y)).collect();
    points.extend(half_outline.iter().rev().map(|p| to_mm(p.x, -p.y)));
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut() -> OutlineCut {
        OutlineCut::new(CamSettings::default()).unwrap()
    }

    #[test]
    fn test_outline_program() {
        let outline = [
            Point2::new(0.0, 0.0),
            Point2::new(300.0, 25.0),
            Point2::new(600.0, 0.0),
        ];
        let gcode = cut().generate(&outline).unwrap().to_gcode();
        let lines: Vec<&str> = gcode.lines().collect();
        assert_eq!(
            lines,
            vec![
                "%",
                "G90 G21 (Absolute positioning, Millimeters)",
                "G00 Z50.000",
                "G00 X0.000 Y0.000",
                "G01 Z-5.000 F1200 (Plunge)",
                "G01 X300.000 Y25.000",
                "G01 X600.000 Y0.000",
                "G00 Z50.000",
                "M30 (End of program)",
            ]
        );
    }

    #[test]
    fn test_single_point_outline() {
        let program = cut().generate(&[Point2::new(5.0, 5.0)]).unwrap();
        assert_eq!(program.len(), 5);
        assert_eq!(program.motions()[4], Motion::End);
    }

    #[test]
    fn test_empty_outline_is_error() {
        let err = cut().generate(&[]).unwrap_err();
        assert!(matches!(err, HullError::InsufficientGeometry(_)));
    }

    #[test]
    fn test_radius_is_stored_not_applied() {
        let settings = CamSettings {
            cutter_diameter: 20.0,
            ..CamSettings::default()
        };
        let wide = OutlineCut::new(settings).unwrap();
        assert_eq!(wide.cutter_radius(), 10.0);
        let outline = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        assert_eq!(
            wide.generate(&outline).unwrap().motions(),
            cut().generate(&outline).unwrap().motions()
        );
    }

    #[test]
    fn test_plan_outline_loop() {
        let half = [Point2::new(0.0, 1.0), Point2::new(10.0, 5.0), Point2::new(20.0, 0.5)];
        let loop_mm = plan_outline_mm(&half);
        assert_eq!(loop_mm.len(), 7);
        assert_eq!(loop_mm[0], loop_mm[6]);
        assert!((loop_mm[1].y - 127.0).abs() < 1e-9);
        assert!((loop_mm[4].y + 127.0).abs() < 1e-9);
        assert!(plan_outline_mm(&[]).is_empty());
    }
}
