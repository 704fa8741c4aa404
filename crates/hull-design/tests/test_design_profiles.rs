// Integration tests for design ingestion, profiles, and rib sections

use approx::assert_abs_diff_eq;
use hull_design::*;

fn design_from(json: &str) -> HullDesign {
    HullDesign::from_json_str(json).unwrap()
}

#[test]
fn integration_rocker_hits_tail_and_nose() {
    let design = design_from(r#"{"length": 7.2, "width": 21.5, "nose_rocker": 4.5, "tail_rocker": 2.5}"#);
    let profiles = design.profiles();
    let length = design.length();

    assert_abs_diff_eq!(length, 86.4, epsilon = 1e-12);
    assert_abs_diff_eq!(profiles.rocker_at(0.0), 2.5, epsilon = 1e-9);
    assert_abs_diff_eq!(profiles.rocker_at(length), 4.5, epsilon = 1e-9);
    assert_abs_diff_eq!(profiles.rocker_spline().evaluate(length / 2.0), 0.0, epsilon = 1e-9);
}

#[test]
fn integration_outline_non_negative_for_all_offsets() {
    for offset in [-20, -10, 0, 10, 20] {
        let design = design_from(&format!(r#"{{"length": 5.0, "width": 22.0, "widthOffset": {offset}}}"#));
        let profiles = design.profiles();
        assert!(profiles.outline().iter().all(|&w| w >= 0.0), "offset {offset}");
        let steps = 500;
        for k in 0..=steps {
            let x = design.length() * k as f64 / steps as f64;
            assert!(profiles.half_width_at(x) >= 0.0);
        }
    }
}

#[test]
fn integration_ribs_along_hull() {
    let design = design_from("{}");
    let mut station = 12.0;
    while station < design.length() {
        let rib = cross_section_at(&design, station).unwrap();
        assert_eq!(rib.points().len(), RIB_POINT_COUNT);
        assert_abs_diff_eq!(rib.half_width(), design.profiles().half_width_at(station), epsilon = 1e-12);

        // Symmetric about the width axis with a centred apex.
        let pts = rib.points();
        for i in 1..RIB_POINT_COUNT {
            assert_abs_diff_eq!(pts[i].y, -pts[RIB_POINT_COUNT - i].y, epsilon = 1e-12);
        }
        station += 12.0;
    }
}

#[test]
fn integration_skewed_foil_moves_thickest_rib() {
    let design = design_from(r#"{"thicknessOffset": 10}"#);
    let apex = design.profiles().foil().apex_x();
    assert!(apex < design.length() / 2.0);

    let at_apex = cross_section_at(&design, apex).unwrap();
    assert_abs_diff_eq!(at_apex.thickness(), 2.75, epsilon = 1e-9);
    assert!(cross_section_at(&design, design.length() / 2.0).unwrap().thickness() < 2.75);
}

#[test]
fn integration_out_of_range_offset_is_rejected() {
    let err = HullDesign::from_json_str(r#"{"widthOffset": 35}"#).unwrap_err();
    assert!(matches!(err, hull_core::HullError::InvalidParameter(_)));
}

#[test]
fn integration_rib_svg_files() {
    let dir = tempfile::tempdir().unwrap();
    let design = design_from("{}");
    for station in [12, 24, 36, 48, 60, 72] {
        let rib = cross_section_at(&design, station as f64).unwrap();
        let path = dir.path().join(format!("rib_station_{station}.svg"));
        write_rib_svg(&rib, &SvgOptions::default(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<svg "));
        assert!(text.ends_with("</svg>"));
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 6);
}
