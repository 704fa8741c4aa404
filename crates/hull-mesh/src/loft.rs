//! Lofting rib sections into a hull surface.

use hull_core::{HullError, Result};
use hull_design::{cross_section_at, HullDesign, RibPolygon};
use hull_math::{linspace, Point3};
use rayon::prelude::*;

use crate::mesh::TriangleMesh;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoftOptions {
    /// Close the first and last rib with a triangle fan.
    pub cap_ends: bool,
}

/// Loft open-ended, see [`loft_with`].
pub fn loft(ribs: &[RibPolygon]) -> Result<TriangleMesh> {
    loft_with(ribs, &LoftOptions::default())
}

/// Triangulate the band between each pair of adjacent ribs.
///
/// Ribs are placed in hull space with [`RibPolygon::to_3d`]. Point `i` of one
/// rib is joined to point `i` of the next; each rib closes back on its first
/// point, so every pair of `k`-point ribs yields `2k` triangles wound with
/// normals facing outward.
pub fn loft_with(ribs: &[RibPolygon], options: &LoftOptions) -> Result<TriangleMesh> {
    if ribs.len() < 2 {
        return Err(HullError::InsufficientGeometry(format!(
            "lofting needs at least 2 ribs, got {}",
            ribs.len()
        )));
    }
    let k = ribs[0].len();
    if k < 3 {
        return Err(HullError::InsufficientGeometry(format!(
            "rib has {k} points, a closed section needs at least 3"
        )));
    }
    if let Some(rib) = ribs.iter().find(|r| r.len() != k) {
        return Err(HullError::InvalidParameter(format!(
            "rib at station {} has {} points, expected {k}",
            rib.station(),
            rib.len()
        )));
    }

    let bands = ribs.len() - 1;
    let caps = if options.cap_ends { 2 } else { 0 };
    let mut mesh = TriangleMesh::with_capacity(ribs.len() * k + caps, 2 * k * bands + caps * k);
    for rib in ribs {
        mesh.positions.extend(rib.to_3d());
    }

    let k32 = k as u32;
    for r in 0..bands as u32 {
        let row = r * k32;
        let next = row + k32;
        for i in 0..k32 {
            let j = (i + 1) % k32;
            let (a, b) = (row + i, row + j);
            let (c, d) = (next + i, next + j);
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(b, d, c);
        }
    }

    if options.cap_ends {
        cap(&mut mesh, 0, k32, true);
        cap(&mut mesh, bands as u32 * k32, k32, false);
    }

    tracing::debug!(
        ribs = ribs.len(),
        points_per_rib = k,
        triangles = mesh.triangle_count(),
        "lofted hull"
    );
    Ok(mesh)
}

/// Fan-triangulate the rib starting at vertex `start` around its centroid.
fn cap(mesh: &mut TriangleMesh, start: u32, k: u32, facing_tail: bool) {
    let ring = &mesh.positions[start as usize..(start + k) as usize];
    let centroid = ring.iter().fold(Point3::ZERO, |acc, &p| acc + p) / k as f64;
    let center = mesh.push_vertex(centroid);
    for i in 0..k {
        let (a, b) = (start + i, start + (i + 1) % k);
        if facing_tail {
            mesh.push_triangle(center, b, a);
        } else {
            mesh.push_triangle(center, a, b);
        }
    }
}

/// Compute ribs at `station_count` evenly spaced stations from tail to nose
/// and loft them. Ribs are computed in parallel.
pub fn loft_hull(design: &HullDesign, station_count: usize, options: &LoftOptions) -> Result<TriangleMesh> {
    if station_count < 2 {
        return Err(HullError::InsufficientGeometry(format!(
            "lofting needs at least 2 stations, got {station_count}"
        )));
    }
    let stations = linspace(0.0, design.length(), station_count);
    let ribs = stations
        .par_iter()
        .map(|&x| cross_section_at(design, x))
        .collect::<Result<Vec<_>>>()?;
    loft_with(&ribs, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::facet_normal;
    use hull_design::HullDimensions;
    use hull_math::Point2;

    fn tube(stations: &[f64]) -> Vec<RibPolygon> {
        stations
            .iter()
            .map(|&x| RibPolygon::ellipse(x, 0.0, 5.0, 4.0))
            .collect()
    }

    #[test]
    fn test_quad_split_triangle_count() {
        let ribs = tube(&[0.0, 10.0, 20.0, 30.0]);
        let mesh = loft(&ribs).unwrap();
        assert_eq!(mesh.vertex_count(), 4 * 60);
        assert_eq!(mesh.triangle_count(), 2 * 60 * 3);
    }

    #[test]
    fn test_band_connects_adjacent_ribs() {
        let mesh = loft(&tube(&[0.0, 10.0])).unwrap();
        assert_eq!(&mesh.indices[..6], &[0, 1, 60, 1, 61, 60]);
        // Wrap-around quad joins the last point back to the first.
        let n = mesh.indices.len();
        assert_eq!(&mesh.indices[n - 6..], &[59, 0, 119, 0, 60, 119]);
    }

    #[test]
    fn test_normals_face_outward() {
        let mesh = loft(&tube(&[0.0, 10.0])).unwrap();
        for tri in mesh.triangles() {
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            let radial = Point3::new(0.0, centroid.y, centroid.z);
            assert!(facet_normal(tri).dot(radial) > 0.0);
        }
    }

    #[test]
    fn test_caps() {
        let options = LoftOptions { cap_ends: true };
        let mesh = loft_with(&tube(&[0.0, 10.0]), &options).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * 60 + 2);
        assert_eq!(mesh.triangle_count(), 2 * 60 + 2 * 60);

        let tail_cap = mesh.triangles().nth(120).unwrap();
        assert!(facet_normal(tail_cap).x < 0.0);
        let nose_cap = mesh.triangles().last().unwrap();
        assert!(facet_normal(nose_cap).x > 0.0);
    }

    #[test]
    fn test_mismatched_ribs() {
        let ribs = tube(&[0.0, 10.0]);
        assert!(matches!(
            loft(&ribs[..1]),
            Err(HullError::InsufficientGeometry(_))
        ));
        assert!(loft(&[]).is_err());

        let square = RibPolygon::from_points(
            20.0,
            0.0,
            vec![
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
                Point2::new(-1.0, 0.0),
                Point2::new(0.0, -1.0),
            ],
        );
        let mixed = vec![ribs[0].clone(), ribs[1].clone(), square];
        assert!(matches!(loft(&mixed), Err(HullError::InvalidParameter(_))));
    }

    #[test]
    fn test_loft_hull_follows_rocker() {
        let design = HullDesign::new("Test", HullDimensions::default()).unwrap();
        let mesh = loft_hull(&design, 25, &LoftOptions::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 2 * 60 * 24);

        let bb = mesh.bounding_box().unwrap();
        assert_eq!(bb.min.x, 0.0);
        assert_eq!(bb.max.x, 84.0);
        // Nose tip sits on the 4 in nose rocker.
        assert!((bb.max.z - 4.0).abs() < 1e-6);
        assert!((bb.max.y + bb.min.y).abs() < 1e-9);
    }
}
