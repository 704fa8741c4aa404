//! Binary STL export.
//!
//! Layout: 80-byte header, `u32` little-endian triangle count, then one
//! 50-byte record per triangle (normal, three vertices, all `f32` LE, and a
//! `u16` attribute count that is always zero).

use std::path::Path;

use hull_core::{write_atomic, HullError, Result};
use hull_math::Point3;

use crate::mesh::{facet_normal, TriangleMesh};

pub const HEADER_LEN: usize = 80;
pub const RECORD_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlOptions {
    /// Identifier written at the start of the header, truncated to 80 bytes
    /// and padded with NULs.
    pub header: String,
    /// Write facet normals; otherwise every normal is zero, which readers
    /// take as "recompute from the vertices".
    pub compute_normals: bool,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            header: "hullcad binary STL export".to_string(),
            compute_normals: false,
        }
    }
}

/// Size in bytes of a binary STL holding `triangles` facets.
pub fn stl_size(triangles: usize) -> usize {
    HEADER_LEN + 4 + RECORD_LEN * triangles
}

/// Encode `mesh` as binary STL.
pub fn to_stl_bytes(mesh: &TriangleMesh, options: &StlOptions) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(HullError::InsufficientGeometry(
            "cannot export an empty mesh".into(),
        ));
    }
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        HullError::InvalidParameter(format!(
            "{} triangles exceed the STL count field",
            mesh.triangle_count()
        ))
    })?;

    let mut data = Vec::with_capacity(stl_size(mesh.triangle_count()));

    let mut header = [0u8; HEADER_LEN];
    let id = options.header.as_bytes();
    let n = id.len().min(HEADER_LEN);
    header[..n].copy_from_slice(&id[..n]);
    data.extend_from_slice(&header);
    data.extend_from_slice(&count.to_le_bytes());

    for tri in mesh.triangles() {
        let normal = if options.compute_normals {
            facet_normal(tri)
        } else {
            Point3::ZERO
        };
        for v in std::iter::once(normal).chain(tri) {
            data.extend_from_slice(&(v.x as f32).to_le_bytes());
            data.extend_from_slice(&(v.y as f32).to_le_bytes());
            data.extend_from_slice(&(v.z as f32).to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(data)
}

/// Write `mesh` to `path` as binary STL. The file only appears once fully
/// written.
pub fn write_stl(mesh: &TriangleMesh, options: &StlOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_stl_bytes(mesh, options)?;
    write_atomic(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        bytes = bytes.len(),
        "wrote STL"
    );
    Ok(())
}
