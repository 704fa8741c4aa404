//! Hull meshing: lofting rib sections into triangles and binary STL export.

pub mod loft;
pub mod mesh;
pub mod stl;

pub use loft::{loft, loft_hull, loft_with, LoftOptions};
pub use mesh::{facet_normal, TriangleMesh};
pub use stl::{stl_size, to_stl_bytes, write_stl, StlOptions};
