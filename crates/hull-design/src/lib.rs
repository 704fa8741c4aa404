//! Hull design: parameters, the three defining profiles, and rib cross-sections.
//!
//! A [`HullDesign`] is an immutable snapshot. Its rocker, outline and
//! thickness profiles are synthesized once at construction; changing a
//! parameter means building a new design.

pub mod design;
pub mod profile;
pub mod section;
pub mod svg;
pub mod volume;

pub use design::{DesignParameters, HullDesign, HullDimensions, ImportedCurves, LengthUnit};
pub use profile::{ProfileSet, ThicknessFoil, DEFAULT_RESOLUTION};
pub use section::{cross_section_at, RibPolygon, RIB_POINT_COUNT};
pub use svg::{rib_svg, write_rib_svg, SvgOptions};
pub use volume::{estimate_volume, VolumeEstimate};
