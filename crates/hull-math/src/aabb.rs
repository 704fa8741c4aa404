use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a hull mesh or point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, &p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }
}
