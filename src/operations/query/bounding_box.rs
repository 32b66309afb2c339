use crate::math::{Point3, TOLERANCE};
use crate::mesh::Mesh;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Returns `true` if the two boxes share any depth (x) range of positive
    /// length. Boxes that merely touch do not overlap.
    #[must_use]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x - TOLERANCE && other.min.x < self.max.x - TOLERANCE
    }
}

/// Computes the axis-aligned bounding box of a mesh.
pub struct BoundingBox<'a> {
    mesh: &'a Mesh,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the AABB, or `None` for an empty mesh.
    #[must_use]
    pub fn execute(&self) -> Option<Aabb> {
        let mut points = self.mesh.iter().flat_map(|t| t.vertices().iter());
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(p), max.sup(p)));
        Some(Aabb { min, max })
    }
}
