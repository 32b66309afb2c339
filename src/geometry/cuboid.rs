use crate::math::{Point3, Vector3};
use crate::mesh::{Mesh, Triangle};

use super::{FaceDirection, FaceSet};

/// An axis-aligned box defined by two opposite corners.
///
/// The corners play fixed, asymmetric roles: `p1` is expected to be below
/// `p2` on every axis. Swapping them turns every face inside out; nothing
/// sorts the components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    p1: Point3,
    p2: Point3,
}

impl Cuboid {
    /// Creates a box spanning from `p1` to `p2`.
    #[must_use]
    pub fn new(p1: Point3, p2: Point3) -> Self {
        Self { p1, p2 }
    }

    /// The eight corners.
    ///
    /// Corner `i` takes its x from `p2` when bit 0 of `i` is set, y when bit 1
    /// is set and z when bit 2 is set; otherwise from `p1`.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.p1, self.p2);
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }

    /// Appends the requested faces to `mesh`, two triangles per face.
    ///
    /// Faces are emitted in [`FaceDirection::ALL`] order regardless of the
    /// order in which the set was built. Degenerate boxes are accepted and
    /// produce zero-area triangles on their collapsed faces.
    pub fn emit(&self, faces: FaceSet, mesh: &mut Mesh) {
        let corners = self.corners();
        for direction in faces.iter() {
            let [a, b, c, d] = face_corners(direction).map(|i| corners[i]);
            mesh.extend(split_quad(a, b, c, d, direction.normal()));
        }
    }
}

/// Corner indices `(a, b, c, d)` of the quad facing `direction`.
///
/// `b - a` and `c - a` span the face with `(b - a) × (c - a)` pointing along
/// the outward normal, so the quad is counter-clockwise seen from outside.
#[must_use]
pub const fn face_corners(direction: FaceDirection) -> [usize; 4] {
    match direction {
        FaceDirection::PosZ => [4, 5, 6, 7],
        FaceDirection::PosX => [1, 3, 5, 7],
        FaceDirection::NegZ => [0, 2, 1, 3],
        FaceDirection::NegX => [0, 4, 2, 6],
        FaceDirection::PosY => [2, 6, 3, 7],
        FaceDirection::NegY => [0, 1, 4, 5],
    }
}

/// Splits quad `(a, b, c, d)` into `(a, b, c)` and `(c, b, d)`.
///
/// The diagonal is always `b`–`c`. Both triangles share the quad's normal.
#[must_use]
pub fn split_quad(a: Point3, b: Point3, c: Point3, d: Point3, normal: Vector3) -> [Triangle; 2] {
    [Triangle::new(a, b, c, normal), Triangle::new(c, b, d, normal)]
}
