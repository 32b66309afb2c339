use crate::math::{Point3, Vector3};

/// A single facet: three ordered vertices and a caller-supplied normal.
///
/// The normal is stored as given and is never derived from the vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3; 3],
    normal: Vector3,
}

impl Triangle {
    /// Creates a triangle from three vertices in winding order and a normal.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3, normal: Vector3) -> Self {
        Self {
            vertices: [a, b, c],
            normal,
        }
    }

    /// The vertices in winding order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    /// The outward normal supplied at construction.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }
}

/// An ordered, append-only sequence of triangles.
///
/// Insertion order is preserved so output is deterministic, but it carries no
/// geometric meaning. There is deliberately no way to remove or edit a
/// triangle once pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `capacity` triangles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Appends one triangle.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Moves every triangle of `other` onto the end of this mesh.
    pub fn append(&mut self, mut other: Mesh) {
        self.triangles.append(&mut other.triangles);
    }

    /// All triangles in insertion order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterates over the triangles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Number of triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(z: f64) -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(0.0, 1.0, z),
            Vector3::z(),
        )
    }

    #[test]
    fn new_mesh_is_empty() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.len(), 0);
    }

    #[test]
    fn append_preserves_order() {
        let mut first = Mesh::new();
        first.push(tri(0.0));
        let mut second = Mesh::new();
        second.push(tri(1.0));
        second.push(tri(2.0));

        first.append(second);

        let zs: Vec<f64> = first.iter().map(|t| t.vertices()[0].z).collect();
        assert_eq!(zs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn normal_is_stored_verbatim() {
        // Clockwise winding with a +Z normal: nothing recomputes it.
        let t = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Vector3::z(),
        );
        assert_eq!(t.normal(), Vector3::z());
    }
}
