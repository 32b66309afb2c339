use std::collections::HashMap;

use crate::math::{Point3, TOLERANCE};
use crate::mesh::Mesh;

/// Grid spacing used to identify coincident vertices.
const QUANTUM: f64 = 1e-6;

type VertexKey = [i64; 3];

/// Outcome of an [`IsWatertight`] query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatertightReport {
    /// Distinct undirected edge segments after T-junction splitting.
    pub segments: usize,
    /// Segments used by fewer than two triangles (holes).
    pub open: usize,
    /// Segments used by more than two triangles (duplicate or internal faces).
    pub overshared: usize,
    /// Segments used twice in the same direction (inverted neighbours).
    pub misoriented: usize,
}

impl WatertightReport {
    /// Returns `true` if every segment is shared by exactly two consistently
    /// oriented triangles.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open == 0 && self.overshared == 0 && self.misoriented == 0
    }
}

/// Checks that a mesh encloses a volume without holes or duplicate faces.
///
/// Every triangle edge is first split at each mesh vertex lying on it, so a
/// long edge meeting several shorter ones (a T-junction) is matched piecewise.
/// Each resulting segment must then be traversed exactly once in each
/// direction. This only reports; it never modifies the mesh.
///
/// Panel meshes rely on this splitting: they are closed but not
/// edge-conforming, so stricter slicer checks may still flag T-junctions.
pub struct IsWatertight<'a> {
    mesh: &'a Mesh,
}

impl<'a> IsWatertight<'a> {
    /// Creates a new `IsWatertight` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the check.
    #[must_use]
    pub fn execute(&self) -> WatertightReport {
        let mut ids: HashMap<VertexKey, usize> = HashMap::new();
        let mut points: Vec<Point3> = Vec::new();
        let mut corners: Vec<[usize; 3]> = Vec::with_capacity(self.mesh.len());

        for triangle in self.mesh {
            corners.push(triangle.vertices().map(|p| {
                *ids.entry(key(&p)).or_insert_with(|| {
                    points.push(p);
                    points.len() - 1
                })
            }));
        }

        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for [a, b, c] in corners {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                let chain = split_edge(&points, from, to);
                for pair in chain.windows(2) {
                    *directed.entry((pair[0], pair[1])).or_default() += 1;
                }
            }
        }

        let mut report = WatertightReport::default();
        for (&(from, to), &forward) in &directed {
            let backward = directed.get(&(to, from)).copied().unwrap_or(0);
            // Visit each undirected segment once.
            if backward > 0 && to < from {
                continue;
            }
            report.segments += 1;
            match forward + backward {
                0 | 1 => report.open += 1,
                2 if forward == 1 => {}
                2 => report.misoriented += 1,
                _ => report.overshared += 1,
            }
        }
        report
    }
}

#[allow(clippy::cast_possible_truncation)]
fn key(p: &Point3) -> VertexKey {
    p.coords.map(|c| (c / QUANTUM).round() as i64).into()
}

/// Vertex ids along the edge `from → to`, including every mesh vertex lying
/// strictly inside it, ordered from `from`.
fn split_edge(points: &[Point3], from: usize, to: usize) -> Vec<usize> {
    let a = points[from];
    let dir = points[to] - a;
    let len_sq = dir.norm_squared();
    if len_sq <= TOLERANCE * TOLERANCE {
        return vec![from, to];
    }
    let len = len_sq.sqrt();

    let mut inner: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != from && i != to)
        .filter_map(|(i, p)| {
            let offset = p - a;
            let s = offset.dot(&dir) / len_sq;
            let off_line = offset.cross(&dir).norm() / len;
            (s > 0.0 && s < 1.0 && off_line < QUANTUM).then_some((s, i))
        })
        .collect();
    inner.sort_by(|x, y| x.0.total_cmp(&y.0));

    let mut chain = Vec::with_capacity(inner.len() + 2);
    chain.push(from);
    chain.extend(inner.into_iter().map(|(_, i)| i));
    chain.push(to);
    chain
}
