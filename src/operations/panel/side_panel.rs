use tracing::debug;

use crate::config::{require_units, ShelfConfig};
use crate::error::Result;
use crate::geometry::{series_caps, FaceSet};
use crate::mesh::Mesh;

use super::PanelFrame;

/// Builds one side panel: a body standing on two feet per depth unit, with
/// teeth along its top edge that slot into the top panel's notches.
///
/// Layout in the panel plane (x = depth, z = height, `T` = thickness):
///
/// ```text
/// z = H+T      ┌┐  ┌┐  ┌┐             teeth
/// z = H   ─────┘└──┘└──┘└─────        notch floors
///         │     body          │
/// z = 2T  │- - - - - - - - - -│
///         │     base strip    │
/// z = T   ├──┬─────────────┬──┤       clearance ceiling
/// z = 0   └──┘             └──┘       feet
/// ```
///
/// The body's broad faces run the full depth in one quad while the notch
/// floors and teeth above them are split per tooth, so the output has
/// T-junctions along `z = H` (and likewise at the feet). The mesh is closed,
/// as [`IsWatertight`](crate::operations::query::IsWatertight) confirms, but
/// a checker that requires every edge to be shared by exactly two triangles
/// will report those edges as open.
pub struct BuildSidePanel<'a> {
    config: &'a ShelfConfig,
    offset: f64,
    height: u32,
    depth: u32,
}

impl<'a> BuildSidePanel<'a> {
    /// Creates a new `BuildSidePanel` operation.
    #[must_use]
    pub fn new(config: &'a ShelfConfig, offset: f64, height: u32, depth: u32) -> Self {
        Self {
            config,
            offset,
            height,
            depth,
        }
    }

    /// Executes the build, returning the panel's triangles.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if the
    /// configuration is invalid or either unit count is zero. Nothing is
    /// emitted in that case.
    pub fn execute(&self) -> Result<Mesh> {
        self.config.validate()?;
        require_units("height", self.height)?;
        require_units("depth", self.depth)?;

        let frame = PanelFrame::new(self.config, self.offset);
        let t = self.config.material_thickness();
        let top = f64::from(self.height) * self.config.unit_height();
        let start = frame.unit_start(0);
        let end = frame.unit_start(self.depth);
        let mut mesh = Mesh::new();

        // Top and bottom of the body and strip are partly covered by teeth
        // and feet, so they are left to the pieces that touch them.
        frame
            .slab(start, end, 2.0 * t, top)
            .emit(FaceSet::LATERAL | FaceSet::ENDS, &mut mesh);
        frame
            .slab(start, end, t, 2.0 * t)
            .emit(FaceSet::LATERAL | FaceSet::ENDS, &mut mesh);

        for unit in 0..self.depth {
            self.emit_feet(&frame, unit, &mut mesh);
        }
        for unit in 0..self.depth {
            self.emit_top_edge(&frame, unit, top, &mut mesh);
        }

        debug!(
            offset = self.offset,
            height = self.height,
            depth = self.depth,
            triangles = mesh.len(),
            "built side panel"
        );
        Ok(mesh)
    }

    /// Two feet and the ceiling of the clearance between them.
    fn emit_feet(&self, frame: &PanelFrame<'_>, unit: u32, mesh: &mut Mesh) {
        let t = self.config.material_thickness();
        let foot = self.config.foot_depth();
        let lo = frame.unit_start(unit);
        let hi = frame.unit_start(unit + 1);

        // Each foot caps the side facing the clearance. The side facing the
        // neighbouring unit is only exposed at the ends of the panel.
        let leading = FaceSet::LATERAL
            | FaceSet::NEG_Z
            | FaceSet::POS_X
            | series_caps(unit, self.depth, FaceSet::NEG_X, FaceSet::empty());
        let trailing = FaceSet::LATERAL
            | FaceSet::NEG_Z
            | FaceSet::NEG_X
            | series_caps(unit, self.depth, FaceSet::empty(), FaceSet::POS_X);

        frame.slab(lo, lo + foot, 0.0, t).emit(leading, mesh);
        frame.slab(hi - foot, hi, 0.0, t).emit(trailing, mesh);
        frame.flat(lo + foot, hi - foot, t).emit(FaceSet::NEG_Z, mesh);
    }

    /// Alternating notch floors and teeth along the top edge of one unit.
    ///
    /// There is one notch per top-panel tooth and a side tooth between each
    /// pair of notches. The first floor runs back over the leading foot and
    /// the last one forward over the trailing foot, and no tooth follows the
    /// last notch.
    fn emit_top_edge(&self, frame: &PanelFrame<'_>, unit: u32, top: f64, mesh: &mut Mesh) {
        let t = self.config.material_thickness();
        let notches = self.config.top_tooth_count();

        for j in 0..notches {
            let last = j + 1 == notches;
            let floor_start = if j == 0 {
                frame.unit_start(unit)
            } else {
                frame.tooth_edge(unit, 2 * j)
            };
            let floor_end = if last {
                frame.unit_start(unit + 1)
            } else {
                frame.tooth_edge(unit, 2 * j + 1)
            };
            frame.flat(floor_start, floor_end, top).emit(FaceSet::POS_Z, mesh);

            if !last {
                frame
                    .slab(
                        frame.tooth_edge(unit, 2 * j + 1),
                        frame.tooth_edge(unit, 2 * j + 2),
                        top,
                        top + t,
                    )
                    .emit(FaceSet::LATERAL | FaceSet::ENDS | FaceSet::POS_Z, mesh);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ShelfError};
    use crate::math::Vector3;
    use crate::operations::query::{BoundingBox, IsWatertight};
    use approx::assert_abs_diff_eq;

    fn build(offset: f64, height: u32, depth: u32) -> Mesh {
        BuildSidePanel::new(&ShelfConfig::default(), offset, height, depth)
            .execute()
            .unwrap()
    }

    /// Sorted, deduplicated x coordinates of the downward faces at `z = 0`.
    fn foot_bottom_xs(mesh: &Mesh) -> Vec<f64> {
        let mut xs: Vec<f64> = mesh
            .iter()
            .filter(|t| t.normal() == -Vector3::z())
            .filter(|t| t.vertices().iter().all(|v| v.z == 0.0))
            .flat_map(|t| t.vertices().iter().map(|v| v.x))
            .collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        xs
    }

    // ── Watertightness ─────────────────────────────────────────

    #[test]
    fn panels_are_watertight_across_sizes() {
        for height in 1..=4 {
            for depth in 1..=3 {
                let mesh = build(0.0, height, depth);
                let report = IsWatertight::new(&mesh).execute();
                assert!(report.is_watertight(), "h={height} d={depth}: {report:?}");
            }
        }
    }

    #[test]
    fn watertight_for_other_tooth_counts() {
        for teeth in 1..=6 {
            let config = ShelfConfig::default().with_top_tooth_count(teeth);
            let mesh = BuildSidePanel::new(&config, 40.0, 2, 2).execute().unwrap();
            let report = IsWatertight::new(&mesh).execute();
            assert!(report.is_watertight(), "teeth={teeth}: {report:?}");
        }
    }

    #[test]
    fn closure_relies_on_t_junctions() {
        // Matching whole edges only, without splitting, leaves unmatched edges.
        let mesh = build(0.0, 1, 1);
        let key = |p: &crate::math::Point3| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        let edges: std::collections::HashSet<_> = mesh
            .iter()
            .flat_map(|t| {
                let [a, b, c] = t.vertices().map(|v| key(&v));
                [(a, b), (b, c), (c, a)]
            })
            .collect();
        assert!(edges.iter().any(|(a, b)| !edges.contains(&(*b, *a))));
        assert!(IsWatertight::new(&mesh).execute().is_watertight());
    }

    // ── Geometry ───────────────────────────────────────────────

    #[test]
    fn feet_sit_at_unit_ends() {
        let xs = foot_bottom_xs(&build(0.0, 1, 1));
        let expected = [0.0, 25.4, 127.0, 152.4];
        assert_eq!(xs.len(), expected.len(), "{xs:?}");
        for (x, e) in xs.iter().zip(expected) {
            assert_abs_diff_eq!(*x, e, epsilon = 1e-9);
        }
    }

    #[test]
    fn bounds_cover_depth_and_teeth() {
        let config = ShelfConfig::default();
        let mesh = build(10.0, 3, 2);
        let aabb = BoundingBox::new(&mesh).execute().unwrap();
        assert_abs_diff_eq!(aabb.min.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(aabb.max.x, 10.0 + 2.0 * 152.4, epsilon = 1e-9);
        assert_abs_diff_eq!(aabb.min.y, 0.0);
        assert_abs_diff_eq!(aabb.max.y, config.material_thickness());
        assert_abs_diff_eq!(aabb.min.z, 0.0);
        assert_abs_diff_eq!(aabb.max.z, 3.0 * 44.45 + 12.7, epsilon = 1e-9);
    }

    #[test]
    fn single_unit_triangle_count() {
        // body 8, strip 8, feet 10 + 10, ceiling 2, floors 4 × 2, teeth 3 × 10
        assert_eq!(build(0.0, 1, 1).len(), 76);
    }

    #[test]
    fn tooth_tops_match_side_tooth_count() {
        let config = ShelfConfig::default();
        let mesh = build(0.0, 2, 3);
        let top = 2.0 * config.unit_height() + config.material_thickness();
        let tooth_top_quads = mesh
            .iter()
            .filter(|t| t.normal() == Vector3::z())
            .filter(|t| t.vertices().iter().all(|v| (v.z - top).abs() < 1e-9))
            .count()
            / 2;
        assert_eq!(tooth_top_quads, 3 * config.side_tooth_count() as usize);
    }

    // ── Validation ─────────────────────────────────────────────

    #[test]
    fn zero_depth_is_rejected() {
        let err = BuildSidePanel::new(&ShelfConfig::default(), 0.0, 1, 0)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            ShelfError::Config(ConfigError::ZeroUnits { parameter: "depth" })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ShelfConfig::default().with_material_thickness(30.0);
        let result = BuildSidePanel::new(&config, 0.0, 1, 1).execute();
        assert!(matches!(
            result,
            Err(ShelfError::Config(ConfigError::ThicknessTooLarge { .. }))
        ));
    }
}
