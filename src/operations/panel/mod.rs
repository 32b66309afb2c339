mod side_panel;
mod top_panel;

pub use side_panel::BuildSidePanel;
pub use top_panel::BuildTopPanel;

use crate::config::ShelfConfig;
use crate::geometry::Cuboid;
use crate::math::Point3;

/// Shared coordinate frame for one panel laid flat at an x offset.
///
/// Every panel piece spans the full material thickness in y. All x positions
/// of unit boundaries and tooth edges come from the two methods below, so
/// abutting pieces always share bit-identical coordinates.
struct PanelFrame<'a> {
    config: &'a ShelfConfig,
    offset: f64,
}

impl<'a> PanelFrame<'a> {
    fn new(config: &'a ShelfConfig, offset: f64) -> Self {
        Self { config, offset }
    }

    /// Leading x of depth unit `unit`; `unit_start(n)` is the panel's far end.
    fn unit_start(&self, unit: u32) -> f64 {
        self.offset + f64::from(unit) * self.config.unit_depth()
    }

    /// x of the `k`-th tooth boundary in `unit`, counted from the leading foot.
    ///
    /// Even boundaries open a top-panel tooth, odd ones close it.
    fn tooth_edge(&self, unit: u32, k: u32) -> f64 {
        self.unit_start(unit)
            + self.config.foot_depth()
            + f64::from(k) * self.config.tooth_depth()
    }

    /// A full-thickness box covering `[x0, x1] × [z0, z1]`.
    fn slab(&self, x0: f64, x1: f64, z0: f64, z1: f64) -> Cuboid {
        let t = self.config.material_thickness();
        Cuboid::new(Point3::new(x0, 0.0, z0), Point3::new(x1, t, z1))
    }

    /// A zero-height box at `z`, used to emit a single floor or ceiling quad.
    fn flat(&self, x0: f64, x1: f64, z: f64) -> Cuboid {
        self.slab(x0, x1, z, z)
    }
}
