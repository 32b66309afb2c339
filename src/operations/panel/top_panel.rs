use tracing::debug;

use crate::config::{require_units, ShelfConfig};
use crate::error::Result;
use crate::geometry::{series_caps, FaceSet};
use crate::mesh::Mesh;

use super::PanelFrame;

/// Builds the top panel that bridges two side panels.
///
/// Along each depth unit the panel alternates tooth columns and gap columns
/// between two margins. Tooth columns carry a tab at both width edges. The
/// tabs drop into the side panels' notches, and the side panels' teeth fill
/// the gaps. Across its width the panel is cut into one band per width unit.
pub struct BuildTopPanel<'a> {
    config: &'a ShelfConfig,
    offset: f64,
    width: u32,
    depth: u32,
}

impl<'a> BuildTopPanel<'a> {
    /// Creates a new `BuildTopPanel` operation.
    #[must_use]
    pub fn new(config: &'a ShelfConfig, offset: f64, width: u32, depth: u32) -> Self {
        Self {
            config,
            offset,
            width,
            depth,
        }
    }

    /// Executes the build, returning the panel's triangles.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if the
    /// configuration is invalid or either unit count is zero.
    pub fn execute(&self) -> Result<Mesh> {
        self.config.validate()?;
        require_units("width", self.width)?;
        require_units("depth", self.depth)?;

        let frame = PanelFrame::new(self.config, self.offset);
        let mut mesh = Mesh::new();
        for unit in 0..self.depth {
            self.emit_unit(&frame, unit, &mut mesh);
        }

        debug!(
            offset = self.offset,
            width = self.width,
            depth = self.depth,
            triangles = mesh.len(),
            "built top panel"
        );
        Ok(mesh)
    }

    fn total_width(&self) -> f64 {
        f64::from(self.width) * self.config.unit_width()
    }

    /// z-extent of width band `band`, excluding the tab rows at both edges.
    fn band(&self, band: u32) -> (f64, f64) {
        let t = self.config.material_thickness();
        let unit = self.config.unit_width();
        let lo = if band == 0 { t } else { f64::from(band) * unit };
        let hi = if band + 1 == self.width {
            self.total_width() - t
        } else {
            f64::from(band + 1) * unit
        };
        (lo, hi)
    }

    /// Outward caps for a column piece in width band `band` whose ends are
    /// exposed: only the first band is open below and only the last above.
    fn band_caps(&self, band: u32) -> FaceSet {
        series_caps(band, self.width, FaceSet::NEG_Z, FaceSet::POS_Z)
    }

    fn emit_unit(&self, frame: &PanelFrame<'_>, unit: u32, mesh: &mut Mesh) {
        let t = self.config.material_thickness();
        let teeth = self.config.top_tooth_count();
        let total_width = self.total_width();

        // Tabs at both width edges, closed on every side but the one
        // joined to the rib above (or below) them.
        for j in 0..teeth {
            let (a, b) = (frame.tooth_edge(unit, 2 * j), frame.tooth_edge(unit, 2 * j + 1));
            frame
                .slab(a, b, 0.0, t)
                .emit(FaceSet::LATERAL | FaceSet::ENDS | FaceSet::NEG_Z, mesh);
            frame
                .slab(a, b, total_width - t, total_width)
                .emit(FaceSet::LATERAL | FaceSet::ENDS | FaceSet::POS_Z, mesh);
        }

        // Ribs: the tabs cap both ends of every tooth column.
        for j in 0..teeth {
            let (a, b) = (frame.tooth_edge(unit, 2 * j), frame.tooth_edge(unit, 2 * j + 1));
            for band in 0..self.width {
                let (lo, hi) = self.band(band);
                frame.slab(a, b, lo, hi).emit(FaceSet::LATERAL, mesh);
            }
        }

        // Connective body between consecutive teeth; none after the last.
        for j in 0..teeth - 1 {
            let (a, b) = (
                frame.tooth_edge(unit, 2 * j + 1),
                frame.tooth_edge(unit, 2 * j + 2),
            );
            for band in 0..self.width {
                let (lo, hi) = self.band(band);
                frame
                    .slab(a, b, lo, hi)
                    .emit(FaceSet::LATERAL | self.band_caps(band), mesh);
            }
        }

        // Margins over the side panels' feet. Only the panel's own ends get
        // an x cap; neighbouring units abut margin to margin.
        let leading_end = series_caps(unit, self.depth, FaceSet::NEG_X, FaceSet::empty());
        let trailing_end = series_caps(unit, self.depth, FaceSet::empty(), FaceSet::POS_X);
        let lead = (frame.unit_start(unit), frame.tooth_edge(unit, 0));
        let trail = (frame.tooth_edge(unit, 2 * teeth - 1), frame.unit_start(unit + 1));
        for band in 0..self.width {
            let (lo, hi) = self.band(band);
            let faces = FaceSet::LATERAL | self.band_caps(band);
            frame.slab(lead.0, lead.1, lo, hi).emit(faces | leading_end, mesh);
            frame.slab(trail.0, trail.1, lo, hi).emit(faces | trailing_end, mesh);
        }
    }
}
