use crate::config::{require_units, ShelfConfig};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::operations::panel::{BuildSidePanel, BuildTopPanel};

/// The three panels of one shelf, each a separate closed solid.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfPanels {
    pub side_a: Mesh,
    pub side_b: Mesh,
    pub top: Mesh,
}

impl ShelfPanels {
    /// Panels in emission order: side A, side B, top.
    #[must_use]
    pub fn named(&self) -> [(&'static str, &Mesh); 3] {
        [
            ("side A", &self.side_a),
            ("side B", &self.side_b),
            ("top", &self.top),
        ]
    }

    /// Triangles across all three panels.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.side_a.len() + self.side_b.len() + self.top.len()
    }

    /// Concatenates the panels into one mesh in emission order.
    #[must_use]
    pub fn into_mesh(self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.triangle_count());
        mesh.append(self.side_a);
        mesh.append(self.side_b);
        mesh.append(self.top);
        mesh
    }
}

/// Lays the two side panels and the top panel of one shelf side by side
/// along x, each separated by one material thickness.
pub struct AssembleShelf<'a> {
    config: &'a ShelfConfig,
    offset: f64,
    width: u32,
    height: u32,
    depth: u32,
}

impl<'a> AssembleShelf<'a> {
    /// Creates a new `AssembleShelf` operation.
    #[must_use]
    pub fn new(config: &'a ShelfConfig, offset: f64, width: u32, height: u32, depth: u32) -> Self {
        Self {
            config,
            offset,
            width,
            height,
            depth,
        }
    }

    fn panel_depth(&self) -> f64 {
        f64::from(self.depth) * self.config.unit_depth()
    }

    /// x offsets of side A, side B and the top panel.
    #[must_use]
    pub fn panel_offsets(&self) -> [f64; 3] {
        let step = self.panel_depth() + self.config.material_thickness();
        [self.offset, self.offset + step, self.offset + 2.0 * step]
    }

    /// x extent covered by the shelf, from side A's leading edge to the top
    /// panel's far end.
    #[must_use]
    pub fn footprint(&self) -> f64 {
        2.0 * (self.panel_depth() + self.config.material_thickness()) + self.panel_depth()
    }

    /// Checks the configuration and every unit count without building.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if the
    /// configuration is invalid or any unit count is zero.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        require_units("width", self.width)?;
        require_units("height", self.height)?;
        require_units("depth", self.depth)?;
        Ok(())
    }

    /// Builds the three panels separately.
    ///
    /// Everything is validated first, so a bad width fails before either
    /// side panel is built.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn build_panels(&self) -> Result<ShelfPanels> {
        self.validate()?;
        let [a, b, top] = self.panel_offsets();
        Ok(ShelfPanels {
            side_a: BuildSidePanel::new(self.config, a, self.height, self.depth).execute()?,
            side_b: BuildSidePanel::new(self.config, b, self.height, self.depth).execute()?,
            top: BuildTopPanel::new(self.config, top, self.width, self.depth).execute()?,
        })
    }

    /// Builds the shelf as one mesh: side A, side B, then the top panel.
    ///
    /// # Errors
    ///
    /// See [`build_panels`](Self::build_panels).
    pub fn execute(&self) -> Result<Mesh> {
        Ok(self.build_panels()?.into_mesh())
    }
}
