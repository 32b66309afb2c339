use tracing::info;

use crate::config::{require_units, ShelfConfig};
use crate::error::Result;
use crate::mesh::Mesh;

use super::{AssembleShelf, ShelfPanels};

/// Places several identical shelves in a row along x.
///
/// Each shelf starts `footprint + spacing` after the previous one. Spacing
/// defaults to one material thickness.
pub struct ShelfLayout<'a> {
    config: &'a ShelfConfig,
    origin: f64,
    count: u32,
    spacing: f64,
    width: u32,
    height: u32,
    depth: u32,
}

impl<'a> ShelfLayout<'a> {
    /// Creates a new `ShelfLayout` operation.
    #[must_use]
    pub fn new(
        config: &'a ShelfConfig,
        origin: f64,
        count: u32,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Self {
        Self {
            config,
            origin,
            count,
            spacing: config.material_thickness(),
            width,
            height,
            depth,
        }
    }

    /// Sets the gap between consecutive shelves.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    fn shelf(&self, offset: f64) -> AssembleShelf<'a> {
        AssembleShelf::new(self.config, offset, self.width, self.height, self.depth)
    }

    /// Leading x offset of each shelf in placement order.
    #[must_use]
    pub fn offsets(&self) -> Vec<f64> {
        let stride = self.shelf(self.origin).footprint() + self.spacing;
        (0..self.count)
            .map(|i| self.origin + f64::from(i) * stride)
            .collect()
    }

    /// Builds every shelf, keeping the panels separate.
    ///
    /// The count, unit counts and configuration are all checked before the
    /// first panel is built.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if the count or
    /// any unit count is zero, or if the configuration is invalid.
    pub fn build_panels(&self) -> Result<Vec<ShelfPanels>> {
        require_units("count", self.count)?;
        self.shelf(self.origin).validate()?;

        let shelves = self
            .offsets()
            .into_iter()
            .map(|offset| self.shelf(offset).build_panels())
            .collect::<Result<Vec<_>>>()?;

        info!(
            count = self.count,
            width = self.width,
            height = self.height,
            depth = self.depth,
            triangles = shelves.iter().map(ShelfPanels::triangle_count).sum::<usize>(),
            "laid out shelves"
        );
        Ok(shelves)
    }

    /// Concatenates built shelves into one mesh, keeping their order.
    #[must_use]
    pub fn concatenate(shelves: Vec<ShelfPanels>) -> Mesh {
        let mut mesh = Mesh::new();
        for panels in shelves {
            mesh.append(panels.into_mesh());
        }
        mesh
    }

    /// Builds every shelf into one mesh in placement order.
    ///
    /// # Errors
    ///
    /// See [`build_panels`](Self::build_panels).
    pub fn execute(&self) -> Result<Mesh> {
        Ok(Self::concatenate(self.build_panels()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ShelfError};
    use crate::operations::assembly::test_support::captured_log;
    use crate::operations::query::BoundingBox;
    use approx::assert_abs_diff_eq;

    #[test]
    fn offsets_advance_by_footprint_and_spacing() {
        let config = ShelfConfig::default();
        let offsets = ShelfLayout::new(&config, 10.0, 3, 1, 6, 1).offsets();
        assert_eq!(offsets.len(), 3);
        assert_abs_diff_eq!(offsets[0], 10.0);
        assert_abs_diff_eq!(offsets[1], 10.0 + 482.6 + 12.7, epsilon = 1e-9);
        assert_abs_diff_eq!(offsets[2], 10.0 + 2.0 * (482.6 + 12.7), epsilon = 1e-9);
    }

    #[test]
    fn custom_spacing() {
        let config = ShelfConfig::default();
        let offsets = ShelfLayout::new(&config, 0.0, 2, 1, 1, 1)
            .with_spacing(0.0)
            .offsets();
        assert_abs_diff_eq!(offsets[1], 482.6, epsilon = 1e-9);
    }

    #[test]
    fn shelves_do_not_overlap() {
        let config = ShelfConfig::default();
        let shelves = ShelfLayout::new(&config, 0.0, 3, 1, 2, 1)
            .build_panels()
            .unwrap();
        let bounds: Vec<_> = shelves
            .into_iter()
            .map(|panels| BoundingBox::new(&panels.into_mesh()).execute().unwrap())
            .collect();
        for pair in bounds.windows(2) {
            assert!(!pair[0].overlaps_x(&pair[1]));
            assert!(pair[0].max.x < pair[1].min.x);
        }
    }

    #[test]
    fn mesh_holds_every_shelf() {
        let config = ShelfConfig::default();
        let single = AssembleShelf::new(&config, 0.0, 1, 1, 1).execute().unwrap();
        let mesh = ShelfLayout::new(&config, 0.0, 4, 1, 1, 1).execute().unwrap();
        assert_eq!(mesh.len(), 4 * single.len());
    }

    #[test]
    fn zero_count_is_rejected() {
        let config = ShelfConfig::default();
        let result = ShelfLayout::new(&config, 0.0, 0, 1, 1, 1).execute();
        assert!(matches!(
            result,
            Err(ShelfError::Config(ConfigError::ZeroUnits { parameter: "count" }))
        ));
    }

    #[test]
    fn zero_width_fails_before_the_first_shelf_is_built() {
        let config = ShelfConfig::default();
        let (result, log) =
            captured_log(|| ShelfLayout::new(&config, 0.0, 3, 0, 2, 1).execute());
        assert!(matches!(
            result,
            Err(ShelfError::Config(ConfigError::ZeroUnits { parameter: "width" }))
        ));
        assert!(!log.contains("built side panel"), "{log}");
        assert!(!log.contains("laid out shelves"), "{log}");
    }

    #[test]
    fn layout_is_logged_once() {
        let config = ShelfConfig::default();
        let (result, log) = captured_log(|| ShelfLayout::new(&config, 0.0, 2, 1, 1, 1).execute());
        assert!(result.is_ok());
        assert_eq!(log.matches("laid out shelves").count(), 1);
        assert_eq!(log.matches("built side panel").count(), 4);
    }
}
