use crate::error::ConfigError;

/// Material and rack-unit dimensions shared by every panel of a run.
///
/// All lengths are millimeters. The tooth geometry is derived from these
/// values on demand and never stored, so it cannot drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfConfig {
    material_thickness: f64,
    unit_depth: f64,
    unit_width: f64,
    unit_height: f64,
    foot_depth: f64,
    top_tooth_count: u32,
}

impl Default for ShelfConfig {
    /// Half-inch stock, 6" deep units, half of a 19" rack per width unit and
    /// 1U per height unit.
    fn default() -> Self {
        let material_thickness = 12.7;
        Self {
            material_thickness,
            unit_depth: 152.4,
            unit_width: (482.6 + 2.0 * material_thickness) / 2.0,
            unit_height: 44.45,
            foot_depth: 25.4,
            top_tooth_count: 4,
        }
    }
}

impl ShelfConfig {
    /// Returns a copy with a different material thickness.
    #[must_use]
    pub fn with_material_thickness(mut self, value: f64) -> Self {
        self.material_thickness = value;
        self
    }

    /// Returns a copy with a different unit depth.
    #[must_use]
    pub fn with_unit_depth(mut self, value: f64) -> Self {
        self.unit_depth = value;
        self
    }

    /// Returns a copy with a different unit width.
    #[must_use]
    pub fn with_unit_width(mut self, value: f64) -> Self {
        self.unit_width = value;
        self
    }

    /// Returns a copy with a different unit height.
    #[must_use]
    pub fn with_unit_height(mut self, value: f64) -> Self {
        self.unit_height = value;
        self
    }

    /// Returns a copy with a different foot depth.
    #[must_use]
    pub fn with_foot_depth(mut self, value: f64) -> Self {
        self.foot_depth = value;
        self
    }

    /// Returns a copy with a different number of teeth on the top panel.
    #[must_use]
    pub fn with_top_tooth_count(mut self, value: u32) -> Self {
        self.top_tooth_count = value;
        self
    }

    #[must_use]
    pub fn material_thickness(&self) -> f64 {
        self.material_thickness
    }

    #[must_use]
    pub fn unit_depth(&self) -> f64 {
        self.unit_depth
    }

    #[must_use]
    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    #[must_use]
    pub fn unit_height(&self) -> f64 {
        self.unit_height
    }

    #[must_use]
    pub fn foot_depth(&self) -> f64 {
        self.foot_depth
    }

    #[must_use]
    pub fn top_tooth_count(&self) -> u32 {
        self.top_tooth_count
    }

    /// Teeth along the top edge of a side panel: one fewer than the top panel.
    #[must_use]
    pub fn side_tooth_count(&self) -> u32 {
        self.top_tooth_count.saturating_sub(1)
    }

    /// Teeth of both panels interleaved across one unit depth.
    #[must_use]
    pub fn total_tooth_count(&self) -> u32 {
        self.top_tooth_count + self.side_tooth_count()
    }

    /// Depth of a single tooth (and of a single notch).
    #[must_use]
    pub fn tooth_depth(&self) -> f64 {
        (self.unit_depth - 2.0 * self.foot_depth) / f64::from(self.total_tooth_count())
    }

    /// Checks that the configuration yields sane geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any length is non-positive, if the material
    /// is at least half as thick as a unit dimension, if there are no teeth, or
    /// if the two feet leave no room for teeth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (parameter, value) in [
            ("material thickness", self.material_thickness),
            ("unit depth", self.unit_depth),
            ("unit width", self.unit_width),
            ("unit height", self.unit_height),
            ("foot depth", self.foot_depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { parameter, value });
            }
        }

        for (dimension, extent) in [
            ("unit depth", self.unit_depth),
            ("unit height", self.unit_height),
            ("unit width", self.unit_width),
        ] {
            let limit = extent / 2.0;
            if self.material_thickness >= limit {
                return Err(ConfigError::ThicknessTooLarge {
                    dimension,
                    thickness: self.material_thickness,
                    limit,
                });
            }
        }

        if self.top_tooth_count == 0 {
            return Err(ConfigError::NoTeeth);
        }

        if 2.0 * self.foot_depth >= self.unit_depth {
            return Err(ConfigError::FeetTooLong {
                foot_depth: self.foot_depth,
                unit_depth: self.unit_depth,
            });
        }

        Ok(())
    }
}

/// Rejects a rack-unit count of zero.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroUnits`] naming `parameter` when `units` is 0.
pub fn require_units(parameter: &'static str, units: u32) -> Result<(), ConfigError> {
    if units == 0 {
        Err(ConfigError::ZeroUnits { parameter })
    } else {
        Ok(())
    }
}
