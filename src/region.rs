use std::sync::Arc;

use bevy::prelude::*;

use crate::{field::VectorField, grid::SampleGrid, quiver::QuiverOptions, types::Value};

/// A vector field over a rectangular region, ready for sampling and display.
///
/// Spawn one of these and the plugin samples the field on the region's grid
/// and draws the result as an arrow plot at the entity's transform.
///
/// `field` is wrapped in an [`Arc`] so the async sampling task can hold a
/// reference to it without copying.
#[derive(Component)]
#[require(Transform)]
pub struct FieldRegion {
    /// The field to sample.
    pub field: Arc<VectorField>,
    /// Where and how densely to sample it.
    pub grid: SampleGrid,
    /// How to draw the sampled vectors.
    pub options: QuiverOptions,
}

impl FieldRegion {
    /// Creates a region sampling `field` over `grid`, with default display
    /// options.
    pub fn new(field: VectorField, grid: SampleGrid) -> Self {
        Self::from_shared(Arc::new(field), grid)
    }

    /// Creates a region from an already shared field.
    ///
    /// Use this to plot one field over several regions without rebuilding it:
    ///
    /// ```rust,ignore
    /// let field = Arc::new(VectorField::helix());
    ///
    /// commands.spawn(FieldRegion::from_shared(Arc::clone(&field), coarse_grid));
    /// commands.spawn((
    ///     FieldRegion::from_shared(field, fine_grid),
    ///     Transform::from_xyz(20., 0., 0.),
    /// ));
    /// ```
    pub fn from_shared(field: Arc<VectorField>, grid: SampleGrid) -> Self {
        Self {
            field,
            grid,
            options: QuiverOptions::default(),
        }
    }

    /// Replaces the display options wholesale.
    pub fn with_options(mut self, options: QuiverOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the arrow display length scale.
    pub fn with_arrow_length(mut self, length: Value) -> Self {
        self.options.length = length;
        self
    }

    /// Sets whether arrows are drawn at a fixed display length or scaled by
    /// the local field magnitude.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.options.normalize = normalize;
        self
    }

    /// Sets the magnitude color ramp endpoints.
    pub fn with_colors(mut self, low: Srgba, high: Srgba) -> Self {
        self.options.color_low = low;
        self.options.color_high = high;
        self
    }
}
