use bevy::prelude::*;

use crate::{
    error::{QuiverError, Result},
    sample::SampledField,
    types::{Point, Value, Vector},
    utils::{lerp, remap},
};

/// Display options for an arrow plot.
#[derive(Debug, Clone, Copy)]
pub struct QuiverOptions {
    /// Display length scale for arrows.
    pub length: Value,
    /// When `true`, every arrow is drawn at exactly `length`; when `false`,
    /// arrow length is `length × |v|`.
    pub normalize: bool,
    /// Arrow color at the smallest sampled magnitude.
    pub color_low: Srgba,
    /// Arrow color at the largest sampled magnitude.
    pub color_high: Srgba,
}

impl Default for QuiverOptions {
    fn default() -> Self {
        Self {
            length: 2.0,
            normalize: true,
            color_low: Srgba::new(0.25, 0.41, 0.88, 1.),
            color_high: Srgba::new(1., 0.35, 0.1, 1.),
        }
    }
}

/// One arrow of a quiver plot, in render space.
#[derive(Debug, Clone, Copy)]
pub struct Arrow {
    /// Tail of the arrow: the sample position.
    pub start: Vec3,
    /// Tip of the arrow.
    pub end: Vec3,
    /// Magnitude of the field vector the arrow represents.
    pub magnitude: Value,
    /// Pre-mixed magnitude color.
    pub color: Color,
}

/// Arrow geometry for one sampled region, ready to draw.
///
/// Built once per region by the sampling task, then drawn every frame.
/// Zero and non-finite field vectors produce no arrow, so `arrows` may hold
/// fewer entries than the grid has positions.
#[derive(Component, Clone)]
pub struct QuiverGeometry {
    pub arrows: Vec<Arrow>,
}

impl QuiverGeometry {
    /// Builds arrow geometry from a sampled field.
    pub fn from_samples(samples: &SampledField, options: &QuiverOptions) -> Self {
        build_arrows(samples.iter(), options)
    }
}

/// Builds arrow geometry from parallel position and vector arrays.
///
/// This is the low-level entry point for callers that sampled a field
/// themselves. Returns [`QuiverError::MismatchedLengths`] when the arrays
/// disagree in length.
pub fn render_quiver(
    positions: &[Point],
    vectors: &[Vector],
    options: &QuiverOptions,
) -> Result<QuiverGeometry> {
    if positions.len() != vectors.len() {
        return Err(QuiverError::MismatchedLengths);
    }
    Ok(build_arrows(
        positions.iter().copied().zip(vectors.iter().copied()),
        options,
    ))
}

fn build_arrows(
    pairs: impl Iterator<Item = (Point, Vector)>,
    options: &QuiverOptions,
) -> QuiverGeometry {
    let drawable: Vec<(Point, Vector, Value)> = pairs
        .filter_map(|(pos, vec)| {
            let mag = vec.norm();
            (mag.is_finite() && mag > 0.0).then_some((pos, vec, mag))
        })
        .collect();

    let (mag_min, mag_max) = drawable
        .iter()
        .fold((Value::INFINITY, Value::NEG_INFINITY), |(lo, hi), &(_, _, mag)| {
            (lo.min(mag), hi.max(mag))
        });

    let arrows = drawable
        .into_iter()
        .map(|(pos, vec, mag)| {
            let dir = vec / mag;
            let display_len = if options.normalize {
                options.length
            } else {
                options.length * mag
            };

            let start = Vec3::new(pos.x, pos.y, pos.z);
            let end = start + Vec3::new(dir.x, dir.y, dir.z) * display_len;

            // Uniform-magnitude fields get the midpoint of the ramp.
            let t = if (mag_max - mag_min).abs() < Value::EPSILON {
                0.5
            } else {
                remap(mag, [mag_min, mag_max], [0., 1.]).clamp(0., 1.)
            };

            Arrow {
                start,
                end,
                magnitude: mag,
                color: mix_color(options.color_low, options.color_high, t),
            }
        })
        .collect();

    QuiverGeometry { arrows }
}

fn mix_color(low: Srgba, high: Srgba, t: Value) -> Color {
    Color::srgb(
        lerp(low.red, high.red, t),
        lerp(low.green, high.green, t),
        lerp(low.blue, high.blue, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{field::VectorField, grid::SampleGrid};

    #[test]
    fn normalized_arrows_share_the_display_length() {
        let grid = SampleGrid::cube(-5.0, 5.0, 2).unwrap();
        let samples = SampledField::sample(grid, &VectorField::helix());
        let options = QuiverOptions::default();

        let quiver = QuiverGeometry::from_samples(&samples, &options);
        assert_eq!(quiver.arrows.len(), 8);
        for arrow in &quiver.arrows {
            let len = (arrow.end - arrow.start).length();
            assert!(
                (len - options.length).abs() < 1e-4,
                "normalized arrow should have length {}, got {len}",
                options.length
            );
        }
    }

    #[test]
    fn unnormalized_arrows_scale_with_magnitude() {
        let positions = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)];
        let vectors = vec![Vector::new(3.0, 0.0, 0.0), Vector::new(0.0, 0.5, 0.0)];
        let options = QuiverOptions {
            length: 2.0,
            normalize: false,
            ..Default::default()
        };

        let quiver = render_quiver(&positions, &vectors, &options).unwrap();
        let lengths: Vec<f32> = quiver
            .arrows
            .iter()
            .map(|a| (a.end - a.start).length())
            .collect();
        assert!((lengths[0] - 6.0).abs() < 1e-4);
        assert!((lengths[1] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_vectors_produce_no_arrow() {
        let positions = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0)];
        let vectors = vec![Vector::new(0.0, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0)];

        let quiver = render_quiver(&positions, &vectors, &QuiverOptions::default()).unwrap();
        assert_eq!(quiver.arrows.len(), 1);
        assert_eq!(quiver.arrows[0].start, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn mismatched_parallel_arrays_are_rejected() {
        let positions = vec![Point::new(0.0, 0.0, 0.0)];
        let vectors: Vec<Vector> = Vec::new();
        assert!(matches!(
            render_quiver(&positions, &vectors, &QuiverOptions::default()),
            Err(QuiverError::MismatchedLengths)
        ));
    }

    #[test]
    fn uniform_magnitude_field_mixes_colors_at_the_midpoint() {
        let options = QuiverOptions {
            color_low: Srgba::new(0.0, 0.0, 0.0, 1.),
            color_high: Srgba::new(1.0, 1.0, 1.0, 1.),
            ..Default::default()
        };
        let positions = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)];
        let vectors = vec![Vector::new(2.0, 0.0, 0.0), Vector::new(0.0, 2.0, 0.0)];

        let quiver = render_quiver(&positions, &vectors, &options).unwrap();
        for arrow in &quiver.arrows {
            assert_eq!(arrow.color, Color::srgb(0.5, 0.5, 0.5));
        }
    }

    #[test]
    fn arrow_points_along_the_field_direction() {
        let positions = vec![Point::new(0.0, 0.0, 0.0)];
        let vectors = vec![Vector::new(0.0, 4.0, 0.0)];
        let options = QuiverOptions {
            length: 1.5,
            normalize: true,
            ..Default::default()
        };

        let quiver = render_quiver(&positions, &vectors, &options).unwrap();
        let arrow = &quiver.arrows[0];
        assert!((arrow.end - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-5);
        assert_eq!(arrow.magnitude, 4.0);
    }
}
