use ndarray::Array3;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    field::VectorField,
    grid::SampleGrid,
    types::{Point, Value, Vector},
};

/// A [`VectorField`] evaluated at every position of a [`SampleGrid`].
///
/// Components are stored as three parallel arrays indexed `[x][y][z]`, so the
/// vector at a grid index is always the one computed from the position at
/// that same index.
pub struct SampledField {
    /// The grid the field was sampled on.
    pub grid: SampleGrid,
    /// X components, indexed `[x][y][z]`.
    pub u: Array3<Value>,
    /// Y components, indexed `[x][y][z]`.
    pub v: Array3<Value>,
    /// Z components, indexed `[x][y][z]`.
    pub w: Array3<Value>,
}

impl SampledField {
    /// Evaluates `field` at every grid position.
    ///
    /// Work is parallelised over X slices with Rayon. Every sample is
    /// independent and side-effect-free, so execution order does not affect
    /// the result.
    pub fn sample(grid: SampleGrid, field: &VectorField) -> Self {
        let n = grid.resolution;

        let per_x: Vec<(Vec<Value>, Vec<Value>, Vec<Value>)> = (0..n)
            .into_par_iter()
            .map(|ix| {
                let mut u = Vec::with_capacity(n * n);
                let mut v = Vec::with_capacity(n * n);
                let mut w = Vec::with_capacity(n * n);
                for iy in 0..n {
                    for iz in 0..n {
                        let vec = field.evaluate(grid.position(ix, iy, iz));
                        u.push(vec.x);
                        v.push(vec.y);
                        w.push(vec.z);
                    }
                }
                (u, v, w)
            })
            .collect();

        // Merge per-X slices into the full component buffers. Slices arrive
        // in x order, matching the grid's linear-index order.
        let mut u = Vec::with_capacity(grid.len());
        let mut v = Vec::with_capacity(grid.len());
        let mut w = Vec::with_capacity(grid.len());
        for (mut su, mut sv, mut sw) in per_x {
            u.append(&mut su);
            v.append(&mut sv);
            w.append(&mut sw);
        }

        let shape = (n, n, n);
        Self {
            grid,
            u: Array3::from_shape_vec(shape, u).expect("merged X slices fill the grid"),
            v: Array3::from_shape_vec(shape, v).expect("merged X slices fill the grid"),
            w: Array3::from_shape_vec(shape, w).expect("merged X slices fill the grid"),
        }
    }

    /// Number of samples: `resolution³`.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// The sampled vector at grid index `(ix, iy, iz)`.
    pub fn vector(&self, ix: usize, iy: usize, iz: usize) -> Vector {
        Vector::new(
            self.u[[ix, iy, iz]],
            self.v[[ix, iy, iz]],
            self.w[[ix, iy, iz]],
        )
    }

    /// Iterates over `(position, vector)` pairs in linear-index order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Vector)> + '_ {
        (0..self.len()).map(|idx| {
            let [ix, iy, iz] = self.grid.index_from_linear(idx);
            (
                self.grid.position(ix, iy, iz),
                self.vector(ix, iy, iz),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_holds_the_vector_for_its_own_position() {
        let grid = SampleGrid::cube(-2.0, 2.0, 4).unwrap();
        let field = VectorField::new(
            |pos| pos.x * 2.0 + pos.y,
            |pos| pos.y - pos.z,
            |pos| pos.x * pos.z,
        );
        let samples = SampledField::sample(grid, &field);

        assert_eq!(samples.len(), 64);
        for ix in 0..4 {
            for iy in 0..4 {
                for iz in 0..4 {
                    let expected = field.evaluate(grid.position(ix, iy, iz));
                    assert_eq!(
                        samples.vector(ix, iy, iz),
                        expected,
                        "misaligned sample at ({ix}, {iy}, {iz})"
                    );
                }
            }
        }
    }

    #[test]
    fn two_point_cube_samples_the_eight_corners() {
        let grid = SampleGrid::cube(-5.0, 5.0, 2).unwrap();
        let samples = SampledField::sample(grid, &VectorField::helix());

        let positions: Vec<Point> = samples.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions.len(), 8);
        for &sx in &[-5.0, 5.0] {
            for &sy in &[-5.0, 5.0] {
                for &sz in &[-5.0, 5.0] {
                    let corner = Point::new(sx, sy, sz);
                    assert!(
                        positions.contains(&corner),
                        "missing corner position {corner}"
                    );
                }
            }
        }
    }

    #[test]
    fn helix_corner_vectors_match_hand_computed_values() {
        let grid = SampleGrid::cube(-5.0, 5.0, 2).unwrap();
        let samples = SampledField::sample(grid, &VectorField::helix());

        assert_eq!(samples.vector(1, 1, 1), Vector::new(-1.0, -5.0, 5.0));
        assert_eq!(samples.vector(0, 0, 0), Vector::new(-1.0, 5.0, -5.0));
    }

    #[test]
    fn iter_pairs_positions_with_their_vectors() {
        let grid = SampleGrid::cube(0.0, 3.0, 3).unwrap();
        let field = VectorField::new(|pos| pos.x, |pos| pos.y, |pos| pos.z);
        let samples = SampledField::sample(grid, &field);

        for (pos, vec) in samples.iter() {
            assert_eq!(vec, pos.coords, "identity field must echo its position");
        }
    }
}
