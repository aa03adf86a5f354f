use crate::types::{ComponentFn, Point, Value, Vector};

/// A 3D vector field given as three independent scalar component functions.
///
/// `p`, `q`, and `r` map a position to the x, y, and z components of the
/// field vector at that position. Functions must be total over the sampled
/// domain and side-effect-free; nothing is validated up front, so a
/// panicking component surfaces at evaluation time.
pub struct VectorField {
    p: Box<ComponentFn>,
    q: Box<ComponentFn>,
    r: Box<ComponentFn>,
}

impl VectorField {
    /// Creates a field from three component functions.
    pub fn new<P, Q, R>(p: P, q: Q, r: R) -> Self
    where
        P: Fn(Point) -> Value + Send + Sync + 'static,
        Q: Fn(Point) -> Value + Send + Sync + 'static,
        R: Fn(Point) -> Value + Send + Sync + 'static,
    {
        Self {
            p: Box::new(p),
            q: Box::new(q),
            r: Box::new(r),
        }
    }

    /// Evaluates all three components at `pos` and bundles them into a vector.
    pub fn evaluate(&self, pos: Point) -> Vector {
        Vector::new((self.p)(pos), (self.q)(pos), (self.r)(pos))
    }

    /// A helical flow around the x-axis: constant translation along x
    /// combined with rotation in the y-z plane.
    ///
    /// ```text
    /// P(pos) = -1
    /// Q(pos) = -pos.z
    /// R(pos) =  pos.y
    /// ```
    pub fn helix() -> Self {
        Self::new(|_| -1.0, |pos| -pos.z, |pos| pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_bundles_the_component_triple() {
        let field = VectorField::new(
            |pos| pos.x + pos.y,
            |pos| pos.y * pos.z,
            |pos| pos.z - 1.0,
        );

        let pos = Point::new(2.0, 3.0, 4.0);
        let vec = field.evaluate(pos);

        assert_eq!(vec.x, pos.x + pos.y);
        assert_eq!(vec.y, pos.y * pos.z);
        assert_eq!(vec.z, pos.z - 1.0);
    }

    #[test]
    fn helix_x_component_is_always_minus_one() {
        let field = VectorField::helix();
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (5.0, -5.0, 5.0),
            (-3.5, 1.25, -0.75),
            (100.0, -42.0, 7.0),
        ] {
            let vec = field.evaluate(Point::new(x, y, z));
            assert_eq!(vec.x, -1.0, "x-component must be -1 at ({x}, {y}, {z})");
        }
    }

    #[test]
    fn helix_rotates_in_the_yz_plane() {
        let field = VectorField::helix();
        for &(x, y, z) in &[(0.0, 1.0, 0.0), (2.0, -3.0, 4.0), (-5.0, 5.0, -5.0)] {
            let vec = field.evaluate(Point::new(x, y, z));

            assert_eq!(vec.y, -z);
            assert_eq!(vec.z, y);

            // (Q, R) is perpendicular to (y, z) and has the same magnitude:
            // pure rotation, no radial drift.
            let dot = vec.y * y + vec.z * z;
            assert_eq!(dot, 0.0, "rotational part must be perpendicular to (y, z)");
            let mag_vec = (vec.y * vec.y + vec.z * vec.z).sqrt();
            let mag_pos = (y * y + z * z).sqrt();
            assert!(
                (mag_vec - mag_pos).abs() < 1e-6,
                "rotation must preserve magnitude: {mag_vec} vs {mag_pos}"
            );
        }
    }
}
