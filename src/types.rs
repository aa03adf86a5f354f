use nalgebra::{Point3, Vector3};

/// Scalar component value at a point in space.
pub type Value = f32;

/// A 3D point with [`Value`] components.
pub type Point = Point3<Value>;

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;

/// A scalar component function: maps a [`Point`] to a [`Value`].
///
/// Three of these make up a [`VectorField`](crate::field::VectorField).
/// `Send + Sync` so the async sampling task can own the field.
pub type ComponentFn = dyn Fn(Point) -> Value + Send + Sync;
