//! 3D math kernel: points, vectors, matrices, and quaternions.
//!
//! All types are 32-bit float value types with no hidden state. Points and
//! vectors are distinct: a point's implicit homogeneous coordinate is 1, a
//! vector's is 0, and the operator impls only permit the combinations that
//! make geometric sense (point − point → vector, point + vector → point,
//! vector + vector → vector). Equality on every type is tolerance-based
//! ([`EPSILON`]), not bitwise.

mod matrix;
mod point;
mod quaternion;
mod vector;

pub use matrix::Matrix4;
pub use point::{Point2, Point3};
pub use quaternion::Quaternion;
pub use vector::{Vector2, Vector3};

/// Tolerance used for equality comparisons and degeneracy checks throughout
/// the math kernel.
pub const EPSILON: f32 = 1e-8;

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}
