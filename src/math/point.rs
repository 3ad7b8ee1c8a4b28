//! 2D and 3D locations.
//!
//! Points are distinct from vectors: subtracting two points yields the
//! displacement vector between them, and a vector can be added to a point to
//! translate it. Adding two points is not defined.

use bytemuck::{Pod, Zeroable};

use super::vector::{Vector2, Vector3};
use super::EPSILON;

/// A 2D location (w = 1 in homogeneous coordinates). Used for mouse
/// positions in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct Point2 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point2 {
    /// Creates a point from coordinates.
    #[inline]
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin (0, 0).
    #[inline]
    #[must_use]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl PartialEq for Point2 {
    /// Tolerance-based comparison, not bitwise.
    fn eq(&self, other: &Self) -> bool {
        (other.x - self.x).abs() < EPSILON && (other.y - self.y).abs() < EPSILON
    }
}

impl std::ops::Sub for Point2 {
    type Output = Vector2;
    fn sub(self, rhs: Self) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add<Vector2> for Point2 {
    type Output = Self;
    fn add(self, v: Vector2) -> Self {
        Self::new(self.x + v.x, self.y + v.y)
    }
}

impl std::ops::Sub<Vector2> for Point2 {
    type Output = Self;
    fn sub(self, v: Vector2) -> Self {
        Self::new(self.x - v.x, self.y - v.y)
    }
}

/// A 3D location (w = 1 in homogeneous coordinates).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Creates a point from coordinates.
    #[inline]
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The origin (0, 0, 0).
    #[inline]
    #[must_use]
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The displacement of this point from the origin.
    #[inline]
    #[must_use]
    pub fn to_vector(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl PartialEq for Point3 {
    /// Tolerance-based comparison, not bitwise.
    fn eq(&self, other: &Self) -> bool {
        (other.x - self.x).abs() < EPSILON
            && (other.y - self.y).abs() < EPSILON
            && (other.z - self.z).abs() < EPSILON
    }
}

impl std::ops::Sub for Point3 {
    type Output = Vector3;
    fn sub(self, rhs: Self) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Add<Vector3> for Point3 {
    type Output = Self;
    fn add(self, v: Vector3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl std::ops::Sub<Vector3> for Point3 {
    type Output = Self;
    fn sub(self, v: Vector3) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_minus_point_is_vector() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(0.5, 0.5, 0.5);
        assert_eq!(a - b, Vector3::new(0.5, 1.5, 2.5));
    }

    #[test]
    fn point_plus_vector_translates() {
        let p = Point3::origin() + Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(p, Point3::new(1.0, -2.0, 3.0));
    }
}
