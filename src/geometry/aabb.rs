//! Axis-aligned bounding boxes.

use crate::math::{Point3, Vector3};

use super::mesh::TriangleMesh;

/// A 3D axis-aligned bounding box defined by min and max corners, plus an
/// opaque integer tag for associating the box with an object in the caller's
/// program (a triangle index, an entity id, ...).
///
/// The default box is *empty*: min is +infinity and max is -infinity on
/// every axis, which makes it the identity element of the union operator, so
/// boxes can be folded together with `+` starting from `Aabb::default()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3,
    max: Point3,
    user_data: i32,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            user_data: 0,
        }
    }
}

impl Aabb {
    /// The empty box (union identity).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A degenerate box containing a single point.
    #[must_use]
    pub fn from_point(p: Point3) -> Self {
        Self {
            min: p,
            max: p,
            user_data: 0,
        }
    }

    /// A box from explicit corners. Callers must supply min <= max per axis.
    #[must_use]
    pub fn from_min_max(min: Point3, max: Point3) -> Self {
        Self {
            min,
            max,
            user_data: 0,
        }
    }

    /// A box centered at the origin with the given width, height, and depth.
    #[must_use]
    pub fn from_extents(extents: Vector3) -> Self {
        Self::from_center_extents(Point3::origin(), extents)
    }

    /// A box centered at `center` with the given width, height, and depth.
    #[must_use]
    pub fn from_center_extents(center: Point3, extents: Vector3) -> Self {
        Self {
            min: center - 0.5 * extents,
            max: center + 0.5 * extents,
            user_data: 0,
        }
    }

    /// The tightest box containing a triangle's three corners.
    #[must_use]
    pub fn from_triangle(a: Point3, b: Point3, c: Point3) -> Self {
        Self::from_point(a) + Self::from_point(b) + Self::from_point(c)
    }

    /// The tightest box containing triangle `tri_id` of `mesh`.
    #[must_use]
    pub fn from_mesh_triangle(mesh: &TriangleMesh, tri_id: usize) -> Self {
        let [a, b, c] = mesh.triangle_vertices(tri_id);
        Self::from_triangle(a, b, c)
    }

    /// The tightest box containing every vertex of `mesh`. An empty mesh
    /// yields the empty box.
    #[must_use]
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        mesh.vertices()
            .iter()
            .fold(Self::empty(), |acc, &v| acc + Self::from_point(v))
    }

    /// The minimum corner.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Point3 {
        self.min
    }

    /// The maximum corner.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// The box dimensions (max - min) per axis.
    #[must_use]
    pub fn dimensions(&self) -> Vector3 {
        self.max - self.min
    }

    /// The box volume: -1.0 for an empty box, 0.0 for a degenerate
    /// (point or planar) box, otherwise the product of the extents.
    #[must_use]
    pub fn volume(&self) -> f32 {
        if self.max.x < self.min.x {
            return -1.0;
        }
        let dims = self.dimensions();
        dims.x * dims.y * dims.z
    }

    /// Attaches a caller-supplied handle to this box.
    pub fn set_user_data(&mut self, data: i32) {
        self.user_data = data;
    }

    /// The caller-supplied handle attached to this box.
    #[inline]
    #[must_use]
    pub fn user_data(&self) -> i32 {
        self.user_data
    }
}

impl std::ops::Add for Aabb {
    type Output = Self;

    /// Union: the tightest box containing both operands. The left operand's
    /// `user_data` is carried through, which makes growing a tagged box with
    /// `box + other` keep its tag.
    fn add(self, rhs: Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(rhs.min.x),
                self.min.y.min(rhs.min.y),
                self.min.z.min(rhs.min.z),
            ),
            max: Point3::new(
                self.max.x.max(rhs.max.x),
                self.max.y.max(rhs.max.y),
                self.max.z.max(rhs.max.z),
            ),
            user_data: self.user_data,
        }
    }
}

impl std::ops::AddAssign for Aabb {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
