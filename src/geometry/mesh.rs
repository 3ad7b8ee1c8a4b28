//! Minimal indexed triangle mesh storage.
//!
//! Just enough of a mesh for intersection queries: a vertex array and a
//! triangle index array. Rendering, normals, texture coordinates, and file
//! loading live with the application, not here.

use crate::math::Point3;

/// An indexed triangle mesh used as the query surface for ray tests and BVH
/// construction.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    vertices: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from existing vertex and triangle-index arrays.
    ///
    /// Indices are not validated here; out-of-range indices will panic at
    /// query time.
    #[must_use]
    pub fn from_data(vertices: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, p: Point3) -> u32 {
        self.vertices.push(p);
        (self.vertices.len() - 1) as u32
    }

    /// Appends a triangle from three vertex indices and returns its
    /// triangle index.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) -> usize {
        self.triangles.push([a, b, c]);
        self.triangles.len() - 1
    }

    /// Number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The position of vertex `i`.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Point3 {
        self.vertices[i]
    }

    /// The vertex indices of triangle `t`.
    #[must_use]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        self.triangles[t]
    }

    /// The three corner positions of triangle `t`.
    #[must_use]
    pub fn triangle_vertices(&self, t: usize) -> [Point3; 3] {
        let [a, b, c] = self.triangles[t];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// All vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_incrementally() {
        let mut mesh = TriangleMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let t = mesh.add_triangle(a, b, c);
        assert_eq!(t, 0);
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.triangle_vertices(0)[1], Point3::new(1.0, 0.0, 0.0));
    }
}
