//! Rays and the battery of intersection tests against scene geometry.

use crate::math::{Point3, Vector3, EPSILON};

use super::aabb::Aabb;
use super::bvh::Bvh;
use super::mesh::TriangleMesh;

/// A successful ray-vs-mesh intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Parametric time of the hit along the ray direction.
    pub t: f32,
    /// World-space hit position.
    pub point: Point3,
    /// Index of the intersected triangle.
    pub triangle: usize,
}

/// A ray defined by an origin and a direction.
///
/// The direction need not be unit length; intersection times are reported in
/// units of the direction vector's own length, so `origin + t * direction`
/// is always the hit point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Point3,
    /// Ray direction (not necessarily unit length).
    pub direction: Vector3,
}

impl Default for Ray {
    /// A ray at the origin looking down -Z.
    fn default() -> Self {
        Self::new(Point3::origin(), -Vector3::unit_z())
    }
}

impl Ray {
    /// Creates a ray from an origin and direction.
    #[inline]
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// The length of the direction vector.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.direction.length()
    }

    /// The point at parametric time `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + t * self.direction
    }

    /// Intersects the ray with the front face of a plane given by a point on
    /// the plane and its normal.
    ///
    /// Returns `None` when the ray would hit the back face (normal dotted
    /// with the direction is positive), when the ray is nearly parallel to
    /// the plane, or when the intersection lies behind the origin (t < 0).
    #[must_use]
    pub fn intersect_plane(&self, plane_pt: Point3, normal: Vector3) -> Option<(f32, Point3)> {
        let denom = normal.dot(self.direction);

        // back face
        if denom > 0.0 {
            return None;
        }
        // parallel
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (plane_pt - self.origin).dot(normal) / denom;
        if t >= 0.0 {
            Some((t, self.at(t)))
        } else {
            None
        }
    }

    /// Intersects the ray with triangle (a, b, c) using the
    /// Moller-Trumbore algorithm.
    ///
    /// Returns `None` for near-degenerate configurations (determinant below
    /// epsilon), for barycentric coordinates outside the triangle, and for
    /// non-positive hit times; this is a ray test, not a line test.
    #[must_use]
    pub fn intersect_triangle(&self, a: Point3, b: Point3, c: Point3) -> Option<(f32, Point3)> {
        let edge1 = b - a;
        let edge2 = c - a;

        let pvec = self.direction.cross(edge2);
        let det = edge1.dot(pvec);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = self.origin - a;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = self.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;
        if t > EPSILON {
            Some((t, self.at(t)))
        } else {
            None
        }
    }

    /// Intersects the ray with quad (a, b, c, d), decomposed into the
    /// triangles (a, b, c) and (a, c, d).
    ///
    /// Returns the first of the two triangle hits, which is not necessarily
    /// the nearer one; for a planar convex quad the two cannot both hit, so
    /// the asymmetry only matters for non-planar input.
    #[must_use]
    pub fn intersect_quad(
        &self,
        a: Point3,
        b: Point3,
        c: Point3,
        d: Point3,
    ) -> Option<(f32, Point3)> {
        self.intersect_triangle(a, b, c)
            .or_else(|| self.intersect_triangle(a, c, d))
    }

    /// Intersects the ray with a sphere.
    ///
    /// Solves the classic quadratic in the ray parameter; when both roots
    /// are positive the nearer one is reported, and only positive
    /// (epsilon-bounded) roots count as hits.
    #[must_use]
    pub fn intersect_sphere(&self, center: Point3, radius: f32) -> Option<(f32, Point3)> {
        // ray origin relative to the sphere center
        let p = self.origin - center;
        let d = self.direction;

        let a = f64::from(d.dot(d));
        let b = f64::from(p.dot(d));
        let c = f64::from(p.dot(p) - radius * radius);

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let disc_root = discriminant.sqrt();
        let t1 = (-b - disc_root) / a;
        let t2 = (-b + disc_root) / a;

        let eps = f64::from(EPSILON);
        let t = match (t1 > eps, t2 > eps) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return None,
        };

        let t = t as f32;
        Some((t, self.at(t)))
    }

    /// Intersects the ray with an axis-aligned box using the slab method.
    ///
    /// Per-axis entry/exit intervals are computed from the reciprocal of
    /// each direction component; a zero component produces an infinite
    /// reciprocal, which the min/max interval logic absorbs. Returns `None`
    /// when the box is entirely behind the origin or the intervals do not
    /// overlap; otherwise the entry time (or the exit time when the origin
    /// is inside the box).
    #[must_use]
    pub fn intersect_aabb(&self, box_: &Aabb) -> Option<f32> {
        let lo = box_.min() - self.origin;
        let hi = box_.max() - self.origin;
        let d = self.direction;

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        for (near, far, dir) in [(lo.x, hi.x, d.x), (lo.y, hi.y, d.y), (lo.z, hi.z, d.z)] {
            let inv = 1.0 / dir;
            let t1 = near * inv;
            let t2 = far * inv;
            // f32::min/max ignore NaN, so a 0 * inf axis drops out of the
            // interval instead of poisoning it
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        if tmax < 0.0 || tmin > tmax {
            return None;
        }
        Some(if tmin < 0.0 { tmax } else { tmin })
    }

    /// Intersects the ray with every triangle of `mesh` (brute force),
    /// keeping the minimum-t hit.
    #[must_use]
    pub fn intersect_mesh(&self, mesh: &TriangleMesh) -> Option<MeshHit> {
        self.closest_triangle_hit(mesh, 0..mesh.num_triangles())
    }

    /// Intersects the ray with `mesh` using a prebuilt BVH to prune
    /// candidate triangles before exact testing.
    ///
    /// Functionally equivalent to [`Ray::intersect_mesh`]; `bvh` must have
    /// been built from the same mesh for the triangle indices to line up.
    #[must_use]
    pub fn fast_intersect_mesh(&self, mesh: &TriangleMesh, bvh: &Bvh) -> Option<MeshHit> {
        let candidates = bvh.intersect_user_data(self);
        self.closest_triangle_hit(
            mesh,
            candidates.into_iter().filter(|&id| id >= 0).map(|id| id as usize),
        )
    }

    fn closest_triangle_hit(
        &self,
        mesh: &TriangleMesh,
        triangles: impl IntoIterator<Item = usize>,
    ) -> Option<MeshHit> {
        let mut best: Option<MeshHit> = None;
        for tri in triangles {
            let [a, b, c] = mesh.triangle_vertices(tri);
            if let Some((t, point)) = self.intersect_triangle(a, b, c) {
                if best.is_none_or(|h| t < h.t) {
                    best = Some(MeshHit {
                        t,
                        point,
                        triangle: tri,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_hit_at_expected_point() {
        let ray = Ray::new(Point3::new(0.2, 0.2, 5.0), -Vector3::unit_z());
        let (t, point) = ray
            .intersect_triangle(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )
            .unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        assert!((point - Point3::new(0.2, 0.2, 0.0)).length() < 1e-5);
    }

    #[test]
    fn triangle_miss_outside_extent() {
        let ray = Ray::new(Point3::new(5.0, 5.0, 5.0), -Vector3::unit_z());
        assert!(ray
            .intersect_triangle(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )
            .is_none());
    }

    #[test]
    fn triangle_behind_origin_misses() {
        let ray = Ray::new(Point3::new(0.2, 0.2, -1.0), -Vector3::unit_z());
        assert!(ray
            .intersect_triangle(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )
            .is_none());
    }

    #[test]
    fn non_unit_direction_reports_scaled_t() {
        // direction length 5: hit at the same point, t in direction units
        let ray = Ray::new(Point3::new(0.2, 0.2, 5.0), Vector3::new(0.0, 0.0, -5.0));
        let (t, point) = ray
            .intersect_triangle(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            )
            .unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        assert!((point - Point3::new(0.2, 0.2, 0.0)).length() < 1e-5);
    }

    #[test]
    fn sphere_hit_nearer_root() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z());
        let (t, point) = ray.intersect_sphere(Point3::origin(), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((point - Point3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn sphere_grazing_miss() {
        let ray = Ray::new(Point3::new(2.0, 0.0, 5.0), -Vector3::unit_z());
        assert!(ray.intersect_sphere(Point3::origin(), 1.0).is_none());
    }

    #[test]
    fn sphere_origin_inside_reports_exit() {
        let ray = Ray::new(Point3::origin(), -Vector3::unit_z());
        let (t, _) = ray.intersect_sphere(Point3::origin(), 1.0).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn plane_rejects_back_face() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z());
        // normal pointing away from the ray origin
        assert!(ray
            .intersect_plane(Point3::origin(), -Vector3::unit_z())
            .is_none());
        // normal facing the ray
        let (t, _) = ray
            .intersect_plane(Point3::origin(), Vector3::unit_z())
            .unwrap();
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_hit_and_miss() {
        let box_ = Aabb::from_min_max(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let hit = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z());
        let t = hit.intersect_aabb(&box_).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let miss = Ray::new(Point3::new(3.0, 0.0, 5.0), -Vector3::unit_z());
        assert!(miss.intersect_aabb(&box_).is_none());

        let behind = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::unit_z());
        assert!(behind.intersect_aabb(&box_).is_none());
    }

    #[test]
    fn aabb_axis_aligned_ray_with_zero_components() {
        // direction has two exactly-zero components; reciprocal slabs must
        // absorb the infinities
        let box_ = Aabb::from_min_max(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(ray.intersect_aabb(&box_).is_some());
    }

    #[test]
    fn aabb_ray_origin_inside() {
        let box_ = Aabb::from_min_max(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::origin(), -Vector3::unit_z());
        let t = ray.intersect_aabb(&box_).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn quad_hits_either_half() {
        let a = Point3::new(-1.0, -1.0, 0.0);
        let b = Point3::new(1.0, -1.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(-1.0, 1.0, 0.0);
        // upper-left corner lies in triangle (a, c, d)
        let ray = Ray::new(Point3::new(-0.5, 0.5, 5.0), -Vector3::unit_z());
        let (t, _) = ray.intersect_quad(a, b, c, d).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        // lower-right corner lies in triangle (a, b, c)
        let ray = Ray::new(Point3::new(0.5, -0.5, 5.0), -Vector3::unit_z());
        assert!(ray.intersect_quad(a, b, c, d).is_some());
    }

    #[test]
    fn mesh_brute_force_and_bvh_agree() {
        let mut mesh = TriangleMesh::new();
        // two parallel triangles stacked in z; the nearer must win
        for z in [0.0, -2.0] {
            let a = mesh.add_vertex(Point3::new(0.0, 0.0, z));
            let b = mesh.add_vertex(Point3::new(1.0, 0.0, z));
            let c = mesh.add_vertex(Point3::new(0.0, 1.0, z));
            let _ = mesh.add_triangle(a, b, c);
        }
        let bvh = Bvh::from_mesh(&mesh);
        let ray = Ray::new(Point3::new(0.2, 0.2, 5.0), -Vector3::unit_z());

        let brute = ray.intersect_mesh(&mesh).unwrap();
        let fast = ray.fast_intersect_mesh(&mesh, &bvh).unwrap();

        assert_eq!(brute.triangle, 0);
        assert_eq!(fast.triangle, 0);
        assert!((brute.t - 5.0).abs() < 1e-5);
        assert!((fast.t - brute.t).abs() < 1e-6);
    }
}
