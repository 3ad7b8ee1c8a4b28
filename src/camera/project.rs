//! Conversions between normalized device coordinates and world space.
//!
//! All screen positions here are in normalized device coordinates, x and y
//! in [-1, 1] with +y up, matching what the camera controller consumes.

use crate::geometry::Ray;
use crate::math::{Matrix4, Point2, Point3, Vector3};

/// The camera position encoded in a view matrix.
#[must_use]
pub fn eye_point(view: &Matrix4) -> Point3 {
    view.inverse().column_point3(3)
}

/// The camera's forward direction encoded in a view matrix.
#[must_use]
pub fn look_vector(view: &Matrix4) -> Vector3 {
    (-view.inverse().column_vector3(2)).to_unit()
}

/// Unprojects a screen point with an explicit depth-buffer value `z` in
/// [0, 1] back to world space.
#[must_use]
pub fn screen_to_world(view: &Matrix4, projection: &Matrix4, pos: Point2, z: f32) -> Point3 {
    // depth buffer stores [0, 1]; clip space wants [-1, 1]
    let ndc = Point3::new(pos.x, pos.y, 2.0 * z - 1.0);
    (*projection * *view).inverse() * ndc
}

/// Unprojects a screen point onto the near clipping plane.
#[must_use]
pub fn screen_to_near_plane(view: &Matrix4, projection: &Matrix4, pos: Point2) -> Point3 {
    let ndc = Point3::new(pos.x, pos.y, -1.0);
    (*projection * *view).inverse() * ndc
}

/// Unprojects a screen point onto the camera-facing plane `depth` units in
/// front of the eye along the look direction.
#[must_use]
pub fn screen_to_depth_plane(
    view: &Matrix4,
    projection: &Matrix4,
    pos: Point2,
    depth: f32,
) -> Point3 {
    let eye = eye_point(view);
    let look = look_vector(view);
    let near_pt = screen_to_near_plane(view, projection, pos);

    let plane_origin = eye + depth * look;
    let ray = Ray::new(eye, near_pt - eye);
    // normal faces back toward the camera so the plane test accepts the
    // ray; on a degenerate view the near-plane point is at least on the
    // requested line of sight
    ray.intersect_plane(plane_origin, -look)
        .map_or(near_pt, |(_, hit)| hit)
}
