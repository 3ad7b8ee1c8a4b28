//! Ray-object intersection geometry: triangle meshes, axis-aligned bounding
//! boxes, a bounding volume hierarchy, and the ray type that queries them.

mod aabb;
mod bvh;
mod mesh;
mod ray;

pub use aabb::Aabb;
pub use bvh::Bvh;
pub use mesh::TriangleMesh;
pub use ray::{MeshHit, Ray};
