//! Bounding volume hierarchy for accelerating ray-object intersection.

use super::aabb::Aabb;
use super::mesh::TriangleMesh;
use super::ray::Ray;

// A node in the tree: a leaf (the caller's box verbatim, user_data
// meaningful) or an internal node (the union of everything beneath it, with
// exactly two children).
#[derive(Debug, Clone)]
struct Node {
    bounds: Aabb,
    children: Option<(usize, usize)>,
}

/// A binary tree over a set of [`Aabb`]s, built by median split along the
/// longest axis.
///
/// Each leaf holds one of the input boxes; querying with a ray walks the
/// tree, pruning whole subtrees whose bounds the ray misses, and returns the
/// `user_data` tags of every leaf whose box the ray intersects. The caller
/// refines those candidates with exact per-object tests (see
/// [`Ray::fast_intersect_mesh`]).
///
/// Nodes live in an index-addressed arena rather than an owned pointer tree,
/// so dropping the BVH is trivial and the structure is cheap to inspect in
/// tests. Once built the tree is immutable; rebuild by constructing a new
/// one.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl Bvh {
    /// Builds a hierarchy with one leaf per triangle of `mesh`; each leaf's
    /// `user_data` is the triangle index.
    #[must_use]
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        let boxes: Vec<Aabb> = (0..mesh.num_triangles())
            .map(|i| {
                let mut b = Aabb::from_mesh_triangle(mesh, i);
                b.set_user_data(i as i32);
                b
            })
            .collect();
        Self::from_boxes(boxes)
    }

    /// Builds a hierarchy with one leaf per supplied box, preserving
    /// whatever `user_data` the caller attached. An empty list yields an
    /// empty tree that no ray intersects.
    #[must_use]
    pub fn from_boxes(boxes: Vec<Aabb>) -> Self {
        let mut bvh = Self {
            nodes: Vec::with_capacity(2 * boxes.len()),
            root: None,
        };
        if !boxes.is_empty() {
            bvh.root = Some(bvh.build(boxes));
        }
        bvh
    }

    /// Number of nodes in the tree (leaves plus internal nodes).
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The bounds of the whole tree, or the empty box for an empty tree.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.root
            .map_or_else(Aabb::empty, |root| self.nodes[root].bounds)
    }

    // Recursive top-down build; returns the arena index of the subtree root.
    fn build(&mut self, mut boxes: Vec<Aabb>) -> usize {
        if boxes.len() == 1 {
            self.nodes.push(Node {
                bounds: boxes[0],
                children: None,
            });
            return self.nodes.len() - 1;
        }

        let bounds = boxes
            .iter()
            .fold(Aabb::empty(), |acc, &b| acc + b);

        // sort by box midpoint along the longest axis; ties between axes
        // resolve x, then y, then z so the tree shape is deterministic
        let dims = bounds.dimensions();
        let key: fn(&Aabb) -> f32 = if dims.x >= dims.y && dims.x >= dims.z {
            |b| b.min().x + b.max().x
        } else if dims.y >= dims.z {
            |b| b.min().y + b.max().y
        } else {
            |b| b.min().z + b.max().z
        };
        boxes.sort_by(|a, b| key(a).total_cmp(&key(b)));

        let right = boxes.split_off(boxes.len() / 2);
        let left = boxes;

        let child1 = self.build(left);
        let child2 = self.build(right);

        self.nodes.push(Node {
            bounds,
            children: Some((child1, child2)),
        });
        self.nodes.len() - 1
    }

    /// Depth-first traversal collecting the `user_data` of every leaf whose
    /// box `ray` intersects.
    ///
    /// Both children of a hit internal node are visited unconditionally (no
    /// early exit), so the result is a superset of the truly-intersected
    /// objects in left-child-first, depth-first order; the order carries no
    /// distance meaning.
    #[must_use]
    pub fn intersect_user_data(&self, ray: &Ray) -> Vec<i32> {
        let mut hits = Vec::new();
        if let Some(root) = self.root {
            self.intersect_recursive(ray, root, &mut hits);
        }
        hits
    }

    fn intersect_recursive(&self, ray: &Ray, index: usize, hits: &mut Vec<i32>) {
        let node = &self.nodes[index];
        if ray.intersect_aabb(&node.bounds).is_none() {
            return;
        }
        match node.children {
            None => hits.push(node.bounds.user_data()),
            Some((child1, child2)) => {
                self.intersect_recursive(ray, child1, hits);
                self.intersect_recursive(ray, child2, hits);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};

    fn grid_mesh(n: usize) -> TriangleMesh {
        // n unit-ish triangles spaced along the x axis
        let mut mesh = TriangleMesh::new();
        for i in 0..n {
            let x = i as f32 * 2.0;
            let a = mesh.add_vertex(Point3::new(x, 0.0, 0.0));
            let b = mesh.add_vertex(Point3::new(x + 1.0, 0.0, 0.0));
            let c = mesh.add_vertex(Point3::new(x, 1.0, 0.0));
            let _ = mesh.add_triangle(a, b, c);
        }
        mesh
    }

    #[test]
    fn empty_tree_returns_no_candidates() {
        let bvh = Bvh::from_boxes(Vec::new());
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z());
        assert!(bvh.intersect_user_data(&ray).is_empty());
        assert_eq!(bvh.bounds().volume(), -1.0);
    }

    #[test]
    fn single_box_becomes_leaf_verbatim() {
        let mut b = Aabb::from_center_extents(Point3::origin(), Vector3::new(2.0, 2.0, 2.0));
        b.set_user_data(42);
        let bvh = Bvh::from_boxes(vec![b]);
        assert_eq!(bvh.num_nodes(), 1);

        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z());
        assert_eq!(bvh.intersect_user_data(&ray), vec![42]);
    }

    #[test]
    fn tree_has_one_leaf_per_box() {
        let mesh = grid_mesh(7);
        let bvh = Bvh::from_mesh(&mesh);
        // a binary tree with n leaves has 2n - 1 nodes
        assert_eq!(bvh.num_nodes(), 2 * 7 - 1);
    }

    #[test]
    fn candidates_are_superset_of_true_hits() {
        let mesh = grid_mesh(8);
        let bvh = Bvh::from_mesh(&mesh);

        // aim at triangle 3's interior
        let ray = Ray::new(Point3::new(6.2, 0.2, 5.0), -Vector3::unit_z());
        let candidates = bvh.intersect_user_data(&ray);
        assert!(candidates.contains(&3), "candidates = {candidates:?}");

        // every candidate must at least pass the box test
        for id in candidates {
            let b = Aabb::from_mesh_triangle(&mesh, id as usize);
            assert!(ray.intersect_aabb(&b).is_some());
        }
    }

    #[test]
    fn ray_outside_root_returns_empty() {
        let mesh = grid_mesh(8);
        let bvh = Bvh::from_mesh(&mesh);
        let ray = Ray::new(Point3::new(0.0, 50.0, 5.0), -Vector3::unit_z());
        assert!(bvh.intersect_user_data(&ray).is_empty());
    }

    #[test]
    fn user_data_preserved_through_build() {
        let mut boxes = Vec::new();
        for i in 0..5 {
            let mut b = Aabb::from_center_extents(
                Point3::new(i as f32 * 3.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 1.0),
            );
            b.set_user_data(100 + i);
            boxes.push(b);
        }
        let bvh = Bvh::from_boxes(boxes);

        let ray = Ray::new(Point3::new(6.0, 0.0, 5.0), -Vector3::unit_z());
        assert_eq!(bvh.intersect_user_data(&ray), vec![102]);
    }

    #[test]
    fn traversal_order_is_left_child_first() {
        // boxes spread along x: after the midpoint sort the left subtree
        // holds the smaller-x half, so a ray through everything reports
        // ascending x order
        let mut boxes = Vec::new();
        for i in 0..4 {
            let mut b = Aabb::from_center_extents(
                Point3::new(i as f32 * 3.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 1.0),
            );
            b.set_user_data(i);
            boxes.push(b);
        }
        let bvh = Bvh::from_boxes(boxes);

        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::unit_x());
        assert_eq!(bvh.intersect_user_data(&ray), vec![0, 1, 2, 3]);
    }
}
