//! Bounding volume hierarchy over the backend's line primitives.
//!
//! Flat node array, largest-axis median split, small leaves. The tree is
//! built once per scene commit and only read afterwards.

use glam::Vec3;

use crate::math::{safe_invert, Aabb, Capsule};

/// Anything the hierarchy can hold: must report finite bounds.
pub trait Primitive {
    fn bounds(&self) -> Aabb;
}

impl Primitive for Capsule {
    fn bounds(&self) -> Aabb {
        Capsule::bounds(self)
    }
}

/// Maximum primitives per leaf before splitting.
const MAX_LEAF_SIZE: usize = 4;

/// Traversal stack depth; enough for far more primitives than any edge
/// graph this tool will see.
const MAX_STACK: usize = 64;

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: Aabb,
    /// Leaf: index into `order` of the first primitive. Internal: index of
    /// the left child (right child is `left + right_offset`).
    first: u32,
    /// Leaf: number of primitives (> 0). Internal: 0.
    count: u32,
    /// Internal: distance from left child to right child node.
    right_offset: u32,
}

/// Read-only hierarchy; `order` maps leaf ranges back to primitive ids.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<Node>,
    order: Vec<u32>,
}

impl Bvh {
    pub fn build<P: Primitive>(primitives: &[P]) -> Self {
        let mut order: Vec<u32> = (0..primitives.len() as u32).collect();
        let mut nodes = Vec::new();
        if !primitives.is_empty() {
            let count = order.len();
            build_node(primitives, &mut order, 0, count, &mut nodes);
        }
        log::debug!(
            "BVH built: {} nodes over {} primitives",
            nodes.len(),
            primitives.len()
        );
        Self { nodes, order }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Closest hit along the ray, resolved through `intersect`. Returns
    /// the primitive id and distance.
    pub fn closest_hit<P, F>(
        &self,
        origin: Vec3,
        dir: Vec3,
        primitives: &[P],
        intersect: F,
    ) -> Option<(usize, f32)>
    where
        F: Fn(&P, Vec3, Vec3) -> Option<f32>,
    {
        if self.nodes.is_empty() {
            return None;
        }
        let inv_dir = safe_invert(dir);
        let mut best: Option<(usize, f32)> = None;
        let mut best_t = f32::INFINITY;

        let mut stack = [0u32; MAX_STACK];
        let mut top = 0usize;
        stack[top] = 0;
        top += 1;

        while top > 0 {
            top -= 1;
            let node = &self.nodes[stack[top] as usize];
            if !node.bounds.hit(origin, inv_dir, best_t) {
                continue;
            }
            if node.count > 0 {
                for &id in &self.order[node.first as usize..(node.first + node.count) as usize] {
                    if let Some(t) = intersect(&primitives[id as usize], origin, dir) {
                        if t < best_t {
                            best_t = t;
                            best = Some((id as usize, t));
                        }
                    }
                }
            } else if top + 2 <= MAX_STACK {
                stack[top] = node.first;
                stack[top + 1] = node.first + node.right_offset;
                top += 2;
            }
        }
        best
    }

    /// True if anything lies along the ray closer than `t_max`. Used for
    /// occlusion queries; stops at the first hit.
    pub fn any_hit<P, F>(&self, origin: Vec3, dir: Vec3, t_max: f32, primitives: &[P], intersect: F) -> bool
    where
        F: Fn(&P, Vec3, Vec3) -> Option<f32>,
    {
        if self.nodes.is_empty() {
            return false;
        }
        let inv_dir = safe_invert(dir);

        let mut stack = [0u32; MAX_STACK];
        let mut top = 0usize;
        stack[top] = 0;
        top += 1;

        while top > 0 {
            top -= 1;
            let node = &self.nodes[stack[top] as usize];
            if !node.bounds.hit(origin, inv_dir, t_max) {
                continue;
            }
            if node.count > 0 {
                for &id in &self.order[node.first as usize..(node.first + node.count) as usize] {
                    if let Some(t) = intersect(&primitives[id as usize], origin, dir) {
                        if t < t_max {
                            return true;
                        }
                    }
                }
            } else if top + 2 <= MAX_STACK {
                stack[top] = node.first;
                stack[top + 1] = node.first + node.right_offset;
                top += 2;
            }
        }
        false
    }
}

fn build_node<P: Primitive>(
    primitives: &[P],
    order: &mut [u32],
    start: usize,
    end: usize,
    nodes: &mut Vec<Node>,
) -> u32 {
    let mut bounds = Aabb::empty();
    let mut centroid_bounds = Aabb::empty();
    for &id in &order[start..end] {
        let b = primitives[id as usize].bounds();
        bounds = bounds.union(&b);
        centroid_bounds.grow(b.center());
    }

    let index = nodes.len() as u32;
    nodes.push(Node {
        bounds,
        first: 0,
        count: 0,
        right_offset: 0,
    });

    let span = end - start;
    if span <= MAX_LEAF_SIZE {
        nodes[index as usize].first = start as u32;
        nodes[index as usize].count = span as u32;
        return index;
    }

    let axis = centroid_bounds.largest_axis();
    order[start..end].sort_unstable_by(|&a, &b| {
        let ca = primitives[a as usize].bounds().center()[axis];
        let cb = primitives[b as usize].bounds().center()[axis];
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });
    let mid = start + span / 2;

    let left = build_node(primitives, order, start, mid, nodes);
    let right = build_node(primitives, order, mid, end, nodes);
    nodes[index as usize].first = left;
    nodes[index as usize].right_offset = right - left;
    index
}
