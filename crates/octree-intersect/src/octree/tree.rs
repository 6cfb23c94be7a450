//! Octree container and construction.

use log::{debug, trace};
use nalgebra::{Point3, Vector3};

use crate::{BoundingVolume, OctreeConfig, OctreeError, Shape};

use super::node::{NodeId, OctreeNode};
use super::visitor::OctreeVisitor;

/// Structural bound on the height of any octree.
pub const MAX_HEIGHT: usize = 6;

/// A fixed-height octree bucketing shapes by containment.
///
/// # Construction
///
/// The tree is built once from a non-empty shape collection. The root cube
/// encloses every shape, the height follows from the shape count, and all
/// `(8^h - 1) / 7` nodes are allocated up front in a single arena:
///
/// ```ignore
/// use octree_intersect::{Octree, Shape};
///
/// let shapes: Vec<Shape> = /* ... */;
/// let octree = Octree::build(shapes)?;
/// ```
///
/// # Insertion
///
/// Each shape is stored at the deepest node whose cube contains it without
/// touching any of the node's splitting planes. Later insertions reuse the
/// same topology; nodes are never added or removed after the build.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    height: usize,
    margin: f64,
}

impl Octree {
    /// Builds an octree with the default configuration.
    ///
    /// Fails with [`OctreeError::EmptyInput`] if `shapes` is empty.
    pub fn build(shapes: Vec<Shape>) -> Result<Self, OctreeError> {
        Self::build_with_config(shapes, &OctreeConfig::default())
    }

    /// Builds an octree, bounding its height by `config`.
    ///
    /// Fails with [`OctreeError::EmptyInput`] if `shapes` is empty or the
    /// height resolves to 0. No nodes are allocated in that case.
    pub fn build_with_config(shapes: Vec<Shape>, config: &OctreeConfig) -> Result<Self, OctreeError> {
        let empty = || OctreeError::EmptyInput {
            shapes: shapes.len(),
        };

        let bounds = shapes
            .iter()
            .map(|shape| *shape.bounding_volume())
            .reduce(|acc, volume| acc.merge(&volume))
            .ok_or_else(empty)?;

        let height = height_for(shapes.len(), config.effective_max_height());
        if height == 0 {
            return Err(empty());
        }

        let center = bounds.center();
        let halfwidth = bounds.halfwidths().max();

        let mut octree = Self {
            nodes: Vec::with_capacity(node_count_for_height(height)),
            height,
            margin: config.margin,
        };
        octree.build_subtree(center, halfwidth, height);
        debug_assert_eq!(octree.nodes.len(), octree.max_size());

        debug!(
            "built octree: {} shapes, height {}, {} nodes, root center {:?}, halfwidth {}",
            shapes.len(),
            height,
            octree.nodes.len(),
            center,
            halfwidth
        );

        octree.extend(shapes);
        Ok(octree)
    }

    /// Returns the height of the tree (number of levels, root included).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a built tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the clearance a shape must keep from a splitting plane to
    /// descend past it.
    #[inline]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the node count of a complete tree of this height.
    pub fn max_size(&self) -> usize {
        node_count_for_height(self.height)
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &OctreeNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.nodes[id.index()]
    }

    /// Returns every node of the tree in pre-order.
    #[inline]
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// Returns the cube covered by the root node.
    pub fn bounds(&self) -> BoundingVolume {
        self.root().cube()
    }

    /// Returns the total number of stored shapes.
    pub fn shape_count(&self) -> usize {
        self.nodes.iter().map(|node| node.shapes().len()).sum()
    }

    /// Inserts a shape at the deepest node that fully contains it.
    pub fn insert(&mut self, shape: Shape) {
        let id = self.locate(shape.bounding_volume());
        trace!("shape {} stored at node {}", shape.index(), id.index());
        self.nodes[id.index()].push_shape(shape);
    }

    /// Inserts every shape of the iterator.
    pub fn extend<I: IntoIterator<Item = Shape>>(&mut self, shapes: I) {
        for shape in shapes {
            self.insert(shape);
        }
    }

    /// Raises the margin to at least `margin` and reinserts every stored shape.
    ///
    /// Shapes only move towards the root. Does nothing if the current margin
    /// is already large enough.
    pub fn ensure_margin(&mut self, margin: f64) {
        if margin.is_nan() || margin <= self.margin {
            return;
        }
        debug!("widening octree margin from {} to {}", self.margin, margin);
        self.margin = margin;

        let shapes: Vec<Shape> = self.nodes.iter_mut().flat_map(OctreeNode::take_shapes).collect();
        self.extend(shapes);
    }

    /// Returns the node a shape with this bounding volume would be stored at.
    ///
    /// Descends from the root while a single child octant holds the volume
    /// strictly on one side of every splitting plane, clear of it by more than
    /// the margin, and inside its cube.
    pub fn locate(&self, volume: &BoundingVolume) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = self.node(current);
            let next = node
                .octant_of(volume, self.margin)
                .and_then(|octant| node.child(octant))
                .filter(|&child| self.node(child).contains(volume));

            match next {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Walks the tree depth-first, pre-order, children in octant order.
    pub fn traverse_depth_first<V: OctreeVisitor>(&self, visitor: &mut V) {
        self.traverse_node(NodeId::ROOT, 1, visitor);
    }

    /// Walks the subtree rooted at `id` like [`traverse_depth_first`](Self::traverse_depth_first).
    /// Depth starts at 1 for `id`.
    pub fn traverse_subtree<V: OctreeVisitor>(&self, id: NodeId, visitor: &mut V) {
        self.traverse_node(id, 1, visitor);
    }

    fn traverse_node<V: OctreeVisitor>(&self, id: NodeId, depth: usize, visitor: &mut V) {
        let node = self.node(id);
        visitor.enter(id, node, depth);
        for (_, child) in node.children() {
            self.traverse_node(child, depth + 1, visitor);
        }
        visitor.leave(id, node, depth);
    }

    /// Recursively allocates a node and its descendants down to `stop_depth`
    /// more levels, returning the id of the subtree root.
    fn build_subtree(&mut self, center: Point3<f64>, halfwidth: f64, stop_depth: usize) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(OctreeNode::new(center, halfwidth));

        if stop_depth > 1 {
            let step = halfwidth * 0.5;
            for octant in 0..8 {
                let offset = Vector3::new(
                    if octant & 1 != 0 { step } else { -step },
                    if octant & 2 != 0 { step } else { -step },
                    if octant & 4 != 0 { step } else { -step },
                );
                let child = self.build_subtree(center + offset, step, stop_depth - 1);
                self.nodes[id.index()].set_child(octant, child);
            }
        }

        id
    }
}

/// Returns the number of nodes in a complete octree of the given height.
pub fn node_count_for_height(height: usize) -> usize {
    // 1 + 8 + 8^2 + ... + 8^(h-1)
    ((1usize << (3 * height)) - 1) / 7
}

/// Chooses the tree height for `shape_count` shapes.
///
/// Assuming shapes of linear size around `2 * halfwidth / cbrt(n)`, a height of
/// `ceil(cbrt(n) / 2)` keeps leaf cubes about as large as a typical shape.
/// The result never exceeds `max_height` (nor [`MAX_HEIGHT`]) and is 0 only
/// for an empty input or a zero bound.
pub fn height_for(shape_count: usize, max_height: usize) -> usize {
    let estimate = ((shape_count as f64).cbrt() / 2.0).ceil() as usize;
    estimate.min(max_height).min(MAX_HEIGHT)
}
