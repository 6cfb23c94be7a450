//! Visitor pattern for octree traversal.
//!
//! Visitors allow custom processing of nodes during a depth-first walk
//! without coupling traversal logic to specific use cases.

use super::node::{NodeId, OctreeNode};
use crate::Shape;

/// Visitor for processing nodes during a depth-first octree walk.
///
/// `enter` is called before a node's children are visited, `leave` after all
/// of them. Depth starts at 1 for the root.
pub trait OctreeVisitor {
    /// Called when the walk reaches a node.
    fn enter(&mut self, id: NodeId, node: &OctreeNode, depth: usize);

    /// Called once every child of the node has been visited.
    fn leave(&mut self, _id: NodeId, _node: &OctreeNode, _depth: usize) {}
}

/// A visitor that collects the shapes of every visited node.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Shape>,
}

impl CollectingVisitor {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected shapes.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.collected
    }

    /// Returns a reference to the collected shapes.
    pub fn shapes(&self) -> &[Shape] {
        &self.collected
    }
}

impl OctreeVisitor for CollectingVisitor {
    fn enter(&mut self, _id: NodeId, node: &OctreeNode, _depth: usize) {
        self.collected.extend(node.shapes().iter().cloned());
    }
}

/// A visitor that counts stored shapes per tree level.
#[derive(Debug, Default)]
pub struct LevelHistogram {
    counts: Vec<usize>,
}

impl LevelHistogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of shapes stored at each depth, root first.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

impl OctreeVisitor for LevelHistogram {
    fn enter(&mut self, _id: NodeId, node: &OctreeNode, depth: usize) {
        if self.counts.len() < depth {
            self.counts.resize(depth, 0);
        }
        self.counts[depth - 1] += node.shapes().len();
    }
}

/// A visitor that calls a closure when entering each node.
pub struct FnVisitor<F>
where
    F: FnMut(NodeId, &OctreeNode, usize),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(NodeId, &OctreeNode, usize),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> OctreeVisitor for FnVisitor<F>
where
    F: FnMut(NodeId, &OctreeNode, usize),
{
    fn enter(&mut self, id: NodeId, node: &OctreeNode, depth: usize) {
        (self.func)(id, node, depth);
    }
}
