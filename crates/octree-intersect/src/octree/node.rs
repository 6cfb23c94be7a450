//! Octree node implementation.

use nalgebra::{Point3, Vector3};

use crate::{BoundingVolume, Shape};

/// Handle of a node inside an [`Octree`](super::Octree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Handle of the root node.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A cube-shaped bucket of the octree.
///
/// Each node stores the shapes that fit inside its cube but inside none of
/// its children. Children, when present, split the cube into eight equal
/// octants addressed by a 3-bit code:
/// - bit 0 set: +x half
/// - bit 1 set: +y half
/// - bit 2 set: +z half
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// Center of the cube.
    center: Point3<f64>,

    /// Half of the cube's edge length, identical on every axis.
    halfwidth: f64,

    /// Child octants, all present for internal nodes and all absent for leaves.
    children: [Option<NodeId>; 8],

    /// Shapes stored at this node, in insertion order.
    shapes: Vec<Shape>,
}

impl OctreeNode {
    /// Creates a new node with no children and no shapes.
    pub(crate) fn new(center: Point3<f64>, halfwidth: f64) -> Self {
        Self {
            center,
            halfwidth,
            children: [None; 8],
            shapes: Vec::new(),
        }
    }

    /// Returns the center of the cube.
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Returns the halfwidth of the cube.
    #[inline]
    pub fn halfwidth(&self) -> f64 {
        self.halfwidth
    }

    /// Returns the cube as a bounding volume.
    pub fn cube(&self) -> BoundingVolume {
        let half = Vector3::repeat(self.halfwidth);
        BoundingVolume::new(self.center - half, self.center + half)
    }

    /// Returns the child in the given octant, if any.
    ///
    /// # Panics
    /// Panics if `octant >= 8`.
    #[inline]
    pub fn child(&self, octant: usize) -> Option<NodeId> {
        self.children[octant]
    }

    /// Iterates over the present children as `(octant, id)` pairs.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(octant, child)| child.map(|id| (octant, id)))
    }

    pub(crate) fn set_child(&mut self, octant: usize, id: NodeId) {
        self.children[octant] = Some(id);
    }

    /// Checks if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Returns the shapes stored at this node.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub(crate) fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub(crate) fn take_shapes(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    /// Returns the center of the child cube in `octant`.
    pub fn octant_center(&self, octant: usize) -> Point3<f64> {
        let step = self.halfwidth * 0.5;
        let offset = |bit: usize| if octant & bit != 0 { step } else { -step };
        Point3::new(
            self.center.x + offset(1),
            self.center.y + offset(2),
            self.center.z + offset(4),
        )
    }

    /// Returns the octant that lies strictly on the same side of every
    /// splitting plane as `volume` grown by `margin`.
    ///
    /// Returns `None` when the grown volume touches or crosses the plane
    /// through the center on any axis. Touching counts as crossing: two shapes
    /// within `2 * margin` of each other must not end up in sibling subtrees.
    pub fn octant_of(&self, volume: &BoundingVolume, margin: f64) -> Option<usize> {
        let mut octant = 0;
        for axis in 0..3 {
            let plane = self.center[axis];
            if volume.min()[axis] - margin > plane {
                octant |= 1 << axis;
            } else if volume.max()[axis] + margin >= plane {
                return None;
            }
        }
        Some(octant)
    }

    /// Checks whether `volume` lies inside this node's cube (boundary included).
    pub fn contains(&self, volume: &BoundingVolume) -> bool {
        (0..3).all(|axis| {
            volume.min()[axis] >= self.center[axis] - self.halfwidth
                && volume.max()[axis] <= self.center[axis] + self.halfwidth
        })
    }
}
