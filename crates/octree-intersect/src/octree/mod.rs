//! Fixed-height octree for bucketing shapes by containment.
//!
//! This module provides the broad-phase structure of the crate. The tree:
//!
//! - Encloses all input shapes in one isotropic root cube
//! - Allocates every node of a complete tree up front, in a flat arena
//! - Stores each shape once, at the deepest node that fully contains it
//!
//! # Example
//!
//! ```ignore
//! use octree_intersect::{Octree, Shape};
//! use octree_intersect::octree::CollectingVisitor;
//! use nalgebra::Point3;
//!
//! let shapes: Vec<Shape> = /* create shapes */;
//! let octree = Octree::build(shapes)?;
//!
//! // Walk every node depth-first
//! let mut visitor = CollectingVisitor::new();
//! octree.traverse_depth_first(&mut visitor);
//! ```
//!
//! # Architecture
//!
//! - [`Octree`]: The arena of nodes plus the tree height
//! - [`OctreeNode`]: A cube with its stored shapes and child handles
//! - [`NodeId`]: Index of a node in the arena
//! - [`OctreeVisitor`]: Visitor trait for custom traversal behavior

mod node;
mod tree;
mod visitor;

pub use node::{NodeId, OctreeNode};
pub use tree::{height_for, node_count_for_height, Octree, MAX_HEIGHT};
pub use visitor::{CollectingVisitor, FnVisitor, LevelHistogram, OctreeVisitor};
