//! Octree-accelerated detection of intersecting points, segments and triangles.
//!
//! The broad phase buckets every shape into the deepest node of a fixed-height
//! [`Octree`] that fully contains it. The [`Intersector`] then walks the tree
//! once, testing each shape only against shapes in the same node or in one of
//! its ancestors, and hands every candidate to an exact narrow-phase predicate.

mod bounding_volume;
mod config;
mod error;
pub mod intersection;
mod intersector;
pub mod io;
pub mod octree;
mod plane;
mod segment;
mod shape;
mod triangle;

pub use bounding_volume::BoundingVolume;
pub use config::{ConfigError, IntersectorConfig, OctreeConfig};
pub use error::OctreeError;
pub use intersection::{are_intersecting, ExactPredicate, FnPredicate, IntersectionPredicate};
pub use intersector::{enumerate_intersections, enumerate_with, Intersector};
pub use io::InputError;
pub use octree::{NodeId, Octree, OctreeNode, OctreeVisitor, MAX_HEIGHT};
pub use plane::{Plane3D, PlaneSide};
pub use segment::Segment;
pub use shape::{Geometry, Shape, ShapeKind};
pub use triangle::Triangle;

/// Default tolerance used by the geometric predicates.
///
/// Distances at or below this value count as touching.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
