//! Exact (narrow-phase) intersection tests between shapes.
//!
//! Each unordered pair of primitive kinds has its own test function. The
//! [`are_intersecting`] entry point rejects pairs whose bounding volumes are
//! apart, then dispatches on the pair of [`Geometry`] variants.
//!
//! The [`IntersectionPredicate`] trait is the seam the
//! [`Intersector`](crate::Intersector) uses to confirm candidate pairs, so
//! callers can swap in their own test (for instance a bounding-volume-only
//! check, or a counting wrapper in tests).

mod point_point;
mod point_segment;
mod point_triangle;
mod segment_segment;
mod segment_triangle;
mod triangle_triangle;

pub use point_point::point_point;
pub use point_segment::point_segment;
pub use point_triangle::point_triangle;
pub use segment_segment::segment_segment;
pub use segment_triangle::segment_triangle;
pub use triangle_triangle::triangle_triangle;

use crate::{Geometry, Shape, GEOMETRY_EPSILON};

/// Checks whether two shapes intersect, using [`GEOMETRY_EPSILON`].
///
/// The test is symmetric: `are_intersecting(a, b) == are_intersecting(b, a)`.
pub fn are_intersecting(a: &Shape, b: &Shape) -> bool {
    are_intersecting_with_epsilon(a, b, GEOMETRY_EPSILON)
}

/// Checks whether two shapes intersect with a custom tolerance.
pub fn are_intersecting_with_epsilon(a: &Shape, b: &Shape, epsilon: f64) -> bool {
    if !a.bounding_volume().overlaps(b.bounding_volume(), epsilon) {
        return false;
    }

    match (a.geometry(), b.geometry()) {
        (Geometry::Point(p), Geometry::Point(q)) => point_point(p, q, epsilon),
        (Geometry::Point(p), Geometry::Segment(s)) | (Geometry::Segment(s), Geometry::Point(p)) => {
            point_segment(p, s, epsilon)
        }
        (Geometry::Point(p), Geometry::Triangle(t))
        | (Geometry::Triangle(t), Geometry::Point(p)) => point_triangle(p, t, epsilon),
        (Geometry::Segment(s), Geometry::Segment(r)) => segment_segment(s, r, epsilon),
        (Geometry::Segment(s), Geometry::Triangle(t))
        | (Geometry::Triangle(t), Geometry::Segment(s)) => segment_triangle(s, t, epsilon),
        (Geometry::Triangle(t), Geometry::Triangle(u)) => triangle_triangle(t, u, epsilon),
    }
}

/// Strategy deciding whether a candidate pair really intersects.
///
/// Implementations must be total and symmetric over all shape kinds.
pub trait IntersectionPredicate {
    /// Returns `true` if the two shapes intersect.
    fn are_intersecting(&self, a: &Shape, b: &Shape) -> bool;

    /// Largest gap between two shapes this predicate still reports as
    /// intersecting.
    ///
    /// The octree must keep shapes at least this far from the splitting
    /// planes, otherwise such pairs end up in sibling subtrees and are never
    /// tested.
    fn tolerance(&self) -> f64 {
        0.0
    }
}

/// The exact geometric test, with a configurable tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactPredicate {
    epsilon: f64,
}

impl ExactPredicate {
    /// Creates a predicate with the given tolerance.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Returns the tolerance used by this predicate.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for ExactPredicate {
    fn default() -> Self {
        Self::new(GEOMETRY_EPSILON)
    }
}

impl IntersectionPredicate for ExactPredicate {
    fn are_intersecting(&self, a: &Shape, b: &Shape) -> bool {
        are_intersecting_with_epsilon(a, b, self.epsilon)
    }

    fn tolerance(&self) -> f64 {
        self.epsilon
    }
}

/// A predicate backed by a closure.
pub struct FnPredicate<F>
where
    F: Fn(&Shape, &Shape) -> bool,
{
    func: F,
    tolerance: f64,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Shape, &Shape) -> bool,
{
    /// Creates a predicate from a closure that only accepts touching shapes.
    pub fn new(func: F) -> Self {
        Self { func, tolerance: 0.0 }
    }

    /// Declares the gap up to which the closure accepts pairs.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl<F> IntersectionPredicate for FnPredicate<F>
where
    F: Fn(&Shape, &Shape) -> bool,
{
    fn are_intersecting(&self, a: &Shape, b: &Shape) -> bool {
        (self.func)(a, b)
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
