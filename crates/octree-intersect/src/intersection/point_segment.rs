//! Point–segment test.

use nalgebra::Point3;

use crate::Segment;

/// Checks whether a point lies on a segment (within `epsilon`).
pub fn point_segment(point: &Point3<f64>, segment: &Segment, epsilon: f64) -> bool {
    (segment.closest_point(*point) - point).norm() <= epsilon
}
