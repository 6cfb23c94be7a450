//! Segment–triangle test.

use crate::{PlaneSide, Segment, Triangle};

use super::point_triangle::point_triangle;
use super::segment_segment::segment_segment;

/// Checks whether a segment touches or crosses a triangle (within `epsilon`).
pub fn segment_triangle(segment: &Segment, triangle: &Triangle, epsilon: f64) -> bool {
    if point_triangle(&segment.start(), triangle, epsilon)
        || point_triangle(&segment.end(), triangle, epsilon)
    {
        return true;
    }

    let Some(plane) = triangle.plane() else {
        // Zero-area triangle: only its edges can be hit
        return triangle
            .edges()
            .iter()
            .any(|edge| segment_segment(segment, edge, epsilon));
    };

    let start_side = plane.classify_point(segment.start(), epsilon);
    let end_side = plane.classify_point(segment.end(), epsilon);

    match (start_side, end_side) {
        (PlaneSide::Front, PlaneSide::Front) | (PlaneSide::Back, PlaneSide::Back) => false,
        (PlaneSide::OnPlane, PlaneSide::OnPlane) => {
            // Coplanar, and neither endpoint is inside: the segment can only
            // enter the triangle through one of its edges.
            triangle
                .edges()
                .iter()
                .any(|edge| segment_segment(segment, edge, epsilon))
        }
        _ => plane
            .intersect_segment(segment.start(), segment.end())
            .is_some_and(|(_, crossing)| point_triangle(&crossing, triangle, epsilon)),
    }
}
