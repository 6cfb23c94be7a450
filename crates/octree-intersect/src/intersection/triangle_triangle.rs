//! Triangle–triangle test.

use crate::Triangle;

use super::segment_triangle::segment_triangle;

/// Checks whether two triangles touch or overlap (within `epsilon`).
///
/// Two triangles intersect iff an edge of one of them meets the other
/// triangle: a transversal intersection is a segment whose endpoints lie on
/// edges, and a coplanar overlap either crosses edges or contains a whole
/// triangle, whose edges then lie inside the other one.
pub fn triangle_triangle(a: &Triangle, b: &Triangle, epsilon: f64) -> bool {
    a.edges().iter().any(|edge| segment_triangle(edge, b, epsilon))
        || b.edges().iter().any(|edge| segment_triangle(edge, a, epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into())
    }

    fn reference() -> Triangle {
        tri([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0])
    }

    #[test]
    fn parallel_planes() {
        let other = tri([-1.0, 0.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 0.0, 2.0]);
        assert!(!triangle_triangle(&reference(), &other, EPS));
    }

    #[test]
    fn planes_intersect_but_triangles_do_not() {
        let other = tri([-1.0, 0.0, -0.5], [-1.0, 1.0, -0.5], [-1.0, 0.0, 0.5]);
        assert!(!triangle_triangle(&reference(), &other, EPS));
        assert!(!triangle_triangle(&other, &reference(), EPS));
    }

    #[test]
    fn piercing_triangles() {
        let other = tri([0.25, 0.25, -1.0], [0.25, 0.25, 1.0], [5.0, 5.0, 0.0]);
        assert!(triangle_triangle(&reference(), &other, EPS));
        assert!(triangle_triangle(&other, &reference(), EPS));
    }

    #[test]
    fn shared_vertex() {
        let other = tri([1.0, 0.0, 0.0], [2.0, 0.0, 1.0], [2.0, 1.0, -1.0]);
        assert!(triangle_triangle(&reference(), &other, EPS));
    }

    #[test]
    fn coplanar_containment() {
        let big = tri([-5.0, -5.0, 0.0], [10.0, -5.0, 0.0], [-5.0, 10.0, 0.0]);
        assert!(triangle_triangle(&reference(), &big, EPS));
        assert!(triangle_triangle(&big, &reference(), EPS));
    }

    #[test]
    fn coplanar_disjoint() {
        let other = tri([2.0, 2.0, 0.0], [3.0, 2.0, 0.0], [2.0, 3.0, 0.0]);
        assert!(!triangle_triangle(&reference(), &other, EPS));
    }

    #[test]
    fn coplanar_crossing_edges() {
        let other = tri([0.5, -0.5, 0.0], [0.5, 2.0, 0.0], [3.0, 0.0, 0.0]);
        assert!(triangle_triangle(&reference(), &other, EPS));
    }

    #[test]
    fn triangle_through_a_window() {
        // A thin triangle crossing the interior of a large one without any
        // vertex of either triangle touching the other.
        let wide = tri([-2.0, -2.0, 0.0], [2.0, -2.0, 0.0], [0.0, 2.0, 0.0]);
        let needle = tri([0.0, -0.5, -1.0], [0.1, 0.5, -1.0], [0.05, 0.0, 1.0]);
        assert!(triangle_triangle(&wide, &needle, EPS));
        assert!(triangle_triangle(&needle, &wide, EPS));
    }
}
