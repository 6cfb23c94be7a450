//! Segment–segment test.

use std::cmp::Ordering;

use nalgebra::Point3;

use crate::Segment;

/// Checks whether two segments touch or cross (within `epsilon`).
///
/// Parallel and collinear segments are handled by the same closest-point
/// computation, so overlapping collinear segments and shared endpoints both
/// report an intersection.
///
/// The segments are put in coordinate order first, so swapping the arguments
/// never changes the result.
pub fn segment_segment(a: &Segment, b: &Segment, epsilon: f64) -> bool {
    let (first, second) = if coordinate_order(a, b).is_gt() { (b, a) } else { (a, b) };
    let (p, q) = closest_points(first, second);
    (p - q).norm() <= epsilon
}

/// Lexicographic order on the endpoint coordinates.
fn coordinate_order(a: &Segment, b: &Segment) -> Ordering {
    let coords = |s: &Segment| [s.start(), s.end()].into_iter().flat_map(|p| [p.x, p.y, p.z]);
    coords(a)
        .zip(coords(b))
        .map(|(x, y)| x.total_cmp(&y))
        .find(|order| order.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Computes the closest pair of points between two segments.
fn closest_points(s1: &Segment, s2: &Segment) -> (Point3<f64>, Point3<f64>) {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let r = s1.start() - s2.start();
    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    let tiny = f64::EPSILON * f64::EPSILON;

    if a <= tiny && e <= tiny {
        return (s1.start(), s2.start());
    }

    let (s, t) = if a <= tiny {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= tiny {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;

            // Parallel segments: any s works, start from s1's first endpoint
            let mut s = if denom > tiny {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    (s1.point_at(s), s2.point_at(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn seg(a: [f64; 3], b: [f64; 3]) -> Segment {
        Segment::new(a.into(), b.into())
    }

    fn reference() -> Segment {
        seg([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0])
    }

    #[test]
    fn skew_lines() {
        assert!(!segment_segment(&reference(), &seg([0.0, -1.0, 2.0], [0.0, 1.0, 2.0]), EPS));
    }

    #[test]
    fn crossing_lines_with_one_segment_short_of_the_crossing() {
        assert!(!segment_segment(&reference(), &seg([6.0, -5.0, 0.0], [0.0, 5.0, 0.0]), EPS));
    }

    #[test]
    fn crossing_lines_with_both_segments_short_of_the_crossing() {
        assert!(!segment_segment(&reference(), &seg([3.0, 1.0, 0.0], [0.0, 6.0, 0.0]), EPS));
    }

    #[test]
    fn shared_endpoint() {
        assert!(segment_segment(&reference(), &seg([1.0, 0.0, 0.0], [1.0, 7.0, 0.0]), EPS));
    }

    #[test]
    fn endpoint_in_the_other_interior() {
        assert!(segment_segment(&reference(), &seg([0.5, 0.0, 0.0], [0.5, 9.0, 0.0]), EPS));
    }

    #[test]
    fn interiors_cross() {
        assert!(segment_segment(&reference(), &seg([-0.4, 2.0, 0.0], [-0.4, -2.0, 0.0]), EPS));
    }

    #[test]
    fn parallel_lines() {
        assert!(!segment_segment(&reference(), &seg([-6.0, -9.0, 0.0], [3.0, -9.0, 0.0]), EPS));
    }

    #[test]
    fn collinear_disjoint() {
        assert!(!segment_segment(&reference(), &seg([2.0, 0.0, 0.0], [3.0, 0.0, 0.0]), EPS));
    }

    #[test]
    fn collinear_touching_ends() {
        assert!(segment_segment(&reference(), &seg([1.0, 0.0, 0.0], [4.0, 0.0, 0.0]), EPS));
    }

    #[test]
    fn collinear_partial_overlap() {
        assert!(segment_segment(&reference(), &seg([0.0, 0.0, 0.0], [1.5, 0.0, 0.0]), EPS));
    }

    #[test]
    fn collinear_containment() {
        assert!(segment_segment(&reference(), &seg([-7.0, 0.0, 0.0], [2.0, 0.0, 0.0]), EPS));
    }

    #[test]
    fn identical_segments() {
        assert!(segment_segment(&reference(), &reference(), EPS));
    }

    #[test]
    fn symmetric() {
        let a = reference();
        let b = seg([0.5, 0.0, 0.0], [0.5, 9.0, 0.0]);
        let c = seg([3.0, 1.0, 0.0], [0.0, 6.0, 0.0]);
        assert_eq!(segment_segment(&a, &b, EPS), segment_segment(&b, &a, EPS));
        assert_eq!(segment_segment(&a, &c, EPS), segment_segment(&c, &a, EPS));
    }

    #[test]
    fn parallel_near_tolerance_is_order_independent() {
        let a = reference();
        for step in 0..40 {
            let offset = 0.5e-9 + step as f64 * 0.05e-9;
            for shift in [-2.5, -0.3, 0.7, 1.0 + 0.5e-9] {
                let b = seg([shift, offset, 0.0], [shift + 1.3, offset, 0.0]);
                let b_reversed = seg([shift + 1.3, offset, 0.0], [shift, offset, 0.0]);
                assert_eq!(segment_segment(&a, &b, EPS), segment_segment(&b, &a, EPS), "{offset} {shift}");
                assert_eq!(
                    segment_segment(&a, &b_reversed, EPS),
                    segment_segment(&b_reversed, &a, EPS),
                    "{offset} {shift}"
                );
            }
        }
    }

    #[test]
    fn argument_order_is_canonical() {
        let a = seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = seg([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(coordinate_order(&a, &b), Ordering::Greater);
        assert_eq!(coordinate_order(&b, &a), Ordering::Less);
        assert_eq!(coordinate_order(&a, &a), Ordering::Equal);
    }
}
