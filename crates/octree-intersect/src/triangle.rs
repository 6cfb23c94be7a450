//! Triangle representation.

use nalgebra::{Point3, Vector3};

use crate::{BoundingVolume, Plane3D, Segment};

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f64>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    pub fn normal(&self) -> Vector3<f64> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal();
        let len = n.norm();
        if len > f64::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Returns the plane that this triangle lies on, or `None` if it is degenerate.
    pub fn plane(&self) -> Option<Plane3D> {
        let [a, b, c] = self.vertices;
        Plane3D::from_three_points(a, b, c)
    }

    /// Returns the three edges `ab`, `bc`, `ca`.
    pub fn edges(&self) -> [Segment; 3] {
        let [a, b, c] = self.vertices;
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)]
    }

    /// Returns the point of the triangle (interior or boundary) closest to `point`.
    ///
    /// Walks the Voronoi regions of the vertices, then the edges, and falls back
    /// to the barycentric projection onto the face. A triangle without a plane
    /// is treated as its three edges.
    pub fn closest_point(&self, point: Point3<f64>) -> Point3<f64> {
        if self.plane().is_none() {
            return self.closest_point_on_edges(point);
        }

        let [a, b, c] = self.vertices;
        let ab = b - a;
        let ac = c - a;

        let ap = point - a;
        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = point - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            return a + ab * (d1 / (d1 - d3));
        }

        let cp = point - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            return a + ac * (d2 / (d2 - d6));
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = 1.0 / (va + vb + vc);
        a + ab * (vb * denom) + ac * (vc * denom)
    }

    fn closest_point_on_edges(&self, point: Point3<f64>) -> Point3<f64> {
        let distance = |q: &Point3<f64>| (q - point).norm_squared();
        self.edges()
            .iter()
            .map(|edge| edge.closest_point(point))
            .min_by(|p, q| distance(p).total_cmp(&distance(q)))
            .unwrap_or(self.vertices[0])
    }

    /// Returns the axis-aligned box spanned by the vertices.
    pub fn bounding_volume(&self) -> BoundingVolume {
        let [a, b, c] = self.vertices;
        BoundingVolume::new(a, b).merge(&BoundingVolume::new(c, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn normal_follows_winding() {
        let tri = unit_triangle();
        assert_relative_eq!(tri.unit_normal().unwrap(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_triangle_has_no_plane() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(3.0, 3.0, 0.0),
        );
        assert!(tri.unit_normal().is_none());
        assert!(tri.plane().is_none());
    }

    #[test]
    fn closest_point_regions() {
        let tri = unit_triangle();

        // Above the interior projects straight down
        assert_relative_eq!(
            tri.closest_point(Point3::new(0.25, 0.25, 2.0)),
            Point3::new(0.25, 0.25, 0.0)
        );
        // Vertex regions
        assert_relative_eq!(tri.closest_point(Point3::new(-1.0, -1.0, 0.0)), Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(tri.closest_point(Point3::new(3.0, -0.5, 1.0)), Point3::new(1.0, 0.0, 0.0));
        // Hypotenuse region
        assert_relative_eq!(
            tri.closest_point(Point3::new(1.0, 1.0, 0.0)),
            Point3::new(0.5, 0.5, 0.0)
        );
    }

    #[test]
    fn closest_point_on_collapsed_triangle() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert_relative_eq!(tri.closest_point(Point3::new(1.0, 0.0, 0.0)), Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(tri.closest_point(Point3::new(1.0, 3.0, 0.0)), Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(tri.closest_point(Point3::new(5.0, 0.0, 1.0)), Point3::new(2.0, 0.0, 0.0));

        let all_same = Triangle::new(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(all_same.closest_point(Point3::origin()), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn bounding_volume_covers_vertices() {
        let tri = Triangle::new(
            Point3::new(0.0, 2.0, -1.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(-1.0, 1.0, 4.0),
        );
        let volume = tri.bounding_volume();
        assert_eq!(volume.min(), Point3::new(-1.0, 0.0, -1.0));
        assert_eq!(volume.max(), Point3::new(3.0, 2.0, 4.0));
    }

    #[test]
    fn edges_form_a_loop() {
        let tri = unit_triangle();
        let [ab, bc, ca] = tri.edges();
        assert_eq!(ab.end(), bc.start());
        assert_eq!(bc.end(), ca.start());
        assert_eq!(ca.end(), ab.start());
    }
}
