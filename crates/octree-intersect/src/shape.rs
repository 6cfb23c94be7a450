//! Indexed shapes stored in the octree.

use nalgebra::Point3;

use crate::{BoundingVolume, Segment, Triangle};

/// The kind of primitive a [`Shape`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    /// A single point.
    Point,
    /// A line segment.
    Segment,
    /// A non-degenerate triangle.
    Triangle,
}

/// The geometry of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A single point.
    Point(Point3<f64>),
    /// A line segment.
    Segment(Segment),
    /// A non-degenerate triangle.
    Triangle(Triangle),
}

impl Geometry {
    /// Returns the kind tag of this geometry.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Point(_) => ShapeKind::Point,
            Geometry::Segment(_) => ShapeKind::Segment,
            Geometry::Triangle(_) => ShapeKind::Triangle,
        }
    }

    /// Computes the axis-aligned bounding volume of the geometry.
    pub fn bounding_volume(&self) -> BoundingVolume {
        match self {
            Geometry::Point(p) => BoundingVolume::new(*p, *p),
            Geometry::Segment(seg) => seg.bounding_volume(),
            Geometry::Triangle(tri) => tri.bounding_volume(),
        }
    }
}

/// A primitive tagged with a caller-assigned index.
///
/// The index is reported verbatim in intersection results and is not checked
/// for uniqueness. The bounding volume is computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    index: usize,
    geometry: Geometry,
    bounding_volume: BoundingVolume,
}

impl Shape {
    /// Creates a shape from its geometry.
    pub fn new(index: usize, geometry: Geometry) -> Self {
        Self {
            index,
            bounding_volume: geometry.bounding_volume(),
            geometry,
        }
    }

    /// Creates a point shape.
    pub fn point(index: usize, point: Point3<f64>) -> Self {
        Self::new(index, Geometry::Point(point))
    }

    /// Creates a segment shape.
    pub fn segment(index: usize, start: Point3<f64>, end: Point3<f64>) -> Self {
        Self::new(index, Geometry::Segment(Segment::new(start, end)))
    }

    /// Creates a triangle shape.
    ///
    /// The caller is responsible for the triangle being non-degenerate; use
    /// [`Shape::from_vertices`] for input that may collapse.
    pub fn triangle(index: usize, a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self::new(index, Geometry::Triangle(Triangle::new(a, b, c)))
    }

    /// Creates the simplest shape described by three vertices.
    ///
    /// - all three vertices coincide (within `epsilon`): a point;
    /// - the vertices are collinear: a segment between the two farthest vertices;
    /// - otherwise: a triangle.
    pub fn from_vertices(index: usize, vertices: [Point3<f64>; 3], epsilon: f64) -> Self {
        let [a, b, c] = vertices;
        let longest = Triangle::new(a, b, c)
            .edges()
            .into_iter()
            .max_by(|e, f| e.length().total_cmp(&f.length()))
            .unwrap_or(Segment::new(a, b));

        if longest.length() <= epsilon {
            return Self::point(index, a);
        }

        // Twice the triangle area over the longest side is the height of the
        // third vertex above that side.
        let height = (b - a).cross(&(c - a)).norm() / longest.length();
        if height <= epsilon {
            return Self::segment(index, longest.start(), longest.end());
        }

        Self::triangle(index, a, b, c)
    }

    /// Returns the caller-assigned index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the geometry of the shape.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the kind of primitive.
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Returns the bounding volume of the shape.
    #[inline]
    pub fn bounding_volume(&self) -> &BoundingVolume {
        &self.bounding_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GEOMETRY_EPSILON;

    #[test]
    fn from_vertices_keeps_triangles() {
        let shape = Shape::from_vertices(
            7,
            [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            GEOMETRY_EPSILON,
        );
        assert_eq!(shape.kind(), ShapeKind::Triangle);
        assert_eq!(shape.index(), 7);
    }

    #[test]
    fn from_vertices_collapses_to_point() {
        let p = Point3::new(2.0, -1.0, 0.5);
        let shape = Shape::from_vertices(0, [p, p, p], GEOMETRY_EPSILON);
        assert_eq!(shape.geometry(), &Geometry::Point(p));
    }

    #[test]
    fn from_vertices_collapses_to_longest_segment() {
        let shape = Shape::from_vertices(
            3,
            [Point3::new(1.0, 1.0, 1.0), Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 3.0)],
            GEOMETRY_EPSILON,
        );
        match shape.geometry() {
            Geometry::Segment(seg) => {
                let mut ends = [seg.start(), seg.end()];
                ends.sort_by(|p, q| p.x.total_cmp(&q.x));
                assert_eq!(ends, [Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 3.0, 3.0)]);
            }
            other => panic!("expected a segment, got {other:?}"),
        }
    }

    #[test]
    fn from_vertices_with_repeated_vertex_is_segment() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(0.0, 2.0, 0.0);
        let shape = Shape::from_vertices(1, [a, b, a], GEOMETRY_EPSILON);
        assert_eq!(shape.kind(), ShapeKind::Segment);
    }

    #[test]
    fn bounding_volume_is_cached_from_geometry() {
        let shape = Shape::segment(0, Point3::new(1.0, 0.0, 0.0), Point3::new(-1.0, 2.0, 0.0));
        assert_eq!(shape.bounding_volume().min(), Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(shape.bounding_volume().max(), Point3::new(1.0, 2.0, 0.0));
    }
}
