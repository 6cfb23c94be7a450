//! Planes used by the segment and triangle predicates.

use nalgebra::{Point3, Vector3};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane3D {
    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// Returns `None` if the normal has (near) zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        let norm = normal.norm();
        if norm <= f64::EPSILON {
            return None;
        }
        let unit_normal = normal / norm;
        Some(Self {
            normal: unit_normal,
            offset: unit_normal.dot(&point.coords),
        })
    }

    /// Creates a plane through three points, normal `(b - a) × (c - a)`.
    ///
    /// Returns `None` if the points are collinear.
    pub fn from_three_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        Self::from_point_and_normal(a, (b - a).cross(&(c - a)))
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    pub fn classify_point(&self, point: Point3<f64>, epsilon: f64) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Computes where the segment `start → end` crosses the plane.
    ///
    /// Returns `Some((t, point))` with `t ∈ [0, 1]`, or `None` if the segment
    /// is parallel to the plane or does not reach it.
    pub fn intersect_segment(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
    ) -> Option<(f64, Point3<f64>)> {
        let direction = end - start;
        let denom = self.normal.dot(&direction);

        if denom.abs() <= f64::EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(&start.coords)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some((t, start + direction * t))
    }
}
