//! Line segment representation.

use nalgebra::{Point3, Vector3};

use crate::BoundingVolume;

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point3<f64>,
    end: Point3<f64>,
}

impl Segment {
    /// Creates a new segment from its two endpoints.
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Returns the first endpoint.
    #[inline]
    pub fn start(&self) -> Point3<f64> {
        self.start
    }

    /// Returns the second endpoint.
    #[inline]
    pub fn end(&self) -> Point3<f64> {
        self.end
    }

    /// Returns the (unnormalized) vector from `start` to `end`.
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Returns the length of the segment.
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Returns the point at parameter `t` (0.0 = start, 1.0 = end).
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.start + self.direction() * t
    }

    /// Returns the point of the segment closest to `point`.
    pub fn closest_point(&self, point: Point3<f64>) -> Point3<f64> {
        let direction = self.direction();
        let length_sq = direction.norm_squared();
        if length_sq <= f64::EPSILON * f64::EPSILON {
            return self.start;
        }
        let t = (point - self.start).dot(&direction) / length_sq;
        self.point_at(t.clamp(0.0, 1.0))
    }

    /// Returns the axis-aligned box spanned by the endpoints.
    pub fn bounding_volume(&self) -> BoundingVolume {
        BoundingVolume::new(self.start, self.end)
    }
}
