//! Axis-aligned bounding volumes for single shapes.

use nalgebra::{Point3, Vector3};

/// An axis-aligned box enclosing a shape.
///
/// The box is stored by its exact min/max corners so that containment tests
/// against splitting planes compare the original vertex coordinates and never
/// a rounded `center ± halfwidth`. The center/halfwidth view used by the octree
/// is derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl BoundingVolume {
    /// Creates a bounding volume from two opposite corners.
    ///
    /// The corners are reordered per axis if necessary.
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// Returns the center of the box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the per-axis halfwidths of the box.
    pub fn halfwidths(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Returns the smallest box containing both `self` and `other`.
    pub fn merge(&self, other: &BoundingVolume) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Checks whether two boxes overlap or lie within `epsilon` of each other.
    pub fn overlaps(&self, other: &BoundingVolume, epsilon: f64) -> bool {
        (0..3).all(|axis| {
            self.min[axis] <= other.max[axis] + epsilon
                && other.min[axis] <= self.max[axis] + epsilon
        })
    }
}
