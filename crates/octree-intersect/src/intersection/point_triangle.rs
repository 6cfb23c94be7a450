//! Point–triangle test.

use nalgebra::Point3;

use crate::Triangle;

/// Checks whether a point lies on a triangle, boundary included (within `epsilon`).
pub fn point_triangle(point: &Point3<f64>, triangle: &Triangle, epsilon: f64) -> bool {
    (triangle.closest_point(*point) - point).norm() <= epsilon
}
