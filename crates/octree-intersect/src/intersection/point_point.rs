//! Point–point test.

use nalgebra::Point3;

/// Checks whether two points coincide within `epsilon`.
pub fn point_point(a: &Point3<f64>, b: &Point3<f64>, epsilon: f64) -> bool {
    (a - b).norm() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(point_point(&p, &p, 0.0));
        assert!(point_point(&p, &Point3::new(1.0, 2.0, 3.0 + 1e-12), 1e-9));
    }

    #[test]
    fn distinct_points() {
        assert!(!point_point(&Point3::origin(), &Point3::new(0.0, 0.0, 1e-6), 1e-9));
    }
}
