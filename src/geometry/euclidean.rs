//! Euclidean kernel: the flat plane on the affine chart z = 1.

use nalgebra::Matrix3;

use crate::geometry::isometry::Isometry;
use crate::geometry::kernel::{Geometry, GeometryKernel};
use crate::geometry::point::{Point2, Point3};

/// Kernel for flat geometry.
///
/// Embedded points live on the chart z = 1 so that translations, rotations,
/// and reflections are all plain 3×3 homogeneous matrices, matching the
/// representation used by the curved geometries.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanKernel;

impl GeometryKernel for EuclideanKernel {
    fn geometry(&self) -> Geometry {
        Geometry::Euclidean
    }

    fn distance(&self, a: &Point3, b: &Point3) -> f64 {
        (a.x() - b.x()).hypot(a.y() - b.y())
    }

    fn interpolate(&self, a: &Point3, b: &Point3, t: f64) -> Point3 {
        Point3::new(
            a.x() + t * (b.x() - a.x()),
            a.y() + t * (b.y() - a.y()),
            1.0,
        )
    }

    fn to_model(&self, p: Point2) -> Point3 {
        Point3::new(p.x, p.y, 1.0)
    }

    fn from_model(&self, p: &Point3) -> Point2 {
        Point2::new(p.x(), p.y())
    }

    fn normalize(&self, p: Point3) -> Point3 {
        // Affine isometries keep the last row (0, 0, 1); the division is a
        // guard against drifted input.
        if (p.z() - 1.0).abs() < f64::EPSILON {
            p
        } else {
            Point3::new(p.x() / p.z(), p.y() / p.z(), 1.0)
        }
    }

    fn origin(&self) -> Point3 {
        Point3::new(0.0, 0.0, 1.0)
    }

    fn point_from_origin(&self, angle: f64, distance: f64) -> Point3 {
        Point3::new(distance * angle.cos(), distance * angle.sin(), 1.0)
    }

    fn translation_to_origin(&self, p: &Point3) -> Isometry {
        let matrix = Matrix3::new(1.0, 0.0, -p.x(), 0.0, 1.0, -p.y(), 0.0, 0.0, 1.0);
        Isometry::from_matrix(Geometry::Euclidean, matrix)
    }

    fn rotation_at_origin(&self, angle: f64) -> Isometry {
        let (sin, cos) = angle.sin_cos();
        let matrix = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
        Isometry::from_matrix(Geometry::Euclidean, matrix)
    }

    fn reflection_at_origin(&self) -> Isometry {
        let matrix = Matrix3::from_diagonal(&nalgebra::Vector3::new(1.0, -1.0, 1.0));
        Isometry::from_matrix(Geometry::Euclidean, matrix)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const KERNEL: EuclideanKernel = EuclideanKernel;

    #[test]
    fn model_round_trip_is_identity() {
        let p = Point2::new(2.5, -1.25);
        let back = KERNEL.from_model(&KERNEL.to_model(p));
        assert_relative_eq!(back.x, p.x);
        assert_relative_eq!(back.y, p.y);
    }

    #[test]
    fn midpoint_halves_distance() {
        let a = KERNEL.to_model(Point2::new(0.0, 0.0));
        let b = KERNEL.to_model(Point2::new(4.0, 0.0));
        let mid = KERNEL.midpoint(&a, &b);
        assert_relative_eq!(KERNEL.distance(&a, &mid), 2.0);
        assert_relative_eq!(KERNEL.distance(&mid, &b), 2.0);
    }

    #[test]
    fn frame_sends_segment_to_x_axis() {
        let p = KERNEL.to_model(Point2::new(1.0, 2.0));
        let q = KERNEL.to_model(Point2::new(3.0, 5.0));
        let frame = KERNEL.frame(&p, &q);
        let p_moved = frame.apply(&p);
        let q_moved = frame.apply(&q);
        assert_relative_eq!(p_moved.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(p_moved.y(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(q_moved.y(), 0.0, epsilon = 1e-12);
        assert!(q_moved.x() > 0.0);
        assert_relative_eq!(q_moved.x(), KERNEL.distance(&p, &q), epsilon = 1e-12);
    }

    #[test]
    fn reflection_across_fixes_the_geodesic() {
        let p = KERNEL.to_model(Point2::new(-1.0, 1.0));
        let q = KERNEL.to_model(Point2::new(2.0, 1.0));
        let reflection = KERNEL.reflection_across(&p, &q);
        let x = KERNEL.to_model(Point2::new(0.5, 3.0));
        let reflected = reflection.apply(&x);
        // The horizontal line y = 1 mirrors (0.5, 3) to (0.5, -1).
        assert_relative_eq!(reflected.x(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(reflected.y(), -1.0, epsilon = 1e-12);
        // Applying twice is the identity.
        let twice = reflection.apply(&reflected);
        assert_relative_eq!(twice.y(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn side_of_is_signed() {
        let p = KERNEL.origin();
        let q = KERNEL.to_model(Point2::new(1.0, 0.0));
        let above = KERNEL.to_model(Point2::new(0.5, 2.0));
        let below = KERNEL.to_model(Point2::new(0.5, -2.0));
        assert!(KERNEL.side_of(&p, &q, &above) > 0.0);
        assert!(KERNEL.side_of(&p, &q, &below) < 0.0);
    }
}
