//! Hyperbolic kernel: the upper hyperboloid sheet with Poincaré-disk model
//! coordinates.

use nalgebra::{Matrix3, Vector3};

use crate::geometry::isometry::Isometry;
use crate::geometry::kernel::{Geometry, GeometryKernel};
use crate::geometry::point::{Point2, Point3};

/// Largest admissible squared radius for Poincaré-disk input; points outside
/// are pulled radially inside the disk before lifting. The bound keeps the
/// lifted z coordinate small enough that the Minkowski form stays accurate.
const MAX_DISK_RADIUS_SQUARED: f64 = 1.0 - 1e-3;

/// Kernel for negative curvature.
///
/// Embedded points satisfy x² + y² − z² = −1 with z > 0; isometries are
/// Lorentz matrices preserving the sheet. The 2D model is the Poincaré disk,
/// which is conformal, so model-plane angles are true hyperbolic angles.
#[derive(Clone, Copy, Debug, Default)]
pub struct HyperbolicKernel;

impl GeometryKernel for HyperbolicKernel {
    fn geometry(&self) -> Geometry {
        Geometry::Hyperbolic
    }

    fn distance(&self, a: &Point3, b: &Point3) -> f64 {
        (-a.minkowski_dot(b)).max(1.0).acosh()
    }

    fn interpolate(&self, a: &Point3, b: &Point3, t: f64) -> Point3 {
        let d = self.distance(a, b);
        if d < 1e-9 {
            let blended = a.vector() * (1.0 - t) + b.vector() * t;
            return self.normalize(Point3::from_vector(blended));
        }
        let sinh_d = d.sinh();
        let blended = a.vector() * (((1.0 - t) * d).sinh() / sinh_d)
            + b.vector() * ((t * d).sinh() / sinh_d);
        self.normalize(Point3::from_vector(blended))
    }

    fn to_model(&self, p: Point2) -> Point3 {
        let mut u = p.x;
        let mut v = p.y;
        let mut s = p.dot(p);
        if s > MAX_DISK_RADIUS_SQUARED {
            let shrink = (MAX_DISK_RADIUS_SQUARED / s).sqrt();
            u *= shrink;
            v *= shrink;
            s = MAX_DISK_RADIUS_SQUARED;
        }
        let denominator = 1.0 - s;
        Point3::new(
            2.0 * u / denominator,
            2.0 * v / denominator,
            (1.0 + s) / denominator,
        )
    }

    fn from_model(&self, p: &Point3) -> Point2 {
        // z >= 1 on the upper sheet, so the denominator is at least 2.
        let denominator = 1.0 + p.z();
        Point2::new(p.x() / denominator, p.y() / denominator)
    }

    fn normalize(&self, p: Point3) -> Point3 {
        let q = -p.minkowski_dot(&p);
        let mut v = p.vector();
        if q > 1e-12 {
            v /= q.sqrt();
        }
        if v.z < 0.0 {
            v = -v;
        }
        Point3::from_vector(v)
    }

    fn origin(&self) -> Point3 {
        Point3::new(0.0, 0.0, 1.0)
    }

    fn point_from_origin(&self, angle: f64, distance: f64) -> Point3 {
        let sinh_d = distance.sinh();
        Point3::new(
            sinh_d * angle.cos(),
            sinh_d * angle.sin(),
            distance.cosh(),
        )
    }

    fn translation_to_origin(&self, p: &Point3) -> Isometry {
        let radial = p.x().hypot(p.y());
        if radial < 1e-12 {
            return Isometry::identity(Geometry::Hyperbolic);
        }
        let angle = p.y().atan2(p.x());
        let (sin, cos) = angle.sin_cos();
        let rotate_in = Matrix3::new(cos, sin, 0.0, -sin, cos, 0.0, 0.0, 0.0, 1.0);
        let rotate_out = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
        // Boost along x by -d, where cosh d = z and sinh d = radial.
        let boost = Matrix3::new(p.z(), 0.0, -radial, 0.0, 1.0, 0.0, -radial, 0.0, p.z());
        Isometry::from_matrix(Geometry::Hyperbolic, rotate_out * boost * rotate_in)
    }

    fn rotation_at_origin(&self, angle: f64) -> Isometry {
        let (sin, cos) = angle.sin_cos();
        let matrix = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
        Isometry::from_matrix(Geometry::Hyperbolic, matrix)
    }

    fn reflection_at_origin(&self) -> Isometry {
        let matrix = Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, 1.0));
        Isometry::from_matrix(Geometry::Hyperbolic, matrix)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const KERNEL: HyperbolicKernel = HyperbolicKernel;

    #[test]
    fn model_round_trip_is_identity() {
        for (x, y) in [(0.0, 0.0), (0.3, 0.2), (-0.7, 0.1), (0.05, -0.9)] {
            let p = Point2::new(x, y);
            let back = KERNEL.from_model(&KERNEL.to_model(p));
            assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn model_points_lie_on_the_sheet() {
        let p = KERNEL.to_model(Point2::new(0.4, -0.5));
        assert_relative_eq!(p.minkowski_dot(&p), -1.0, epsilon = 1e-9);
        assert!(p.z() >= 1.0);
    }

    #[test]
    fn distance_matches_boost_parameter() {
        let p = KERNEL.point_from_origin(0.0, 1.5);
        assert_relative_eq!(KERNEL.distance(&KERNEL.origin(), &p), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn geodesic_interpolation_splits_distance() {
        let a = KERNEL.to_model(Point2::new(0.1, 0.6));
        let b = KERNEL.to_model(Point2::new(-0.5, -0.2));
        let third = KERNEL.interpolate(&a, &b, 1.0 / 3.0);
        let total = KERNEL.distance(&a, &b);
        assert_relative_eq!(KERNEL.distance(&a, &third), total / 3.0, epsilon = 1e-9);
        assert_relative_eq!(
            KERNEL.distance(&third, &b),
            2.0 * total / 3.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn translation_to_origin_carries_point_home() {
        let p = KERNEL.to_model(Point2::new(0.6, -0.3));
        let carried = KERNEL.translation_to_origin(&p).apply(&p);
        assert!(KERNEL.distance(&carried, &KERNEL.origin()) < 1e-9);
    }

    #[test]
    fn boost_preserves_the_minkowski_form() {
        let p = KERNEL.to_model(Point2::new(0.2, 0.5));
        let boost = KERNEL.translation_to_origin(&p);
        let q = KERNEL.to_model(Point2::new(-0.1, 0.3));
        let moved = boost.apply(&q);
        assert_relative_eq!(moved.minkowski_dot(&moved), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn disk_boundary_input_is_clamped() {
        let p = KERNEL.to_model(Point2::new(2.0, 0.0));
        assert!(p.is_finite());
        assert_relative_eq!(p.minkowski_dot(&p), -1.0, epsilon = 1e-6);
    }
}
