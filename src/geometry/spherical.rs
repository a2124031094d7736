//! Spherical kernel: the unit sphere with stereographic model coordinates.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::geometry::isometry::Isometry;
use crate::geometry::kernel::{Geometry, GeometryKernel};
use crate::geometry::point::{Point2, Point3};

/// Kernel for positive curvature.
///
/// Embedded points are unit vectors; the 2D model is the stereographic
/// projection from the south pole onto the equatorial plane, which maps the
/// origin to the north pole and is conformal, so model-plane angles are true
/// angles.
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalKernel;

impl GeometryKernel for SphericalKernel {
    fn geometry(&self) -> Geometry {
        Geometry::Spherical
    }

    fn distance(&self, a: &Point3, b: &Point3) -> f64 {
        a.dot(b).clamp(-1.0, 1.0).acos()
    }

    fn interpolate(&self, a: &Point3, b: &Point3, t: f64) -> Point3 {
        let omega = self.distance(a, b);
        if omega < 1e-9 {
            // Nearly coincident: chordal blend, renormalized.
            let blended = a.vector() * (1.0 - t) + b.vector() * t;
            return self.normalize(Point3::from_vector(blended));
        }
        let sin_omega = omega.sin();
        let blended = a.vector() * (((1.0 - t) * omega).sin() / sin_omega)
            + b.vector() * ((t * omega).sin() / sin_omega);
        self.normalize(Point3::from_vector(blended))
    }

    fn to_model(&self, p: Point2) -> Point3 {
        let s = p.dot(p);
        Point3::new(
            2.0 * p.x / (1.0 + s),
            2.0 * p.y / (1.0 + s),
            (1.0 - s) / (1.0 + s),
        )
    }

    fn from_model(&self, p: &Point3) -> Point2 {
        // Stereographic projection from the south pole; the pole itself is
        // excluded from the model, so the denominator is guarded only
        // against round-off.
        let denominator = (1.0 + p.z()).max(1e-12);
        Point2::new(p.x() / denominator, p.y() / denominator)
    }

    fn normalize(&self, p: Point3) -> Point3 {
        let norm = p.vector().norm();
        if norm < 1e-12 {
            return Point3::new(0.0, 0.0, 1.0);
        }
        Point3::from_vector(p.vector() / norm)
    }

    fn origin(&self) -> Point3 {
        Point3::new(0.0, 0.0, 1.0)
    }

    fn point_from_origin(&self, angle: f64, distance: f64) -> Point3 {
        let (sin_d, cos_d) = distance.sin_cos();
        Point3::new(sin_d * angle.cos(), sin_d * angle.sin(), cos_d)
    }

    fn translation_to_origin(&self, p: &Point3) -> Isometry {
        let rotation = Rotation3::rotation_between(&p.vector(), &Vector3::z()).unwrap_or_else(
            || {
                // Antipodal to the origin: any half-turn through the equator
                // works; pick the one about the x-axis.
                Rotation3::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
            },
        );
        Isometry::from_matrix(Geometry::Spherical, rotation.into_inner())
    }

    fn rotation_at_origin(&self, angle: f64) -> Isometry {
        let (sin, cos) = angle.sin_cos();
        let matrix = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
        Isometry::from_matrix(Geometry::Spherical, matrix)
    }

    fn reflection_at_origin(&self) -> Isometry {
        let matrix = Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, 1.0));
        Isometry::from_matrix(Geometry::Spherical, matrix)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const KERNEL: SphericalKernel = SphericalKernel;

    #[test]
    fn model_round_trip_is_identity() {
        for (x, y) in [(0.0, 0.0), (0.5, 0.25), (-1.5, 2.0), (3.0, -0.5)] {
            let p = Point2::new(x, y);
            let back = KERNEL.from_model(&KERNEL.to_model(p));
            assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn model_points_lie_on_the_unit_sphere() {
        let p = KERNEL.to_model(Point2::new(0.7, -0.3));
        assert_relative_eq!(p.dot(&p), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_between_poles_is_pi() {
        let north = Point3::new(0.0, 0.0, 1.0);
        let south = Point3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(KERNEL.distance(&north, &south), std::f64::consts::PI);
    }

    #[test]
    fn slerp_stays_on_sphere_and_splits_distance() {
        let a = KERNEL.to_model(Point2::new(0.2, 0.1));
        let b = KERNEL.to_model(Point2::new(-0.4, 0.6));
        let mid = KERNEL.midpoint(&a, &b);
        assert_relative_eq!(mid.dot(&mid), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            KERNEL.distance(&a, &mid),
            KERNEL.distance(&mid, &b),
            epsilon = 1e-9
        );
    }

    #[test]
    fn translation_to_origin_carries_point_home() {
        let p = KERNEL.to_model(Point2::new(0.8, -0.6));
        let carried = KERNEL.translation_to_origin(&p).apply(&p);
        assert!(KERNEL.distance(&carried, &KERNEL.origin()) < 1e-9);
    }

    #[test]
    fn translation_from_antipode_is_defined() {
        let south = Point3::new(0.0, 0.0, -1.0);
        let carried = KERNEL.translation_to_origin(&south).apply(&south);
        assert!(KERNEL.distance(&carried, &KERNEL.origin()) < 1e-9);
    }

    #[test]
    fn point_from_origin_has_requested_distance() {
        let p = KERNEL.point_from_origin(0.4, 1.2);
        assert_relative_eq!(KERNEL.distance(&KERNEL.origin(), &p), 1.2, epsilon = 1e-12);
    }
}
