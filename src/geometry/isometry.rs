//! Isometries as 3×3 matrices.
//!
//! Every isometry of the three model surfaces is a linear map of the
//! embedding: homogeneous affine maps on the z = 1 chart (Euclidean),
//! orthogonal matrices (spherical), and Lorentz transformations preserving
//! the upper sheet (hyperbolic). Composition is matrix multiplication for all
//! of them, which is what makes the boundary generator algebra uniform.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::geometry::kernel::Geometry;
use crate::geometry::point::Point3;

/// An isometry of one geometry's model surface.
///
/// # Examples
///
/// ```rust
/// use delaney::geometry::kernel::Geometry;
/// use delaney::geometry::point::Point2;
///
/// let kernel = Geometry::Hyperbolic.kernel();
/// let p = kernel.to_model(Point2::new(0.3, 0.1));
/// let rotation = kernel.rotation_about(&p, 1.0);
/// // A rotation fixes its center.
/// let fixed = rotation.apply(&p);
/// assert!(kernel.distance(&p, &fixed) < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Isometry {
    geometry: Geometry,
    matrix: Matrix3<f64>,
}

impl Isometry {
    /// The identity isometry.
    #[must_use]
    pub fn identity(geometry: Geometry) -> Self {
        Self {
            geometry,
            matrix: Matrix3::identity(),
        }
    }

    pub(crate) const fn from_matrix(geometry: Geometry, matrix: Matrix3<f64>) -> Self {
        Self { geometry, matrix }
    }

    /// The geometry this isometry acts on.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Composition `self ∘ other`: `other` is applied first.
    ///
    /// Associative, like the matrix product it is.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.geometry, other.geometry);
        Self {
            geometry: self.geometry,
            matrix: self.matrix * other.matrix,
        }
    }

    /// The inverse isometry.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let matrix = self
            .matrix
            .try_inverse()
            .unwrap_or_else(|| unreachable!("isometry matrices are invertible"));
        Self {
            geometry: self.geometry,
            matrix,
        }
    }

    /// Apply to an embedded point, re-projecting onto the model surface to
    /// keep floating drift from accumulating over long compositions.
    #[must_use]
    pub fn apply(&self, p: &Point3) -> Point3 {
        let raw = Point3::from_vector(self.matrix * p.vector());
        self.geometry.kernel().normalize(raw)
    }

    /// Whether this isometry reverses orientation (reflections and
    /// glide-reflections).
    #[must_use]
    pub fn is_orientation_reversing(&self) -> bool {
        let determinant = match self.geometry {
            // The affine chart embeds the linear part in the upper-left 2×2.
            Geometry::Euclidean => {
                self.matrix[(0, 0)] * self.matrix[(1, 1)]
                    - self.matrix[(0, 1)] * self.matrix[(1, 0)]
            }
            Geometry::Spherical | Geometry::Hyperbolic => self.matrix.determinant(),
        };
        determinant < 0.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point::Point2;

    #[test]
    fn composition_is_associative() {
        for geometry in [
            Geometry::Euclidean,
            Geometry::Spherical,
            Geometry::Hyperbolic,
        ] {
            let kernel = geometry.kernel();
            let a = kernel.rotation_at_origin(0.7);
            let b = kernel.translation_to_origin(&kernel.point_from_origin(0.3, 0.4));
            let c = kernel.reflection_at_origin();
            let left = a.compose(&b).compose(&c);
            let right = a.compose(&b.compose(&c));
            let p = kernel.to_model(Point2::new(0.2, -0.1));
            let from_left = left.apply(&p);
            let from_right = right.apply(&p);
            assert_relative_eq!(from_left.x(), from_right.x(), epsilon = 1e-12);
            assert_relative_eq!(from_left.y(), from_right.y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_undoes_application() {
        for geometry in [
            Geometry::Euclidean,
            Geometry::Spherical,
            Geometry::Hyperbolic,
        ] {
            let kernel = geometry.kernel();
            let p = kernel.to_model(Point2::new(0.25, 0.15));
            let isometry = kernel.rotation_about(&kernel.point_from_origin(1.0, 0.3), 0.9);
            let back = isometry.inverse().apply(&isometry.apply(&p));
            assert!(kernel.distance(&p, &back) < 1e-9);
        }
    }

    #[test]
    fn reflections_reverse_orientation() {
        for geometry in [
            Geometry::Euclidean,
            Geometry::Spherical,
            Geometry::Hyperbolic,
        ] {
            let kernel = geometry.kernel();
            assert!(kernel.reflection_at_origin().is_orientation_reversing());
            assert!(!kernel.rotation_at_origin(0.5).is_orientation_reversing());
        }
    }
}
