//! Geometry kernel abstraction.
//!
//! The kernel encapsulates all metric operations of a homogeneous geometry so
//! the symbol algebra and the fundamental domain stay purely combinatorial,
//! and so no code ever branches on the geometry more than once: the
//! [`Geometry`] variant is selected from the symbol's curvature sign and the
//! corresponding kernel is threaded through explicitly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::euclidean::EuclideanKernel;
use crate::geometry::hyperbolic::HyperbolicKernel;
use crate::geometry::isometry::Isometry;
use crate::geometry::point::{Point2, Point3};
use crate::geometry::spherical::SphericalKernel;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Global numeric tolerances.
///
/// `eps` is the equality threshold used everywhere (orbit closure checks,
/// boundary coincidence detection, generator verification); `nudge` is the
/// inward offset applied to constraint boundaries before projection so that
/// round-off does not re-trigger the violation just fixed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Equality threshold for geometric coincidence.
    pub eps: f64,
    /// Inward nudge applied to constraint boundaries, in model units.
    pub nudge: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            eps: 1e-7,
            nudge: 1e-5,
        }
    }
}

// =============================================================================
// GEOMETRY SELECTION
// =============================================================================

/// The three homogeneous geometries a symbol can tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    /// Flat geometry; curvature zero.
    Euclidean,
    /// Positive curvature; the model surface is the unit sphere.
    Spherical,
    /// Negative curvature; the model surface is the upper hyperboloid sheet.
    Hyperbolic,
}

impl Geometry {
    /// Classify a curvature value.
    ///
    /// Values within `eps` of zero classify as Euclidean by convention; a
    /// nonzero value inside the tolerance band is logged because the caller
    /// cannot distinguish an exactly flat symbol from a borderline one.
    #[must_use]
    pub fn from_curvature(curvature: f64, eps: f64) -> Self {
        if curvature > eps {
            Self::Spherical
        } else if curvature < -eps {
            Self::Hyperbolic
        } else {
            if curvature != 0.0 {
                log::warn!(
                    "curvature {curvature:e} is within tolerance of zero; \
                     classifying as Euclidean by convention"
                );
            }
            Self::Euclidean
        }
    }

    /// The kernel implementing this geometry's metric operations.
    ///
    /// Returned once and threaded through; callers never re-dispatch per
    /// operation.
    #[must_use]
    pub fn kernel(self) -> &'static dyn GeometryKernel {
        match self {
            Self::Euclidean => &EuclideanKernel,
            Self::Spherical => &SphericalKernel,
            Self::Hyperbolic => &HyperbolicKernel,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Euclidean => "Euclidean",
            Self::Spherical => "Spherical",
            Self::Hyperbolic => "Hyperbolic",
        };
        f.write_str(name)
    }
}

// =============================================================================
// KERNEL TRAIT
// =============================================================================

/// Metric operations of one homogeneous geometry.
///
/// Primitive operations (distance, interpolation, model conversion, the
/// origin-based isometry constructors) are implemented per geometry; the
/// compound constructions (frames, reflections across geodesics, edge
/// correspondences, side tests) are shared default methods built from the
/// primitives, so they behave uniformly across all three geometries.
pub trait GeometryKernel: fmt::Debug + Sync {
    /// Which geometry this kernel implements.
    fn geometry(&self) -> Geometry;

    /// Geodesic distance between two embedded points.
    fn distance(&self, a: &Point3, b: &Point3) -> f64;

    /// Point at parameter `t` along the geodesic from `a` (t = 0) to
    /// `b` (t = 1).
    fn interpolate(&self, a: &Point3, b: &Point3, t: f64) -> Point3;

    /// Geodesic midpoint.
    fn midpoint(&self, a: &Point3, b: &Point3) -> Point3 {
        self.interpolate(a, b, 0.5)
    }

    /// Lift a 2D model point onto the embedded model surface.
    fn to_model(&self, p: Point2) -> Point3;

    /// Project an embedded point back to 2D model coordinates.
    fn from_model(&self, p: &Point3) -> Point2;

    /// Re-project a drifted point exactly onto the model surface.
    fn normalize(&self, p: Point3) -> Point3;

    /// The embedded origin (maps to the 2D origin).
    fn origin(&self) -> Point3;

    /// The point at the given polar angle and geodesic distance from the
    /// origin.
    fn point_from_origin(&self, angle: f64, distance: f64) -> Point3;

    /// Isometry carrying `p` to the origin.
    fn translation_to_origin(&self, p: &Point3) -> Isometry;

    /// Rotation by `angle` fixing the origin.
    fn rotation_at_origin(&self, angle: f64) -> Isometry;

    /// Reflection across the x-axis geodesic through the origin.
    fn reflection_at_origin(&self) -> Isometry;

    /// Rotation by `angle` fixing an arbitrary point.
    fn rotation_about(&self, p: &Point3, angle: f64) -> Isometry {
        let t = self.translation_to_origin(p);
        t.inverse()
            .compose(&self.rotation_at_origin(angle))
            .compose(&t)
    }

    /// Canonical frame of the ordered pair (p, q): carries `p` to the origin
    /// and `q` onto the positive-x geodesic ray.
    fn frame(&self, p: &Point3, q: &Point3) -> Isometry {
        let t = self.translation_to_origin(p);
        let moved = t.apply(q);
        let angle = moved.y().atan2(moved.x());
        self.rotation_at_origin(-angle).compose(&t)
    }

    /// Reflection across the geodesic through `p` and `q`.
    fn reflection_across(&self, p: &Point3, q: &Point3) -> Isometry {
        let f = self.frame(p, q);
        f.inverse().compose(&self.reflection_at_origin()).compose(&f)
    }

    /// Isometry mapping the geodesic segment `from.0 → from.1` onto
    /// `to.0 → to.1`, which exists exactly when the segments have equal
    /// length. With `flip`, the sides of the segment are exchanged.
    fn edge_map(&self, from: (&Point3, &Point3), to: (&Point3, &Point3), flip: bool) -> Isometry {
        let source = self.frame(from.0, from.1);
        let target_inverse = self.frame(to.0, to.1).inverse();
        if flip {
            target_inverse
                .compose(&self.reflection_at_origin())
                .compose(&source)
        } else {
            target_inverse.compose(&source)
        }
    }

    /// Signed side of `x` relative to the oriented geodesic through `p`
    /// then `q`: positive on the left, negative on the right, zero on the
    /// geodesic.
    fn side_of(&self, p: &Point3, q: &Point3, x: &Point3) -> f64 {
        self.frame(p, q).apply(x).y()
    }

    /// Angle at `p` between the geodesics toward `x` and toward `y`,
    /// in `[0, π]`.
    fn angle_at(&self, p: &Point3, x: &Point3, y: &Point3) -> f64 {
        let t = self.translation_to_origin(p);
        let moved_x = t.apply(x);
        let moved_y = t.apply(y);
        let difference =
            moved_x.y().atan2(moved_x.x()) - moved_y.y().atan2(moved_y.x());
        let wrapped = difference.rem_euclid(2.0 * std::f64::consts::PI);
        wrapped.min(2.0 * std::f64::consts::PI - wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curvature_classification() {
        let eps = Tolerances::default().eps;
        assert_eq!(Geometry::from_curvature(0.5, eps), Geometry::Spherical);
        assert_eq!(Geometry::from_curvature(-0.5, eps), Geometry::Hyperbolic);
        assert_eq!(Geometry::from_curvature(0.0, eps), Geometry::Euclidean);
        // Within the tolerance band: Euclidean by convention.
        assert_eq!(Geometry::from_curvature(1e-9, eps), Geometry::Euclidean);
        assert_eq!(Geometry::from_curvature(-1e-9, eps), Geometry::Euclidean);
    }

    #[test]
    fn kernel_reports_its_geometry() {
        for geometry in [
            Geometry::Euclidean,
            Geometry::Spherical,
            Geometry::Hyperbolic,
        ] {
            assert_eq!(geometry.kernel().geometry(), geometry);
        }
    }
}
