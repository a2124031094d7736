//! Model-plane and embedded point types.
//!
//! All user-facing coordinates are 2D model coordinates ([`Point2`]): the
//! plane for Euclidean geometry, the stereographic plane for spherical, and
//! the Poincaré disk for hyperbolic. Internally the domain and the isometry
//! algebra work on embedded 3D points ([`Point3`]): the affine chart z = 1,
//! the unit sphere, or the upper hyperboloid sheet. The kernel converts
//! between the two representations.

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point of the 2D model plane.
///
/// # Examples
///
/// ```rust
/// use delaney::geometry::point::Point2;
///
/// let p = Point2::new(3.0, 4.0);
/// assert_eq!(p.norm(), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal model coordinate.
    pub x: f64,
    /// Vertical model coordinate.
    pub y: f64,
}

impl Point2 {
    /// Construct from model coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The model-plane origin.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Euclidean norm in the model plane.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another model point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Componentwise translation; used to apply raw drag deltas.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Dot product with another point read as a vector.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// The vector rotated a quarter turn counterclockwise.
    #[must_use]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Difference `self − other` read as a vector.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Scale the point read as a vector.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An embedded point of a geometry's model surface.
///
/// Which surface depends on the geometry the point came from:
/// - Euclidean: the affine chart z = 1,
/// - Spherical: the unit sphere x² + y² + z² = 1,
/// - Hyperbolic: the upper hyperboloid sheet x² + y² − z² = −1, z > 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub(crate) v: Vector3<f64>,
}

impl Point3 {
    /// Construct from embedded coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            v: Vector3::new(x, y, z),
        }
    }

    pub(crate) const fn from_vector(v: Vector3<f64>) -> Self {
        Self { v }
    }

    /// Embedded x coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.v.x
    }

    /// Embedded y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.v.y
    }

    /// Embedded z coordinate.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.v.z
    }

    /// Coordinates as an array.
    #[must_use]
    pub fn coords(&self) -> [f64; 3] {
        [self.v.x, self.v.y, self.v.z]
    }

    pub(crate) fn vector(&self) -> Vector3<f64> {
        self.v
    }

    /// Euclidean dot product of the embedding coordinates.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.v.dot(&other.v)
    }

    /// Minkowski form x·x' + y·y' − z·z' used by the hyperboloid model.
    #[must_use]
    pub fn minkowski_dot(&self, other: &Self) -> f64 {
        self.v.x * other.v.x + self.v.y * other.v.y - self.v.z * other.v.z
    }

    /// Whether all embedded coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.v.iter().all(|c| c.is_finite())
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.v.x, self.v.y, self.v.z)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point2_vector_helpers() {
        let p = Point2::new(1.0, 2.0);
        let q = Point2::new(4.0, 6.0);
        assert_relative_eq!(p.distance_to(q), 5.0);
        assert_relative_eq!(q.sub(p).dot(q.sub(p)), 25.0);
        assert_relative_eq!(p.perp().dot(p), 0.0);
        assert_eq!(p.offset(3.0, 4.0), q);
    }

    #[test]
    fn minkowski_norm_of_hyperboloid_origin() {
        let origin = Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(origin.minkowski_dot(&origin), -1.0);
    }
}
