//! Geometric utility functions: seeded random point generation.
//!
//! Used by the round-trip property suites and the benchmarks; the generators
//! are deterministic for a given seed so failures reproduce exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::kernel::Geometry;
use crate::geometry::point::Point2;

/// Generate `count` random model points valid for the given geometry.
///
/// Euclidean points are drawn from a square around the origin, spherical
/// points from the stereographic plane (away from the projection pole), and
/// hyperbolic points from the open Poincaré disk.
///
/// # Examples
///
/// ```rust
/// use delaney::geometry::kernel::Geometry;
/// use delaney::geometry::util::random_model_points;
///
/// let points = random_model_points(Geometry::Hyperbolic, 100, 42);
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|p| p.norm() < 1.0));
/// ```
#[must_use]
pub fn random_model_points(geometry: Geometry, count: usize, seed: u64) -> Vec<Point2> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| random_model_point(geometry, &mut rng))
        .collect()
}

fn random_model_point(geometry: Geometry, rng: &mut SmallRng) -> Point2 {
    match geometry {
        Geometry::Euclidean => Point2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)),
        Geometry::Spherical => {
            // Radius up to 4 covers well past the lower hemisphere while
            // staying clear of the projection pole at infinity.
            Point2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0))
        }
        Geometry::Hyperbolic => loop {
            let candidate = Point2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            if candidate.norm() < 0.95 {
                return candidate;
            }
        },
    }
}
