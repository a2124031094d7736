//! Derived invariants of a Delaney-Dress symbol.
//!
//! Everything here is computed from the combinatorics alone: orbit counts
//! (tiles, edges, vertices), the Euler characteristic, the branching-aware
//! curvature whose sign selects the geometry, and the two orientability
//! notions (of the tiling, and of the quotient surface underlying the
//! orbifold).

use crate::core::symbol::DSymbol;
use crate::geometry::kernel::{Geometry, Tolerances};

impl DSymbol {
    /// Number of tiling vertices in the quotient: the (1,2)-orbit count.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.count_orbits(1, 2)
    }

    /// Number of tiling edges in the quotient: the (0,2)-orbit count.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.count_orbits(0, 2)
    }

    /// Number of tiles in the quotient: the (0,1)-orbit count.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.count_orbits(0, 1)
    }

    /// Euler characteristic `χ = V − E + F` of the quotient complex, where
    /// V, E, F are the (1,2)-, (0,2)-, and (0,1)-orbit counts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaney::prelude::*;
    ///
    /// // Hexagonal tiling of the torus: V = 2, E = 3, F = 1.
    /// let symbol: DSymbol = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>"
    ///     .parse()
    ///     .unwrap();
    /// assert_eq!(symbol.euler_characteristic(), 0);
    /// ```
    #[must_use]
    pub fn euler_characteristic(&self) -> i64 {
        let v = self.vertex_count() as i64;
        let e = self.edge_count() as i64;
        let f = self.tile_count() as i64;
        v - e + f
    }

    /// Branching-aware curvature `K = Σ_flags (1/m01 + 1/m12 − 1/2)`.
    ///
    /// The sign of K classifies the geometry the symbol tiles: positive ⇒
    /// spherical, zero ⇒ Euclidean, negative ⇒ hyperbolic. K equals twice
    /// the orbifold Euler characteristic of the quotient.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.flags()
            .map(|a| {
                1.0 / f64::from(self.m(0, 1, a)) + 1.0 / f64::from(self.m(1, 2, a)) - 0.5
            })
            .sum()
    }

    /// The homogeneous geometry selected by the curvature sign.
    ///
    /// Curvatures within the global tolerance of zero classify as Euclidean
    /// by convention (logged when the value is not exactly zero).
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::from_curvature(self.curvature(), Tolerances::default().eps)
    }

    /// Whether the tiling is orientable: the flag graph under σ0, σ1, σ2 is
    /// 2-colorable.
    ///
    /// A flag fixed by any involution is an odd loop, so symbols with mirror
    /// symmetries are non-orientable in this sense (the tiling group contains
    /// orientation-reversing isometries). Fails soft: any odd cycle simply
    /// yields `false`.
    #[must_use]
    pub fn is_orientable(&self) -> bool {
        self.two_colorable(false)
    }

    /// Whether the quotient surface underlying the orbifold is orientable.
    ///
    /// Mirror self-gluings lie on the surface boundary and impose no
    /// orientation constraint, so fixed flags are skipped here.
    #[must_use]
    pub(crate) fn surface_orientable(&self) -> bool {
        self.two_colorable(true)
    }

    fn two_colorable(&self, skip_fixed: bool) -> bool {
        let mut color: Vec<Option<bool>> = vec![None; self.size()];
        for start in self.flags() {
            if color[start.index()].is_some() {
                continue;
            }
            color[start.index()] = Some(false);
            let mut stack = vec![start];
            while let Some(x) = stack.pop() {
                let this = color[x.index()].unwrap_or_else(|| {
                    unreachable!("stacked flags are always colored first")
                });
                for index in 0..3 {
                    let y = self.sigma(index, x);
                    if y == x {
                        if skip_fixed {
                            continue;
                        }
                        return false;
                    }
                    match color[y.index()] {
                        None => {
                            color[y.index()] = Some(!this);
                            stack.push(y);
                        }
                        Some(other) => {
                            if other == this {
                                return false;
                            }
                        }
                    }
                }
            }
        }
        true
    }

    /// Euler characteristic of the quotient surface, computed from the full
    /// barycentric complex: corner orbits − σ-edge classes + chambers.
    ///
    /// Agrees with [`euler_characteristic`](DSymbol::euler_characteristic)
    /// for mirror-rich symbols but differs in branched rotation-only cases;
    /// the orbifold signature uses this one.
    #[must_use]
    pub(crate) fn surface_euler_characteristic(&self) -> i64 {
        let corners = (self.count_orbits(0, 1) + self.count_orbits(0, 2) + self.count_orbits(1, 2))
            as i64;
        let mut edge_classes = 0_i64;
        for index in 0..3 {
            let fixed = self.flags().filter(|&a| self.sigma(index, a) == a).count() as i64;
            let size = self.size() as i64;
            edge_classes += fixed + (size - fixed) / 2;
        }
        corners - edge_classes + self.size() as i64
    }
}
