//! # delaney
//!
//! This is a library for computing and interactively editing **fundamental
//! domains of 2-dimensional orbifolds** encoded as
//! [Delaney–Dress symbols](https://en.wikipedia.org/wiki/Delaney%E2%80%93Dress_symbol).
//!
//! A D-symbol is a finite combinatorial structure — flags with three
//! involutions and branching numbers — that fully determines a tiling's
//! symmetry type, its geometry (Euclidean, spherical, or hyperbolic), and its
//! orbifold group. From a symbol this crate derives the combinatorial
//! invariants, realizes the symbol as an explicit chamber complex embedded in
//! the right homogeneous geometry with consistent boundary-gluing isometries,
//! and lets callers drag domain control points while a constraint solver
//! keeps the realization consistent.
//!
//! # Features
//!
//! - Canonical symbol text parsing and printing with exact round-trips
//! - Orbit enumeration, Euler characteristic, curvature, orientability
//! - Orbifold signatures and Conway-style group names (`*442`, `632`, `o`, …)
//! - Symbol transforms: dualization, orientation double cover, symmetry
//!   maximization
//! - Per-geometry kernels (flat plane, unit sphere, hyperboloid/Poincaré
//!   disk) behind one trait, with isometries as uniform 3×3 matrices
//! - Fundamental domain construction with exact boundary generators
//! - An interactive reshape solver driven by raw `(dx, dy)` drag deltas
//!
//! # Basic Usage
//!
//! ```rust
//! use delaney::prelude::*;
//!
//! // The heptagonal tiling {7,3} with its full symmetry group.
//! let symbol: DSymbol = "<1.1:1:1,1,1:7,3>".parse().unwrap();
//! assert_eq!(symbol.geometry(), Geometry::Hyperbolic);
//! assert_eq!(symbol.group_name(), "*732");
//!
//! // Realize it as a fundamental domain and drag an edge control point.
//! let mut domain = FundamentalDomain::build(&symbol);
//! let mut solver = ReshapeSolver::default();
//! solver.begin_drag(&domain, Handle::edge_center(2, FlagId::from_number(1)));
//! let outcome = solver.drag(&mut domain, 0.01, 0.0).unwrap();
//! assert!(outcome.converged);
//! let edit = solver.commit(&mut domain).unwrap();
//! assert_ne!(edit.before, edit.after);
//! ```
//!
//! # Invariants
//!
//! | Invariant | Where enforced |
//! |---|---|
//! | σi(σi(a)) = a for every flag and involution | [`DSymbol::from_parts`](core::symbol::DSymbol::from_parts) |
//! | (σ0σ2)² = id (edges have two sides) | [`DSymbol::from_parts`](core::symbol::DSymbol::from_parts) |
//! | branching constant on orbits, positive, r-divisible | [`DSymbol::from_parts`](core::symbol::DSymbol::from_parts) |
//! | `parse(print(s)) == s` | [`core::text`] |
//! | interior corner fans sum to a full turn | [`FundamentalDomain::build`](domain::fundamental_domain::FundamentalDomain::build) |
//! | boundary generators map their edges exactly | [`FundamentalDomain::generator_deviation`](domain::fundamental_domain::FundamentalDomain::generator_deviation) |
//! | drags preserve mirror symmetry and non-overlap | [`ReshapeSolver::drag`](reshape::solver::ReshapeSolver::drag) |
//!
//! Parsing is the only gate where invalid data can enter: a symbol that
//! fails closure is rejected with
//! [`MalformedSymbolError`](core::symbol::MalformedSymbolError) and nothing
//! downstream re-validates. Geometry classification degrades gracefully
//! (near-zero curvature is Euclidean by convention, logged via the `log`
//! facade), and the reshape solver never fails — it returns best-effort
//! positions with a convergence flag, because it runs once per pointer
//! event.
//!
//! # Scope
//!
//! Rendering, tessellation for display, persistence of symbol collections,
//! and undo stacks are external collaborators: the crate hands out immutable
//! [snapshots](domain::fundamental_domain::DomainSnapshot) and pure-data
//! [edit pairs](reshape::solver::ReshapeEdit) and performs no I/O of its
//! own.

#![forbid(unsafe_code)]

/// Symbol algebra: flags, involutions, orbits, invariants, transforms, and
/// the canonical text encoding.
pub mod core {
    pub mod collections;
    pub mod flag;
    pub mod groupname;
    pub mod invariants;
    pub mod orbits;
    pub mod symbol;
    pub mod text;
    pub mod transforms;

    pub use flag::*;
    pub use groupname::*;
    pub use symbol::*;
    pub use text::*;
}

/// Geometry kernels for the three homogeneous geometries, embedded points,
/// and matrix isometries.
pub mod geometry {
    pub mod euclidean;
    pub mod hyperbolic;
    pub mod isometry;
    pub mod kernel;
    pub mod point;
    pub mod spherical;
    /// Seeded random point generation for tests and benchmarks.
    pub mod util;

    pub use isometry::*;
    pub use kernel::*;
    pub use point::*;
}

/// Fundamental domain realization: the shared point arena, boundary
/// generators, and edit-surface handles.
pub mod domain {
    pub mod fundamental_domain;
    pub mod handle;

    pub use fundamental_domain::*;
    pub use handle::*;
}

/// Interactive reshaping: constraint projection, the drag state machine,
/// and the straightening post-pass.
pub mod reshape {
    pub(crate) mod constraints;
    pub mod solver;
    pub mod straighten;

    pub use solver::*;
    pub use straighten::*;
}

/// Re-exports of the commonly used types and functions.
pub mod prelude {
    pub use crate::core::collections::{FastHashMap, FastHashSet, SmallBuffer};
    pub use crate::core::flag::{flags, FlagId};
    pub use crate::core::groupname::OrbifoldSignature;
    pub use crate::core::symbol::{DSymbol, MalformedSymbolError};
    pub use crate::core::text::parse_symbol;
    pub use crate::domain::fundamental_domain::{
        CoordinateSnapshot, DomainSnapshot, FundamentalDomain, PointId,
    };
    pub use crate::domain::handle::{Handle, HandleKind};
    pub use crate::geometry::isometry::Isometry;
    pub use crate::geometry::kernel::{Geometry, GeometryKernel, Tolerances};
    pub use crate::geometry::point::{Point2, Point3};
    pub use crate::reshape::solver::{
        ConstraintUnsatisfiedWarning, DragOutcome, ReshapeEdit, ReshapeSolver, SolverConfig,
    };
    pub use crate::reshape::straighten::straighten_edges;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::is_normal;
    use crate::prelude::*;

    #[test]
    fn normal_types() {
        assert!(is_normal::<FlagId>());
        assert!(is_normal::<DSymbol>());
        assert!(is_normal::<Point2>());
        assert!(is_normal::<Point3>());
        assert!(is_normal::<Isometry>());
        assert!(is_normal::<FundamentalDomain>());
        assert!(is_normal::<ReshapeSolver>());
    }

    #[test]
    fn prelude_covers_the_pipeline() {
        let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
        assert_eq!(symbol.geometry(), Geometry::Euclidean);
        let domain = FundamentalDomain::build(&symbol);
        let snapshot = domain.snapshot();
        assert_eq!(snapshot.geometry, Geometry::Euclidean);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("Euclidean"));
    }
}
