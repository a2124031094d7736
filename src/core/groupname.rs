//! Orbifold signature and group name derivation.
//!
//! The quotient orbifold of a symbol is classified by its signature: cone
//! points (branched rotation centers in the interior), mirror boundary
//! components with their corner orders, and the handle/crosscap count of the
//! underlying surface. The signature formats as a Conway-style name such as
//! `*442`, `632`, `4*2`, `o`, or `1` for the trivial case.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::collections::FastHashSet;
use crate::core::flag::FlagId;
use crate::core::symbol::DSymbol;

/// The orbifold signature of a symbol's quotient.
///
/// # Examples
///
/// ```rust
/// use delaney::prelude::*;
///
/// let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
/// let signature = symbol.orbifold_signature();
/// assert_eq!(signature.to_string(), "*442");
/// assert_eq!(signature.boundary_components.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbifoldSignature {
    /// Cone point orders, sorted descending.
    pub cone_orders: Vec<u32>,
    /// One entry per mirror boundary component: its corner orders in
    /// canonical cyclic order.
    pub boundary_components: Vec<Vec<u32>>,
    /// Handle count of the underlying surface (orientable case).
    pub handles: u32,
    /// Crosscap count of the underlying surface (non-orientable case).
    pub crosscaps: u32,
    /// Whether the underlying quotient surface is orientable.
    pub orientable: bool,
}

impl fmt::Display for OrbifoldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for _ in 0..self.handles {
            f.write_str("o")?;
            wrote = true;
        }
        for order in &self.cone_orders {
            write!(f, "{order}")?;
            wrote = true;
        }
        for component in &self.boundary_components {
            f.write_str("*")?;
            for order in component {
                write!(f, "{order}")?;
            }
            wrote = true;
        }
        for _ in 0..self.crosscaps {
            f.write_str("x")?;
            wrote = true;
        }
        if !wrote {
            f.write_str("1")?;
        }
        Ok(())
    }
}

impl DSymbol {
    /// Derive the orbifold signature of the quotient.
    ///
    /// Cone orders come from branched cycle orbits, corner orders from
    /// branched chain orbits collected along the mirror boundary walk, and
    /// the handle/crosscap count from the quotient surface's Euler
    /// characteristic and orientability.
    #[must_use]
    pub fn orbifold_signature(&self) -> OrbifoldSignature {
        let mut cone_orders = Vec::new();
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            for rep in self.orbit_representatives(i, j) {
                let v = self.rotation_order(i, j, rep);
                if v >= 2 && !self.is_chain(i, j, rep) {
                    cone_orders.push(v);
                }
            }
        }
        cone_orders.sort_unstable_by(|a, b| b.cmp(a));

        let mut boundary_components = self.trace_mirror_boundaries();
        for component in &mut boundary_components {
            *component = canonical_cycle(component);
        }
        boundary_components.sort_unstable_by(|a, b| b.cmp(a));

        let orientable = self.surface_orientable();
        let chi = self.surface_euler_characteristic();
        let b = boundary_components.len() as i64;
        let (handles, crosscaps) = if orientable {
            let g = (2 - b - chi) / 2;
            (u32::try_from(g.max(0)).unwrap_or(0), 0)
        } else {
            let k = 2 - b - chi;
            (0, u32::try_from(k.max(0)).unwrap_or(0))
        };

        OrbifoldSignature {
            cone_orders,
            boundary_components,
            handles,
            crosscaps,
            orientable,
        }
    }

    /// Conway-style orbifold group name.
    #[must_use]
    pub fn group_name(&self) -> String {
        self.orbifold_signature().to_string()
    }

    /// Walk every mirror boundary component, collecting branched corner
    /// orders in traversal order.
    fn trace_mirror_boundaries(&self) -> Vec<Vec<u32>> {
        let mut components = Vec::new();
        let mut visited: FastHashSet<(FlagId, usize)> = FastHashSet::default();

        for start_flag in self.flags() {
            for start_k in 0..3 {
                if self.sigma(start_k, start_flag) != start_flag
                    || visited.contains(&(start_flag, start_k))
                {
                    continue;
                }
                let mut corners = Vec::new();
                let mut flag = start_flag;
                let mut k = start_k;
                // Exit through the smaller endpoint type of the starting edge.
                let mut exit = (0..3).find(|&t| t != start_k).unwrap_or(0);
                loop {
                    visited.insert((flag, k));
                    let w = 3 - k - exit;
                    let v = self.rotation_order(k, w, flag);
                    if v >= 2 {
                        corners.push(v);
                    }
                    let (next_flag, next_k) = self.chain_far_end(flag, k, w);
                    exit = 3 - next_k - exit;
                    flag = next_flag;
                    k = next_k;
                    if flag == start_flag && k == start_k {
                        break;
                    }
                }
                components.push(corners);
            }
        }
        components
    }

    /// Walk a chain orbit from the σk-fixed flag `a` to its far end.
    ///
    /// Returns the far end flag and the involution index fixing it there.
    fn chain_far_end(&self, a: FlagId, k: usize, w: usize) -> (FlagId, usize) {
        let mut x = a;
        let mut next = w;
        loop {
            let y = self.sigma(next, x);
            if y == x {
                return (x, next);
            }
            x = y;
            next = k + w - next;
        }
    }
}

/// Canonical representative of a cyclic sequence up to rotation and
/// reflection: the lexicographically greatest rotation of either direction.
fn canonical_cycle(sequence: &[u32]) -> Vec<u32> {
    if sequence.is_empty() {
        return Vec::new();
    }
    let mut best: Option<Vec<u32>> = None;
    let reversed: Vec<u32> = sequence.iter().rev().copied().collect();
    for candidate in [sequence.to_vec(), reversed] {
        for shift in 0..candidate.len() {
            let mut rotated = candidate[shift..].to_vec();
            rotated.extend_from_slice(&candidate[..shift]);
            if best.as_ref().is_none_or(|current| rotated > *current) {
                best = Some(rotated);
            }
        }
    }
    best.unwrap_or_default()
}
