//! Orbit traversal primitives.
//!
//! Every higher layer enumerates tiles, edges, and vertices through the same
//! protocol: pick the smallest unvisited flag, mark its whole (i,j)-orbit,
//! move on. The per-orbit data computed here — orbit length `r`, chain flag
//! `f`, rotation order `v = m / r` — feeds the angle computation used by the
//! fundamental domain (total corner angle `2π / (f·v)`, per-chamber corner
//! angle `π / m`).

use std::f64::consts::PI;

use crate::core::collections::SmallBuffer;
use crate::core::flag::FlagId;
use crate::core::symbol::DSymbol;

impl DSymbol {
    /// All flags of the (i,j)-orbit of `a`, in discovery order starting
    /// at `a`.
    #[must_use]
    pub fn orbit(&self, i: usize, j: usize, a: FlagId) -> Vec<FlagId> {
        let mut seen = vec![false; self.size()];
        let mut order = Vec::new();
        let mut queue: SmallBuffer<FlagId, 8> = SmallBuffer::new();
        seen[a.index()] = true;
        queue.push(a);
        while let Some(x) = queue.pop() {
            order.push(x);
            for index in [i, j] {
                let y = self.sigma(index, x);
                if !seen[y.index()] {
                    seen[y.index()] = true;
                    queue.push(y);
                }
            }
        }
        order
    }

    /// Mark every flag of the (i,j)-orbit of `a` in `visited`.
    ///
    /// # Panics
    ///
    /// Panics if `visited` is shorter than the symbol size.
    pub fn mark_orbit(&self, i: usize, j: usize, a: FlagId, visited: &mut [bool]) {
        for x in self.orbit(i, j, a) {
            visited[x.index()] = true;
        }
    }

    /// Mark the (i,j)-orbit of `a` visited, then return the smallest flag
    /// greater than `a` that is still unvisited.
    ///
    /// This is the uniform "next representative" iteration protocol: starting
    /// from flag 1 and chaining `next_orbit` calls enumerates one flag per
    /// orbit exactly once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaney::prelude::*;
    ///
    /// let symbol: DSymbol = "<1.1:2:1 2,2,1 2:4,4>".parse().unwrap();
    /// let mut visited = vec![false; symbol.size()];
    /// let first = FlagId::from_number(1);
    /// // Flags 1 and 2 are joined by sigma_1, so one (1,2)-orbit covers both.
    /// assert_eq!(symbol.next_orbit(1, 2, first, &mut visited), None);
    /// ```
    pub fn next_orbit(
        &self,
        i: usize,
        j: usize,
        a: FlagId,
        visited: &mut [bool],
    ) -> Option<FlagId> {
        self.mark_orbit(i, j, a, visited);
        visited[a.index() + 1..]
            .iter()
            .position(|&seen| !seen)
            .map(|offset| FlagId::from_index(a.index() + 1 + offset))
    }

    /// One representative (the smallest flag) per (i,j)-orbit, ascending.
    #[must_use]
    pub fn orbit_representatives(&self, i: usize, j: usize) -> Vec<FlagId> {
        let mut visited = vec![false; self.size()];
        let mut reps = Vec::new();
        for a in self.flags() {
            if !visited[a.index()] {
                reps.push(a);
                self.mark_orbit(i, j, a, &mut visited);
            }
        }
        reps
    }

    /// Number of distinct (i,j)-orbits.
    #[must_use]
    pub fn count_orbits(&self, i: usize, j: usize) -> usize {
        self.orbit_representatives(i, j).len()
    }

    /// Orbit length `r`: the least k > 0 with (σiσj)^k(a) = a.
    #[must_use]
    pub fn orbit_length(&self, i: usize, j: usize, a: FlagId) -> u32 {
        let mut x = a;
        let mut k = 0_u32;
        loop {
            x = self.sigma(i, self.sigma(j, x));
            k += 1;
            if x == a {
                return k;
            }
            assert!(
                (k as usize) <= 2 * self.size(),
                "orbit walk failed to close; symbol validation is broken"
            );
        }
    }

    /// Whether the (i,j)-orbit of `a` is a chain (contains a flag fixed by
    /// σi or σj), as opposed to a full cycle.
    ///
    /// Chains are reflected at their fixed flags; the fix-point factor
    /// `f` is 2 for chains and 1 for cycles.
    #[must_use]
    pub fn is_chain(&self, i: usize, j: usize, a: FlagId) -> bool {
        self.orbit(i, j, a)
            .iter()
            .any(|&x| self.sigma(i, x) == x || self.sigma(j, x) == x)
    }

    /// Fix-point factor `f`: 2 for chain orbits, 1 for cycles.
    #[must_use]
    pub fn fixpoint_factor(&self, i: usize, j: usize, a: FlagId) -> u32 {
        if self.is_chain(i, j, a) {
            2
        } else {
            1
        }
    }

    /// Rotation order `v = m / r` of the (i,j)-orbit of `a`.
    ///
    /// `v > 1` marks a branch point: a cone point for cycles, a corner on a
    /// mirror boundary for chains.
    #[must_use]
    pub fn rotation_order(&self, i: usize, j: usize, a: FlagId) -> u32 {
        self.m(i, j, a) / self.orbit_length(i, j, a)
    }

    /// Total corner weight `f·v` of the (i,j)-orbit of `a`.
    #[must_use]
    pub fn corner_weight(&self, i: usize, j: usize, a: FlagId) -> u32 {
        self.fixpoint_factor(i, j, a) * self.rotation_order(i, j, a)
    }

    /// Total angle the fundamental domain subtends at this corner: `2π / (f·v)`.
    ///
    /// Interior full cycles get 2π; branched corners get `2π / v`, the rest
    /// being generated by the rotation; mirror corners get `π / v` between
    /// their two mirror lines.
    #[must_use]
    pub fn total_corner_angle(&self, i: usize, j: usize, a: FlagId) -> f64 {
        2.0 * PI / f64::from(self.corner_weight(i, j, a))
    }

    /// Corner angle of one chamber at this corner: `π / m`.
    ///
    /// Equals [`total_corner_angle`](DSymbol::total_corner_angle) divided
    /// evenly among the orbit's flags.
    #[must_use]
    pub fn chamber_corner_angle(&self, i: usize, j: usize, a: FlagId) -> f64 {
        PI / f64::from(self.m(i, j, a))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square_symbol() -> DSymbol {
        // One flag, all involutions identity: the {4,4} square tiling with
        // full *442 symmetry.
        "<1.1:1:1,1,1:4,4>".parse().unwrap()
    }

    #[test]
    fn single_flag_orbits() {
        let symbol = square_symbol();
        let a = FlagId::from_number(1);
        assert_eq!(symbol.orbit(0, 1, a), vec![a]);
        assert_eq!(symbol.orbit_length(0, 1, a), 1);
        assert!(symbol.is_chain(0, 1, a));
        assert_eq!(symbol.rotation_order(0, 1, a), 4);
        assert_eq!(symbol.corner_weight(0, 1, a), 8);
        assert_relative_eq!(symbol.total_corner_angle(0, 1, a), PI / 4.0);
        assert_relative_eq!(symbol.chamber_corner_angle(0, 1, a), PI / 4.0);
    }

    #[test]
    fn orbit_partition_covers_all_flags_once() {
        let symbol: DSymbol = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>"
            .parse()
            .unwrap();
        for (i, j) in [(0, 1), (0, 2), (1, 2)] {
            let mut counts = vec![0_u32; symbol.size()];
            for rep in symbol.orbit_representatives(i, j) {
                for x in symbol.orbit(i, j, rep) {
                    counts[x.index()] += 1;
                }
            }
            assert!(
                counts.iter().all(|&c| c == 1),
                "({i},{j})-orbits must partition the flags, got {counts:?}"
            );
        }
    }

    #[test]
    fn next_orbit_enumerates_representatives() {
        let symbol: DSymbol = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>"
            .parse()
            .unwrap();
        let mut visited = vec![false; symbol.size()];
        let mut reps = vec![FlagId::from_number(1)];
        while let Some(next) = symbol.next_orbit(1, 2, *reps.last().unwrap(), &mut visited) {
            reps.push(next);
        }
        assert_eq!(reps, symbol.orbit_representatives(1, 2));
    }

    #[test]
    fn hexagon_orbit_lengths() {
        let symbol: DSymbol = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>"
            .parse()
            .unwrap();
        let a = FlagId::from_number(1);
        // Single 12-flag tile orbit: a hexagon traversed without reflections.
        assert_eq!(symbol.orbit(0, 1, a).len(), 12);
        assert_eq!(symbol.orbit_length(0, 1, a), 6);
        assert!(!symbol.is_chain(0, 1, a));
        assert_eq!(symbol.rotation_order(0, 1, a), 1);
    }
}
