//! Symbol transforms: dualization, orientation cover, symmetry maximization.
//!
//! Each transform is a pure function from a validated symbol to a new,
//! independently validated symbol. Transforming never mutates: callers that
//! hold fundamental domains rebuild them wholesale from the result.

use crate::core::collections::UnionFind;
use crate::core::flag::FlagId;
use crate::core::symbol::DSymbol;

impl DSymbol {
    /// The dual symbol: the roles of type-0 and type-2 indices are swapped,
    /// so vertices become tiles and vice versa.
    ///
    /// Applying `dualize` twice yields a symbol combinatorially identical to
    /// the original.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaney::prelude::*;
    ///
    /// let symbol: DSymbol = "<1.1:1:1,1,1:6,3>".parse().unwrap();
    /// let dual = symbol.dualize();
    /// assert_eq!(dual.m(0, 1, FlagId::from_number(1)), 3);
    /// assert_eq!(dual.dualize(), symbol);
    /// ```
    #[must_use]
    pub fn dualize(&self) -> Self {
        let sigma = [
            self.sigma_table(2).to_vec(),
            self.sigma_table(1).to_vec(),
            self.sigma_table(0).to_vec(),
        ];
        let m01 = self.m12_table().to_vec();
        let m12 = self.m01_table().to_vec();
        Self::from_parts(self.id(), self.size(), sigma, m01, m12)
            .unwrap_or_else(|err| unreachable!("dual of a valid symbol is valid: {err}"))
    }

    /// The orientation double cover: a symbol that is orientable and covers
    /// this one twofold.
    ///
    /// Returns a clone if the symbol is already orientable. Otherwise every
    /// flag is duplicated and every involution exchanges the two sheets, so
    /// the result's flag graph is 2-colorable by construction.
    #[must_use]
    pub fn orientate(&self) -> Self {
        if self.is_orientable() {
            return self.clone();
        }
        let n = self.size();
        let mut sigma: [Vec<FlagId>; 3] = [
            vec![FlagId::from_index(0); 2 * n],
            vec![FlagId::from_index(0); 2 * n],
            vec![FlagId::from_index(0); 2 * n],
        ];
        for index in 0..3 {
            for a in 0..n {
                let b = self.sigma(index, FlagId::from_index(a)).index();
                sigma[index][a] = FlagId::from_index(b + n);
                sigma[index][a + n] = FlagId::from_index(b);
            }
        }
        let mut m01 = self.m01_table().to_vec();
        m01.extend_from_slice(self.m01_table());
        let mut m12 = self.m12_table().to_vec();
        m12.extend_from_slice(self.m12_table());
        Self::from_parts(self.id(), 2 * n, sigma, m01, m12).unwrap_or_else(|err| {
            unreachable!("orientation cover of a valid symbol is valid: {err}")
        })
    }

    /// Quotient by all symbol self-morphisms: the combinatorially smallest
    /// symbol describing the same tiling with its full symmetry.
    ///
    /// Idempotent: `s.max_symmetry().max_symmetry() == s.max_symmetry()`.
    #[must_use]
    pub fn max_symmetry(&self) -> Self {
        let n = self.size();
        let mut classes = UnionFind::new(n);
        let first = FlagId::from_index(0);
        for b in 1..n {
            if let Some(map) = self.morphism(first, FlagId::from_index(b)) {
                for (a, image) in map.iter().enumerate() {
                    if let Some(image) = image {
                        classes.union(a, image.index());
                    }
                }
            }
        }

        // Number the classes by their smallest member, in ascending order.
        let mut min_of_root = vec![usize::MAX; n];
        for a in 0..n {
            let root = classes.find(a);
            min_of_root[root] = min_of_root[root].min(a);
        }
        let mut class_minima: Vec<usize> = (0..n)
            .filter(|&a| classes.find(a) == a)
            .map(|root| min_of_root[root])
            .collect();
        class_minima.sort_unstable();
        let mut new_index = vec![usize::MAX; n];
        for (fresh, &minimum) in class_minima.iter().enumerate() {
            let root = classes.find(minimum);
            for a in 0..n {
                if classes.find(a) == root {
                    new_index[a] = fresh;
                }
            }
        }

        let quotient_size = class_minima.len();
        let mut sigma: [Vec<FlagId>; 3] = [
            vec![FlagId::from_index(0); quotient_size],
            vec![FlagId::from_index(0); quotient_size],
            vec![FlagId::from_index(0); quotient_size],
        ];
        let mut m01 = vec![0_u32; quotient_size];
        let mut m12 = vec![0_u32; quotient_size];
        for (fresh, &minimum) in class_minima.iter().enumerate() {
            let rep = FlagId::from_index(minimum);
            for index in 0..3 {
                sigma[index][fresh] = FlagId::from_index(new_index[self.sigma(index, rep).index()]);
            }
            m01[fresh] = self.m(0, 1, rep);
            m12[fresh] = self.m(1, 2, rep);
        }
        Self::from_parts(self.id(), quotient_size, sigma, m01, m12).unwrap_or_else(|err| {
            unreachable!("morphism quotient of a valid symbol is valid: {err}")
        })
    }

    /// Attempt to extend `a0 ↦ b0` to a full symbol morphism.
    ///
    /// A morphism commutes with all three involutions and preserves both
    /// branching tables. Returns the flag map on `a0`'s connected component,
    /// or `None` on any conflict.
    fn morphism(&self, a0: FlagId, b0: FlagId) -> Option<Vec<Option<FlagId>>> {
        let mut map: Vec<Option<FlagId>> = vec![None; self.size()];
        map[a0.index()] = Some(b0);
        let mut stack = vec![(a0, b0)];
        while let Some((x, y)) = stack.pop() {
            if self.m(0, 1, x) != self.m(0, 1, y) || self.m(1, 2, x) != self.m(1, 2, y) {
                return None;
            }
            for index in 0..3 {
                let xs = self.sigma(index, x);
                let ys = self.sigma(index, y);
                match map[xs.index()] {
                    None => {
                        map[xs.index()] = Some(ys);
                        stack.push((xs, ys));
                    }
                    Some(existing) => {
                        if existing != ys {
                            return None;
                        }
                    }
                }
            }
        }
        Some(map)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HEXAGONAL_TORUS: &str = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>";

    #[test]
    fn dualize_is_an_involution() {
        for text in [HEXAGONAL_TORUS, "<1.1:1:1,1,1:4,4>", "<1.1:1:1,1,1:7,3>"] {
            let symbol: DSymbol = text.parse().unwrap();
            assert_eq!(symbol.dualize().dualize(), symbol);
        }
    }

    #[test]
    fn dualize_swaps_vertex_and_tile_counts() {
        let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
        let dual = symbol.dualize();
        assert_eq!(dual.vertex_count(), symbol.tile_count());
        assert_eq!(dual.tile_count(), symbol.vertex_count());
        assert_eq!(dual.edge_count(), symbol.edge_count());
        assert_eq!(dual.euler_characteristic(), symbol.euler_characteristic());
    }

    #[test]
    fn orientate_identity_on_orientable() {
        let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
        assert!(symbol.is_orientable());
        assert_eq!(symbol.orientate(), symbol);
    }

    #[test]
    fn orientate_doubles_mirrored_square() {
        let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
        let cover = symbol.orientate();
        assert_eq!(cover.size(), 2);
        assert!(cover.is_orientable());
        assert_eq!(cover.group_name(), "442");
    }

    #[test]
    fn max_symmetry_is_idempotent() {
        let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
        let minimal = symbol.max_symmetry();
        assert_eq!(minimal.max_symmetry(), minimal);
    }

    #[test]
    fn max_symmetry_collapses_hexagonal_torus() {
        // The 12-flag hexagonal torus has translational and rotational
        // symmetry left over; its minimal image is much smaller.
        let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
        let minimal = symbol.max_symmetry();
        assert!(minimal.size() < symbol.size());
        assert_eq!(minimal.geometry(), symbol.geometry());
    }
}
