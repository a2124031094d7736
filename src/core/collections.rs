//! Collection types tuned for the small, dense structures of symbol algebra.
//!
//! Delaney-Dress symbols are tiny (tens of flags), so the collections here
//! favor low constant factors over asymptotics: non-cryptographic hashing and
//! stack-allocated buffers sized for typical orbit lengths.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// `HashMap` with the fast non-cryptographic `FxHasher`.
///
/// Keys are always internal ids (`FlagId`, `PointId`), never
/// attacker-controlled data, so DoS resistance is not a concern.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// `HashSet` counterpart of [`FastHashMap`].
pub type FastHashSet<K> = FxHashSet<K>;

/// Stack-allocated buffer for short sequences.
///
/// The inline capacity of 8 covers the orbit lengths and constraint sets that
/// dominate this crate; longer sequences spill to the heap transparently.
///
/// # Examples
///
/// ```rust
/// use delaney::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<u32, 8> = SmallBuffer::new();
/// buffer.push(42);
/// assert_eq!(buffer.len(), 1);
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Create a [`FastHashMap`] with pre-allocated capacity.
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

/// Create a [`FastHashSet`] with pre-allocated capacity.
#[must_use]
pub fn fast_hash_set_with_capacity<K>(capacity: usize) -> FastHashSet<K> {
    FastHashSet::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

/// Minimal union-find with path halving.
///
/// Unions attach the larger root under the smaller, so the root of a class
/// is always its minimal member; both the morphism quotient and the realized
/// point merging rely on that to pick deterministic representatives.
#[derive(Clone, Debug)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    pub(crate) fn find(&mut self, mut a: usize) -> usize {
        while self.parent[a] != a {
            self.parent[a] = self.parent[self.parent[a]];
            a = self.parent[a];
        }
        a
    }

    pub(crate) fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            let (lo, hi) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            self.parent[hi] = lo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_helpers() {
        let map = fast_hash_map_with_capacity::<u32, usize>(100);
        assert!(map.capacity() >= 100);

        let set = fast_hash_set_with_capacity::<u32>(50);
        assert!(set.capacity() >= 50);
    }

    #[test]
    fn small_buffer_spills() {
        let mut buffer: SmallBuffer<u32, 2> = SmallBuffer::new();
        for i in 0..10 {
            buffer.push(i);
        }
        assert_eq!(buffer.len(), 10);
        assert!(buffer.spilled());
    }
}
