//! The Delaney-Dress symbol data structure and its validation.
//!
//! A D-symbol is a finite set of flags `1..=n` together with three involutions
//! σ0, σ1, σ2 and branching numbers that are constant on the orbits of each
//! involution pair. The symbol fully determines a 2-dimensional tiling's
//! combinatorial and symmetric type; everything else in this crate (geometry
//! classification, fundamental domain, reshape constraints) is derived from it.
//!
//! Symbols are immutable once validated. The only way to obtain a [`DSymbol`]
//! is through [`DSymbol::from_parts`] (used by the text parser, the transforms,
//! and programmatic construction in tests), which runs the full closure
//! validation. Downstream components assume a validated symbol and assert on
//! contract violations instead of re-validating.

// =============================================================================
// IMPORTS
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::flag::{flags, FlagId};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors produced by parsing or validating a Delaney-Dress symbol.
///
/// Every variant is fatal to the offending symbol: no partial symbol and no
/// geometry is ever built from malformed input. This is the single gate at
/// which invalid data can enter the system.
///
/// # Examples
///
/// ```rust
/// use delaney::core::symbol::MalformedSymbolError;
///
/// let err = MalformedSymbolError::Empty;
/// assert_eq!(err.to_string(), "symbol has no flags");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedSymbolError {
    /// The symbol has size zero.
    #[error("symbol has no flags")]
    Empty,

    /// A σ or branching table has the wrong number of entries.
    #[error("table {name} has wrong length: expected {expected}, found {found}")]
    TableLength {
        /// Which table was malformed (e.g. `"sigma_1"`, `"m01"`).
        name: &'static str,
        /// Number of entries required by the symbol size.
        expected: usize,
        /// Number of entries actually present.
        found: usize,
    },

    /// A flag reference lies outside `1..=n`.
    #[error("flag {value} out of range 1..={size}")]
    FlagOutOfRange {
        /// The offending 1-based flag number.
        value: u32,
        /// The symbol size.
        size: usize,
    },

    /// An involution table fails σ(σ(a)) = a.
    #[error("sigma_{index} is not an involution at flag {flag}")]
    NotInvolutive {
        /// Involution index 0, 1, or 2.
        index: usize,
        /// The 1-based flag at which the law fails.
        flag: u32,
    },

    /// Two different targets were asserted for the same σ-image.
    #[error("conflicting sigma_{index} assignment at flag {flag}: {existing} vs {asserted}")]
    ConflictingInvolution {
        /// Involution index 0, 1, or 2.
        index: usize,
        /// The 1-based flag with conflicting assignments.
        flag: u32,
        /// The previously recorded image.
        existing: u32,
        /// The newly asserted, contradicting image.
        asserted: u32,
    },

    /// A 0/2-orbit is longer than 2, i.e. σ0 and σ2 do not commute.
    ///
    /// In a 2-dimensional symbol every edge has exactly two endpoints and two
    /// incident tiles, so (σ0σ2)² = id must hold at every flag.
    #[error("sigma_0 and sigma_2 do not commute at flag {flag}")]
    EdgeOrbitTooLong {
        /// A 1-based flag witnessing the violation.
        flag: u32,
    },

    /// A branching number is zero.
    #[error("branching number m{i}{j} at flag {flag} is zero")]
    BranchingNotPositive {
        /// First index of the orbit pair.
        i: usize,
        /// Second index of the orbit pair.
        j: usize,
        /// A 1-based flag of the offending orbit.
        flag: u32,
    },

    /// A branching table is not constant on an (i,j)-orbit.
    #[error("branching m{i}{j} not constant on the orbit of flag {flag}: {m} vs {other}")]
    BranchingNotOrbitConstant {
        /// First index of the orbit pair.
        i: usize,
        /// Second index of the orbit pair.
        j: usize,
        /// A 1-based flag of the offending orbit.
        flag: u32,
        /// Branching recorded at the orbit representative.
        m: u32,
        /// Conflicting branching found later in the same orbit.
        other: u32,
    },

    /// A branching number is not a multiple of its orbit's rotation length,
    /// so the rotation order v = m / r would not be a positive integer.
    #[error("branching m{i}{j} = {m} at flag {flag} is not a multiple of the orbit length {r}")]
    BranchingNotMultiple {
        /// First index of the orbit pair.
        i: usize,
        /// Second index of the orbit pair.
        j: usize,
        /// A 1-based flag of the offending orbit.
        flag: u32,
        /// The branching number.
        m: u32,
        /// The orbit length r (least k with (σiσj)^k = id on the orbit).
        r: u32,
    },

    /// The text form could not be tokenized or has the wrong shape.
    #[error("syntax error in symbol text: {reason}")]
    Syntax {
        /// Human-readable description of the first problem encountered.
        reason: String,
    },
}

// =============================================================================
// D-SYMBOL
// =============================================================================

/// A validated Delaney-Dress symbol.
///
/// Storage follows the flat-array layout of the legacy C tables, with
/// [`FlagId`] newtype indices instead of raw integers: three involution
/// tables `sigma[i]` and per-flag branching tables `m01`, `m12`. The edge
/// branching m02 is the constant 2 for every valid 2-dimensional symbol and
/// is not stored.
///
/// # Examples
///
/// ```rust
/// use delaney::prelude::*;
///
/// let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
/// assert_eq!(symbol.size(), 1);
/// assert_eq!(symbol.m(0, 1, FlagId::from_number(1)), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DSymbol {
    /// Catalog identifier pair `id1.id2`; carried through parse/print but not
    /// used by the algebra itself.
    id: (u32, u32),
    size: usize,
    sigma: [Vec<FlagId>; 3],
    m01: Vec<u32>,
    m12: Vec<u32>,
}

impl DSymbol {
    /// Construct and validate a symbol from raw tables.
    ///
    /// This is the closure gate described in the crate docs: involution laws,
    /// the (σ0σ2)² = id edge condition, and orbit-constant, positive,
    /// r-divisible branching numbers are all checked here.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSymbolError`] describing the first violation found.
    pub fn from_parts(
        id: (u32, u32),
        size: usize,
        sigma: [Vec<FlagId>; 3],
        m01: Vec<u32>,
        m12: Vec<u32>,
    ) -> Result<Self, MalformedSymbolError> {
        if size == 0 {
            return Err(MalformedSymbolError::Empty);
        }
        for (index, table) in sigma.iter().enumerate() {
            if table.len() != size {
                return Err(MalformedSymbolError::TableLength {
                    name: sigma_table_name(index),
                    expected: size,
                    found: table.len(),
                });
            }
            for value in table {
                if value.index() >= size {
                    return Err(MalformedSymbolError::FlagOutOfRange {
                        value: value.number(),
                        size,
                    });
                }
            }
        }
        if m01.len() != size {
            return Err(MalformedSymbolError::TableLength {
                name: "m01",
                expected: size,
                found: m01.len(),
            });
        }
        if m12.len() != size {
            return Err(MalformedSymbolError::TableLength {
                name: "m12",
                expected: size,
                found: m12.len(),
            });
        }

        let symbol = Self {
            id,
            size,
            sigma,
            m01,
            m12,
        };
        symbol.validate()?;
        Ok(symbol)
    }

    /// Full closure validation; see [`DSymbol::from_parts`].
    fn validate(&self) -> Result<(), MalformedSymbolError> {
        // Involution law for each sigma table.
        for index in 0..3 {
            for a in self.flags() {
                if self.sigma(index, self.sigma(index, a)) != a {
                    return Err(MalformedSymbolError::NotInvolutive {
                        index,
                        flag: a.number(),
                    });
                }
            }
        }
        // Edges have branching 2: sigma_0 and sigma_2 commute.
        for a in self.flags() {
            let around = self.sigma(0, self.sigma(2, self.sigma(0, self.sigma(2, a))));
            if around != a {
                return Err(MalformedSymbolError::EdgeOrbitTooLong { flag: a.number() });
            }
        }
        // Branching tables: positive, orbit-constant, divisible by r.
        self.validate_branching(0, 1)?;
        self.validate_branching(1, 2)?;
        Ok(())
    }

    fn validate_branching(&self, i: usize, j: usize) -> Result<(), MalformedSymbolError> {
        let table = match (i, j) {
            (0, 1) => &self.m01,
            (1, 2) => &self.m12,
            _ => unreachable!("branching is stored for the (0,1) and (1,2) pairs only"),
        };
        let mut visited = vec![false; self.size];
        for a in self.flags() {
            if visited[a.index()] {
                continue;
            }
            let m = table[a.index()];
            if m == 0 {
                return Err(MalformedSymbolError::BranchingNotPositive {
                    i,
                    j,
                    flag: a.number(),
                });
            }
            for b in self.orbit(i, j, a) {
                visited[b.index()] = true;
                let other = table[b.index()];
                if other != m {
                    return Err(MalformedSymbolError::BranchingNotOrbitConstant {
                        i,
                        j,
                        flag: a.number(),
                        m,
                        other,
                    });
                }
            }
            let r = self.orbit_length(i, j, a);
            if m % r != 0 {
                return Err(MalformedSymbolError::BranchingNotMultiple {
                    i,
                    j,
                    flag: a.number(),
                    m,
                    r,
                });
            }
        }
        Ok(())
    }

    /// Number of flags.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Catalog identifier pair.
    #[must_use]
    pub const fn id(&self) -> (u32, u32) {
        self.id
    }

    /// Iterate over all flags in order.
    pub fn flags(&self) -> impl Iterator<Item = FlagId> {
        flags(self.size)
    }

    /// Apply the involution σi to a flag.
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    #[must_use]
    pub fn sigma(&self, index: usize, a: FlagId) -> FlagId {
        self.sigma[index][a.index()]
    }

    /// Branching number of the (i,j)-orbit containing `a`.
    ///
    /// The pair may be given in either order; (0,2) always yields 2.
    ///
    /// # Panics
    ///
    /// Panics if (i,j) is not one of the three index pairs.
    #[must_use]
    pub fn m(&self, i: usize, j: usize, a: FlagId) -> u32 {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        match (lo, hi) {
            (0, 1) => self.m01[a.index()],
            (1, 2) => self.m12[a.index()],
            (0, 2) => 2,
            _ => panic!("invalid involution index pair ({i}, {j})"),
        }
    }

    pub(crate) fn sigma_table(&self, index: usize) -> &[FlagId] {
        &self.sigma[index]
    }

    pub(crate) fn m01_table(&self) -> &[u32] {
        &self.m01
    }

    pub(crate) fn m12_table(&self) -> &[u32] {
        &self.m12
    }

    pub(crate) fn with_id(mut self, id: (u32, u32)) -> Self {
        self.id = id;
        self
    }
}

pub(crate) const fn sigma_table_name(index: usize) -> &'static str {
    match index {
        0 => "sigma_0",
        1 => "sigma_1",
        2 => "sigma_2",
        _ => "sigma_?",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_tables(size: usize) -> [Vec<FlagId>; 3] {
        let table: Vec<FlagId> = flags(size).collect();
        [table.clone(), table.clone(), table]
    }

    #[test]
    fn one_flag_symbol_is_valid() {
        let symbol =
            DSymbol::from_parts((1, 1), 1, identity_tables(1), vec![4], vec![4]).unwrap();
        assert_eq!(symbol.size(), 1);
        assert_eq!(symbol.m(0, 1, FlagId::from_number(1)), 4);
        assert_eq!(symbol.m(2, 0, FlagId::from_number(1)), 2);
    }

    #[test]
    fn empty_symbol_rejected() {
        let err = DSymbol::from_parts((1, 1), 0, identity_tables(0), vec![], vec![]);
        assert_eq!(err, Err(MalformedSymbolError::Empty));
    }

    #[test]
    fn non_involutive_table_rejected() {
        // sigma_0 = cyclic permutation (1 2 3), not an involution.
        let sigma0 = vec![
            FlagId::from_number(2),
            FlagId::from_number(3),
            FlagId::from_number(1),
        ];
        let identity: Vec<FlagId> = flags(3).collect();
        let err = DSymbol::from_parts(
            (1, 1),
            3,
            [sigma0, identity.clone(), identity],
            vec![3; 3],
            vec![3; 3],
        );
        assert!(matches!(
            err,
            Err(MalformedSymbolError::NotInvolutive { index: 0, .. })
        ));
    }

    #[test]
    fn zero_branching_rejected() {
        let err = DSymbol::from_parts((1, 1), 1, identity_tables(1), vec![0], vec![3]);
        assert!(matches!(
            err,
            Err(MalformedSymbolError::BranchingNotPositive { i: 0, j: 1, .. })
        ));
    }

    #[test]
    fn orbit_varying_branching_rejected() {
        // sigma_1 swaps the two flags, so they share one (0,1)-orbit but the
        // m01 table gives them different values.
        let swap = vec![FlagId::from_number(2), FlagId::from_number(1)];
        let identity: Vec<FlagId> = flags(2).collect();
        let err = DSymbol::from_parts(
            (1, 1),
            2,
            [identity.clone(), swap, identity],
            vec![4, 6],
            vec![3, 3],
        );
        assert!(matches!(
            err,
            Err(MalformedSymbolError::BranchingNotOrbitConstant { .. })
        ));
    }

    #[test]
    fn branching_must_divide_orbit_length() {
        // sigma_0 swaps the flags: the (0,1)-orbit has length r = 2, so an odd
        // branching number cannot yield an integer rotation order.
        let swap = vec![FlagId::from_number(2), FlagId::from_number(1)];
        let identity: Vec<FlagId> = flags(2).collect();
        let err = DSymbol::from_parts(
            (1, 1),
            2,
            [swap, identity.clone(), identity],
            vec![3, 3],
            vec![4, 4],
        );
        assert!(matches!(
            err,
            Err(MalformedSymbolError::BranchingNotMultiple { r: 2, .. })
        ));
    }
}
