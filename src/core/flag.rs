//! Type-safe flag handles.
//!
//! Flags are the atomic combinatorial units of a Delaney-Dress symbol. They
//! are dense integer handles `1..=n`, stored 0-based and used to index the
//! flat parallel arrays of [`DSymbol`](crate::core::symbol::DSymbol). Using a
//! newtype instead of raw `usize` keeps symbol tables, orbit maps, and
//! coordinate arrays from being indexed with the wrong kind of integer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A type-safe handle for one flag of a Delaney-Dress symbol.
///
/// Internally 0-based; the canonical text format and `Display` are 1-based,
/// matching the printed symbol tables.
///
/// # Examples
///
/// ```rust
/// use delaney::core::flag::FlagId;
///
/// let flag = FlagId::from_number(3);
/// assert_eq!(flag.index(), 2);
/// assert_eq!(flag.number(), 3);
/// assert_eq!(flag.to_string(), "3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlagId(u32);

impl FlagId {
    /// Construct from a 0-based array index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("flag index exceeds u32 range"))
    }

    /// Construct from a 1-based flag number as it appears in symbol text.
    ///
    /// # Panics
    ///
    /// Panics if `number` is zero.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        assert!(number > 0, "flag numbers are 1-based");
        Self(number - 1)
    }

    /// The 0-based index into the symbol's flat arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based flag number used by the canonical text format.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0 + 1
    }
}

impl fmt::Debug for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlagId({})", self.number())
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Iterator over all flags `1..=n` of a symbol of the given size.
pub fn flags(size: usize) -> impl Iterator<Item = FlagId> {
    (0..size).map(FlagId::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_number_round_trip() {
        for n in 1..=10 {
            let flag = FlagId::from_number(n);
            assert_eq!(FlagId::from_index(flag.index()), flag);
            assert_eq!(flag.number(), n);
        }
    }

    #[test]
    fn flags_iterates_in_order() {
        let collected: Vec<u32> = flags(4).map(FlagId::number).collect();
        assert_eq!(collected, vec![1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "1-based")]
    fn zero_flag_number_rejected() {
        let _ = FlagId::from_number(0);
    }
}
