//! Canonical text encoding of Delaney-Dress symbols.
//!
//! The format is `<id1.id2:n:σ0-table,σ1-table,σ2-table:m01-list,m12-list>`.
//! Involution tables are compressed: scanning flags 1..=n, an entry appears
//! only when the flag is the smallest of its σ-pair (fixed flags list
//! themselves). Branching lists carry one value per orbit in first-encounter
//! order. Parsing is whitespace-insensitive between tokens; printing emits
//! the canonical single-space form, and `parse(print(s)) == s` holds exactly.

use std::fmt;
use std::str::FromStr;

use crate::core::flag::FlagId;
use crate::core::symbol::{sigma_table_name, DSymbol, MalformedSymbolError};

// =============================================================================
// PARSING
// =============================================================================

impl FromStr for DSymbol {
    type Err = MalformedSymbolError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_symbol(text)
    }
}

/// Parse the canonical text form of a symbol.
///
/// # Errors
///
/// Returns [`MalformedSymbolError`] on syntax errors, conflicting involution
/// entries, or any closure violation found by [`DSymbol::from_parts`].
///
/// # Examples
///
/// ```rust
/// use delaney::core::text::parse_symbol;
///
/// let symbol = parse_symbol("<1.1:1:1,1,1:4,4>").unwrap();
/// assert_eq!(symbol.size(), 1);
/// assert_eq!(symbol.to_string(), "<1.1:1:1,1,1:4,4>");
/// ```
pub fn parse_symbol(text: &str) -> Result<DSymbol, MalformedSymbolError> {
    let inner = text
        .trim()
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .ok_or_else(|| syntax("symbol must be enclosed in '<' and '>'"))?;

    let sections: Vec<&str> = inner.split(':').collect();
    if sections.len() != 4 {
        return Err(syntax(format!(
            "expected 4 ':'-separated sections, found {}",
            sections.len()
        )));
    }

    let id = parse_id_pair(sections[0])?;
    let size = parse_number(sections[1].trim(), "size")? as usize;
    if size == 0 {
        return Err(MalformedSymbolError::Empty);
    }

    let sigma_sections: Vec<&str> = sections[2].split(',').collect();
    if sigma_sections.len() != 3 {
        return Err(syntax(format!(
            "expected 3 ','-separated involution tables, found {}",
            sigma_sections.len()
        )));
    }
    let mut sigma: [Vec<FlagId>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (index, section) in sigma_sections.iter().enumerate() {
        sigma[index] = expand_involution(index, section, size)?;
    }

    let m_sections: Vec<&str> = sections[3].split(',').collect();
    if m_sections.len() != 2 {
        return Err(syntax(format!(
            "expected 2 ','-separated branching lists, found {}",
            m_sections.len()
        )));
    }
    let m01 = assign_orbit_values(&sigma, 0, 1, m_sections[0], size)?;
    let m12 = assign_orbit_values(&sigma, 1, 2, m_sections[1], size)?;

    DSymbol::from_parts(id, size, sigma, m01, m12)
}

fn parse_id_pair(section: &str) -> Result<(u32, u32), MalformedSymbolError> {
    let trimmed = section.trim();
    let (first, second) = trimmed
        .split_once('.')
        .ok_or_else(|| syntax("identifier must have the form id1.id2"))?;
    Ok((
        parse_number(first.trim(), "id1")?,
        parse_number(second.trim(), "id2")?,
    ))
}

fn parse_number(token: &str, what: &str) -> Result<u32, MalformedSymbolError> {
    token
        .parse::<u32>()
        .map_err(|_| syntax(format!("invalid {what} {token:?}")))
}

/// Expand a compressed involution table into a full σ map.
fn expand_involution(
    index: usize,
    section: &str,
    size: usize,
) -> Result<Vec<FlagId>, MalformedSymbolError> {
    let name = sigma_table_name(index);
    let mut table: Vec<Option<FlagId>> = vec![None; size];
    let mut values = section.split_whitespace();

    for a in 0..size {
        if table[a].is_some() {
            continue;
        }
        let token = values
            .next()
            .ok_or_else(|| syntax(format!("table {name} has too few entries")))?;
        let value = parse_number(token, name)?;
        if value == 0 || value as usize > size {
            return Err(MalformedSymbolError::FlagOutOfRange { value, size });
        }
        let b = (value - 1) as usize;
        if let Some(existing) = table[b] {
            return Err(MalformedSymbolError::ConflictingInvolution {
                index,
                flag: value,
                existing: existing.number(),
                asserted: u32::try_from(a + 1).unwrap_or(u32::MAX),
            });
        }
        table[a] = Some(FlagId::from_index(b));
        table[b] = Some(FlagId::from_index(a));
    }
    if values.next().is_some() {
        return Err(syntax(format!("table {name} has too many entries")));
    }

    Ok(table
        .into_iter()
        .map(|entry| entry.unwrap_or_else(|| unreachable!("expansion fills every entry")))
        .collect())
}

/// Distribute per-orbit branching values onto flags, one value per
/// (i,j)-orbit in first-encounter order.
fn assign_orbit_values(
    sigma: &[Vec<FlagId>; 3],
    i: usize,
    j: usize,
    section: &str,
    size: usize,
) -> Result<Vec<u32>, MalformedSymbolError> {
    let name = if (i, j) == (0, 1) { "m01" } else { "m12" };
    let mut result = vec![0_u32; size];
    let mut visited = vec![false; size];
    let mut values = section.split_whitespace();

    for a in 0..size {
        if visited[a] {
            continue;
        }
        let token = values
            .next()
            .ok_or_else(|| syntax(format!("list {name} has too few entries")))?;
        let m = parse_number(token, name)?;
        let mut stack = vec![a];
        visited[a] = true;
        while let Some(x) = stack.pop() {
            result[x] = m;
            for index in [i, j] {
                let y = sigma[index][x].index();
                if !visited[y] {
                    visited[y] = true;
                    stack.push(y);
                }
            }
        }
    }
    if values.next().is_some() {
        return Err(syntax(format!("list {name} has too many entries")));
    }
    Ok(result)
}

fn syntax(reason: impl Into<String>) -> MalformedSymbolError {
    MalformedSymbolError::Syntax {
        reason: reason.into(),
    }
}

// =============================================================================
// PRINTING
// =============================================================================

impl fmt::Display for DSymbol {
    /// Print the canonical compressed form; exact inverse of parsing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (id1, id2) = self.id();
        write!(f, "<{id1}.{id2}:{}:", self.size())?;
        for index in 0..3 {
            if index > 0 {
                f.write_str(",")?;
            }
            let mut first = true;
            for a in self.flags() {
                let b = self.sigma(index, a);
                if b >= a {
                    if !first {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b}")?;
                    first = false;
                }
            }
        }
        f.write_str(":")?;
        for (position, (i, j)) in [(0, 1), (1, 2)].into_iter().enumerate() {
            if position > 0 {
                f.write_str(",")?;
            }
            for (count, rep) in self.orbit_representatives(i, j).into_iter().enumerate() {
                if count > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.m(i, j, rep))?;
            }
        }
        f.write_str(">")
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
    fn parses_hexagonal_torus() {
        let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
        assert_eq!(symbol.size(), 12);
        assert_eq!(symbol.id(), (1, 1));
        let one = FlagId::from_number(1);
        assert_eq!(symbol.sigma(0, one), FlagId::from_number(2));
        assert_eq!(symbol.sigma(1, one), FlagId::from_number(12));
        assert_eq!(symbol.sigma(2, one), FlagId::from_number(8));
        assert_eq!(symbol.m(0, 1, one), 6);
        assert_eq!(symbol.m(1, 2, one), 3);
    }

    #[test]
    fn round_trips_exactly() {
        for text in [
            HEXAGONAL_TORUS,
            "<1.1:1:1,1,1:4,4>",
            "<1.1:1:1,1,1:7,3>",
            "<3.2:2:2,1 2,2:4,4>",
        ] {
            let symbol: DSymbol = text.parse().unwrap();
            assert_eq!(symbol.to_string(), text);
            let reparsed: DSymbol = symbol.to_string().parse().unwrap();
            assert_eq!(reparsed, symbol);
        }
    }

    #[test]
    fn whitespace_insensitive() {
        let padded = "< 1.1 : 1 : 1 , 1 , 1 : 4 , 4 >";
        let symbol: DSymbol = padded.parse().unwrap();
        assert_eq!(symbol.to_string(), "<1.1:1:1,1,1:4,4>");
    }

    #[test]
    fn rejects_missing_brackets() {
        let err = "1.1:1:1,1,1:4,4".parse::<DSymbol>();
        assert!(matches!(err, Err(MalformedSymbolError::Syntax { .. })));
    }

    #[test]
    fn rejects_wrong_section_count() {
        let err = "<1.1:1:1,1,1>".parse::<DSymbol>();
        assert!(matches!(err, Err(MalformedSymbolError::Syntax { .. })));
    }

    #[test]
    fn rejects_flag_out_of_range() {
        let err = "<1.1:2:3,1 2,1 2:4,4>".parse::<DSymbol>();
        assert!(matches!(
            err,
            Err(MalformedSymbolError::FlagOutOfRange { value: 3, size: 2 })
        ));
    }

    #[test]
    fn rejects_conflicting_involution() {
        // Both flag 1 and flag 3 claim flag 2 as their sigma_0 partner.
        let err = "<1.1:4:2 2,1 2 3 4,1 2 3 4:4 4 4,4 4 4>".parse::<DSymbol>();
        assert!(matches!(
            err,
            Err(MalformedSymbolError::ConflictingInvolution { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_surplus_entries() {
        let err = "<1.1:1:1 1,1,1:4,4>".parse::<DSymbol>();
        assert!(matches!(err, Err(MalformedSymbolError::Syntax { .. })));
    }

    #[test]
    fn rejects_too_few_branching_values() {
        let err = "<1.1:1:1,1,1:4,>".parse::<DSymbol>();
        assert!(matches!(err, Err(MalformedSymbolError::Syntax { .. })));
    }
}
