//! Edit-surface handles.
//!
//! A handle identifies one draggable control point of a fundamental domain:
//! a chamber vertex or an edge center, addressed by type and flag. Handles
//! are pure lookup keys; they never own geometry and stay valid for the
//! lifetime of the domain they address (domains are rebuilt wholesale when
//! the symbol changes, invalidating all handles).

use serde::{Deserialize, Serialize};

use crate::core::flag::FlagId;

/// Which kind of control point a handle addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// A chamber corner of the given vertex type.
    Vertex,
    /// The center control point of the edge opposite the given vertex type.
    EdgeCenter,
}

/// A control-point lookup key: `(kind, type, flag)`.
///
/// # Examples
///
/// ```rust
/// use delaney::domain::handle::{Handle, HandleKind};
/// use delaney::core::flag::FlagId;
///
/// let handle = Handle::vertex(0, FlagId::from_number(1));
/// assert_eq!(handle.kind, HandleKind::Vertex);
/// assert_eq!(handle.vertex_type, 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    /// Vertex or edge-center.
    pub kind: HandleKind,
    /// Type index 0, 1, or 2.
    pub vertex_type: usize,
    /// The chamber whose control point is addressed.
    pub flag: FlagId,
}

impl Handle {
    /// Handle for the type-`vertex_type` corner of chamber `flag`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex_type > 2`.
    #[must_use]
    pub fn vertex(vertex_type: usize, flag: FlagId) -> Self {
        assert!(vertex_type <= 2, "vertex types are 0, 1, and 2");
        Self {
            kind: HandleKind::Vertex,
            vertex_type,
            flag,
        }
    }

    /// Handle for the center of the type-`vertex_type` edge of chamber
    /// `flag`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex_type > 2`.
    #[must_use]
    pub fn edge_center(vertex_type: usize, flag: FlagId) -> Self {
        assert!(vertex_type <= 2, "edge types are 0, 1, and 2");
        Self {
            kind: HandleKind::EdgeCenter,
            vertex_type,
            flag,
        }
    }
}
