//! The interactive reshape solver.
//!
//! One solver instance serves one pointer device: a drag gesture moves
//! through `Idle → Dragging → (Idle | Cancelled)` via [`begin_drag`],
//! per-frame [`drag`] deltas, and [`commit`] or [`cancel`]. Each delta is
//! projected onto the live constraint set (mirror axes, pins, chamber
//! half-planes), applied to the shared point arena, propagated through the
//! boundary generators so every gluing correspondence stays exact, and
//! finished with the straightening post-pass.
//!
//! The solver never fails: when the projection cannot satisfy every
//! constraint within the iteration bound it returns the best position found
//! and flags the outcome, because a slightly inconsistent frame beats a
//! frozen pointer in an interactive loop.
//!
//! [`begin_drag`]: ReshapeSolver::begin_drag
//! [`drag`]: ReshapeSolver::drag
//! [`commit`]: ReshapeSolver::commit
//! [`cancel`]: ReshapeSolver::cancel

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::collections::FastHashSet;
use crate::domain::fundamental_domain::{
    other_types, CoordinateSnapshot, FundamentalDomain, PointId,
};
use crate::domain::handle::Handle;
use crate::geometry::kernel::Tolerances;
use crate::geometry::point::Point2;
use crate::reshape::constraints::build_constraints;
use crate::reshape::straighten::straighten_edges;

// =============================================================================
// CONFIGURATION AND OUTCOMES
// =============================================================================

/// Solver parameters; all bounds are explicit, nothing is global.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Upper bound on alternating-projection passes per drag delta.
    pub max_iterations: usize,
    /// Shared numeric tolerances.
    pub tolerances: Tolerances,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerances: Tolerances::default(),
        }
    }
}

/// Non-fatal notice that a drag delta could not satisfy every constraint
/// within the iteration bound.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("reshape projection hit the iteration bound ({iterations} passes); best-effort position returned")]
pub struct ConstraintUnsatisfiedWarning {
    /// Number of projection passes performed.
    pub iterations: usize,
}

/// Result of applying one drag delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOutcome {
    /// The constrained position actually applied, in model coordinates.
    pub position: Point2,
    /// Whether every constraint was satisfied.
    pub converged: bool,
    /// Projection passes used.
    pub iterations: usize,
}

impl DragOutcome {
    /// The convergence warning, when the iteration bound was hit.
    #[must_use]
    pub fn warning(&self) -> Option<ConstraintUnsatisfiedWarning> {
        if self.converged {
            None
        } else {
            Some(ConstraintUnsatisfiedWarning {
                iterations: self.iterations,
            })
        }
    }
}

/// Old/new coordinate pair emitted on commit for the external undo stack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReshapeEdit {
    /// Coordinates when the drag began.
    pub before: CoordinateSnapshot,
    /// Coordinates after the committed drag.
    pub after: CoordinateSnapshot,
}

// =============================================================================
// SOLVER
// =============================================================================

#[derive(Clone, Debug)]
enum DragState {
    Idle,
    Dragging {
        handle: Handle,
        point: PointId,
        before: CoordinateSnapshot,
    },
}

/// Per-pointer reshape state machine.
///
/// # Examples
///
/// ```rust
/// use delaney::prelude::*;
///
/// let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
/// let mut domain = FundamentalDomain::build(&symbol);
/// let mut solver = ReshapeSolver::default();
///
/// let handle = Handle::edge_center(2, FlagId::from_number(1));
/// solver.begin_drag(&domain, handle);
/// let outcome = solver.drag(&mut domain, 0.02, 0.01).unwrap();
/// assert!(outcome.converged);
/// let edit = solver.commit(&mut domain).unwrap();
/// assert_ne!(edit.before, edit.after);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReshapeSolver {
    config: SolverConfig,
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ReshapeSolver {
    /// Solver with explicit configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a drag on the given handle, capturing the undo snapshot.
    ///
    /// Starting while a gesture is active abandons the earlier gesture
    /// without restoring (callers serialize pointer events, so this only
    /// happens after a missed release).
    pub fn begin_drag(&mut self, domain: &FundamentalDomain, handle: Handle) {
        if self.is_dragging() {
            log::debug!("begin_drag during an active gesture; abandoning the previous one");
        }
        self.state = DragState::Dragging {
            handle,
            point: domain.handle_point(handle),
            before: domain.coordinates(),
        };
    }

    /// Apply one raw drag delta `(dx, dy)` in model units.
    ///
    /// Returns `None` when no gesture is active. Otherwise the constrained
    /// delta is applied to the domain, boundary partners are updated through
    /// the generators, and straight edges are re-centered; the domain stays
    /// consistent after every call.
    pub fn drag(&mut self, domain: &mut FundamentalDomain, dx: f64, dy: f64) -> Option<DragOutcome> {
        let (handle, point) = match &self.state {
            DragState::Dragging { handle, point, .. } => (*handle, *point),
            DragState::Idle => return None,
        };
        let constraints = build_constraints(domain, handle, point);
        let target = domain.point_2d(point).offset(dx, dy);
        let projection =
            constraints.project(target, self.config.max_iterations, self.config.tolerances.nudge);
        if !projection.converged {
            log::debug!(
                "constraint projection for {handle:?} unconverged after {} passes",
                projection.iterations
            );
        }

        let kernel = domain.geometry().kernel();
        let mut lifted = kernel.to_model(projection.position);
        if let Some(axis) = &constraints.axis {
            // Exact mirror closure: the midpoint of a point and its mirror
            // image lies on the mirror geodesic in every geometry.
            let mirror = kernel.reflection_across(&axis.geodesic.0, &axis.geodesic.1);
            lifted = kernel.midpoint(&lifted, &mirror.apply(&lifted));
        }
        domain.set_point(point, lifted);
        propagate_through_generators(domain, point);
        straighten_edges(domain);
        domain.refresh_chamber_centers();
        // Mirror lines may have moved with their endpoints; keep the cached
        // generators in step with the coordinates on every frame.
        domain.recompute_generators();

        Some(DragOutcome {
            position: kernel.from_model(&domain.point(point)),
            converged: projection.converged,
            iterations: projection.iterations,
        })
    }

    /// Finish the gesture, refresh the cached generators, and emit the
    /// old/new snapshot pair for the external undo collaborator.
    pub fn commit(&mut self, domain: &mut FundamentalDomain) -> Option<ReshapeEdit> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { before, .. } => {
                domain.recompute_generators();
                Some(ReshapeEdit {
                    before,
                    after: domain.coordinates(),
                })
            }
            DragState::Idle => None,
        }
    }

    /// Abort the gesture, restoring the coordinates captured at its start.
    ///
    /// Returns whether a gesture was actually active.
    pub fn cancel(&mut self, domain: &mut FundamentalDomain) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { before, .. } => {
                domain.restore(&before);
                true
            }
            DragState::Idle => false,
        }
    }
}

/// Push a moved point's position through the boundary generator graph so
/// every realized copy of the same quotient point stays in exact
/// correspondence.
fn propagate_through_generators(domain: &mut FundamentalDomain, moved: PointId) {
    let boundary = domain.boundary_edges();
    let symbol = domain.symbol().clone();
    let mut visited: FastHashSet<PointId> = FastHashSet::default();
    visited.insert(moved);
    let mut queue = vec![moved];

    while let Some(current) = queue.pop() {
        for &(k, a) in &boundary {
            let b = symbol.sigma(k, a);
            if b == a {
                // Mirror gluings fix their own edge; nothing to carry over.
                continue;
            }
            let Some(generator) = domain.generator(k, a).cloned() else {
                continue;
            };
            let (u, w) = other_types(k);
            for t in [u, w] {
                if domain.vertex_point_id(t, a) != current {
                    continue;
                }
                let partner = domain.vertex_point_id(t, b);
                if partner == current || visited.contains(&partner) {
                    continue;
                }
                let image = generator.apply(&domain.point(current));
                domain.set_point(partner, image);
                visited.insert(partner);
                queue.push(partner);
            }
            if domain.edge_center_point_id(k, a) == current {
                let partner = domain.edge_center_point_id(k, b);
                if partner != current && !visited.contains(&partner) {
                    let image = generator.apply(&domain.point(current));
                    domain.set_point(partner, image);
                    visited.insert(partner);
                    queue.push(partner);
                }
            }
        }
    }
}
