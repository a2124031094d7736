//! Constraint construction and projection for interactive reshaping.
//!
//! Constraints live in the 2D model plane: half-planes `⟨x, n⟩ ≥ c` keeping
//! a control point from degenerating its chambers, an optional axis when
//! exactly one mirror passes through the point, and a pin when the point is
//! a fixed point of the boundary group (mirror crossings and rotation
//! centers). Projection is an alternating-projection loop onto the
//! intersection: bounded, never failing, best-effort on pathological sets.

use crate::core::collections::SmallBuffer;
use crate::domain::fundamental_domain::{other_types, FundamentalDomain, PointId};
use crate::domain::handle::{Handle, HandleKind};
use crate::geometry::point::{Point2, Point3};

/// A half-plane `⟨x, normal⟩ ≥ offset` with unit normal.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HalfPlane {
    normal: Point2,
    offset: f64,
}

impl HalfPlane {
    /// Half-plane bounded by the line through `line_a` and `line_b`, keeping
    /// the side `keep` is on. `None` for degenerate lines.
    fn bounding(line_a: Point2, line_b: Point2, keep: Point2) -> Option<Self> {
        let direction = line_b.sub(line_a);
        let length = direction.norm();
        if length < 1e-12 {
            return None;
        }
        let mut normal = direction.perp().scale(1.0 / length);
        let mut offset = normal.dot(line_a);
        if normal.dot(keep) < offset {
            normal = normal.scale(-1.0);
            offset = -offset;
        }
        Some(Self { normal, offset })
    }

    pub(crate) fn is_violated(&self, p: Point2) -> bool {
        self.normal.dot(p) < self.offset
    }

    /// How far past the boundary `p` lies (0 when satisfied).
    pub(crate) fn violation(&self, p: Point2) -> f64 {
        (self.offset - self.normal.dot(p)).max(0.0)
    }

    /// Project `p` along `direction` onto the boundary nudged inward by
    /// `nudge`. `None` when the direction runs parallel to the boundary.
    fn project_along(&self, p: Point2, direction: Point2, nudge: f64) -> Option<Point2> {
        let denominator = self.normal.dot(direction);
        if denominator.abs() < 1e-12 {
            return None;
        }
        let step = (self.offset + nudge - self.normal.dot(p)) / denominator;
        Some(p.offset(direction.x * step, direction.y * step))
    }
}

/// Line a mirror-constrained point may move along, as a 2D chord plus the
/// embedded geodesic to snap onto after projection.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MirrorAxis {
    pub(crate) anchor: Point2,
    pub(crate) direction: Point2,
    pub(crate) geodesic: (Point3, Point3),
}

impl MirrorAxis {
    fn project(&self, p: Point2) -> Point2 {
        let relative = p.sub(self.anchor);
        let along = self.direction.dot(relative);
        self.anchor.offset(self.direction.x * along, self.direction.y * along)
    }
}

/// The full constraint set of one drag gesture.
#[derive(Clone, Debug)]
pub(crate) struct ConstraintSet {
    pub(crate) rest: Point2,
    pub(crate) pinned: bool,
    pub(crate) axis: Option<MirrorAxis>,
    pub(crate) half_planes: SmallBuffer<HalfPlane, 8>,
}

/// Result of projecting a drag target onto a constraint set.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectionOutcome {
    pub(crate) position: Point2,
    pub(crate) converged: bool,
    pub(crate) iterations: usize,
}

impl ConstraintSet {
    /// Alternating projection of `target` onto the constraint intersection.
    ///
    /// Each pass projects every currently violated half-plane along the
    /// motion direction (the mirror axis when present, the constraint's own
    /// normal otherwise) and re-checks; bounded by `max_iterations`.
    pub(crate) fn project(&self, target: Point2, max_iterations: usize, nudge: f64) -> ProjectionOutcome {
        if self.pinned {
            return ProjectionOutcome {
                position: self.rest,
                converged: true,
                iterations: 0,
            };
        }
        let mut position = match &self.axis {
            Some(axis) => axis.project(target),
            None => target,
        };
        let mut iterations = 0;
        let mut converged = self.half_planes.iter().all(|hp| !hp.is_violated(position));
        while !converged && iterations < max_iterations {
            iterations += 1;
            for half_plane in &self.half_planes {
                if !half_plane.is_violated(position) {
                    continue;
                }
                let direction = match &self.axis {
                    Some(axis) => axis.direction,
                    None => half_plane.normal,
                };
                if let Some(projected) = half_plane.project_along(position, direction, nudge) {
                    position = projected;
                }
            }
            converged = self.half_planes.iter().all(|hp| !hp.is_violated(position));
        }
        if !converged {
            // Fall back toward the rest position if the iteration left us in
            // a worse spot than where we started.
            let rest_violation: f64 = self
                .half_planes
                .iter()
                .map(|hp| hp.violation(self.rest))
                .sum();
            let final_violation: f64 = self
                .half_planes
                .iter()
                .map(|hp| hp.violation(position))
                .sum();
            if rest_violation < final_violation {
                position = self.rest;
            }
        }
        ProjectionOutcome {
            position,
            converged,
            iterations,
        }
    }
}

/// Build the constraint set for a drag of `handle` resolving to `point`.
pub(crate) fn build_constraints(
    domain: &FundamentalDomain,
    handle: Handle,
    point: PointId,
) -> ConstraintSet {
    match handle.kind {
        HandleKind::Vertex => vertex_constraints(domain, point),
        HandleKind::EdgeCenter => edge_center_constraints(domain, handle, point),
    }
}

fn vertex_constraints(domain: &FundamentalDomain, point: PointId) -> ConstraintSet {
    let kernel = domain.geometry().kernel();
    let symbol = domain.symbol();
    let rest3 = domain.point(point);
    let rest = domain.point_2d(point);

    // Mirror lines through the point, deduplicated by tangent direction.
    let mut axes: Vec<MirrorAxis> = Vec::new();
    let mut tangent_angles: Vec<f64> = Vec::new();
    let to_origin = kernel.translation_to_origin(&rest3);
    for (k, a) in domain.mirror_edges_at_point(point) {
        let (u, w) = other_types(k);
        let endpoint_u = domain.vertex_point_id(u, a);
        let endpoint_w = domain.vertex_point_id(w, a);
        let other = if endpoint_u == point { endpoint_w } else { endpoint_u };
        if other == point {
            continue;
        }
        let other3 = domain.point(other);
        let moved = to_origin.apply(&other3);
        let angle = moved.y().atan2(moved.x());
        let duplicate = tangent_angles.iter().any(|&existing| {
            let difference = (angle - existing).rem_euclid(std::f64::consts::PI);
            difference < 1e-6 || difference > std::f64::consts::PI - 1e-6
        });
        if duplicate {
            continue;
        }
        tangent_angles.push(angle);
        let other2 = domain.point_2d(other);
        let chord = other2.sub(rest);
        let length = chord.norm();
        if length < 1e-12 {
            continue;
        }
        axes.push(MirrorAxis {
            anchor: rest,
            direction: chord.scale(1.0 / length),
            geodesic: (rest3, other3),
        });
    }

    let pinned = axes.len() >= 2 || is_rotation_center(domain, point);
    let axis = if pinned || axes.is_empty() {
        None
    } else {
        Some(axes[0])
    };

    // Non-degeneracy: the moving corner stays on its side of the line
    // through each incident chamber's other two corners.
    let mut half_planes: SmallBuffer<HalfPlane, 8> = SmallBuffer::new();
    for a in symbol.flags() {
        for t in 0..3 {
            if domain.vertex_point_id(t, a) != point {
                continue;
            }
            let (u, w) = other_types(t);
            let corner_u = domain.vertex_point_id(u, a);
            let corner_w = domain.vertex_point_id(w, a);
            if corner_u == point || corner_w == point {
                continue;
            }
            if let Some(half_plane) = HalfPlane::bounding(
                domain.point_2d(corner_u),
                domain.point_2d(corner_w),
                rest,
            ) {
                half_planes.push(half_plane);
            }
        }
    }

    ConstraintSet {
        rest,
        pinned,
        axis,
        half_planes,
    }
}

/// Whether the point is the realized fixed point of a rotation generator:
/// it appears as the same-type endpoint of both sides of a non-mirror
/// boundary gluing. Such centers stay put during reshaping.
fn is_rotation_center(domain: &FundamentalDomain, point: PointId) -> bool {
    let symbol = domain.symbol();
    for (k, a) in domain.boundary_edges() {
        let b = symbol.sigma(k, a);
        if b == a {
            continue;
        }
        let (u, w) = other_types(k);
        for t in [u, w] {
            if domain.vertex_point_id(t, a) == point && domain.vertex_point_id(t, b) == point {
                return true;
            }
        }
    }
    false
}

fn edge_center_constraints(
    domain: &FundamentalDomain,
    handle: Handle,
    point: PointId,
) -> ConstraintSet {
    let kernel = domain.geometry().kernel();
    let symbol = domain.symbol();
    let k = handle.vertex_type;
    let a = handle.flag;
    let b = symbol.sigma(k, a);
    let (u, w) = other_types(k);
    let rest = domain.point_2d(point);
    let endpoint_u = domain.point_2d(domain.vertex_point_id(u, a));
    let endpoint_w = domain.point_2d(domain.vertex_point_id(w, a));

    let mut half_planes: SmallBuffer<HalfPlane, 8> = SmallBuffer::new();
    let mut push_wedge = |apex: Point2| {
        for endpoint in [endpoint_u, endpoint_w] {
            if let Some(half_plane) = HalfPlane::bounding(apex, endpoint, rest) {
                half_planes.push(half_plane);
            }
        }
    };

    // This chamber's wedge.
    push_wedge(domain.point_2d(domain.vertex_point_id(k, a)));

    // The opposite chamber: real when the edge is interior, otherwise the
    // generator-transformed mirror image of the partner.
    let mut axis = None;
    if b == a {
        // Mirror edge: the center may slide along the mirror line only.
        if let Some(generator) = domain.generator(k, a) {
            let apex3 = generator.apply(&domain.point(domain.vertex_point_id(k, a)));
            push_wedge(kernel.from_model(&apex3));
        }
        let anchor_u3 = domain.point(domain.vertex_point_id(u, a));
        let anchor_w3 = domain.point(domain.vertex_point_id(w, a));
        let chord = endpoint_w.sub(endpoint_u);
        let length = chord.norm();
        if length > 1e-12 {
            axis = Some(MirrorAxis {
                anchor: rest,
                direction: chord.scale(1.0 / length),
                geodesic: (anchor_u3, anchor_w3),
            });
        }
    } else if let Some(generator) = domain.generator(k, a) {
        let partner_apex = domain.point(domain.vertex_point_id(k, b));
        let virtual_apex = generator.inverse().apply(&partner_apex);
        push_wedge(kernel.from_model(&virtual_apex));
    } else {
        push_wedge(domain.point_2d(domain.vertex_point_id(k, b)));
    }

    ConstraintSet {
        rest,
        pinned: false,
        axis,
        half_planes,
    }
}
