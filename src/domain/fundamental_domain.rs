//! Geometric realization of a symbol as a fundamental domain.
//!
//! The domain assigns embedded coordinates to every chamber (flag): three
//! corner vertices, three edge centers, and a chamber center. Chambers
//! sharing a realized corner or an interior edge center share one entry of a
//! point arena, so moving a realized point moves every chamber incident to
//! it at once.
//!
//! # Construction
//!
//! The seed chamber is shaped from its per-corner chamber angles and placed
//! at the origin; the flag graph is walked breadth-first, and crossing a
//! σk-edge to an unplaced chamber reflects the current chamber across the
//! shared edge geodesic, so all chambers are congruent. Crossing to a
//! chamber that is already placed either merges the two coincident edges
//! (interior identification) or records a boundary **generator**: the
//! isometry carrying this chamber's edge onto its σk-partner's. Mirror
//! self-gluings (σk(a) = a) always yield the reflection across their own
//! edge line.
//!
//! Two invariants hold at all times, including through reshaping:
//! - the chamber wedges around an interior realized corner sum to a full
//!   turn exactly;
//! - every boundary generator maps its edge's realized vertices (and edge
//!   center) onto the partner edge's within the global tolerance.

use std::collections::VecDeque;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::collections::{FastHashMap, UnionFind};
use crate::core::flag::FlagId;
use crate::core::symbol::DSymbol;
use crate::domain::handle::{Handle, HandleKind};
use crate::geometry::isometry::Isometry;
use crate::geometry::kernel::{Geometry, GeometryKernel, Tolerances};
use crate::geometry::point::{Point2, Point3};

// =============================================================================
// POINT ARENA
// =============================================================================

/// Index of one realized point in the domain's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointId(u32);

impl PointId {
    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("point arena exceeds u32 range"))
    }

    /// Index into the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pure-data copy of the arena, exchanged with external undo stacks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSnapshot {
    points: Vec<Point3>,
}

/// Immutable per-flag coordinate tables handed to the external renderer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DomainSnapshot {
    /// Geometry the coordinates live in.
    pub geometry: Geometry,
    /// 2D model position of the type-k vertex of each chamber.
    pub vertex_coords: [Vec<Point2>; 3],
    /// 2D model position of the type-k edge center of each chamber.
    pub edge_center_coords: [Vec<Point2>; 3],
    /// 2D model position of each chamber center.
    pub chamber_center_coords: Vec<Point2>,
    /// Boundary generators, `None` on interior edges.
    pub generators: [Vec<Option<Isometry>>; 3],
    /// Mutation counter at the time of the snapshot.
    pub revision: u64,
}

// =============================================================================
// FUNDAMENTAL DOMAIN
// =============================================================================

/// A symbol realized as chambers with shared, editable coordinates.
///
/// # Examples
///
/// ```rust
/// use delaney::prelude::*;
///
/// let symbol: DSymbol = "<1.1:1:1,1,1:7,3>".parse().unwrap();
/// let domain = FundamentalDomain::build(&symbol);
/// assert_eq!(domain.geometry(), Geometry::Hyperbolic);
/// // A one-chamber domain is bounded entirely by mirrors.
/// let flag = FlagId::from_number(1);
/// assert!(domain.is_boundary_edge(0, flag));
/// assert!(domain.is_boundary_edge(1, flag));
/// assert!(domain.is_boundary_edge(2, flag));
/// ```
#[derive(Clone, Debug)]
pub struct FundamentalDomain {
    symbol: DSymbol,
    geometry: Geometry,
    tolerances: Tolerances,
    points: Vec<Point3>,
    vertex_point: [Vec<PointId>; 3],
    edge_center_point: [Vec<PointId>; 3],
    chamber_center_point: Vec<PointId>,
    generators: [Vec<Option<Isometry>>; 3],
    revision: u64,
}

impl FundamentalDomain {
    /// Build the canonical realization of a validated symbol.
    #[must_use]
    pub fn build(symbol: &DSymbol) -> Self {
        Self::build_with_tolerances(symbol, Tolerances::default())
    }

    /// Build with explicit tolerances.
    #[must_use]
    pub fn build_with_tolerances(symbol: &DSymbol, tolerances: Tolerances) -> Self {
        let geometry = symbol.geometry();
        let kernel = geometry.kernel();
        let n = symbol.size();
        let seed = FlagId::from_index(0);

        // Shape and place the seed chamber, then walk the flag graph,
        // reflecting across shared edges.
        let angles = seed_angles(symbol, geometry, seed);
        let sides = triangle_sides(geometry, &angles);
        let mut corners: Vec<[Point3; 3]> = vec![[kernel.origin(); 3]; n];
        corners[seed.index()][2] = kernel.origin();
        corners[seed.index()][0] = kernel.point_from_origin(0.0, sides[1]);
        corners[seed.index()][1] = kernel.point_from_origin(angles[2], sides[0]);
        let mut is_placed = vec![false; n];
        is_placed[seed.index()] = true;
        // Two-level traversal: complete each tile's chamber fan (σ0/σ1
        // moves) before crossing a σ2 edge into the next tile. Crossing
        // eagerly would strand fan closures on the wrong side of a tile
        // boundary and inflate the generator set.
        let mut fan_queue = VecDeque::from([seed]);
        let mut crossings: VecDeque<(FlagId, FlagId)> = VecDeque::new();
        loop {
            let a = if let Some(a) = fan_queue.pop_front() {
                a
            } else if let Some((parent, child)) = crossings.pop_front() {
                if is_placed[child.index()] {
                    continue;
                }
                place_by_reflection(kernel, &mut corners, parent, 2, child);
                is_placed[child.index()] = true;
                child
            } else if let Some(unreached) = (0..n).find(|&a| !is_placed[a]) {
                // Disconnected symbols are degenerate but must not leave
                // chambers unplaced; start a fresh component at the origin.
                log::warn!("symbol flag graph is disconnected; restarting placement");
                corners[unreached][2] = kernel.origin();
                corners[unreached][0] = kernel.point_from_origin(0.0, sides[1]);
                corners[unreached][1] = kernel.point_from_origin(angles[2], sides[0]);
                is_placed[unreached] = true;
                FlagId::from_index(unreached)
            } else {
                break;
            };
            for k in [0, 1] {
                let b = symbol.sigma(k, a);
                if b == a || is_placed[b.index()] {
                    continue;
                }
                place_by_reflection(kernel, &mut corners, a, k, b);
                is_placed[b.index()] = true;
                fan_queue.push_back(b);
            }
            let across = symbol.sigma(2, a);
            if across != a && !is_placed[across.index()] {
                crossings.push_back((a, across));
            }
        }

        // Classify every gluing: coincident partner edges merge into one
        // interior edge; everything else is domain boundary.
        let mut corner_classes = UnionFind::new(3 * n);
        let mut edge_classes = UnionFind::new(3 * n);
        let mut is_boundary = [vec![false; n], vec![false; n], vec![false; n]];
        for a in symbol.flags() {
            for k in 0..3 {
                let b = symbol.sigma(k, a);
                if b == a {
                    is_boundary[k][a.index()] = true;
                    continue;
                }
                let (u, w) = other_types(k);
                let coincident = kernel
                    .distance(&corners[a.index()][u], &corners[b.index()][u])
                    <= tolerances.eps
                    && kernel.distance(&corners[a.index()][w], &corners[b.index()][w])
                        <= tolerances.eps;
                if coincident {
                    corner_classes.union(u * n + a.index(), u * n + b.index());
                    corner_classes.union(w * n + a.index(), w * n + b.index());
                    edge_classes.union(k * n + a.index(), k * n + b.index());
                } else {
                    is_boundary[k][a.index()] = true;
                }
            }
        }

        // Realize corner points: one arena entry per merged class, positioned
        // at the class representative (minimal slot).
        let mut points: Vec<Point3> = Vec::new();
        let mut vertex_point: [Vec<PointId>; 3] = [
            vec![PointId(0); n],
            vec![PointId(0); n],
            vec![PointId(0); n],
        ];
        let mut corner_roots: FastHashMap<usize, PointId> = FastHashMap::default();
        for t in 0..3 {
            for a in 0..n {
                let root = corner_classes.find(t * n + a);
                let pid = *corner_roots.entry(root).or_insert_with(|| {
                    let position = corners[root % n][root / n];
                    let pid = PointId::from_index(points.len());
                    points.push(position);
                    pid
                });
                vertex_point[t][a] = pid;
            }
        }

        // Realize edge centers at geodesic midpoints of their endpoints.
        let mut edge_center_point: [Vec<PointId>; 3] = [
            vec![PointId(0); n],
            vec![PointId(0); n],
            vec![PointId(0); n],
        ];
        let mut edge_roots: FastHashMap<usize, PointId> = FastHashMap::default();
        for k in 0..3 {
            for a in 0..n {
                let root = edge_classes.find(k * n + a);
                let pid = *edge_roots.entry(root).or_insert_with(|| {
                    let (k0, a0) = (root / n, root % n);
                    let (u, w) = other_types(k0);
                    let midpoint = kernel.midpoint(
                        &points[vertex_point[u][a0].index()],
                        &points[vertex_point[w][a0].index()],
                    );
                    let pid = PointId::from_index(points.len());
                    points.push(midpoint);
                    pid
                });
                edge_center_point[k][a] = pid;
            }
        }

        // Chamber centers.
        let mut chamber_center_point = Vec::with_capacity(n);
        for a in 0..n {
            let sum = points[vertex_point[0][a].index()].vector()
                + points[vertex_point[1][a].index()].vector()
                + points[vertex_point[2][a].index()].vector();
            let centroid = kernel.normalize(Point3::from_vector(sum));
            chamber_center_point.push(PointId::from_index(points.len()));
            points.push(centroid);
        }

        let mut domain = Self {
            symbol: symbol.clone(),
            geometry,
            tolerances,
            points,
            vertex_point,
            edge_center_point,
            chamber_center_point,
            generators: [vec![None; n], vec![None; n], vec![None; n]],
            revision: 0,
        };
        for a in symbol.flags() {
            for k in 0..3 {
                if is_boundary[k][a.index()] {
                    let generator = domain.derive_generator(k, a);
                    domain.generators[k][a.index()] = Some(generator);
                }
            }
        }
        domain
    }

    /// Derive the boundary generator for edge (k, a) from current
    /// coordinates.
    fn derive_generator(&self, k: usize, a: FlagId) -> Isometry {
        let kernel = self.geometry.kernel();
        let b = self.symbol.sigma(k, a);
        let (u, w) = other_types(k);
        let pu = self.points[self.vertex_point[u][a.index()].index()];
        let pw = self.points[self.vertex_point[w][a.index()].index()];
        if b == a {
            return kernel.reflection_across(&pu, &pw);
        }
        let qu = self.points[self.vertex_point[u][b.index()].index()];
        let qw = self.points[self.vertex_point[w][b.index()].index()];
        let center_a = self.points[self.chamber_center_point[a.index()].index()];
        let center_b = self.points[self.chamber_center_point[b.index()].index()];
        let target_side = kernel.side_of(&qu, &qw, &center_b);
        let unflipped = kernel.edge_map((&pu, &pw), (&qu, &qw), false);
        let mapped_side = kernel.side_of(&qu, &qw, &unflipped.apply(&center_a));
        // The generator must carry this chamber onto the phantom neighbor on
        // the far side of the partner edge.
        if mapped_side * target_side < 0.0 {
            unflipped
        } else {
            kernel.edge_map((&pu, &pw), (&qu, &qw), true)
        }
    }

    /// The symbol this domain realizes.
    #[must_use]
    pub const fn symbol(&self) -> &DSymbol {
        &self.symbol
    }

    /// The geometry the coordinates live in.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The tolerances the domain was built with.
    #[must_use]
    pub const fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Mutation counter; bumped on every coordinate change so external
    /// renderers can poll for updates.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether edge (k, a) lies on the domain boundary.
    #[must_use]
    pub fn is_boundary_edge(&self, k: usize, a: FlagId) -> bool {
        self.generators[k][a.index()].is_some()
    }

    /// Whether the whole (i,j)-orbit of `a` is realized in the interior,
    /// needing no generator.
    #[must_use]
    pub fn is_cycle(&self, i: usize, j: usize, a: FlagId) -> bool {
        self.symbol.orbit(i, j, a).into_iter().all(|x| {
            !self.is_boundary_edge(i, x) && !self.is_boundary_edge(j, x)
        })
    }

    /// Orbit length r of the (i,j)-orbit of `a`.
    #[must_use]
    pub fn compute_orbit_length(&self, i: usize, j: usize, a: FlagId) -> u32 {
        self.symbol.orbit_length(i, j, a)
    }

    /// Boundary generator of edge (k, a), if any.
    #[must_use]
    pub fn generator(&self, k: usize, a: FlagId) -> Option<&Isometry> {
        self.generators[k][a.index()].as_ref()
    }

    /// Realized point id of the type-k vertex of chamber `a`.
    #[must_use]
    pub fn vertex_point_id(&self, k: usize, a: FlagId) -> PointId {
        self.vertex_point[k][a.index()]
    }

    /// Realized point id of the type-k edge center of chamber `a`.
    #[must_use]
    pub fn edge_center_point_id(&self, k: usize, a: FlagId) -> PointId {
        self.edge_center_point[k][a.index()]
    }

    /// Realized point id of chamber `a`'s center.
    #[must_use]
    pub fn chamber_center_point_id(&self, a: FlagId) -> PointId {
        self.chamber_center_point[a.index()]
    }

    /// Resolve a handle to its realized point.
    #[must_use]
    pub fn handle_point(&self, handle: Handle) -> PointId {
        match handle.kind {
            HandleKind::Vertex => self.vertex_point_id(handle.vertex_type, handle.flag),
            HandleKind::EdgeCenter => self.edge_center_point_id(handle.vertex_type, handle.flag),
        }
    }

    /// Embedded position of a realized point.
    #[must_use]
    pub fn point(&self, id: PointId) -> Point3 {
        self.points[id.index()]
    }

    /// 2D model position of a realized point.
    #[must_use]
    pub fn point_2d(&self, id: PointId) -> Point2 {
        self.geometry.kernel().from_model(&self.points[id.index()])
    }

    /// 2D model position of the type-k vertex of chamber `a`.
    #[must_use]
    pub fn vertex_coord(&self, k: usize, a: FlagId) -> Point2 {
        self.point_2d(self.vertex_point_id(k, a))
    }

    /// 2D model position of the type-k edge center of chamber `a`.
    #[must_use]
    pub fn edge_center_coord(&self, k: usize, a: FlagId) -> Point2 {
        self.point_2d(self.edge_center_point_id(k, a))
    }

    /// 2D model position of chamber `a`'s center.
    #[must_use]
    pub fn chamber_center_coord(&self, a: FlagId) -> Point2 {
        self.point_2d(self.chamber_center_point_id(a))
    }

    /// Move a realized point, bumping the revision.
    pub(crate) fn set_point(&mut self, id: PointId, position: Point3) {
        self.points[id.index()] = position;
        self.revision += 1;
    }

    /// Pure-data copy of all coordinates, for external undo stacks.
    #[must_use]
    pub fn coordinates(&self) -> CoordinateSnapshot {
        CoordinateSnapshot {
            points: self.points.clone(),
        }
    }

    /// Restore coordinates captured earlier from this same domain.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot came from a domain of a different size.
    pub fn restore(&mut self, snapshot: &CoordinateSnapshot) {
        assert_eq!(
            snapshot.points.len(),
            self.points.len(),
            "coordinate snapshot does not belong to this domain"
        );
        self.points.clone_from(&snapshot.points);
        self.revision += 1;
    }

    /// Per-flag coordinate tables for the external renderer.
    #[must_use]
    pub fn snapshot(&self) -> DomainSnapshot {
        let coords = |table: &[PointId]| -> Vec<Point2> {
            table.iter().map(|&pid| self.point_2d(pid)).collect()
        };
        DomainSnapshot {
            geometry: self.geometry,
            vertex_coords: [
                coords(&self.vertex_point[0]),
                coords(&self.vertex_point[1]),
                coords(&self.vertex_point[2]),
            ],
            edge_center_coords: [
                coords(&self.edge_center_point[0]),
                coords(&self.edge_center_point[1]),
                coords(&self.edge_center_point[2]),
            ],
            chamber_center_coords: coords(&self.chamber_center_point),
            generators: self.generators.clone(),
            revision: self.revision,
        }
    }

    /// All boundary edge instances (k, a).
    #[must_use]
    pub fn boundary_edges(&self) -> Vec<(usize, FlagId)> {
        let mut result = Vec::new();
        for a in self.symbol.flags() {
            for k in 0..3 {
                if self.is_boundary_edge(k, a) {
                    result.push((k, a));
                }
            }
        }
        result
    }

    /// Mirror edges (σk(a) = a) having the given realized point as an
    /// endpoint.
    #[must_use]
    pub(crate) fn mirror_edges_at_point(&self, id: PointId) -> Vec<(usize, FlagId)> {
        let mut result = Vec::new();
        for a in self.symbol.flags() {
            for k in 0..3 {
                if self.symbol.sigma(k, a) != a {
                    continue;
                }
                let (u, w) = other_types(k);
                if self.vertex_point[u][a.index()] == id || self.vertex_point[w][a.index()] == id {
                    result.push((k, a));
                }
            }
        }
        result
    }

    /// Whether the realized corner point is interior: every chamber edge
    /// having it as an endpoint is an interior identification.
    #[must_use]
    pub fn is_interior_vertex(&self, id: PointId) -> bool {
        let mut incident = false;
        for a in self.symbol.flags() {
            for k in 0..3 {
                let (u, w) = other_types(k);
                if self.vertex_point[u][a.index()] == id || self.vertex_point[w][a.index()] == id {
                    incident = true;
                    if self.is_boundary_edge(k, a) {
                        return false;
                    }
                }
            }
        }
        incident
    }

    /// Sum of chamber wedge angles at a realized corner point.
    ///
    /// Exactly 2π at interior corners; partial (closed by generators) at
    /// boundary corners. Wedges are measured toward the adjacent edge
    /// centers, so bent edges are accounted for.
    #[must_use]
    pub fn angle_sum_at_vertex(&self, id: PointId) -> f64 {
        let kernel = self.geometry.kernel();
        let mut total = 0.0;
        for a in self.symbol.flags() {
            for t in 0..3 {
                if self.vertex_point[t][a.index()] != id {
                    continue;
                }
                let (u, w) = other_types(t);
                let corner = self.points[id.index()];
                let toward_u = self.points[self.edge_center_point[u][a.index()].index()];
                let toward_w = self.points[self.edge_center_point[w][a.index()].index()];
                total += kernel.angle_at(&corner, &toward_u, &toward_w);
            }
        }
        total
    }

    /// Recompute every boundary generator from current coordinates.
    ///
    /// Partner points are kept consistent by the solver's propagation, so
    /// this refreshes the cached isometries — and re-projects the bend
    /// point of any mirror edge onto its (possibly moved) mirror line,
    /// since a reflection can only fix points on its own axis.
    pub fn recompute_generators(&mut self) {
        let kernel = self.geometry.kernel();
        for a in self.symbol.flags() {
            for k in 0..3 {
                if self.generators[k][a.index()].is_none() {
                    continue;
                }
                let generator = self.derive_generator(k, a);
                if self.symbol.sigma(k, a) == a {
                    let center_id = self.edge_center_point[k][a.index()];
                    let center = self.points[center_id.index()];
                    let projected = kernel.midpoint(&center, &generator.apply(&center));
                    self.points[center_id.index()] = projected;
                }
                self.generators[k][a.index()] = Some(generator);
            }
        }
        self.revision += 1;
    }

    /// Recompute all chamber centers from current corner positions.
    pub(crate) fn refresh_chamber_centers(&mut self) {
        let kernel = self.geometry.kernel();
        for a in 0..self.symbol.size() {
            let sum = self.points[self.vertex_point[0][a].index()].vector()
                + self.points[self.vertex_point[1][a].index()].vector()
                + self.points[self.vertex_point[2][a].index()].vector();
            let centroid = kernel.normalize(Point3::from_vector(sum));
            self.points[self.chamber_center_point[a].index()] = centroid;
        }
        self.revision += 1;
    }

    /// Worst violation of the generator correspondence across all boundary
    /// edges: the largest distance between a mapped edge point and its
    /// partner.
    #[must_use]
    pub fn generator_deviation(&self) -> f64 {
        let kernel = self.geometry.kernel();
        let mut worst = 0.0_f64;
        for (k, a) in self.boundary_edges() {
            let Some(generator) = self.generator(k, a) else {
                continue;
            };
            let b = self.symbol.sigma(k, a);
            let (u, w) = other_types(k);
            for t in [u, w] {
                let mapped = generator.apply(&self.points[self.vertex_point[t][a.index()].index()]);
                let partner = self.points[self.vertex_point[t][b.index()].index()];
                worst = worst.max(kernel.distance(&mapped, &partner));
            }
            let mapped_center =
                generator.apply(&self.points[self.edge_center_point[k][a.index()].index()]);
            let partner_center = self.points[self.edge_center_point[k][b.index()].index()];
            worst = worst.max(kernel.distance(&mapped_center, &partner_center));
        }
        worst
    }
}

// =============================================================================
// CHAMBER SHAPE
// =============================================================================

/// Place chamber `b` as the mirror image of chamber `a` across a's type-k
/// edge; the two shared corners are copied verbatim.
fn place_by_reflection(
    kernel: &dyn GeometryKernel,
    corners: &mut [[Point3; 3]],
    a: FlagId,
    k: usize,
    b: FlagId,
) {
    let (u, w) = other_types(k);
    let shared_u = corners[a.index()][u];
    let shared_w = corners[a.index()][w];
    let reflection = kernel.reflection_across(&shared_u, &shared_w);
    let image = reflection.apply(&corners[a.index()][k]);
    corners[b.index()][u] = shared_u;
    corners[b.index()][w] = shared_w;
    corners[b.index()][k] = image;
}

/// The two vertex types other than `k`, ascending.
pub(crate) fn other_types(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        2 => (0, 1),
        _ => panic!("invalid type index {k}"),
    }
}

/// Per-corner chamber angles of the seed flag, adjusted so a metric triangle
/// with these angles exists in the geometry.
fn seed_angles(symbol: &DSymbol, geometry: Geometry, seed: FlagId) -> [f64; 3] {
    let mut angles = [0.0_f64; 3];
    for (t, angle) in angles.iter_mut().enumerate() {
        let (i, j) = other_types(t);
        *angle = symbol.chamber_corner_angle(i, j, seed);
    }
    let sum: f64 = angles.iter().sum();
    let factor = match geometry {
        Geometry::Euclidean => PI / sum,
        Geometry::Spherical => {
            if sum > PI + 1e-9 {
                1.0
            } else {
                1.05 * PI / sum
            }
        }
        Geometry::Hyperbolic => {
            if sum < PI - 1e-9 {
                1.0
            } else {
                0.95 * PI / sum
            }
        }
    };
    if (factor - 1.0).abs() > 1e-9 {
        log::debug!(
            "seed chamber angles scaled by {factor} to fit {geometry} geometry \
             (heterogeneous corner orbits)"
        );
    }
    [
        angles[0] * factor,
        angles[1] * factor,
        angles[2] * factor,
    ]
}

/// Side lengths of the metric triangle with the given corner angles;
/// `sides[t]` is the length of the edge opposite corner `t`.
fn triangle_sides(geometry: Geometry, angles: &[f64; 3]) -> [f64; 3] {
    let mut sides = [0.0_f64; 3];
    for (t, side) in sides.iter_mut().enumerate() {
        let (u, w) = other_types(t);
        *side = match geometry {
            // Law of sines on the unit-diameter circumcircle.
            Geometry::Euclidean => angles[t].sin(),
            Geometry::Spherical => {
                let cosine = (angles[t].cos() + angles[u].cos() * angles[w].cos())
                    / (angles[u].sin() * angles[w].sin());
                cosine.clamp(-1.0, 1.0).acos()
            }
            Geometry::Hyperbolic => {
                let hyperbolic_cosine = (angles[t].cos() + angles[u].cos() * angles[w].cos())
                    / (angles[u].sin() * angles[w].sin());
                hyperbolic_cosine.max(1.0).acosh()
            }
        };
    }
    sides
}

// =============================================================================
// TESTS
// =============================================================================
