//! Euler characteristic, curvature classification, and group names on
//! deterministic known configurations.
//!
//! The centerpiece is the full tetrahedron flag complex, built
//! programmatically from (vertex, edge, face) incidence chains rather than a
//! hand-typed table, so the 24-flag symbol is correct by construction.

use delaney::prelude::*;

/// Build the Delaney-Dress symbol of the tetrahedron's barycentric flag
/// complex: 24 flags (vertex ∈ edge ⊂ face chains), trivial symmetry.
fn tetrahedron_symbol() -> DSymbol {
    type Chain = (u8, [u8; 2], [u8; 3]);

    let faces: Vec<[u8; 3]> = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    let mut chains: Vec<Chain> = Vec::new();
    for face in &faces {
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                let vertex = face[i];
                let mut edge = [face[i], face[j]];
                edge.sort_unstable();
                chains.push((vertex, edge, *face));
            }
        }
    }
    assert_eq!(chains.len(), 24);
    let index_of = |chain: &Chain| -> FlagId {
        FlagId::from_index(chains.iter().position(|c| c == chain).unwrap())
    };

    let other_face = |edge: [u8; 2], face: [u8; 3]| -> [u8; 3] {
        *faces
            .iter()
            .find(|f| **f != face && edge.iter().all(|v| f.contains(v)))
            .unwrap()
    };

    let mut sigma: [Vec<FlagId>; 3] = [
        Vec::with_capacity(24),
        Vec::with_capacity(24),
        Vec::with_capacity(24),
    ];
    for &(vertex, edge, face) in &chains {
        // sigma_0: the other endpoint of the edge.
        let other_vertex = if edge[0] == vertex { edge[1] } else { edge[0] };
        sigma[0].push(index_of(&(other_vertex, edge, face)));
        // sigma_1: the other edge of this face through this vertex.
        let third = *face.iter().find(|v| !edge.contains(v)).unwrap();
        let mut new_edge = [vertex, third];
        new_edge.sort_unstable();
        sigma[1].push(index_of(&(vertex, new_edge, face)));
        // sigma_2: the other face containing this edge.
        sigma[2].push(index_of(&(vertex, edge, other_face(edge, face))));
    }

    DSymbol::from_parts((1, 1), 24, sigma, vec![3; 24], vec![3; 24]).unwrap()
}

#[test]
fn tetrahedron_counts_and_characteristic() {
    let symbol = tetrahedron_symbol();
    assert_eq!(symbol.size(), 24);
    assert_eq!(symbol.vertex_count(), 4);
    assert_eq!(symbol.edge_count(), 6);
    assert_eq!(symbol.tile_count(), 4);
    assert_eq!(symbol.euler_characteristic(), 2);
    assert_eq!(symbol.geometry(), Geometry::Spherical);
    assert!(symbol.is_orientable());
    // Trivial symmetry: the quotient is the sphere itself.
    assert_eq!(symbol.group_name(), "1");
}

#[test]
fn tetrahedron_maximal_symmetry_is_one_flag() {
    let symbol = tetrahedron_symbol();
    let minimal = symbol.max_symmetry();
    // The tetrahedral group acts simply transitively on the 24 flags.
    assert_eq!(minimal.size(), 1);
    let flag = FlagId::from_number(1);
    assert_eq!(minimal.m(0, 1, flag), 3);
    assert_eq!(minimal.m(1, 2, flag), 3);
    assert_eq!(minimal.group_name(), "*332");
    assert_eq!(minimal.geometry(), Geometry::Spherical);
    assert_eq!(minimal.max_symmetry(), minimal);
}

#[test]
fn tetrahedron_is_self_dual() {
    let symbol = tetrahedron_symbol();
    let dual = symbol.dualize();
    assert_eq!(dual.vertex_count(), symbol.tile_count());
    assert_eq!(dual.tile_count(), symbol.vertex_count());
    assert_eq!(dual.edge_count(), symbol.edge_count());
    assert_eq!(dual.euler_characteristic(), 2);
    assert_eq!(dual.dualize(), symbol);
}

#[test]
fn hexagonal_torus_is_flat_genus_one() {
    let symbol: DSymbol = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>"
        .parse()
        .unwrap();
    assert_eq!(symbol.euler_characteristic(), 0);
    assert_eq!(symbol.geometry(), Geometry::Euclidean);
    assert!(symbol.is_orientable());
    assert_eq!(symbol.group_name(), "o");
}

#[test]
fn regular_tilings_classify_by_curvature_sign() {
    let cases = [
        ("<1.1:1:1,1,1:3,3>", Geometry::Spherical, "*332"),
        ("<1.1:1:1,1,1:5,3>", Geometry::Spherical, "*532"),
        ("<1.1:1:1,1,1:4,4>", Geometry::Euclidean, "*442"),
        ("<1.1:1:1,1,1:6,3>", Geometry::Euclidean, "*632"),
        ("<1.1:1:1,1,1:7,3>", Geometry::Hyperbolic, "*732"),
        ("<1.1:1:1,1,1:5,4>", Geometry::Hyperbolic, "*542"),
    ];
    for (text, geometry, name) in cases {
        let symbol: DSymbol = text.parse().unwrap();
        assert_eq!(symbol.geometry(), geometry, "geometry of {text}");
        assert_eq!(symbol.group_name(), name, "group name of {text}");
    }
}

#[test]
fn orientation_cover_drops_the_mirrors() {
    let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
    assert_eq!(symbol.group_name(), "*442");
    let cover = symbol.orientate();
    assert_eq!(cover.size(), 2);
    assert_eq!(cover.group_name(), "442");
    assert_eq!(cover.geometry(), Geometry::Euclidean);
}

#[test]
fn corner_with_one_mirror_pair() {
    // Two chambers joined by sigma_0 and sigma_2, mirrored by sigma_1: the
    // 2*22 orbifold (one cone point of order 2, two corners of order 2).
    let symbol: DSymbol = "<3.2:2:2,1 2,2:4,4>".parse().unwrap();
    let signature = symbol.orbifold_signature();
    assert_eq!(signature.cone_orders, vec![2]);
    assert_eq!(signature.boundary_components.len(), 1);
    assert_eq!(signature.boundary_components[0], vec![2, 2]);
    assert_eq!(signature.to_string(), "2*22");
    assert_eq!(symbol.geometry(), Geometry::Euclidean);
}
