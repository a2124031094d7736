//! Post-pass re-centering of structurally straight edges.
//!
//! Type-0 and type-1 chamber edges (the spokes from tile centers to edge
//! centers and vertices) are rendered as straight geodesics; only type-2
//! edges (the tile outlines) carry user-shaped bends. After coordinates
//! move, this pass snaps every type-0/1 edge center back to the geodesic
//! midpoint of its endpoints so drift cannot accumulate over a drag.

use crate::core::flag::flags;
use crate::domain::fundamental_domain::{other_types, FundamentalDomain};

/// Re-center all type-0 and type-1 edge midpoints.
pub fn straighten_edges(domain: &mut FundamentalDomain) {
    let kernel = domain.geometry().kernel();
    let size = domain.symbol().size();
    for a in flags(size) {
        for k in [0, 1] {
            let (u, w) = other_types(k);
            let midpoint = kernel.midpoint(
                &domain.point(domain.vertex_point_id(u, a)),
                &domain.point(domain.vertex_point_id(w, a)),
            );
            domain.set_point(domain.edge_center_point_id(k, a), midpoint);
        }
    }
}

/// Whether the type-k edge of chamber `a` is kept straight by this pass.
#[must_use]
pub fn is_straight_edge_type(k: usize) -> bool {
    k < 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flag::FlagId;
    use crate::core::symbol::DSymbol;
    use crate::geometry::point::Point3;

    #[test]
    fn recenters_displaced_midpoints() {
        let symbol: DSymbol = "<1.1:1:1,1,1:4,4>".parse().unwrap();
        let mut domain = FundamentalDomain::build(&symbol);
        let flag = FlagId::from_number(1);
        let center = domain.edge_center_point_id(0, flag);
        let expected = domain.point(center);

        domain.set_point(center, Point3::new(5.0, 5.0, 1.0));
        straighten_edges(&mut domain);

        let restored = domain.point(center);
        let kernel = domain.geometry().kernel();
        assert!(kernel.distance(&restored, &expected) < 1e-9);
    }

    #[test]
    fn edge_type_classification() {
        assert!(is_straight_edge_type(0));
        assert!(is_straight_edge_type(1));
        assert!(!is_straight_edge_type(2));
    }
}
