//! The square-based pyramid every tree node is built from.
//!
//! Point ids in this module are local to one node (`0..POINTS_IN_A_NODE`);
//! [`node_simplices`] shifts them to the node's place in the model.

use glam::DVec3;

use crate::builder::Simplex;
use crate::types::PointId;

pub const POINTS_IN_A_NODE: usize = 5;
pub const EDGES_IN_A_NODE: usize = 9;
pub const TRIANGLES_IN_A_NODE: usize = 7;
pub const TETRAHEDRA_IN_A_NODE: usize = 2;
pub const SIMPLEXES_IN_A_NODE: usize =
    POINTS_IN_A_NODE + EDGES_IN_A_NODE + TRIANGLES_IN_A_NODE + TETRAHEDRA_IN_A_NODE;

pub const EDGES_IN_A_BRANCH: usize = 7;
pub const TRIANGLES_IN_A_BRANCH: usize = 7;
pub const SIMPLEXES_IN_A_BRANCH: usize = EDGES_IN_A_BRANCH + TRIANGLES_IN_A_BRANCH;

/// Index of the apex in [`NODE_POINTS`].
pub const APEX: PointId = 4;

/// Base square (cycled), then the apex.
pub const NODE_POINTS: [DVec3; POINTS_IN_A_NODE] = [
    DVec3::new(-2.0, -2.0, -2.0),
    DVec3::new(-2.0, 2.0, -2.0),
    DVec3::new(2.0, 2.0, -2.0),
    DVec3::new(2.0, -2.0, -2.0),
    DVec3::new(0.0, 0.0, 2.0),
];

pub const NODE_VERTICES: [[PointId; 1]; POINTS_IN_A_NODE] = [[0], [1], [2], [3], [4]];

pub const NODE_EDGES: [[PointId; 2]; EDGES_IN_A_NODE] = [
    // base
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    // sides
    [0, 4],
    [1, 4],
    [2, 4],
    [3, 4],
    // base diagonal
    [0, 2],
];

pub const NODE_TRIANGLES: [[PointId; 3]; TRIANGLES_IN_A_NODE] = [
    [0, 1, 2],
    [0, 2, 3],
    [0, 3, 4],
    [0, 1, 4],
    [1, 2, 4],
    [2, 3, 4],
    [0, 2, 4],
];

pub const NODE_TETRAHEDRA: [[PointId; 4]; TETRAHEDRA_IN_A_NODE] = [[0, 1, 2, 4], [0, 2, 3, 4]];

/// First point id of a node's five points.
#[inline]
pub fn point_base(node: usize) -> PointId {
    node * POINTS_IN_A_NODE
}

/// The 23 simplices of the template pyramid shifted by `base`, in order:
/// vertices, edges, triangles, tetrahedra.
pub fn node_simplices(base: PointId) -> impl Iterator<Item = Simplex> {
    let shift = move |s: &[PointId]| -> Simplex { s.iter().map(|p| p + base).collect() };

    NODE_VERTICES
        .iter()
        .map(move |s| shift(&s[..]))
        .chain(NODE_EDGES.iter().map(move |s| shift(&s[..])))
        .chain(NODE_TRIANGLES.iter().map(move |s| shift(&s[..])))
        .chain(NODE_TETRAHEDRA.iter().map(move |s| shift(&s[..])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_simplex_count_is_twenty_three() {
        assert_eq!(SIMPLEXES_IN_A_NODE, 23);
        assert_eq!(node_simplices(0).count(), 23);
        assert_eq!(SIMPLEXES_IN_A_BRANCH, 14);
    }

    #[test]
    fn node_simplices_are_ordered_by_dimension() {
        let dims: Vec<usize> = node_simplices(0).map(|s| s.len()).collect();
        let mut sorted = dims.clone();
        sorted.sort();
        assert_eq!(dims, sorted);
        assert_eq!(dims.iter().filter(|&&d| d == 1).count(), POINTS_IN_A_NODE);
        assert_eq!(dims.iter().filter(|&&d| d == 4).count(), TETRAHEDRA_IN_A_NODE);
    }

    #[test]
    fn node_simplices_are_shifted_into_node_range() {
        let base = point_base(3);
        for s in node_simplices(base) {
            assert!(s.iter().all(|&p| (15..20).contains(&p)), "{s:?}");
        }
        let first: Vec<Simplex> = node_simplices(base).take(1).collect();
        assert_eq!(first[0].as_slice(), &[15]);
    }

    #[test]
    fn apex_is_the_only_point_above_the_base() {
        for (i, p) in NODE_POINTS.iter().enumerate() {
            if i == APEX {
                assert_eq!(*p, DVec3::new(0.0, 0.0, 2.0));
            } else {
                assert_eq!(p.z, -2.0);
                assert_eq!(p.x.abs(), 2.0);
                assert_eq!(p.y.abs(), 2.0);
            }
        }
    }

    #[test]
    fn tetrahedra_share_the_base_diagonal_and_apex() {
        let diagonal = NODE_EDGES[EDGES_IN_A_NODE - 1];
        for tet in NODE_TETRAHEDRA {
            assert!(diagonal.iter().all(|p| tet.contains(p)));
            assert!(tet.contains(&APEX));
        }
    }
}
