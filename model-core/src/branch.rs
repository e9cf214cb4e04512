//! Connectors between a node pyramid and one of its children.
//!
//! A branch is described over seven logical slots. Slots 0, 1 and 2 lie on
//! the source pyramid (slot 1 is always its apex); slots 3 to 6 lie on the
//! target's base square. Which concrete corners the slots land on depends on
//! the side face the branch leaves from, given by the link's
//! `index_to_source` modulo 4.

use crate::builder::Simplex;
use crate::error::{ModelError, Result};
use crate::graph::Link;
use crate::template::{APEX, EDGES_IN_A_BRANCH, SIMPLEXES_IN_A_BRANCH, TRIANGLES_IN_A_BRANCH};
use crate::types::{BranchId, PointId};

pub const SLOTS_IN_A_BRANCH: usize = 7;

pub const BRANCH_EDGES: [[usize; 2]; EDGES_IN_A_BRANCH] = [
    // source to target
    [0, 3],
    [1, 4],
    [1, 5],
    [2, 6],
    // inner
    [0, 4],
    [2, 5],
    [0, 6],
];

pub const BRANCH_TRIANGLES: [[usize; 3]; TRIANGLES_IN_A_BRANCH] = [
    [0, 1, 4],
    [1, 4, 5],
    [1, 2, 5],
    [2, 5, 6],
    [0, 2, 6],
    [0, 3, 6],
    [0, 3, 4],
];

/// Which side face of the source pyramid a branch leaves from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// `index_to_source % 4 == 2`
    Class0,
    /// `index_to_source % 4 == 1`
    Class1,
    /// `index_to_source % 4 == 0`
    Class2,
    /// `index_to_source % 4 == 3`
    Class3,
}

/// Slot tables as `(on_source, corner)` pairs, one per slot.
const CLASS0_SLOTS: [(bool, usize); SLOTS_IN_A_BRANCH] = [
    (true, 1),
    (true, APEX),
    (true, 0),
    (false, 1),
    (false, 2),
    (false, 3),
    (false, 0),
];
const CLASS1_SLOTS: [(bool, usize); SLOTS_IN_A_BRANCH] = [
    (true, 1),
    (true, APEX),
    (true, 2),
    (false, 1),
    (false, 0),
    (false, 3),
    (false, 2),
];
const CLASS2_SLOTS: [(bool, usize); SLOTS_IN_A_BRANCH] = [
    (true, 2),
    (true, APEX),
    (true, 3),
    (false, 2),
    (false, 1),
    (false, 0),
    (false, 3),
];
const CLASS3_SLOTS: [(bool, usize); SLOTS_IN_A_BRANCH] = [
    (true, 3),
    (true, APEX),
    (true, 0),
    (false, 3),
    (false, 2),
    (false, 1),
    (false, 0),
];

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Class0,
        Orientation::Class1,
        Orientation::Class2,
        Orientation::Class3,
    ];

    /// Selects the orientation class of a link.
    ///
    /// Negative values wrap like a mathematical modulo, so `-1` selects the
    /// same class as `3`.
    ///
    /// ### Errors
    /// [`ModelError::UnknownOrientation`] if the residue has no class.
    pub fn from_index_to_source(link: BranchId, index_to_source: i64) -> Result<Self> {
        match index_to_source.rem_euclid(4) {
            2 => Ok(Orientation::Class0),
            1 => Ok(Orientation::Class1),
            0 => Ok(Orientation::Class2),
            3 => Ok(Orientation::Class3),
            _ => Err(ModelError::UnknownOrientation {
                link,
                index_to_source,
            }),
        }
    }

    fn slots(self) -> &'static [(bool, usize); SLOTS_IN_A_BRANCH] {
        match self {
            Orientation::Class0 => &CLASS0_SLOTS,
            Orientation::Class1 => &CLASS1_SLOTS,
            Orientation::Class2 => &CLASS2_SLOTS,
            Orientation::Class3 => &CLASS3_SLOTS,
        }
    }

    /// Resolves every slot to an absolute point id.
    pub fn slot_map(
        self,
        source_base: PointId,
        target_base: PointId,
    ) -> [PointId; SLOTS_IN_A_BRANCH] {
        self.slots().map(|(on_source, corner)| {
            if on_source {
                source_base + corner
            } else {
                target_base + corner
            }
        })
    }
}

/// Emits the 14 simplices joining two placed pyramids: 7 edges, then
/// 7 triangles.
///
/// ### Parameters
/// - `branch` - Id of the link, used for error reporting.
/// - `link` - The link being connected.
/// - `source_base` / `target_base` - First point id of each pyramid.
///
/// ### Errors
/// [`ModelError::UnknownOrientation`] if `index_to_source` has no class.
pub fn connect(
    branch: BranchId,
    link: &Link,
    source_base: PointId,
    target_base: PointId,
) -> Result<Vec<Simplex>> {
    let map = Orientation::from_index_to_source(branch, link.index_to_source)?
        .slot_map(source_base, target_base);

    let resolve = |slots: &[usize]| -> Simplex { slots.iter().map(|&s| map[s]).collect() };

    let mut simplices: Vec<Simplex> = Vec::with_capacity(SIMPLEXES_IN_A_BRANCH);
    simplices.extend(BRANCH_EDGES.iter().map(|e| resolve(&e[..])));
    simplices.extend(BRANCH_TRIANGLES.iter().map(|t| resolve(&t[..])));
    Ok(simplices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn link(source: usize, target: usize, index_to_source: i64) -> Link {
        Link {
            source,
            target,
            index_to_source,
        }
    }

    #[test]
    fn residues_select_their_classes() {
        assert_eq!(Orientation::from_index_to_source(0, 2).unwrap(), Orientation::Class0);
        assert_eq!(Orientation::from_index_to_source(0, 5).unwrap(), Orientation::Class1);
        assert_eq!(Orientation::from_index_to_source(0, 8).unwrap(), Orientation::Class2);
        assert_eq!(Orientation::from_index_to_source(0, 7).unwrap(), Orientation::Class3);
        assert_eq!(Orientation::from_index_to_source(0, -1).unwrap(), Orientation::Class3);
    }

    #[test]
    fn classes_are_exhaustive_and_disjoint() {
        let classes: HashSet<Orientation> = (0..4)
            .map(|i| Orientation::from_index_to_source(0, i).unwrap())
            .collect();
        assert_eq!(classes.len(), 4);

        let maps: HashSet<[PointId; SLOTS_IN_A_BRANCH]> =
            Orientation::ALL.iter().map(|o| o.slot_map(0, 5)).collect();
        assert_eq!(maps.len(), 4);
    }

    #[test]
    fn class_one_maps_first_slots_to_corner_one() {
        // source 0, target 1, index_to_source 5
        let map = Orientation::from_index_to_source(0, 5)
            .unwrap()
            .slot_map(0, 5);
        assert_eq!(map[0], 1);
        assert_eq!(map[3], 6);
        assert_eq!(map, [1, 4, 2, 6, 5, 8, 7]);
    }

    #[test]
    fn slot_tables_match_reference_wiring() {
        let s = 10;
        let t = 20;
        assert_eq!(Orientation::Class0.slot_map(s, t), [11, 14, 10, 21, 22, 23, 20]);
        assert_eq!(Orientation::Class1.slot_map(s, t), [11, 14, 12, 21, 20, 23, 22]);
        assert_eq!(Orientation::Class2.slot_map(s, t), [12, 14, 13, 22, 21, 20, 23]);
        assert_eq!(Orientation::Class3.slot_map(s, t), [13, 14, 10, 23, 22, 21, 20]);
    }

    #[test]
    fn every_class_uses_the_source_apex_and_no_target_apex() {
        for o in Orientation::ALL {
            let map = o.slot_map(0, 5);
            assert_eq!(map[1], APEX);
            assert!(!map.contains(&(5 + APEX)));
        }
    }

    #[test]
    fn connect_emits_edges_then_triangles() {
        let simplices = connect(0, &link(0, 1, 2), 0, 5).unwrap();
        assert_eq!(simplices.len(), SIMPLEXES_IN_A_BRANCH);
        assert!(simplices[..EDGES_IN_A_BRANCH].iter().all(|s| s.len() == 2));
        assert!(simplices[EDGES_IN_A_BRANCH..].iter().all(|s| s.len() == 3));

        // class 0: slot 0 -> s1, slot 3 -> t1
        assert_eq!(simplices[0].as_slice(), &[1, 6]);
        // last triangle [0, 3, 4] -> [s1, t1, t2]
        assert_eq!(simplices[13].as_slice(), &[1, 6, 7]);
    }

    #[test]
    fn every_branch_simplex_touches_the_source_pyramid() {
        for i in 0..4 {
            let simplices = connect(0, &link(2, 3, i), 10, 15).unwrap();
            for s in &simplices {
                assert!(s.iter().any(|&p| (10..15).contains(&p)), "{s:?}");
                assert!(s.iter().all(|&p| (10..20).contains(&p)));
            }
        }
    }
}
