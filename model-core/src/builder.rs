//! Accumulation of points and simplices into a finished model.

use glam::DVec3;
use smallvec::SmallVec;

use crate::atoms::AtomTable;
use crate::error::{ModelError, Result};
use crate::template::{POINTS_IN_A_NODE, SIMPLEXES_IN_A_BRANCH, SIMPLEXES_IN_A_NODE};
use crate::types::{BranchId, NodeId, PointId, SimplexId};

/// A vertex, edge, triangle or tetrahedron given by 1 to 4 point ids.
pub type Simplex = SmallVec<[PointId; 4]>;

/// The node or branch a simplex was generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimplexOwner {
    Node(NodeId),
    Branch(BranchId),
}

/// Where node and branch simplices live in the flat simplex sequence.
///
/// All node simplices come first, node by node, followed by the simplices
/// of every branch, branch by branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimplexLayout {
    pub node_count: usize,
    pub branch_count: usize,
}

impl SimplexLayout {
    pub fn new(node_count: usize, branch_count: usize) -> Self {
        Self {
            node_count,
            branch_count,
        }
    }

    pub fn point_count(&self) -> usize {
        self.node_count * POINTS_IN_A_NODE
    }

    /// First simplex id that belongs to a branch.
    pub fn first_branch_simplex(&self) -> SimplexId {
        self.node_count * SIMPLEXES_IN_A_NODE
    }

    pub fn simplex_count(&self) -> usize {
        self.first_branch_simplex() + self.branch_count * SIMPLEXES_IN_A_BRANCH
    }

    pub fn node_range(&self, node: NodeId) -> std::ops::Range<SimplexId> {
        let start = node * SIMPLEXES_IN_A_NODE;
        start..start + SIMPLEXES_IN_A_NODE
    }

    pub fn branch_range(&self, branch: BranchId) -> std::ops::Range<SimplexId> {
        let start = self.first_branch_simplex() + branch * SIMPLEXES_IN_A_BRANCH;
        start..start + SIMPLEXES_IN_A_BRANCH
    }

    pub fn branch_simplices(&self) -> std::ops::Range<SimplexId> {
        self.first_branch_simplex()..self.simplex_count()
    }

    /// Returns the owner of a simplex id, or `None` past the end.
    pub fn owner(&self, id: SimplexId) -> Option<SimplexOwner> {
        let first_branch = self.first_branch_simplex();
        if id < first_branch {
            Some(SimplexOwner::Node(id / SIMPLEXES_IN_A_NODE))
        } else if id < self.simplex_count() {
            Some(SimplexOwner::Branch(
                (id - first_branch) / SIMPLEXES_IN_A_BRANCH,
            ))
        } else {
            None
        }
    }
}

/// Caller-owned accumulator for the points and simplices of a model.
///
/// Pipeline stages push into the builder in order; ids are handed out
/// sequentially, so a point's or simplex's id is its position at the time
/// it was pushed.
///
/// ### Fields
/// - `points` - Absolute positions, indexed by [`PointId`].
/// - `simplices` - Point id lists, indexed by [`SimplexId`].
#[derive(Debug, Default)]
pub struct ComplexBuilder {
    points: Vec<DVec3>,
    simplices: Vec<Simplex>,
}

impl ComplexBuilder {
    /// Creates a builder with room for the given layout.
    ///
    /// ### Parameters
    /// - `layout` - Expected node and branch counts; used only for capacity.
    pub fn with_layout(layout: &SimplexLayout) -> Self {
        Self {
            points: Vec::with_capacity(layout.point_count()),
            simplices: Vec::with_capacity(layout.simplex_count()),
        }
    }

    /// Appends points and returns the id of the first one.
    pub fn push_points(&mut self, points: impl IntoIterator<Item = DVec3>) -> PointId {
        let first = self.points.len();
        self.points.extend(points);
        first
    }

    /// Appends simplices and returns the id of the first one.
    pub fn push_simplices(&mut self, simplices: impl IntoIterator<Item = Simplex>) -> SimplexId {
        let first = self.simplices.len();
        self.simplices.extend(simplices);
        first
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn simplex_count(&self) -> usize {
        self.simplices.len()
    }

    /// Consumes the builder and attaches the atom table.
    ///
    /// ### Errors
    /// [`ModelError::IncompleteModel`] if the builder does not hold exactly
    /// the points and simplices `layout` describes.
    pub fn finish(self, layout: SimplexLayout, atoms: AtomTable) -> Result<SimplicialModel> {
        if self.points.len() != layout.point_count()
            || self.simplices.len() != layout.simplex_count()
        {
            return Err(ModelError::IncompleteModel {
                points: self.points.len(),
                simplices: self.simplices.len(),
                expected_points: layout.point_count(),
                expected_simplices: layout.simplex_count(),
            });
        }
        Ok(SimplicialModel {
            layout,
            points: self.points,
            simplices: self.simplices,
            atoms,
        })
    }
}

/// A finished simplicial complex with its atom labelling.
#[derive(Debug)]
pub struct SimplicialModel {
    layout: SimplexLayout,
    points: Vec<DVec3>,
    simplices: Vec<Simplex>,
    atoms: AtomTable,
}

impl SimplicialModel {
    pub fn layout(&self) -> &SimplexLayout {
        &self.layout
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    /// Names of the atoms carried by one simplex, in atom table order.
    pub fn atoms_of(&self, id: SimplexId) -> Vec<&str> {
        self.atoms.atoms_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn layout_counts_follow_node_and_branch_sizes() {
        let layout = SimplexLayout::new(3, 2);
        assert_eq!(layout.point_count(), 15);
        assert_eq!(layout.first_branch_simplex(), 69);
        assert_eq!(layout.simplex_count(), 69 + 28);
        assert_eq!(layout.node_range(1), 23..46);
        assert_eq!(layout.branch_range(1), 83..97);
        assert_eq!(layout.branch_simplices(), 69..97);
    }

    #[test]
    fn owner_splits_at_first_branch_simplex() {
        let layout = SimplexLayout::new(2, 1);
        assert_eq!(layout.owner(0), Some(SimplexOwner::Node(0)));
        assert_eq!(layout.owner(22), Some(SimplexOwner::Node(0)));
        assert_eq!(layout.owner(23), Some(SimplexOwner::Node(1)));
        assert_eq!(layout.owner(45), Some(SimplexOwner::Node(1)));
        assert_eq!(layout.owner(46), Some(SimplexOwner::Branch(0)));
        assert_eq!(layout.owner(59), Some(SimplexOwner::Branch(0)));
        assert_eq!(layout.owner(60), None);
    }

    #[test]
    fn push_returns_sequential_ids() {
        let mut builder = ComplexBuilder::default();
        assert_eq!(builder.push_points([DVec3::ZERO, DVec3::ONE]), 0);
        assert_eq!(builder.push_points([DVec3::X]), 2);
        assert_eq!(builder.point_count(), 3);

        let a: Simplex = smallvec![0];
        let b: Simplex = smallvec![0, 1];
        assert_eq!(builder.push_simplices([a, b]), 0);
        let c: Simplex = smallvec![0, 1, 2];
        assert_eq!(builder.push_simplices([c]), 2);
        assert_eq!(builder.simplex_count(), 3);
    }

    #[test]
    fn finish_rejects_incomplete_builder() {
        let builder = ComplexBuilder::default();
        let layout = SimplexLayout::new(1, 0);
        let atoms = AtomTable::propagate(&[], &SimplexLayout::new(0, 0));
        let err = builder.finish(layout, atoms).unwrap_err();
        assert!(matches!(
            err,
            ModelError::IncompleteModel {
                points: 0,
                simplices: 0,
                expected_points: 5,
                expected_simplices: 23,
            }
        ));
    }

    #[test]
    fn finish_accepts_builder_matching_layout() {
        let layout = SimplexLayout::new(0, 0);
        let atoms = AtomTable::propagate(&[], &layout);
        let model = ComplexBuilder::default().finish(layout, atoms).unwrap();
        assert!(model.points().is_empty());
        assert!(model.simplices().is_empty());
    }
}
