/// Identifier for a node in a [`crate::graph::TreeGraph`].
///
/// This is the node's `index` field from the input document, which is
/// dense and 0-based once the graph has been validated.
pub type NodeId = usize;

/// Identifier for a branch, i.e. the position of a link in
/// [`crate::graph::TreeGraph::links`].
pub type BranchId = usize;

/// Position of a point in the flat point sequence of a model.
pub type PointId = usize;

/// Position of a simplex in the flat simplex sequence of a model.
pub type SimplexId = usize;
