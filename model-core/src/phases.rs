//! High-level conversion phases from a tree graph to a simplicial model.
//!
//! The conversion runs each phase exactly once:
//! 1. [`placement_phase`]: every node's pyramid is placed, appending five
//!    points per node to the [`ComplexBuilder`].
//! 2. [`node_phase`]: the template simplices of every node are appended,
//!    shifted onto that node's points.
//! 3. [`branch_phase`]: every link is connected with 14 branch simplices.
//! 4. [`atom_phase`]: node atoms and the branch atom are spread over the
//!    simplices.
//!
//! [`build_model`] chains them and hands back the finished model.

use tracing::{debug, info, info_span};

use crate::{
    atoms::AtomTable,
    branch,
    builder::{ComplexBuilder, SimplexLayout, SimplicialModel},
    config::Config,
    error::Result,
    graph::TreeGraph,
    placer,
    template::{self, point_base},
};

/// Appends the five placed points of every node, in node index order.
///
/// ### Parameters
/// - `graph` - The validated tree; only read access is required.
/// - `cfg` - Conversion configuration, providing the translate distance.
/// - `builder` - Accumulator receiving the points.
pub fn placement_phase(graph: &TreeGraph, cfg: &Config, builder: &mut ComplexBuilder) {
    for node in &graph.nodes {
        let first = builder.push_points(placer::place(node, cfg));
        debug_assert_eq!(first, point_base(node.index));
    }
    debug!(points = builder.point_count(), "placed node pyramids");
}

/// Appends the 23 template simplices of every node, in node index order.
///
/// Must run after [`placement_phase`] and before [`branch_phase`] so that
/// node simplices occupy ids `0..N * 23`.
pub fn node_phase(graph: &TreeGraph, builder: &mut ComplexBuilder) {
    for node in &graph.nodes {
        builder.push_simplices(template::node_simplices(point_base(node.index)));
    }
    debug!(simplices = builder.simplex_count(), "added node simplices");
}

/// Appends the 14 connector simplices of every link, in link order.
///
/// ### Errors
/// Returns [`crate::error::ModelError::UnknownOrientation`] for the first
/// link whose `index_to_source` selects no orientation class.
pub fn branch_phase(graph: &TreeGraph, builder: &mut ComplexBuilder) -> Result<()> {
    for (id, link) in graph.links.iter().enumerate() {
        let simplices = branch::connect(
            id,
            link,
            point_base(link.source),
            point_base(link.target),
        )?;
        builder.push_simplices(simplices);
    }
    debug!(simplices = builder.simplex_count(), "added branch simplices");
    Ok(())
}

/// Builds the atom table for the model's layout.
pub fn atom_phase(graph: &TreeGraph, layout: &SimplexLayout) -> AtomTable {
    let atoms = AtomTable::propagate(&graph.nodes, layout);
    debug!(atoms = atoms.len(), "propagated atoms");
    atoms
}

/// Converts a validated tree into its simplicial model.
///
/// ### Parameters
/// - `graph` - The validated tree.
/// - `cfg` - Conversion configuration.
///
/// ### Returns
/// The finished [`SimplicialModel`], or the first error met by
/// [`branch_phase`]. Nothing is returned on failure.
pub fn build_model(graph: &TreeGraph, cfg: &Config) -> Result<SimplicialModel> {
    let _span = info_span!("build_model").entered();

    let layout = SimplexLayout::new(graph.node_count(), graph.branch_count());
    let mut builder = ComplexBuilder::with_layout(&layout);

    placement_phase(graph, cfg, &mut builder);
    node_phase(graph, &mut builder);
    branch_phase(graph, &mut builder)?;
    let atoms = atom_phase(graph, &layout);

    info!(
        nodes = layout.node_count,
        branches = layout.branch_count,
        points = layout.point_count(),
        simplices = layout.simplex_count(),
        "model built"
    );
    builder.finish(layout, atoms)
}
