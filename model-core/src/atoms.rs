//! Atom labelling of simplices.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::builder::SimplexLayout;
use crate::graph::TreeNode;
use crate::types::SimplexId;

/// Reserved atom carried by every branch simplex and nothing else.
pub const BRANCH_ATOM: &str = "branch";

/// Truth value of every atom on every simplex.
///
/// Names are node atoms in first-seen order followed by [`BRANCH_ATOM`];
/// `values[a][i]` is true iff simplex `i` carries atom `names[a]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomTable {
    names: Vec<String>,
    values: Vec<Vec<bool>>,
}

impl AtomTable {
    /// Builds the table for a model laid out as `layout`.
    ///
    /// Every simplex of node `i` carries exactly the atoms of `nodes[i]`;
    /// every branch simplex carries exactly [`BRANCH_ATOM`].
    ///
    /// ### Parameters
    /// - `nodes` - Validated nodes in index order.
    /// - `layout` - Node and branch counts of the model.
    pub fn propagate(nodes: &[TreeNode], layout: &SimplexLayout) -> Self {
        let mut names: Vec<String> = Vec::new();
        for node in nodes {
            for atom in &node.atoms {
                if !names.contains(atom) {
                    names.push(atom.clone());
                }
            }
        }

        let total = layout.simplex_count();
        let mut values: Vec<Vec<bool>> = names
            .iter()
            .map(|name| {
                let mut row = vec![false; total];
                for node in nodes.iter().filter(|n| n.has_atom(name)) {
                    row[layout.node_range(node.index)].fill(true);
                }
                row
            })
            .collect();

        let mut branch = vec![false; total];
        branch[layout.branch_simplices()].fill(true);

        names.push(BRANCH_ATOM.to_string());
        values.push(branch);

        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Truth values of one atom, indexed by simplex id.
    pub fn get(&self, name: &str) -> Option<&[bool]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|a| self.values[a].as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Names of the atoms true on one simplex, in table order.
    pub fn atoms_of(&self, id: SimplexId) -> Vec<&str> {
        self.iter()
            .filter(|(_, row)| row.get(id).copied().unwrap_or(false))
            .map(|(name, _)| name)
            .collect()
    }
}

/// Serializes as a JSON object whose keys keep table order.
impl Serialize for AtomTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, row) in self.iter() {
            map.serialize_entry(name, row)?;
        }
        map.end()
    }
}
