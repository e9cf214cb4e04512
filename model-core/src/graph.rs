//! Input tree graph: the document read from disk and its validated form.

use std::io::Read;

use serde::Deserialize;

use crate::error::{Endpoint, ModelError, Result};
use crate::types::{BranchId, NodeId};

/// Integer tree coordinates of a node; `z` is the depth below the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// A node record exactly as it appears in the input document.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeRecord {
    pub index: i64,
    pub coord: Coord,
    pub atoms: Vec<String>,
}

/// A link record exactly as it appears in the input document.
#[derive(Clone, Debug, Deserialize)]
pub struct LinkRecord {
    pub source: i64,
    pub target: i64,
    pub index_to_source: i64,
}

/// The raw input document with its two top-level collections.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeDocument {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub index: NodeId,
    pub coord: Coord,
    /// Atom names without duplicates, in first-seen order.
    pub atoms: Vec<String>,
    depth: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub index_to_source: i64,
}

/// A validated tree graph.
///
/// `nodes[i].index == i` for every node and every link refers to
/// existing nodes.
#[derive(Clone, Debug, Default)]
pub struct TreeGraph {
    pub nodes: Vec<TreeNode>,
    pub links: Vec<Link>,
}

impl TreeNode {
    pub fn new<S: Into<String>>(
        index: NodeId,
        coord: Coord,
        atoms: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let depth = u32::try_from(coord.z)
            .map_err(|_| ModelError::DepthOutOfRange { index, z: coord.z })?;
        let mut unique: Vec<String> = Vec::new();
        for atom in atoms {
            let atom = atom.into();
            if !unique.contains(&atom) {
                unique.push(atom);
            }
        }
        Ok(Self {
            index,
            coord,
            atoms: unique,
            depth,
        })
    }

    /// Depth of the node in the tree, checked against `coord.z` on creation.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.atoms.iter().any(|a| a == name)
    }
}

impl TreeGraph {
    pub fn from_json(text: &str) -> Result<Self> {
        let document: TreeDocument = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: TreeDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    /// Validates a raw document and orders its nodes by index.
    ///
    /// ### Errors
    /// - [`ModelError::NodeIndexOutOfRange`] / [`ModelError::DuplicateNode`]
    ///   if the node indices are not exactly `0..nodes.len()`.
    /// - [`ModelError::DepthOutOfRange`] if a node's `z` is negative or does
    ///   not fit in a `u32`.
    /// - [`ModelError::DanglingLink`] if a link endpoint is not a node index.
    pub fn from_document(document: TreeDocument) -> Result<Self> {
        let count = document.nodes.len();
        let mut slots: Vec<Option<TreeNode>> = vec![None; count];

        for record in document.nodes {
            let index = usize::try_from(record.index)
                .ok()
                .filter(|&i| i < count)
                .ok_or(ModelError::NodeIndexOutOfRange {
                    index: record.index,
                    count,
                })?;
            if slots[index].is_some() {
                return Err(ModelError::DuplicateNode {
                    index: record.index,
                });
            }
            slots[index] = Some(TreeNode::new(index, record.coord, record.atoms)?);
        }

        // With `count` distinct in-range indices every slot is filled.
        let nodes: Vec<TreeNode> = slots.into_iter().flatten().collect();

        let links = document
            .links
            .iter()
            .enumerate()
            .map(|(link, record)| {
                Ok(Link {
                    source: resolve_endpoint(link, Endpoint::Source, record.source, count)?,
                    target: resolve_endpoint(link, Endpoint::Target, record.target, count)?,
                    index_to_source: record.index_to_source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { nodes, links })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn branch_count(&self) -> usize {
        self.links.len()
    }
}

fn resolve_endpoint(link: BranchId, endpoint: Endpoint, node: i64, count: usize) -> Result<NodeId> {
    usize::try_from(node)
        .ok()
        .filter(|&n| n < count)
        .ok_or(ModelError::DanglingLink {
            link,
            endpoint,
            node,
            count,
        })
}
