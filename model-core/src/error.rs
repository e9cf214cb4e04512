use std::path::PathBuf;

use crate::types::{BranchId, NodeId};

/// Which end of a link a node reference belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Everything that can stop a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("malformed tree document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node index {index} appears more than once")]
    DuplicateNode { index: i64 },

    #[error("node index {index} is outside 0..{count}")]
    NodeIndexOutOfRange { index: i64, count: usize },

    #[error("node {index} has depth z = {z}, expected 0..={max}", max = u32::MAX)]
    DepthOutOfRange { index: NodeId, z: i64 },

    #[error("link {link} has {endpoint} {node} which is not a node index (0..{count})")]
    DanglingLink {
        link: BranchId,
        endpoint: Endpoint,
        node: i64,
        count: usize,
    },

    #[error("link {link} has index_to_source {index_to_source} with no orientation class")]
    UnknownOrientation { link: BranchId, index_to_source: i64 },

    #[error(
        "model holds {points} points and {simplices} simplices, \
         its layout expects {expected_points} and {expected_simplices}"
    )]
    IncompleteModel {
        points: usize,
        simplices: usize,
        expected_points: usize,
        expected_simplices: usize,
    },

    #[error("invalid sketch parameters: {0}")]
    InvalidSketch(String),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
