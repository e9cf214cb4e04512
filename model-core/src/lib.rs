//! Conversion of labelled trees into simplicial complexes for a spatial
//! model checker.
//!
//! Main components:
//! - [`template`]: the square-based pyramid every node is built from.
//! - [`placer`]: depth-scaled placement of node pyramids.
//! - [`branch`]: connector simplices between a node and its child.
//! - [`atoms`]: atom labelling of every simplex.
//! - [`builder`]: accumulation of points and simplices into a model.
//! - [`phases`]: the conversion pipeline.
//! - [`serialize`]: the model and atoms documents.
//! - [`graph`]: the input tree document and its validation.
//! - [`sketch`]: random tree topologies as ASCII sketches.
//! - [`config`], [`error`], [`types`]: shared configuration, errors and ids.

pub mod atoms;
pub mod branch;
pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod phases;
pub mod placer;
pub mod serialize;
pub mod sketch;
pub mod template;
pub mod types;

pub use builder::SimplicialModel;
pub use config::{Config, SketchConfig};
pub use error::{ModelError, Result};
pub use graph::TreeGraph;
pub use phases::build_model;
