use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use model_core::{
    Config, SketchConfig, TreeGraph, build_model,
    serialize::{OutputPaths, write_documents},
    sketch::RandomTree,
};

/// Builds simplicial-complex models of labelled trees.
#[derive(Parser, Debug)]
#[command(name = "tree-model")]
#[command(version)]
#[command(about = "Converts tree documents into simplicial models", long_about = None)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a tree document into the model and atoms documents
    Convert(ConvertArgs),
    /// Print a random tree sketch
    Sketch(SketchArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Tree document with `nodes` and `links`
    pub input: PathBuf,

    /// Where to write the model document
    #[arg(long, default_value = "treeModel.json")]
    pub model_out: PathBuf,

    /// Where to write the atoms document
    #[arg(long, default_value = "treeAtoms.json")]
    pub atoms_out: PathBuf,

    /// Distance multiplier between tree levels
    #[arg(long, default_value_t = Config::default().translate_distance)]
    pub distance: f64,
}

#[derive(Args, Debug)]
pub struct SketchArgs {
    /// Maximum number of levels in the tree
    pub levels: usize,

    /// Maximum number of children per node
    pub max_children: usize,

    /// Minimum number of children of a non-leaf node
    #[arg(long, default_value_t = SketchConfig::default().min_children)]
    pub min_children: usize,

    /// Seed for a reproducible sketch
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn convert(args: &ConvertArgs) -> Result<()> {
    info!(input = %args.input.display(), "loading tree");
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open tree document: {}", args.input.display()))?;
    let graph = TreeGraph::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid tree document: {}", args.input.display()))?;

    let cfg = Config {
        translate_distance: args.distance,
    };
    let model = build_model(&graph, &cfg).context("Failed to build the model")?;

    let paths = OutputPaths {
        model: args.model_out.clone(),
        atoms: args.atoms_out.clone(),
    };
    write_documents(&model, &paths).context("Failed to write the output documents")?;
    Ok(())
}

pub fn sketch(args: &SketchArgs) -> Result<()> {
    let cfg = SketchConfig {
        max_levels: args.levels,
        min_children: args.min_children,
        max_children: args.max_children,
        ..SketchConfig::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let tree = RandomTree::generate(&cfg, &mut rng).context("Failed to generate a sketch")?;
    info!(nodes = tree.node_count(), depth = tree.depth(), "generated tree");
    println!("{tree}");
    Ok(())
}
