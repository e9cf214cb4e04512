//! Command-line entry point for the tree model builder.
//!
//! `convert` turns a tree document into the model and atoms documents;
//! `sketch` prints a random tree topology.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Convert(args) => cli::convert(&args),
        Command::Sketch(args) => cli::sketch(&args),
    }
}
