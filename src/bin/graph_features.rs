//! Reports the basic structural features of an imported graph: vertex and
//! edge counts, connectivity, eccentricity, and the number of bounded-length
//! paths from the initial state.

use std::fs::File;

use anyhow::{bail, Context};
use clap::Parser;
use graph_exploration::path_counting::count_paths_of_max_length_from_initial_state;
use graph_exploration::{common::LENGTH_FACTOR, Graph};

/// Prints vertex count, edge count, connectivity, and eccentricity for a
/// graph file.
#[derive(Parser)]
struct Args {
    /// Path to a graph description in the `vertex_count / initial_state /
    /// source target ...` text format.
    graph: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.graph).with_context(|| format!("opening {}", args.graph))?;
    let graph = Graph::import(file).with_context(|| format!("parsing {}", args.graph))?;

    println!("vertices: {}", graph.vertex_count());
    println!("edges: {}", graph.edge_count());
    println!("connected: {}", graph.is_connected());

    if !graph.is_connected() {
        bail!("graph is not connected, eccentricity is undefined");
    }

    let ecc = graph.eccentricity();
    println!("eccentricity: {ecc}");

    let length = LENGTH_FACTOR * ecc;
    let paths = count_paths_of_max_length_from_initial_state(&graph, length);
    println!("paths of length <= {length}: {paths}");

    Ok(())
}
