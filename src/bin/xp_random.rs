//! Repeatedly covers a graph with unweighted random walks and reports the
//! mean coverage metrics.

use std::fs::File;

use anyhow::Context;
use clap::Parser;
use graph_exploration::cover::cover_multiple_random;
use graph_exploration::metrics::compute_mean_metrics;
use graph_exploration::{common::LENGTH_FACTOR, Graph};
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Runs `runs` independent random-walk cover attempts and prints the
/// min/max/avg number of distinct vertices needed to cross each coverage
/// threshold.
#[derive(Parser)]
struct Args {
    /// Path to a graph description file.
    graph: String,

    /// Number of independent cover runs to average over.
    #[arg(long, default_value_t = 100)]
    runs: usize,

    /// Path-length bound; defaults to `LENGTH_FACTOR * eccentricity`.
    #[arg(long)]
    length: Option<usize>,

    /// Seed for the random number generator.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.graph).with_context(|| format!("opening {}", args.graph))?;
    let graph = Graph::import(file).with_context(|| format!("parsing {}", args.graph))?;

    let length = args.length.unwrap_or_else(|| LENGTH_FACTOR * graph.eccentricity());
    let mut rng = Pcg64::seed_from_u64(args.seed);

    let samples = cover_multiple_random(&graph, length, args.runs, &mut rng);
    let mean = compute_mean_metrics(&samples);

    println!("{mean}");
    Ok(())
}
