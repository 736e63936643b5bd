//! Compares two baselines side by side: unweighted random-walk covering
//! against vertex-targeted covering under a uniform (unbiased) vertex
//! distribution, with no α-matrix estimation involved.

use std::fs::File;

use anyhow::Context;
use clap::Parser;
use graph_exploration::common::LENGTH_FACTOR;
use graph_exploration::cover::{cover_multiple, cover_multiple_random, pi_to_vertex_distribution};
use graph_exploration::metrics::compute_mean_metrics;
use graph_exploration::Graph;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Runs `runs` random-walk cover attempts and `runs` uniformly-targeted
/// cover attempts, printing both mean coverage metrics for comparison.
#[derive(Parser)]
struct Args {
    /// Path to a graph description file.
    graph: String,

    /// Number of independent cover runs to average over, per strategy.
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

    let random_samples = cover_multiple_random(&graph, length, args.runs, &mut rng);
    let random_mean = compute_mean_metrics(&random_samples);
    println!("random walk:");
    println!("{random_mean}");

    let uniform = vec![1.0; graph.vertex_count()];
    let weights = pi_to_vertex_distribution(&uniform);
    let uniform_samples = cover_multiple(&graph, length, &weights, args.runs, &mut rng);
    let uniform_mean = compute_mean_metrics(&uniform_samples);
    println!("uniform target:");
    println!("{uniform_mean}");

    Ok(())
}
