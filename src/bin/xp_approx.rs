//! Estimates the α-matrix by Monte-Carlo sampling, derives a maximin
//! re-injection distribution, and reports cover-loop coverage metrics.

use std::fs::File;

use anyhow::Context;
use clap::Parser;
use graph_exploration::alpha_matrix::{approx_alpha_matrix, normalize_by_diagonal};
use graph_exploration::common::LENGTH_FACTOR;
use graph_exploration::cover::{cover_multiple, pi_to_vertex_distribution};
use graph_exploration::lp_solver::compute_pi;
use graph_exploration::metrics::compute_mean_metrics;
use graph_exploration::Graph;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Estimates α by `tries` uniform path draws, solves the maximin LP for π,
/// then runs `runs` cover attempts biased by π and prints the mean
/// coverage metrics.
#[derive(Parser)]
struct Args {
    /// Path to a graph description file.
    graph: String,

    /// Number of independent cover runs to average over.
    #[arg(long, default_value_t = 100)]
    runs: usize,

    /// Number of Monte-Carlo path draws used to estimate the α-matrix.
    #[arg(long, default_value_t = 10_000)]
    tries: usize,

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

    let mut alpha = approx_alpha_matrix(&graph, length, args.tries, &mut rng);
    normalize_by_diagonal(&mut alpha);

    let pi = compute_pi(&alpha);
    log::info!("pi = {pi:?}");
    let weights = pi_to_vertex_distribution(&pi);

    let samples = cover_multiple(&graph, length, &weights, args.runs, &mut rng);
    let mean = compute_mean_metrics(&samples);

    println!("{mean}");
    Ok(())
}
