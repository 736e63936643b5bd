//! Repeated random-walk attempts to cover every vertex of a graph, with two
//! strategies for picking each attempt's path and a shared progress-tick
//! stdout side channel.

use std::collections::BTreeSet;
use std::io::Write;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::common::COVER_TRIES;
use crate::derived_graph::cross_one_vertex;
use crate::graph::{Graph, VertexId};
use crate::metrics::{Crossing, Metrics, ThresholdTracker};
use crate::path_counting::max_length_counts;
use crate::path_sampling::{random_path, uniform_path};

fn print_tick(c: &Crossing) {
    let ch = match c {
        Crossing::Fifty => '5',
        Crossing::Ninety => '9',
        Crossing::NinetyFive => '=',
        Crossing::NinetyNine => '-',
        Crossing::Hundred => '+',
    };
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = write!(lock, "{ch}");
    let _ = lock.flush();
}

fn print_attempt_dot() {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = write!(lock, ".");
    let _ = lock.flush();
}

/// Draws one cover attempt: samples a target vertex `x` from `weights`,
/// builds the graph forced to cross `x` ([`cross_one_vertex`]), and walks a
/// uniform length-`<=L` path in that derived graph. Every base vertex on the
/// mapped-back path is folded into `covered` before `iteration` (the
/// 1-based attempt count so far) is recorded against any newly-crossed
/// threshold; those crossings print a tick to stdout.
fn attempt_targeted<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    weights: &WeightedIndex<f64>,
    rng: &mut R,
    iteration: usize,
    covered: &mut BTreeSet<VertexId>,
    tracker: &mut ThresholdTracker,
) {
    let x = VertexId(weights.sample(rng));
    let derived = cross_one_vertex(g, x);
    let derived_paths = max_length_counts(derived.graph(), length);
    let path = uniform_path(derived.graph(), length, rng, &derived_paths);

    for v in derived.origin_vertices_of(&path) {
        covered.insert(v);
    }

    for crossing in tracker.record(iteration, covered.len()) {
        print_tick(&crossing);
    }

    print_attempt_dot();
}

/// As [`attempt_targeted`], but walks an unweighted random path from the
/// initial state instead of targeting a sampled vertex.
fn attempt_random<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    rng: &mut R,
    iteration: usize,
    covered: &mut BTreeSet<VertexId>,
    tracker: &mut ThresholdTracker,
) {
    let path = random_path(g, length, rng);

    for v in path {
        covered.insert(v);
    }

    for crossing in tracker.record(iteration, covered.len()) {
        print_tick(&crossing);
    }

    print_attempt_dot();
}

/// Runs up to [`COVER_TRIES`] targeted attempts (or until every vertex is
/// covered), sampling each attempt's forced vertex from `weights`. Each
/// [`Metrics`] field records the 1-based attempt count at which that
/// coverage threshold was first crossed.
pub fn cover_once<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    weights: &WeightedIndex<f64>,
    rng: &mut R,
) -> Metrics {
    let n = g.vertex_count();
    let mut covered = BTreeSet::new();
    let mut tracker = ThresholdTracker::new(n);

    for iteration in 1..=COVER_TRIES {
        attempt_targeted(g, length, weights, rng, iteration, &mut covered, &mut tracker);
        if covered.len() == n {
            break;
        }
    }

    tracker.into_metrics()
}

/// Runs [`cover_once`] `runs` times, returning one [`Metrics`] per run.
/// Emits a trailing newline to stdout after the batch, closing out the
/// progress-tick side channel.
pub fn cover_multiple<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    weights: &WeightedIndex<f64>,
    runs: usize,
    rng: &mut R,
) -> Vec<Metrics> {
    let samples: Vec<Metrics> = (0..runs).map(|_| cover_once(g, length, weights, rng)).collect();
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = writeln!(lock);
    samples
}

/// As [`cover_once`], but each attempt walks an unweighted random path from
/// the initial state ([`random_path`]) instead of targeting a sampled
/// vertex via a derived graph.
pub fn cover_once_random<R: Rng + ?Sized>(g: &Graph, length: usize, rng: &mut R) -> Metrics {
    let n = g.vertex_count();
    let mut covered = BTreeSet::new();
    let mut tracker = ThresholdTracker::new(n);

    for iteration in 1..=COVER_TRIES {
        attempt_random(g, length, rng, iteration, &mut covered, &mut tracker);
        if covered.len() == n {
            break;
        }
    }

    tracker.into_metrics()
}

/// As [`cover_multiple`], built on [`cover_once_random`].
pub fn cover_multiple_random<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    runs: usize,
    rng: &mut R,
) -> Vec<Metrics> {
    let samples: Vec<Metrics> = (0..runs).map(|_| cover_once_random(g, length, rng)).collect();
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = writeln!(lock);
    samples
}

/// Builds a [`WeightedIndex`] over vertices from a re-injection vector
/// `pi`. Falls back to uniform weights when `pi` sums to (near) zero — the
/// degenerate result [`crate::lp_solver::compute_pi`] returns on failure or
/// timeout.
pub fn pi_to_vertex_distribution(pi: &[f64]) -> WeightedIndex<f64> {
    let sum: f64 = pi.iter().sum();
    if sum <= f64::EPSILON {
        WeightedIndex::new(vec![1.0; pi.len()]).expect("non-empty uniform fallback")
    } else {
        WeightedIndex::new(pi).unwrap_or_else(|_| {
            WeightedIndex::new(vec![1.0; pi.len()]).expect("non-empty uniform fallback")
        })
    }
}
