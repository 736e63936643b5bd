//! Weighted sampling of uniform and unweighted random paths from the
//! initial state.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::graph::{Graph, VertexId};
use crate::matrix::Matrix;

/// Draws a uniformly random path of length `<= length` from the initial
/// state, under the distribution induced by `max_length_counts` (`M`).
///
/// At each step with `k` steps remaining, every out-edge's target `w` is a
/// candidate weighted by `M[w, k-1]`; zero-weight candidates are dropped.
/// If no candidates remain the walk stops early (the current vertex must
/// then be a final state — see the "early termination" open question in
/// spec.md §9, exercised in the tests below). If the surviving weights sum
/// to at most `f64::EPSILON`, every weight is replaced by `1.0` (uniform
/// fallback) rather than feeding a degenerate distribution to the sampler.
///
/// # Panics
/// Panics if the graph has no initial state, or if `paths` doesn't have
/// shape `(vertex_count, length + 1)`.
pub fn uniform_path<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    rng: &mut R,
    paths: &Matrix<f64>,
) -> Vec<VertexId> {
    assert_eq!(paths.rows(), g.vertex_count());
    assert_eq!(paths.cols(), length + 1);

    let mut path = Vec::with_capacity(length + 1);
    let mut current = g
        .initial_state()
        .expect("uniform_path requires an initial state");
    path.push(current);

    for k in (1..=length).rev() {
        let mut candidates = Vec::new();
        let mut weights = Vec::new();

        for &e in g.out_edges(current) {
            let next = g.target(e);
            let weight = paths[(next.0, k - 1)];
            if weight > 0.0 {
                candidates.push(next);
                weights.push(weight);
            }
        }

        if candidates.is_empty() {
            break;
        }

        let sum: f64 = weights.iter().sum();
        if sum <= f64::EPSILON {
            weights.iter_mut().for_each(|w| *w = 1.0);
        }

        let dist = WeightedIndex::new(&weights).expect("at least one positive weight");
        current = candidates[dist.sample(rng)];
        path.push(current);
    }

    debug_assert!(g.is_final(current));
    path
}

/// Draws a random path of length `<= length` from the initial state,
/// choosing uniformly among out-edges at every step and ignoring any count
/// matrix. Stops early if the current vertex has no out-edges.
///
/// # Panics
/// Panics if the graph has no initial state.
pub fn random_path<R: Rng + ?Sized>(g: &Graph, length: usize, rng: &mut R) -> Vec<VertexId> {
    let mut path = Vec::with_capacity(length + 1);
    let mut current = g
        .initial_state()
        .expect("random_path requires an initial state");
    path.push(current);

    for _ in 0..length {
        let out_edges = g.out_edges(current);
        if out_edges.is_empty() {
            break;
        }

        let index = rng.gen_range(0..out_edges.len());
        current = g.target(out_edges[index]);
        path.push(current);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_counting::max_length_counts;
    use rand_pcg::Pcg64;
    use rand::SeedableRng;

    fn line_graph() -> Graph {
        let mut g = Graph::new(4);
        for v in g.vertices().collect::<Vec<_>>() {
            g.add_final(v);
        }
        g.set_initial(VertexId(0));
        g.add_edge(VertexId(0), VertexId(1));
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(3));
        g
    }

    #[test]
    fn uniform_path_ends_at_final_state_and_respects_length_bound() {
        let g = line_graph();
        let length = 6;
        let paths = max_length_counts(&g, length);
        let mut rng = Pcg64::seed_from_u64(1234);

        for _ in 0..20 {
            let path = uniform_path(&g, length, &mut rng, &paths);
            assert!(path.len() <= length + 1);
            assert!(g.is_final(*path.last().unwrap()));
        }
    }

    #[test]
    fn uniform_path_terminates_early_on_acyclic_graph() {
        // The line graph has only 3 edges; any length bound > 3 forces
        // early termination once vertex 3 (final, no out-edges) is hit.
        let g = line_graph();
        let length = 6;
        let paths = max_length_counts(&g, length);
        let mut rng = Pcg64::seed_from_u64(7);

        let path = uniform_path(&g, length, &mut rng, &paths);
        assert!(path.len() < length + 1);
        assert_eq!(*path.last().unwrap(), VertexId(3));
    }

    #[test]
    fn random_path_ends_wherever_out_edges_run_out() {
        let g = line_graph();
        let mut rng = Pcg64::seed_from_u64(99);
        let path = random_path(&g, 10, &mut rng);
        assert_eq!(path, vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]);
    }

    #[test]
    fn single_vertex_length_zero_is_singleton_path() {
        let mut g = Graph::new(1);
        g.add_final(VertexId(0));
        g.set_initial(VertexId(0));
        let paths = max_length_counts(&g, 0);
        let mut rng = Pcg64::seed_from_u64(1);
        let path = uniform_path(&g, 0, &mut rng, &paths);
        assert_eq!(path, vec![VertexId(0)]);
    }
}
