//! Dynamic-programming tables of length-bounded path counts.

use crate::graph::Graph;
use crate::matrix::Matrix;

/// `P[v, k]`: number of walks of length exactly `k` from `v` ending in a
/// final state.
///
/// Base case `P[v, 0] = 1` iff `v` is final, else `0`. Recurrence
/// `P[v, k] = sum over out-edges (v -> w) of P[w, k-1]`; parallel edges
/// contribute once per occurrence. Shape is `(vertex_count, length + 1)`.
pub fn exact_length_counts(g: &Graph, length: usize) -> Matrix<f64> {
    let count = g.vertex_count();
    let mut paths = Matrix::<f64>::new(count, length + 1);

    for v in g.final_states() {
        paths[(v.0, 0)] = 1.0;
    }

    for k in 1..=length {
        for v in g.vertices() {
            let mut path_count = 0.0;
            for &e in g.out_edges(v) {
                path_count += paths[(g.target(e).0, k - 1)];
            }
            paths[(v.0, k)] = path_count;
        }
    }

    paths
}

/// Row-wise prefix sum of [`exact_length_counts`] along the length axis:
/// column `k` holds the count of paths of length `<= k`.
pub fn max_length_counts(g: &Graph, length: usize) -> Matrix<f64> {
    let mut paths = exact_length_counts(g, length);

    for col in 1..paths.cols() {
        for row in 0..paths.rows() {
            let previous = paths[(row, col - 1)];
            paths[(row, col)] += previous;
        }
    }

    paths
}

/// Number of paths of length `<= length` from the initial state to any
/// final state.
///
/// # Panics
/// Panics if the graph has no initial state set.
pub fn count_paths_of_max_length_from_initial_state(g: &Graph, length: usize) -> f64 {
    let paths = exact_length_counts(g, length);
    let initial = g
        .initial_state()
        .expect("count_paths_of_max_length_from_initial_state requires an initial state");

    (0..paths.cols()).map(|col| paths[(initial.0, col)]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

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

    fn triangle_cycle() -> Graph {
        let mut g = Graph::new(3);
        for v in g.vertices().collect::<Vec<_>>() {
            g.add_final(v);
        }
        g.set_initial(VertexId(0));
        g.add_edge(VertexId(0), VertexId(1));
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(0));
        g
    }

    #[test]
    fn scenario_a_line_graph_length_6() {
        let g = line_graph();
        let exact = exact_length_counts(&g, 6);
        // acyclic: no length-6 walk from any vertex ends final
        assert_eq!(exact[(0, 6)], 0.0);
        assert_eq!(count_paths_of_max_length_from_initial_state(&g, 6), 4.0);
    }

    #[test]
    fn scenario_b_triangle_cycle_length_4() {
        let g = triangle_cycle();
        let exact = exact_length_counts(&g, 4);
        for k in [0usize, 3] {
            if k <= 4 {
                assert_eq!(exact[(0, k)], 1.0);
            }
        }
        assert_eq!(count_paths_of_max_length_from_initial_state(&g, 4), 5.0);
    }

    #[test]
    fn single_vertex_no_edges_is_always_one() {
        let mut g = Graph::new(1);
        g.add_final(VertexId(0));
        g.set_initial(VertexId(0));
        let exact = exact_length_counts(&g, 5);
        for k in 0..=5 {
            assert_eq!(exact[(0, k)], 1.0);
        }
    }

    #[test]
    fn self_loop_grows_linearly() {
        let mut g = Graph::new(1);
        g.add_final(VertexId(0));
        g.set_initial(VertexId(0));
        g.add_edge(VertexId(0), VertexId(0));
        let max = max_length_counts(&g, 4);
        // at length k, there's exactly 1 walk of each length 0..=k back to
        // the single final vertex, so the cumulative count is k + 1
        for k in 0..=4 {
            assert_eq!(max[(0, k)], (k + 1) as f64);
        }
    }

    #[test]
    fn length_zero_only_final_vertices_have_count() {
        let mut g = Graph::new(2);
        g.add_final(VertexId(0));
        g.set_initial(VertexId(0));
        g.add_edge(VertexId(0), VertexId(1));
        let exact = exact_length_counts(&g, 0);
        assert_eq!(exact[(0, 0)], 1.0);
        assert_eq!(exact[(1, 0)], 0.0);
    }

    #[test]
    fn max_length_is_prefix_sum_of_exact() {
        let g = triangle_cycle();
        let exact = exact_length_counts(&g, 4);
        let max = max_length_counts(&g, 4);
        for row in 0..exact.rows() {
            let mut running = 0.0;
            for col in 0..exact.cols() {
                running += exact[(row, col)];
                assert_eq!(max[(row, col)], running);
            }
        }
    }
}
