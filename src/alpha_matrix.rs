//! Exact and Monte-Carlo estimators of the joint "crossing both `i` and
//! `j`" path counts, normalized by column diagonal.

use std::io::Write;

use rand::Rng;

use crate::derived_graph::{cross_one_vertex, cross_two_vertices};
use crate::graph::{Graph, VertexId};
use crate::matrix::Matrix;
use crate::path_counting::{count_paths_of_max_length_from_initial_state, max_length_counts};
use crate::path_sampling::uniform_path;

/// `alpha_j` = number of length-`<=L` paths from the initial state that
/// cross vertex `j`; `alpha_{i,j}` = number that cross both `i` and `j`.
///
/// Built exactly: for each `j`, `m[j,j]` via [`cross_one_vertex`], and for
/// each `i > j` with `alpha_j > 0`, `m[i,j] = m[j,i]` via
/// [`cross_two_vertices`]. When `alpha_j = 0`, both triangles of column/row
/// `j` are left at zero. Emits a `*` to stdout per column, mirroring the
/// original's progress indicator (a stdout side channel, not a log record).
pub fn exact_alpha_matrix(g: &Graph, length: usize) -> Matrix<f64> {
    let count = g.vertex_count();
    let mut m = Matrix::<f64>::new(count, count);
    let stdout = std::io::stdout();

    for j in g.vertices() {
        {
            let mut lock = stdout.lock();
            let _ = write!(lock, "*");
            let _ = lock.flush();
        }

        let derived = cross_one_vertex(g, j);
        let alpha_j = count_paths_of_max_length_from_initial_state(derived.graph(), length);
        m[(j.0, j.0)] = alpha_j;

        for i in (j.0 + 1)..count {
            let i = VertexId(i);
            if alpha_j > 0.0 {
                let derived = cross_two_vertices(g, i, j);
                let alpha_ij = count_paths_of_max_length_from_initial_state(derived.graph(), length);
                m[(i.0, j.0)] = alpha_ij;
                m[(j.0, i.0)] = alpha_ij;
            } else {
                m[(i.0, j.0)] = 0.0;
                m[(j.0, i.0)] = 0.0;
            }
        }
    }

    {
        let mut lock = stdout.lock();
        let _ = writeln!(lock);
    }

    m
}

/// Monte-Carlo estimate of the alpha matrix: draws `tries` uniform
/// length-`<=L` paths from the initial state (using `max_length_counts`),
/// and for each sampled path increments `m[v,v]` for every distinct vertex
/// `v` on the path and `m[u,v]` for every ordered pair `u != v` on the path.
///
/// Duplicates within a single path are each counted — matching the
/// original — even though the "the path crosses v" reading would suggest
/// distinct-counting is more principled (spec.md §9's Monte-Carlo-counting
/// note); `distinct_approx_alpha_matrix` below is the de-duplicated
/// variant, offered as a deliberate alternative rather than a silent
/// substitution.
pub fn approx_alpha_matrix<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    tries: usize,
    rng: &mut R,
) -> Matrix<f64> {
    let count = g.vertex_count();
    let paths = max_length_counts(g, length);
    let mut m = Matrix::<f64>::new(count, count);

    for _ in 0..tries {
        let path = uniform_path(g, length, rng, &paths);
        accumulate_path(&mut m, &path);
    }

    m
}

/// De-duplicated variant of [`approx_alpha_matrix`]: each distinct vertex
/// (and each distinct ordered pair) on a sampled path is counted once,
/// regardless of how many times the path revisits it.
pub fn distinct_approx_alpha_matrix<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    tries: usize,
    rng: &mut R,
) -> Matrix<f64> {
    let count = g.vertex_count();
    let paths = max_length_counts(g, length);
    let mut m = Matrix::<f64>::new(count, count);

    for _ in 0..tries {
        let path = uniform_path(g, length, rng, &paths);
        let distinct: std::collections::BTreeSet<VertexId> = path.into_iter().collect();
        let distinct: Vec<VertexId> = distinct.into_iter().collect();
        accumulate_path(&mut m, &distinct);
    }

    m
}

fn accumulate_path(m: &mut Matrix<f64>, path: &[VertexId]) {
    for &v in path {
        m[(v.0, v.0)] += 1.0;
    }
    for &u in path {
        for &v in path {
            if u != v {
                m[(u.0, v.0)] += 1.0;
            }
        }
    }
}

/// As [`approx_alpha_matrix`], but any column whose diagonal count falls
/// below `threshold * tries as f64` is zeroed out before normalization,
/// suppressing high-variance columns.
pub fn approx_alpha_matrix_with_threshold<R: Rng + ?Sized>(
    g: &Graph,
    length: usize,
    tries: usize,
    rng: &mut R,
    threshold: f64,
) -> Matrix<f64> {
    let mut m = approx_alpha_matrix(g, length, tries, rng);
    let cutoff = threshold * tries as f64;

    for j in 0..m.cols() {
        if m[(j, j)] < cutoff {
            for i in 0..m.rows() {
                m[(i, j)] = 0.0;
            }
        }
    }

    m
}

/// Normalizes every column `j` by its diagonal `m[j,j]`: if the diagonal
/// exceeds `f64::EPSILON`, the whole column is divided by it; otherwise the
/// column becomes `e_j` (one on the diagonal, zero elsewhere), keeping it
/// stochastic-interpretable.
pub fn normalize_by_diagonal(m: &mut Matrix<f64>) {
    debug_assert_eq!(m.rows(), m.cols());
    let size = m.rows();

    for j in 0..size {
        let alpha_j = m[(j, j)];

        if alpha_j <= f64::EPSILON {
            for i in 0..size {
                m[(i, j)] = 0.0;
            }
            m[(j, j)] = 1.0;
        } else {
            for i in 0..size {
                m[(i, j)] /= alpha_j;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

    fn four_cycle() -> Graph {
        let mut g = Graph::new(4);
        for v in g.vertices().collect::<Vec<_>>() {
            g.add_final(v);
        }
        g.set_initial(VertexId(0));
        g.add_edge(VertexId(0), VertexId(1));
        g.add_edge(VertexId(1), VertexId(2));
        g.add_edge(VertexId(2), VertexId(3));
        g.add_edge(VertexId(3), VertexId(0));
        g
    }

    #[test]
    fn exact_alpha_matrix_is_symmetric() {
        let g = four_cycle();
        let m = exact_alpha_matrix(&g, 8);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], m[(j, i)]);
            }
        }
    }

    #[test]
    fn normalize_fixed_point() {
        let g = four_cycle();
        let mut m = exact_alpha_matrix(&g, 8);
        normalize_by_diagonal(&mut m);
        let once = m.clone();
        normalize_by_diagonal(&mut m);
        for i in 0..4 {
            for j in 0..4 {
                assert!((m[(i, j)] - once[(i, j)]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn normalize_diagonal_becomes_one_when_positive() {
        let g = four_cycle();
        let mut m = exact_alpha_matrix(&g, 8);
        normalize_by_diagonal(&mut m);
        for j in 0..4 {
            if m[(j, j)] != 0.0 {
                assert!((m[(j, j)] - 1.0).abs() < 1e-9);
            }
        }
    }

    /// Scenario F: a column with zero diagonal becomes `e_j`.
    #[test]
    fn scenario_f_column_degenerate_normalization() {
        let mut m = Matrix::<f64>::new(2, 2);
        m[(0, 0)] = 0.0;
        m[(1, 0)] = 0.0;
        m[(0, 1)] = 4.0;
        m[(1, 1)] = 2.0;

        normalize_by_diagonal(&mut m);

        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 0)], 0.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 1)], 1.0);
    }
}
