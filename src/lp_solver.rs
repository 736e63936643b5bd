//! Maximin linear program computing the optimal re-injection distribution
//! π over vertices.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use good_lp::{constraint, default_solver, Expression, Solution, SolverModel, Variable};

use crate::matrix::Matrix;

/// Wall-clock budget for a single [`compute_pi`] call, per spec.md §4.6.
pub const SOLVE_TIMEOUT: Duration = Duration::from_secs(120);

/// Solves
/// ```text
/// maximize  p_min
/// subject to  sum_j A[i,j] * pi_j >= p_min   for all i
///             sum_j pi_j = 1
///             pi_j >= 0, p_min >= 0
/// ```
/// for the column-normalized alpha matrix `coeffs` (`A[i,j]` is the
/// estimated conditional probability of crossing `i` given the source
/// vertex is `j`), and returns `pi`.
///
/// On a non-optimal result, a solver error, or a timeout past
/// [`SOLVE_TIMEOUT`], returns a zero vector — the caller (see
/// [`crate::cover`]) must detect the all-zero degenerate case and fall back
/// to a uniform distribution.
pub fn compute_pi(coeffs: &Matrix<f64>) -> Vec<f64> {
    debug_assert_eq!(coeffs.rows(), coeffs.cols());
    let n = coeffs.rows();
    let owned = coeffs.clone();

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(solve(&owned));
    });

    match rx.recv_timeout(SOLVE_TIMEOUT) {
        Ok(pi) => pi,
        Err(_) => {
            log::warn!("LP solve exceeded {:?}, returning degenerate pi", SOLVE_TIMEOUT);
            vec![0.0; n]
        }
    }
}

fn solve(coeffs: &Matrix<f64>) -> Vec<f64> {
    let n = coeffs.rows();

    let mut vars = good_lp::ProblemVariables::new();
    let pi: Vec<Variable> = (0..n).map(|_| vars.add(good_lp::variable().min(0.0))).collect();
    let p_min = vars.add(good_lp::variable().min(0.0));

    let mut model = vars.maximise(p_min).using(default_solver);

    for i in 0..n {
        let row: Expression = (0..n).map(|j| coeffs[(i, j)] * pi[j]).sum();
        model = model.with(constraint!(row >= p_min));
    }

    let total: Expression = pi.iter().map(|&v| Expression::from(v)).sum();
    model = model.with(constraint!(total == 1.0));

    match model.solve() {
        Ok(solution) => pi.iter().map(|&v| solution.value(v)).collect(),
        Err(e) => {
            log::warn!("LP solve failed: {e}");
            vec![0.0; n]
        }
    }
}
