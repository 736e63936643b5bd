//! Path-sampling and coverage toolkit for bounded-length directed graphs.
//!
//! A [`graph::Graph`] is a directed graph with a distinguished initial
//! state and a set of final states. Over such a graph this crate computes,
//! samples, and aggregates three related things:
//!
//! * [`path_counting`] — exact dynamic-programming tables of how many
//!   length-bounded paths exist from any vertex to any final state.
//! * [`path_sampling`] — drawing a single path uniformly at random under
//!   that count distribution, or an unweighted random walk.
//! * [`alpha_matrix`] — how often paths cross each vertex, and each pair of
//!   vertices, estimated either exactly (via [`derived_graph`]) or by
//!   Monte-Carlo sampling.
//!
//! [`lp_solver`] turns a normalized alpha matrix into a maximin
//! re-injection distribution over vertices, and [`cover`] uses that
//! distribution (or plain random walks) to repeatedly sample paths until
//! every vertex of the graph has been visited, reporting how many attempts
//! that took via [`metrics`].
//!
//! # Example
//! ```
//! use graph_exploration::graph::{Graph, VertexId};
//! use graph_exploration::path_counting::count_paths_of_max_length_from_initial_state;
//!
//! let mut g = Graph::new(3);
//! g.set_initial(VertexId(0));
//! g.add_final(VertexId(2));
//! g.add_edge(VertexId(0), VertexId(1));
//! g.add_edge(VertexId(1), VertexId(2));
//!
//! assert_eq!(count_paths_of_max_length_from_initial_state(&g, 2), 1.0);
//! ```
#![warn(missing_docs)]

pub mod alpha_matrix;
pub mod common;
pub mod cover;
pub mod derived_graph;
pub mod graph;
pub mod lp_solver;
pub mod matrix;
pub mod metrics;
pub mod path_counting;
pub mod path_sampling;

pub use derived_graph::DerivedGraph;
pub use graph::{EdgeId, Graph, GraphErrors, ImportError, VertexId};
pub use lp_solver::compute_pi;
pub use matrix::Matrix;
pub use metrics::{compute_mean_metrics, MeanMetrics, Metrics, MinMaxAvg};

pub use rand;
