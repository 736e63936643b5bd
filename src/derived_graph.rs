//! Layered copies of a base [`Graph`], engineered so that a length-bounded
//! path in the derived graph corresponds to a path in the base graph that
//! is forced to cross one or two designated vertices.

use std::collections::BTreeSet;

use crate::graph::{EdgeId, Graph, VertexId};

/// A [`Graph`] in which every vertex and edge carries a tag referencing the
/// vertex/edge of the base graph it was lifted from.
///
/// When built by [`cross_one_vertex`] or [`cross_two_vertices`], the first
/// `|V|` derived vertices mirror the base vertex ids exactly, so the
/// derived initial state equals the base initial state by id equality.
pub struct DerivedGraph {
    graph: Graph,
    vertex_origin: Vec<VertexId>,
    edge_origin: Vec<EdgeId>,
}

impl DerivedGraph {
    fn new(size: usize) -> Self {
        Self {
            graph: Graph::new(size),
            vertex_origin: Vec::with_capacity(size),
            edge_origin: Vec::new(),
        }
    }

    fn add_vertex(&mut self, origin: VertexId) -> VertexId {
        let id = self.graph.add_vertex();
        self.vertex_origin.push(origin);
        id
    }

    fn add_edge(&mut self, source: VertexId, target: VertexId, origin: EdgeId) -> EdgeId {
        let id = self.graph.add_edge(source, target);
        self.edge_origin.push(origin);
        id
    }

    /// The underlying derived graph, usable anywhere a plain [`Graph`] is
    /// expected (path counting, path sampling, ...).
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The base-graph vertex that derived vertex `v` was lifted from.
    pub fn origin_vertex(&self, v: VertexId) -> VertexId {
        self.vertex_origin[v.0]
    }

    /// The base-graph edge that derived edge `e` was lifted from.
    pub fn origin_edge(&self, e: EdgeId) -> EdgeId {
        self.edge_origin[e.0]
    }

    /// Maps a derived-graph path to the set of distinct base-graph vertices
    /// it visits.
    pub fn origin_vertices_of(&self, path: &[VertexId]) -> BTreeSet<VertexId> {
        path.iter().map(|&v| self.origin_vertex(v)).collect()
    }
}

/// Builds the "crossing-one" derived graph for vertex `x`: two layers
/// (0 = "not yet crossed `x`", 1 = "crossed `x`"), each a full copy of
/// `origin`, `2n` vertices total. Vertex `v` in layer `l` has derived id
/// `v + l*n`.
///
/// Every base edge `(u -> w)` with `u != x` is lifted into both layers
/// unchanged; an edge with source `x` only exists in layer 0 as a *cross*
/// into layer 1 (`x -> w'`), plus its layer-1 copy (`x' -> w'`).
///
/// The initial state is the base initial state in layer 0. Final states are
/// every base-final vertex in layer 1, plus `x` itself in layer 0 if `x` is
/// final (so a path ending exactly at `x`, without ever leaving it, still
/// counts as having crossed it).
pub fn cross_one_vertex(origin: &Graph, x: VertexId) -> DerivedGraph {
    let n = origin.vertex_count();
    let prime = |v: VertexId| VertexId(v.0 + n);

    let mut derived = DerivedGraph::new(2 * n);

    for v in origin.vertices() {
        derived.add_vertex(v);
    }
    for v in origin.vertices() {
        derived.add_vertex(v);
    }

    for e in origin.edges() {
        let source = origin.source(e);
        let target = origin.target(e);

        if source != x {
            derived.add_edge(source, target, e);
        } else {
            derived.add_edge(source, prime(target), e);
        }

        derived.add_edge(prime(source), prime(target), e);
    }

    if let Some(initial) = origin.initial_state() {
        derived.graph.set_initial(initial);
    }

    for v in origin.final_states() {
        derived.graph.add_final(prime(v));

        if v == x {
            derived.graph.add_final(v);
        }
    }

    derived
}

/// Builds the "crossing-two" derived graph for distinct vertices `x`, `y`:
/// four layers (none / x-only / y-only / both), `4n` vertices total.
///
/// Edge lifting follows the same "source equals a distinguished vertex ->
/// jump to the layer that records having crossed it" rule as
/// [`cross_one_vertex`]; every base edge is additionally lifted verbatim
/// into the "both" layer regardless of its source, which is what makes that
/// layer the terminal one. The count of length-`<=L` paths from the
/// initial state to any final state in this derived graph equals the
/// number of such paths in `origin` that visit both `x` and `y` (as sources
/// of at least one edge each).
pub fn cross_two_vertices(origin: &Graph, x: VertexId, y: VertexId) -> DerivedGraph {
    debug_assert_ne!(x, y, "cross_two_vertices requires distinct vertices");

    let n = origin.vertex_count();
    let prime = |v: VertexId| VertexId(v.0 + n);
    let double_prime = |v: VertexId| VertexId(v.0 + 2 * n);
    let triple_prime = |v: VertexId| VertexId(v.0 + 3 * n);

    let mut derived = DerivedGraph::new(4 * n);

    for v in origin.vertices() {
        derived.add_vertex(v);
    }
    for v in origin.vertices() {
        derived.add_vertex(v);
    }
    for v in origin.vertices() {
        derived.add_vertex(v);
    }
    for v in origin.vertices() {
        derived.add_vertex(v);
    }

    for e in origin.edges() {
        let source = origin.source(e);
        let target = origin.target(e);

        if source != x && source != y {
            derived.add_edge(source, target, e);
            derived.add_edge(prime(source), prime(target), e);
            derived.add_edge(double_prime(source), double_prime(target), e);
        } else if source == x {
            derived.add_edge(source, prime(target), e);
            derived.add_edge(prime(source), prime(target), e);
            derived.add_edge(double_prime(source), triple_prime(target), e);
        } else {
            debug_assert_eq!(source, y);
            derived.add_edge(source, double_prime(target), e);
            derived.add_edge(prime(source), triple_prime(target), e);
            derived.add_edge(double_prime(source), double_prime(target), e);
        }

        derived.add_edge(triple_prime(source), triple_prime(target), e);
    }

    if let Some(initial) = origin.initial_state() {
        derived.graph.set_initial(initial);
    }

    for v in origin.final_states() {
        derived.graph.add_final(triple_prime(v));

        if v == x {
            derived.graph.add_final(double_prime(v));
        }
        if v == y {
            derived.graph.add_final(prime(v));
        }
    }

    derived
}
