//! Directed, finite multidigraph with a single initial state and a set of
//! final states.
//!
//! Vertex and edge identities are opaque, dense, zero-based integers,
//! wrapped in [`VertexId`]/[`EdgeId`] so the two id spaces can never be
//! confused with each other or with a plain `usize` (the "descriptors as
//! newtypes" discipline).

use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;

use crate::matrix::Matrix;

/// Opaque vertex identity, dense and zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Opaque edge identity, dense and zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Errors raised by graph-mutation operations.
#[derive(Debug)]
pub enum GraphErrors {
    /// An operation referenced a [`VertexId`] outside `0..vertex_count()`.
    VertexOutOfRange,
    /// An operation referenced an [`EdgeId`] outside `0..edge_count()`.
    EdgeOutOfRange,
}

impl GraphErrors {
    pub fn to_str(&self) -> &'static str {
        match self {
            GraphErrors::VertexOutOfRange => "VertexOutOfRange",
            GraphErrors::EdgeOutOfRange => "EdgeOutOfRange",
        }
    }
}

impl fmt::Display for GraphErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl std::error::Error for GraphErrors {}

/// Failure of [`Graph::import`]: a malformed text description.
///
/// Import aborts on the first bad token; since `import` only ever returns a
/// [`Graph`] on `Ok`, there is no way for a caller to observe the partially
/// built graph (stronger than the original's "partially populated graph on
/// abort", which left a half-built object sitting around).
#[derive(Debug)]
pub enum ImportError {
    /// The input ended before the declared vertex count, initial state, or
    /// a complete edge pair could be read.
    UnexpectedEnd { expected: &'static str },
    /// A token that should have been an integer wasn't.
    NotAnInteger { expected: &'static str, found: String },
    /// The underlying reader failed.
    Io(std::io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImportError::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            ImportError::NotAnInteger { expected, found } => {
                write!(f, "expected {expected}, found {found:?}")
            }
            ImportError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e)
    }
}

/// # Directed multidigraph
/// * vertex ids are dense and contiguous starting at 0, edge ids likewise
/// * out-edges are stored per-vertex in insertion order (a flat `Vec`
///   reproduces multiset semantics: duplicates preserve multiplicity, and
///   no test may depend on a particular iteration order beyond that)
/// * exactly one initial state (or none, before it is set)
/// * immutable after [`Graph::import`]; the mutation methods below exist so
///   that callers (including `import` itself) can build one up
pub struct Graph {
    sources: Vec<VertexId>,
    targets: Vec<VertexId>,
    out_edges: Vec<Vec<EdgeId>>,
    initial: Option<VertexId>,
    finals: BTreeSet<VertexId>,
}

impl Graph {
    /// Creates an empty graph with `size` vertices and no edges.
    pub fn new(size: usize) -> Self {
        Self {
            sources: Vec::new(),
            targets: Vec::new(),
            out_edges: vec![Vec::new(); size],
            initial: None,
            finals: BTreeSet::new(),
        }
    }

    /// Adds a new vertex, returning its id.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId(self.out_edges.len());
        self.out_edges.push(Vec::new());
        id
    }

    /// Adds a directed edge `source -> target`, returning its id. Parallel
    /// edges and self-loops are both permitted.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> EdgeId {
        let id = EdgeId(self.sources.len());
        self.sources.push(source);
        self.targets.push(target);
        self.out_edges[source.0].push(id);
        id
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    /// Iterates over `VertexId(0)..VertexId(vertex_count())`.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_count()).map(VertexId)
    }

    /// Iterates over `EdgeId(0)..EdgeId(edge_count())`.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edge_count()).map(EdgeId)
    }

    pub fn source(&self, e: EdgeId) -> VertexId {
        self.sources[e.0]
    }

    pub fn target(&self, e: EdgeId) -> VertexId {
        self.targets[e.0]
    }

    /// Out-edges of `v`, in insertion order; parallel edges appear once per
    /// occurrence.
    pub fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.out_edges[v.0]
    }

    pub fn set_initial(&mut self, v: VertexId) {
        self.initial = Some(v);
    }

    /// The designated initial state, or `None` if never set.
    pub fn initial_state(&self) -> Option<VertexId> {
        self.initial
    }

    pub fn is_initial(&self, v: VertexId) -> bool {
        self.initial == Some(v)
    }

    pub fn add_final(&mut self, v: VertexId) {
        self.finals.insert(v);
    }

    pub fn is_final(&self, v: VertexId) -> bool {
        self.finals.contains(&v)
    }

    /// Final states, in ascending id order.
    pub fn final_states(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.finals.iter().copied()
    }

    /// Breadth-first reachability from the initial state (or from vertex 0
    /// if none is set). Only forward edges are followed. An empty graph is
    /// trivially connected.
    pub fn is_connected(&self) -> bool {
        let count = self.vertex_count();
        if count == 0 {
            return true;
        }

        let start = self.initial.unwrap_or(VertexId(0));
        let mut visited = vec![false; count];
        let mut todo = std::collections::VecDeque::new();
        visited[start.0] = true;
        todo.push_back(start);

        while let Some(current) = todo.pop_front() {
            for &e in self.out_edges(current) {
                let next = self.target(e);
                if !visited[next.0] {
                    visited[next.0] = true;
                    todo.push_back(next);
                }
            }
        }

        visited.into_iter().all(|v| v)
    }

    /// Maximum shortest-path distance from the initial state to any vertex,
    /// computed by Bellman–Ford-style relaxation (unit edge weights,
    /// terminating early once a round makes no update).
    ///
    /// Unreachable vertices are left at `vertex_count() + 1`; this tolerates
    /// disconnected graphs by baking in a sentinel distance rather than
    /// failing, but the caller (`graph_features`) is expected to only call
    /// this on graphs it already knows are connected.
    pub fn eccentricity(&self) -> usize {
        let count = self.vertex_count();
        if count == 0 {
            return 0;
        }

        let sentinel = count + 1;
        let mut distance = vec![sentinel; count];
        let start = self.initial.unwrap_or(VertexId(0));
        distance[start.0] = 0;

        for _ in 0..count {
            let mut updated = false;

            for e in self.edges() {
                let new_distance = distance[self.source(e).0] + 1;
                if new_distance < distance[self.target(e).0] {
                    distance[self.target(e).0] = new_distance;
                    updated = true;
                }
            }

            if !updated {
                break;
            }
        }

        distance.into_iter().max().unwrap_or(0)
    }

    /// Parses the text format of §6: vertex count, initial state id, then
    /// whitespace-separated `source target` pairs until EOF. All vertices
    /// are implicitly final.
    pub fn import<R: Read>(mut reader: R) -> Result<Self, ImportError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut tokens = text.split_ascii_whitespace();

        let count = parse_next(&mut tokens, "vertex count")?;
        let mut graph = Graph::new(count);

        for v in graph.vertices().collect::<Vec<_>>() {
            graph.add_final(v);
        }

        let init: usize = parse_next(&mut tokens, "initial state id")?;
        graph.set_initial(VertexId(init));

        loop {
            let source = match tokens.next() {
                None => break,
                Some(tok) => parse_token(tok, "edge source")?,
            };
            let target: usize = parse_next(&mut tokens, "edge target")?;
            graph.add_edge(VertexId(source), VertexId(target));
        }

        Ok(graph)
    }
}

fn parse_token(token: &str, expected: &'static str) -> Result<usize, ImportError> {
    token.parse().map_err(|_| ImportError::NotAnInteger {
        expected,
        found: token.to_owned(),
    })
}

fn parse_next<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<usize, ImportError> {
    let token = tokens
        .next()
        .ok_or(ImportError::UnexpectedEnd { expected })?;
    parse_token(token, expected)
}

/// Alias used by [`crate::path_counting`]: rows index vertices, columns
/// index path length.
pub type PathCountMatrix = Matrix<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> Graph {
        // Scenario A: 0 -> 1 -> 2 -> 3, all final, initial 0.
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
        // Scenario B: 0 -> 1 -> 2 -> 0, all final, initial 0.
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
    fn line_graph_is_connected_with_eccentricity_3() {
        let g = line_graph();
        assert!(g.is_connected());
        assert_eq!(g.eccentricity(), 3);
    }

    #[test]
    fn triangle_is_connected_with_eccentricity_2() {
        let g = triangle_cycle();
        assert!(g.is_connected());
        assert_eq!(g.eccentricity(), 2);
    }

    #[test]
    fn empty_graph_is_connected_with_eccentricity_0() {
        let g = Graph::new(0);
        assert!(g.is_connected());
        assert_eq!(g.eccentricity(), 0);
    }

    #[test]
    fn disconnected_graph_is_not_connected() {
        let mut g = Graph::new(3);
        g.set_initial(VertexId(0));
        g.add_edge(VertexId(0), VertexId(1));
        // vertex 2 is unreachable
        assert!(!g.is_connected());
    }

    #[test]
    fn import_round_trips_line_graph() {
        let text = "4\n0\n0 1\n1 2\n2 3\n";
        let g = Graph::import(text.as_bytes()).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.initial_state(), Some(VertexId(0)));
        assert!(g.vertices().all(|v| g.is_final(v)));
        assert!(g.is_connected());
        assert_eq!(g.eccentricity(), 3);
    }

    #[test]
    fn import_rejects_dangling_source() {
        let text = "2\n0\n0 1\n1";
        let err = Graph::import(text.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::UnexpectedEnd { .. }));
    }

    #[test]
    fn import_rejects_non_integer_token() {
        let text = "2\n0\nfoo 1";
        let err = Graph::import(text.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::NotAnInteger { .. }));
    }
}
