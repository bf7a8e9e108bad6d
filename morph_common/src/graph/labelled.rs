use contracts::*;
use tracing::trace;

use super::{EdgeIdx, MorphismGraph, VertexIdx};
use crate::error::GraphError;

/// Adjacency-list graph with a label on every vertex and edge.
///
/// Vertices and edges are numbered densely in insertion order. Parallel edges
/// are rejected at insertion time, so the "at most one edge per pair"
/// precondition of the engine holds by construction.
#[derive(Clone, Debug)]
pub struct LabelledGraph<V, E> {
    directed: bool,
    vertex_labels: Vec<V>,
    edge_labels: Vec<E>,
    /// (source, target) per edge.
    endpoints: Vec<(VertexIdx, VertexIdx)>,
    /// Outgoing incidence per vertex: (edge, other endpoint).
    out_adj: Vec<Vec<(EdgeIdx, VertexIdx)>>,
    /// Incoming incidence per vertex. Unused for undirected graphs.
    in_adj: Vec<Vec<(EdgeIdx, VertexIdx)>>,
}

impl<V, E> LabelledGraph<V, E> {
    /// Creates an empty directed graph.
    #[must_use]
    pub const fn new_directed() -> Self {
        Self::with_direction(true)
    }

    /// Creates an empty undirected graph.
    #[must_use]
    pub const fn new_undirected() -> Self {
        Self::with_direction(false)
    }

    const fn with_direction(directed: bool) -> Self {
        Self {
            directed,
            vertex_labels: Vec::new(),
            edge_labels: Vec::new(),
            endpoints: Vec::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    /// Adds a vertex and returns its index.
    #[debug_ensures(ret.as_usize() + 1 == self.vertex_labels.len())]
    pub fn add_vertex(&mut self, label: V) -> VertexIdx {
        let v = VertexIdx::from(self.vertex_labels.len());
        self.vertex_labels.push(label);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        v
    }

    /// Adds an edge from `u` to `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if either endpoint is not a
    /// vertex of this graph and [`GraphError::ParallelEdge`] if the pair is
    /// already connected.
    pub fn add_edge(&mut self, u: VertexIdx, v: VertexIdx, label: E) -> Result<EdgeIdx, GraphError> {
        for endpoint in [u, v] {
            if endpoint.as_usize() >= self.vertex_labels.len() {
                return Err(GraphError::unknown_vertex(
                    endpoint,
                    self.vertex_labels.len(),
                ));
            }
        }
        if self.edge_between(u, v).is_some() {
            return Err(GraphError::parallel_edge(u, v));
        }

        let e = EdgeIdx::from(self.edge_labels.len());
        self.edge_labels.push(label);
        self.endpoints.push((u, v));
        self.out_adj[u.as_usize()].push((e, v));
        if self.directed {
            self.in_adj[v.as_usize()].push((e, u));
        } else if u != v {
            self.out_adj[v.as_usize()].push((e, u));
        }
        trace!("LabelledGraph::add_edge {e}: {u} -> {v}");
        Ok(e)
    }

    /// Label of vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of this graph.
    #[must_use]
    pub fn vertex_label(&self, v: VertexIdx) -> &V {
        &self.vertex_labels[v.as_usize()]
    }

    /// Label of edge `e`.
    ///
    /// # Panics
    ///
    /// Panics if `e` is not an edge of this graph.
    #[must_use]
    pub fn edge_label(&self, e: EdgeIdx) -> &E {
        &self.edge_labels[e.as_usize()]
    }

    /// Returns true if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_labels.is_empty()
    }
}

impl<V, E> MorphismGraph for LabelledGraph<V, E> {
    fn vertex_count(&self) -> usize {
        self.vertex_labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_labels.len()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn vertices(&self) -> impl Iterator<Item = VertexIdx> + '_ {
        (0..self.vertex_labels.len()).map(VertexIdx::from)
    }

    fn edges(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        (0..self.edge_labels.len()).map(EdgeIdx::from)
    }

    fn out_edges(&self, v: VertexIdx) -> impl Iterator<Item = (EdgeIdx, VertexIdx)> + '_ {
        self.out_adj[v.as_usize()].iter().copied()
    }

    fn in_edges(&self, v: VertexIdx) -> impl Iterator<Item = (EdgeIdx, VertexIdx)> + '_ {
        let adj = if self.directed {
            &self.in_adj
        } else {
            &self.out_adj
        };
        adj[v.as_usize()].iter().copied()
    }

    fn source(&self, e: EdgeIdx) -> VertexIdx {
        self.endpoints[e.as_usize()].0
    }

    fn target(&self, e: EdgeIdx) -> VertexIdx {
        self.endpoints[e.as_usize()].1
    }

    fn out_degree(&self, v: VertexIdx) -> usize {
        self.out_adj[v.as_usize()].len()
    }

    fn in_degree(&self, v: VertexIdx) -> usize {
        if self.directed {
            self.in_adj[v.as_usize()].len()
        } else {
            self.out_adj[v.as_usize()].len()
        }
    }
}
