//! Graph capability consumed by the morphism engine.
//!
//! The engine never builds or mutates graphs. It only needs dense vertex
//! indices, ordered vertex iteration and per-vertex incidence, which is what
//! [`MorphismGraph`] exposes. [`LabelledGraph`] is the adjacency-list
//! implementation used by tests and the demo binary.

pub mod generators;
mod idx;
mod labelled;

pub use idx::{EdgeIdx, VertexIdx};
pub use labelled::LabelledGraph;

/// An immutable, possibly directed graph with dense vertex indices.
///
/// Implementations must hand out vertices with indices in
/// `[0, vertex_count())`, iterate them in a stable order, and contain at most
/// one edge per ordered pair of vertices (per unordered pair when undirected).
pub trait MorphismGraph {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Whether edges are directed. Undirected graphs report every edge in
    /// both [`Self::out_edges`] and [`Self::in_edges`] of both endpoints.
    fn is_directed(&self) -> bool;

    /// All vertices, in a stable order.
    fn vertices(&self) -> impl Iterator<Item = VertexIdx> + '_;

    /// All edges, in a stable order.
    fn edges(&self) -> impl Iterator<Item = EdgeIdx> + '_;

    /// Edges leaving `v`, paired with the vertex on the other end.
    fn out_edges(&self, v: VertexIdx) -> impl Iterator<Item = (EdgeIdx, VertexIdx)> + '_;

    /// Edges entering `v`, paired with the vertex on the other end.
    fn in_edges(&self, v: VertexIdx) -> impl Iterator<Item = (EdgeIdx, VertexIdx)> + '_;

    /// Source vertex of `e`.
    fn source(&self, e: EdgeIdx) -> VertexIdx;

    /// Target vertex of `e`.
    fn target(&self, e: EdgeIdx) -> VertexIdx;

    /// Dense index of `v` in `[0, vertex_count())`.
    fn vertex_index(&self, v: VertexIdx) -> usize {
        v.as_usize()
    }

    /// The edge from `u` to `v`, if any. For undirected graphs the direction
    /// is irrelevant.
    fn edge_between(&self, u: VertexIdx, v: VertexIdx) -> Option<EdgeIdx> {
        self.out_edges(u)
            .find(|&(_, other)| other == v)
            .map(|(e, _)| e)
    }

    /// Number of edges leaving `v`.
    fn out_degree(&self, v: VertexIdx) -> usize {
        self.out_edges(v).count()
    }

    /// Number of edges entering `v`.
    fn in_degree(&self, v: VertexIdx) -> usize {
        self.in_edges(v).count()
    }
}

impl<G: MorphismGraph + ?Sized> MorphismGraph for &G {
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn is_directed(&self) -> bool {
        (**self).is_directed()
    }

    fn vertices(&self) -> impl Iterator<Item = VertexIdx> + '_ {
        (**self).vertices()
    }

    fn edges(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        (**self).edges()
    }

    fn out_edges(&self, v: VertexIdx) -> impl Iterator<Item = (EdgeIdx, VertexIdx)> + '_ {
        (**self).out_edges(v)
    }

    fn in_edges(&self, v: VertexIdx) -> impl Iterator<Item = (EdgeIdx, VertexIdx)> + '_ {
        (**self).in_edges(v)
    }

    fn source(&self, e: EdgeIdx) -> VertexIdx {
        (**self).source(e)
    }

    fn target(&self, e: EdgeIdx) -> VertexIdx {
        (**self).target(e)
    }

    fn vertex_index(&self, v: VertexIdx) -> usize {
        (**self).vertex_index(v)
    }

    fn edge_between(&self, u: VertexIdx, v: VertexIdx) -> Option<EdgeIdx> {
        (**self).edge_between(u, v)
    }

    fn out_degree(&self, v: VertexIdx) -> usize {
        (**self).out_degree(v)
    }

    fn in_degree(&self, v: VertexIdx) -> usize {
        (**self).in_degree(v)
    }
}
