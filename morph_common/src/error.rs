//! Error types for graph construction.
//!
//! The search engine itself has no recoverable errors; everything it could
//! trip over is rejected here, while the graph is still being built.

use thiserror::Error;

use crate::graph::VertexIdx;

/// Errors raised while building a [`crate::LabelledGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint does not name a vertex of the graph.
    #[error("vertex {vertex} is not part of a graph with {vertex_count} vertices")]
    UnknownVertex {
        /// The offending endpoint.
        vertex: VertexIdx,
        /// Number of vertices in the graph at the time of the call.
        vertex_count: usize,
    },

    /// A second edge between the same ordered pair (or unordered pair, for
    /// undirected graphs) was requested.
    #[error("parallel edge {from} -> {to} is not supported")]
    ParallelEdge {
        /// Source endpoint of the rejected edge.
        from: VertexIdx,
        /// Target endpoint of the rejected edge.
        to: VertexIdx,
    },
}

impl GraphError {
    /// Create an unknown vertex error.
    pub const fn unknown_vertex(vertex: VertexIdx, vertex_count: usize) -> Self {
        Self::UnknownVertex {
            vertex,
            vertex_count,
        }
    }

    /// Create a parallel edge error.
    pub const fn parallel_edge(from: VertexIdx, to: VertexIdx) -> Self {
        Self::ParallelEdge { from, to }
    }
}
