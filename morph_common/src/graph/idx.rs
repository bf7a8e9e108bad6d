//! Dense vertex and edge identifiers.
//!
//! A graph hands out indices `0..count` in insertion order, so per-vertex and
//! per-edge data can live in plain `Vec`s indexed by [`VertexIdx::as_usize`].

use contracts::*;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! dense_index {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a position handed out by a graph.
            pub const fn new(position: u32) -> Self {
                Self(position)
            }

            /// Position in the owning graph's dense arrays.
            pub const fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            #[debug_requires(u32::try_from(position).is_ok(), "index overflows u32")]
            fn from(position: usize) -> Self {
                Self(position as u32)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> Self {
                id.as_usize()
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

dense_index!(
    /// Vertex of one particular graph.
    ///
    /// Only meaningful together with the graph it came from; the engine never
    /// compares domain indices with codomain indices.
    VertexIdx,
    "v"
);

dense_index!(
    /// Edge of one particular graph.
    EdgeIdx,
    "e"
);
