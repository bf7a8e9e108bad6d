//! Common utilities and shared types for the morph workspace.
//!
//! This crate provides the graph capability consumed by the morphism engine,
//! a labelled adjacency-list graph implementing it, search configuration and
//! the shared error type.

mod config;
mod error;
pub mod graph;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::graph::{EdgeIdx, LabelledGraph, MorphismGraph, VertexIdx};
