//! Backtracking search drivers built on [`EnumerationState`].
//!
//! [`EnumerationState`]: crate::state::EnumerationState

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

mod common_subgraph;
pub mod heuristics;
mod morphism;

pub use common_subgraph::{CommonSubgraphCheck, CommonSubgraphSearch};
pub use morphism::{MorphismCheck, MorphismSearch};

/// How an enumeration call ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Number of times the callback was invoked.
    pub matches: usize,
    /// True if a callback returned `false` before the search space was
    /// exhausted.
    pub cancelled: bool,
}

impl SearchOutcome {
    /// An exhausted search that found nothing.
    pub const EMPTY: Self = Self {
        matches: 0,
        cancelled: false,
    };

    pub(crate) fn from_flow(matches: usize, flow: ControlFlow<()>) -> Self {
        Self {
            matches,
            cancelled: flow.is_break(),
        }
    }
}

/// Turns a callback's verdict into search control flow.
pub(crate) const fn flow(go_on: bool) -> ControlFlow<()> {
    if go_on {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}
