//! Enumeration of common subgraphs.
//!
//! Every successful push is reported, so callers see each partial
//! correspondence as it grows, not only maximal ones. Edges that exist in only
//! one of the two graphs are ignored; an edge that exists in both must pass
//! the edge predicate.

use std::ops::ControlFlow;
use std::time::Instant;

use morph_common::{EdgeIdx, MorphismGraph, VertexIdx};
use tracing::debug;

use super::SearchOutcome;
use crate::callback::MatchCallback;
use crate::predicate::Predicate;
use crate::state::{EnumerationState, PushCheck};
use crate::vertex_map::{InvertibleVertexMap, VertexMapping};

/// Feasibility of a pair against all currently mapped pairs.
#[derive(Clone, Copy, Debug)]
pub struct CommonSubgraphCheck<VP, EP> {
    only_connected: bool,
    vertex_pred: VP,
    edge_pred: EP,
}

impl<VP, EP> CommonSubgraphCheck<VP, EP> {
    /// Bundles the predicates and the connectivity requirement.
    pub const fn new(only_connected: bool, vertex_pred: VP, edge_pred: EP) -> Self {
        Self {
            only_connected,
            vertex_pred,
            edge_pred,
        }
    }

    /// Whether every pushed pair must be adjacent to an earlier one.
    pub const fn only_connected(&self) -> bool {
        self.only_connected
    }
}

/// Outcome of comparing one possible edge in both graphs.
enum SharedEdge {
    /// Missing on at least one side.
    Absent,
    /// Present on both sides and accepted.
    Accepted,
    /// Present on both sides and rejected by the edge predicate.
    Rejected,
}

impl<VP, EP> CommonSubgraphCheck<VP, EP> {
    fn shared_edge<GD, GC>(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        dom_edge: Option<EdgeIdx>,
        codom_edge: Option<EdgeIdx>,
    ) -> SharedEdge
    where
        EP: Predicate<GD, GC, EdgeIdx>,
    {
        match (dom_edge, codom_edge) {
            (Some(e), Some(f)) if self.edge_pred.test(e, f, g_dom, g_codom) => SharedEdge::Accepted,
            (Some(_), Some(_)) => SharedEdge::Rejected,
            _ => SharedEdge::Absent,
        }
    }
}

impl<GD, GC, VP, EP> PushCheck<GD, GC> for CommonSubgraphCheck<VP, EP>
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
{
    fn admits(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        map: &InvertibleVertexMap,
        u: VertexIdx,
        v: VertexIdx,
    ) -> bool {
        if !self.vertex_pred.test(u, v, g_dom, g_codom) {
            return false;
        }
        if map.is_empty() {
            return true;
        }

        let any_directed = g_dom.is_directed() || g_codom.is_directed();
        let mut has_one_edge = false;
        for u_other in g_dom.vertices() {
            let Some(v_other) = map.get(g_dom, g_codom, u_other) else {
                continue;
            };

            let towards_new = self.shared_edge(
                g_dom,
                g_codom,
                g_dom.edge_between(u_other, u),
                g_codom.edge_between(v_other, v),
            );
            match towards_new {
                SharedEdge::Rejected => return false,
                SharedEdge::Accepted => has_one_edge = true,
                SharedEdge::Absent => {}
            }

            if any_directed {
                let from_new = self.shared_edge(
                    g_dom,
                    g_codom,
                    g_dom.is_directed().then(|| g_dom.edge_between(u, u_other)).flatten(),
                    g_codom.is_directed().then(|| g_codom.edge_between(v, v_other)).flatten(),
                );
                match from_new {
                    SharedEdge::Rejected => return false,
                    SharedEdge::Accepted => has_one_edge = true,
                    SharedEdge::Absent => {}
                }
            }
        }

        !self.only_connected || has_one_edge
    }
}

/// Depth-first enumerator of common subgraphs.
///
/// With `only_connected`, every level rescans the whole domain, since any
/// vertex may be the one that keeps the subgraph connected; the same vertex
/// set is then reached in several push orders. Without it, each domain vertex
/// gets a single chance to join, in graph order, so every vertex map is
/// reported exactly once.
pub struct CommonSubgraphSearch<'g, GD, GC, VP, EP> {
    state: EnumerationState<'g, GD, GC, CommonSubgraphCheck<VP, EP>>,
}

impl<'g, GD, GC, VP, EP> CommonSubgraphSearch<'g, GD, GC, VP, EP>
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
{
    /// Prepares a search between `g_dom` and `g_codom`.
    pub fn new(
        g_dom: &'g GD,
        g_codom: &'g GC,
        only_connected: bool,
        vertex_pred: VP,
        edge_pred: EP,
    ) -> Self {
        Self {
            state: EnumerationState::new(
                g_dom,
                g_codom,
                CommonSubgraphCheck::new(only_connected, vertex_pred, edge_pred),
            ),
        }
    }

    /// The enumeration state.
    pub const fn state(&self) -> &EnumerationState<'g, GD, GC, CommonSubgraphCheck<VP, EP>> {
        &self.state
    }

    /// Mutable access for placing pre-pushed pairs.
    pub fn state_mut(&mut self) -> &mut EnumerationState<'g, GD, GC, CommonSubgraphCheck<VP, EP>> {
        &mut self.state
    }

    /// Reports every feasible extension step to `callback`.
    pub fn run<C: MatchCallback<GD, GC>>(&mut self, mut callback: C) -> SearchOutcome {
        debug_assert!(self.state.is_at_base(), "search started mid-enumeration");
        let (g_dom, g_codom) = (self.state.g_dom(), self.state.g_codom());
        let only_connected = self.state.check().only_connected();
        debug!(
            "common subgraph search (connected: {only_connected}): domain {}v/{}e, codomain {}v/{}e",
            g_dom.vertex_count(),
            g_dom.edge_count(),
            g_codom.vertex_count(),
            g_codom.edge_count()
        );

        let start = Instant::now();
        let mut matches = 0;
        let flow = self.extend(0, &mut callback, &mut matches);
        debug_assert!(self.state.is_at_base(), "search leaked pushed pairs");

        let outcome = SearchOutcome::from_flow(matches, flow);
        debug!(
            "common subgraph search complete: {} matches, cancelled: {}, took {:?}",
            outcome.matches,
            outcome.cancelled,
            start.elapsed()
        );
        outcome
    }

    fn extend<C: MatchCallback<GD, GC>>(
        &mut self,
        first: usize,
        callback: &mut C,
        matches: &mut usize,
    ) -> ControlFlow<()> {
        let (g_dom, g_codom) = (self.state.g_dom(), self.state.g_codom());
        let first = if self.state.check().only_connected() {
            0
        } else {
            first
        };

        for (i, u) in g_dom.vertices().enumerate().skip(first) {
            if self.state.right_from_left(u).is_some() {
                continue;
            }
            for v in g_codom.vertices() {
                if self.state.left_from_right(v).is_some() || !self.state.try_push(u, v) {
                    continue;
                }
                *matches += 1;
                let snapshot = self.state.sized_vertex_map();
                let flow = if callback.on_match(snapshot, g_dom, g_codom) {
                    self.extend(i + 1, callback, matches)
                } else {
                    ControlFlow::Break(())
                };
                self.state.pop();
                if flow.is_break() {
                    return flow;
                }
            }
        }
        ControlFlow::Continue(())
    }
}
