//! Monomorphism and isomorphism enumeration.
//!
//! One driver, two feasibility modes. Domain vertices are fixed one per
//! recursion level in a fixed order; the candidates for a vertex are the
//! unmapped codomain vertices, narrowed to the neighbourhood of an already
//! mapped neighbour's image when there is one.

use std::ops::ControlFlow;
use std::time::Instant;

use morph_common::{EdgeIdx, MorphismGraph, MorphismKind, VertexIdx, VertexOrder};
use tracing::{debug, trace};

use super::{SearchOutcome, flow, heuristics};
use crate::callback::MatchCallback;
use crate::predicate::Predicate;
use crate::state::{EnumerationState, PushCheck};
use crate::vertex_map::{InvertibleVertexMap, InvertibleVertexMapping, VertexMapping};

/// Feasibility of a single pair for monomorphism or isomorphism search.
///
/// Checks, in order: the vertex predicate, degree bounds, self-loops, and
/// edge correspondence with every mapped neighbour (including the edge
/// predicate). Isomorphism additionally requires non-edges to correspond.
#[derive(Clone, Copy, Debug)]
pub struct MorphismCheck<VP, EP> {
    kind: MorphismKind,
    vertex_pred: VP,
    edge_pred: EP,
}

impl<VP, EP> MorphismCheck<VP, EP> {
    /// Bundles the predicates for one search mode.
    pub const fn new(kind: MorphismKind, vertex_pred: VP, edge_pred: EP) -> Self {
        Self {
            kind,
            vertex_pred,
            edge_pred,
        }
    }

    /// The search mode.
    pub const fn kind(&self) -> MorphismKind {
        self.kind
    }

    const fn is_iso(&self) -> bool {
        matches!(self.kind, MorphismKind::Isomorphism)
    }

    fn degrees_compatible<GD, GC>(&self, g_dom: &GD, g_codom: &GC, u: VertexIdx, v: VertexIdx) -> bool
    where
        GD: MorphismGraph,
        GC: MorphismGraph,
    {
        let dom = (g_dom.out_degree(u), g_dom.in_degree(u));
        let codom = (g_codom.out_degree(v), g_codom.in_degree(v));
        if self.is_iso() {
            dom == codom
        } else {
            codom.0 >= dom.0 && codom.1 >= dom.1
        }
    }

    fn self_loops_compatible<GD, GC>(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        u: VertexIdx,
        v: VertexIdx,
    ) -> bool
    where
        GD: MorphismGraph,
        GC: MorphismGraph,
        EP: Predicate<GD, GC, EdgeIdx>,
    {
        match (g_dom.edge_between(u, u), g_codom.edge_between(v, v)) {
            (Some(e), Some(f)) => self.edge_pred.test(e, f, g_dom, g_codom),
            (Some(_), None) => false,
            (None, Some(_)) => !self.is_iso(),
            (None, None) => true,
        }
    }

    /// Every domain edge between `u` and a mapped vertex must have a
    /// counterpart accepted by the edge predicate. Returns the number of such
    /// edges, or `None` on the first failure.
    fn mapped_edges_preserved<GD, GC>(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        map: &InvertibleVertexMap,
        (u, v): (VertexIdx, VertexIdx),
        outgoing: bool,
    ) -> Option<usize>
    where
        GD: MorphismGraph,
        GC: MorphismGraph,
        EP: Predicate<GD, GC, EdgeIdx>,
    {
        let incident: Vec<(EdgeIdx, VertexIdx)> = if outgoing {
            g_dom.out_edges(u).collect()
        } else {
            g_dom.in_edges(u).collect()
        };

        let mut preserved = 0;
        for (e, u_other) in incident {
            if u_other == u {
                continue;
            }
            let Some(v_other) = map.get(g_dom, g_codom, u_other) else {
                continue;
            };
            let image = if outgoing {
                g_codom.edge_between(v, v_other)
            } else {
                g_codom.edge_between(v_other, v)
            };
            let f = image?;
            if !self.edge_pred.test(e, f, g_dom, g_codom) {
                return None;
            }
            preserved += 1;
        }
        Some(preserved)
    }
}

/// Number of codomain edges between `v` and already mapped vertices.
fn mapped_codomain_edges<GD, GC>(
    g_dom: &GD,
    g_codom: &GC,
    map: &InvertibleVertexMap,
    v: VertexIdx,
    outgoing: bool,
) -> usize
where
    GD: MorphismGraph,
    GC: MorphismGraph,
{
    let is_mapped = |w: VertexIdx| w != v && map.get_inverse(g_dom, g_codom, w).is_some();
    if outgoing {
        g_codom.out_edges(v).filter(|&(_, w)| is_mapped(w)).count()
    } else {
        g_codom.in_edges(v).filter(|&(_, w)| is_mapped(w)).count()
    }
}

impl<GD, GC, VP, EP> PushCheck<GD, GC> for MorphismCheck<VP, EP>
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
        if !self.degrees_compatible(g_dom, g_codom, u, v) {
            return false;
        }
        if !self.self_loops_compatible(g_dom, g_codom, u, v) {
            return false;
        }

        // Undirected graphs list every edge as outgoing, so one pass covers
        // both directions.
        let directions: &[bool] = if g_dom.is_directed() {
            &[true, false]
        } else {
            &[true]
        };
        for &outgoing in directions {
            let Some(preserved) = self.mapped_edges_preserved(g_dom, g_codom, map, (u, v), outgoing)
            else {
                return false;
            };
            // All domain edges have images, so equal counts leave no room for
            // an extra codomain edge.
            if self.is_iso() && preserved != mapped_codomain_edges(g_dom, g_codom, map, v, outgoing)
            {
                return false;
            }
        }
        true
    }
}

/// Depth-first enumerator of total monomorphisms or isomorphisms.
///
/// Pairs placed on the state through [`EnumerationState::pre_try_push`] or
/// [`EnumerationState::pre_force_push`] before [`Self::run`] are kept fixed
/// and appear in every reported match.
pub struct MorphismSearch<'g, GD, GC, VP, EP> {
    state: EnumerationState<'g, GD, GC, MorphismCheck<VP, EP>>,
    order: Vec<VertexIdx>,
}

impl<'g, GD, GC, VP, EP> MorphismSearch<'g, GD, GC, VP, EP>
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
{
    /// Prepares a search from `g_dom` into `g_codom`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if exactly one of the graphs is directed.
    pub fn new(
        g_dom: &'g GD,
        g_codom: &'g GC,
        kind: MorphismKind,
        vertex_pred: VP,
        edge_pred: EP,
    ) -> Self {
        debug_assert_eq!(
            g_dom.is_directed(),
            g_codom.is_directed(),
            "domain and codomain must agree on directedness"
        );
        Self {
            state: EnumerationState::new(
                g_dom,
                g_codom,
                MorphismCheck::new(kind, vertex_pred, edge_pred),
            ),
            order: g_dom.vertices().collect(),
        }
    }

    /// Replaces the order in which domain vertices are fixed.
    #[must_use]
    pub fn with_vertex_order(mut self, order: VertexOrder) -> Self {
        self.order = heuristics::domain_order(self.state.g_dom(), order);
        self
    }

    /// The enumeration state. Idle, or holding only pre-pushed pairs,
    /// whenever no search is running.
    pub const fn state(&self) -> &EnumerationState<'g, GD, GC, MorphismCheck<VP, EP>> {
        &self.state
    }

    /// Mutable access for placing pre-pushed pairs.
    pub fn state_mut(&mut self) -> &mut EnumerationState<'g, GD, GC, MorphismCheck<VP, EP>> {
        &mut self.state
    }

    fn sizes_admissible(&self) -> bool {
        let (g_dom, g_codom) = (self.state.g_dom(), self.state.g_codom());
        match self.state.check().kind() {
            MorphismKind::Monomorphism => {
                g_dom.vertex_count() <= g_codom.vertex_count()
                    && g_dom.edge_count() <= g_codom.edge_count()
            }
            MorphismKind::Isomorphism => {
                g_dom.vertex_count() == g_codom.vertex_count()
                    && g_dom.edge_count() == g_codom.edge_count()
            }
        }
    }

    /// Enumerates every total match, handing each to `callback`.
    ///
    /// Returns early, with `cancelled` set, as soon as the callback returns
    /// `false`. Either way the state is back at its pre-pushed base
    /// afterwards.
    pub fn run<C: MatchCallback<GD, GC>>(&mut self, mut callback: C) -> SearchOutcome {
        debug_assert!(self.state.is_at_base(), "search started mid-enumeration");
        let (g_dom, g_codom) = (self.state.g_dom(), self.state.g_codom());
        let kind = self.state.check().kind();
        debug!(
            "{kind:?} search: domain {}v/{}e, codomain {}v/{}e, {} pre-pushed",
            g_dom.vertex_count(),
            g_dom.edge_count(),
            g_codom.vertex_count(),
            g_codom.edge_count(),
            self.state.pre_size()
        );

        if !self.sizes_admissible() {
            debug!("{kind:?} search: graph sizes rule out any match");
            return SearchOutcome::EMPTY;
        }

        let start = Instant::now();
        let mut matches = 0;
        let flow = self.extend(0, &mut callback, &mut matches);
        debug_assert!(self.state.is_at_base(), "search leaked pushed pairs");

        let outcome = SearchOutcome::from_flow(matches, flow);
        debug!(
            "{kind:?} search complete: {} matches, cancelled: {}, took {:?}",
            outcome.matches,
            outcome.cancelled,
            start.elapsed()
        );
        outcome
    }

    fn extend<C: MatchCallback<GD, GC>>(
        &mut self,
        depth: usize,
        callback: &mut C,
        matches: &mut usize,
    ) -> ControlFlow<()> {
        let Some(&u) = self.order.get(depth) else {
            *matches += 1;
            let snapshot = self.state.sized_vertex_map();
            return flow(callback.on_match(snapshot, self.state.g_dom(), self.state.g_codom()));
        };

        // Fixed by a pre-push.
        if self.state.right_from_left(u).is_some() {
            return self.extend(depth + 1, callback, matches);
        }

        // Phase 1: candidates with only immutable access to the state.
        let candidates = self.candidates(u);
        if candidates.is_empty() {
            trace!("backtracking: no candidates for {u} at depth {depth}");
        }

        // Phase 2: push, recurse, pop.
        for v in candidates {
            if !self.state.try_push(u, v) {
                continue;
            }
            let flow = self.extend(depth + 1, callback, matches);
            self.state.pop();
            if flow.is_break() {
                return flow;
            }
        }
        ControlFlow::Continue(())
    }

    /// Unmapped codomain vertices that could be the image of `u`.
    fn candidates(&self, u: VertexIdx) -> Vec<VertexIdx> {
        let (g_dom, g_codom) = (self.state.g_dom(), self.state.g_codom());
        let unmapped = |w: &VertexIdx| self.state.left_from_right(*w).is_none();

        // u -> u' maps to v -> v', so v is an in-neighbour of v'.
        let via_out = g_dom
            .out_edges(u)
            .filter(|&(_, u_other)| u_other != u)
            .find_map(|(_, u_other)| self.state.right_from_left(u_other));
        if let Some(v_other) = via_out {
            return g_codom
                .in_edges(v_other)
                .map(|(_, w)| w)
                .filter(unmapped)
                .collect();
        }

        if g_dom.is_directed() {
            let via_in = g_dom
                .in_edges(u)
                .filter(|&(_, u_other)| u_other != u)
                .find_map(|(_, u_other)| self.state.right_from_left(u_other));
            if let Some(v_other) = via_in {
                return g_codom
                    .out_edges(v_other)
                    .map(|(_, w)| w)
                    .filter(unmapped)
                    .collect();
            }
        }

        g_codom.vertices().filter(unmapped).collect()
    }
}
