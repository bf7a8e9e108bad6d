//! Backtracking enumeration of graph morphisms.
//!
//! The engine answers three questions about a pair of graphs, a domain
//! (pattern) and a codomain (host):
//!
//! - which injective, edge-preserving maps embed the domain in the codomain
//!   ([`enumerate_monomorphisms`]);
//! - which bijections preserve edges and non-edges alike
//!   ([`enumerate_isomorphisms`]);
//! - which partial correspondences agree on every edge both graphs have
//!   ([`enumerate_common_subgraphs`] and its filtered variants).
//!
//! Label compatibility is pluggable through [`Predicate`]s, and every match
//! is handed to a [`MatchCallback`] as an owned [`InvertibleVertexMap`]. A
//! callback returning `false` cancels the whole search.
//!
//! ```
//! use morph_common::graph::generators;
//! use morph_subgraph::{AlwaysTrue, collect_into, enumerate_monomorphisms};
//!
//! let path = generators::path(3);
//! let square = generators::cycle(4);
//! let mut found = Vec::new();
//! let outcome =
//!     enumerate_monomorphisms(&path, &square, AlwaysTrue, AlwaysTrue, collect_into(&mut found));
//! assert_eq!(outcome.matches, 8);
//! assert!(found.iter().all(|m| m.is_total()));
//! ```

pub mod callback;
pub mod dedupe;
pub mod isomorphism;
#[cfg(feature = "rayon")]
pub mod par;
pub mod predicate;
pub mod search;
pub mod state;
pub mod vertex_map;

use morph_common::{Config, EdgeIdx, MorphismGraph, MorphismKind, SubgraphSelection, VertexIdx};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

pub use crate::callback::{MatchCallback, collect_into, count_into, deadline, filter, guard, limit};
pub use crate::dedupe::{MaximumSubgraphs, UniqueVertexMaps};
pub use crate::isomorphism::{are_isomorphic, automorphisms, count_automorphisms};
#[cfg(feature = "rayon")]
pub use crate::par::{par_enumerate_isomorphisms, par_enumerate_monomorphisms};
pub use crate::predicate::{
    AllOf, AlwaysTrue, And, LabelEquality, Predicate, property_equality, property_relation,
};
pub use crate::search::{CommonSubgraphSearch, MorphismSearch, SearchOutcome};
pub use crate::state::{EnumerationState, PushCheck};
pub use crate::vertex_map::{
    InconsistentVertexMap, InvertibleVertexMap, InvertibleVertexMapping, VectorVertexMap,
    VertexMapping, WritableVertexMapping,
};

/// Enumerates all total, injective, edge-preserving maps from `g_dom` into
/// `g_codom`.
///
/// # Panics
///
/// In debug builds, panics if exactly one of the graphs is directed.
pub fn enumerate_monomorphisms<GD, GC, VP, EP, C>(
    g_dom: &GD,
    g_codom: &GC,
    vertex_pred: VP,
    edge_pred: EP,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    MorphismSearch::new(g_dom, g_codom, MorphismKind::Monomorphism, vertex_pred, edge_pred)
        .run(callback)
}

/// Enumerates all isomorphisms from `g_dom` to `g_codom`.
///
/// # Panics
///
/// In debug builds, panics if exactly one of the graphs is directed.
pub fn enumerate_isomorphisms<GD, GC, VP, EP, C>(
    g_dom: &GD,
    g_codom: &GC,
    vertex_pred: VP,
    edge_pred: EP,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    MorphismSearch::new(g_dom, g_codom, MorphismKind::Isomorphism, vertex_pred, edge_pred)
        .run(callback)
}

/// Enumerates common subgraphs of `g_dom` and `g_codom`, reporting every
/// extension step.
///
/// Note the argument order: the edge predicate comes before the vertex
/// predicate. In connected mode the same vertex map can be reported more than
/// once; see [`enumerate_common_subgraphs_unique`].
pub fn enumerate_common_subgraphs<GD, GC, EP, VP, C>(
    g_dom: &GD,
    g_codom: &GC,
    only_connected: bool,
    edge_pred: EP,
    vertex_pred: VP,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    CommonSubgraphSearch::new(g_dom, g_codom, only_connected, vertex_pred, edge_pred).run(callback)
}

/// Like [`enumerate_common_subgraphs`], but each distinct vertex map reaches
/// `callback` only once.
///
/// The returned match count is the number of maps the driver found, repeats
/// included.
pub fn enumerate_common_subgraphs_unique<GD, GC, EP, VP, C>(
    g_dom: &GD,
    g_codom: &GC,
    only_connected: bool,
    edge_pred: EP,
    vertex_pred: VP,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    enumerate_common_subgraphs(
        g_dom,
        g_codom,
        only_connected,
        edge_pred,
        vertex_pred,
        UniqueVertexMaps::new(callback),
    )
}

/// Like [`enumerate_common_subgraphs`], but only the largest maps are
/// reported, after the search space is exhausted.
///
/// The returned outcome describes the delivery of the cached maps.
pub fn enumerate_common_subgraphs_maximum<GD, GC, EP, VP, C>(
    g_dom: &GD,
    g_codom: &GC,
    only_connected: bool,
    edge_pred: EP,
    vertex_pred: VP,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    let maximum = MaximumSubgraphs::new();
    maximum_common_subgraphs(g_dom, g_codom, only_connected, edge_pred, vertex_pred, maximum, callback)
}

/// Combination of [`enumerate_common_subgraphs_unique`] and
/// [`enumerate_common_subgraphs_maximum`].
pub fn enumerate_common_subgraphs_maximum_unique<GD, GC, EP, VP, C>(
    g_dom: &GD,
    g_codom: &GC,
    only_connected: bool,
    edge_pred: EP,
    vertex_pred: VP,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    let maximum = MaximumSubgraphs::unique();
    maximum_common_subgraphs(g_dom, g_codom, only_connected, edge_pred, vertex_pred, maximum, callback)
}

fn maximum_common_subgraphs<GD, GC, EP, VP, C>(
    g_dom: &GD,
    g_codom: &GC,
    only_connected: bool,
    edge_pred: EP,
    vertex_pred: VP,
    mut maximum: MaximumSubgraphs,
    callback: C,
) -> SearchOutcome
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
    C: MatchCallback<GD, GC>,
{
    enumerate_common_subgraphs(
        g_dom,
        g_codom,
        only_connected,
        edge_pred,
        vertex_pred,
        maximum.recorder::<GD, GC>(),
    );
    maximum.finish(g_dom, g_codom, callback)
}

/// Number of matches of the given kind, counting no further than `max`.
pub fn count_up_to<GD, GC, VP, EP>(
    g_dom: &GD,
    g_codom: &GC,
    kind: MorphismKind,
    vertex_pred: VP,
    edge_pred: EP,
    max: usize,
) -> usize
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
{
    if max == 0 {
        return 0;
    }
    let mut count = 0;
    MorphismSearch::new(g_dom, g_codom, kind, vertex_pred, edge_pred)
        .run(limit(max, count_into(&mut count)));
    count
}

/// All matches produced by one [`SubgraphMatcher`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    /// The reported vertex maps, in discovery order.
    pub items: Vec<InvertibleVertexMap>,
    /// How the search ended.
    pub outcome: SearchOutcome,
}

impl MatchSet {
    /// Number of reported maps.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if a limit or deadline cut the search short.
    pub const fn is_truncated(&self) -> bool {
        self.outcome.cancelled
    }
}

/// Configuration-driven entry points.
///
/// Picks the driver, the domain vertex order and the callback decorators
/// from a [`Config`], and collects the reported maps.
pub struct SubgraphMatcher;

impl SubgraphMatcher {
    /// Enumerates monomorphisms or isomorphisms, as selected by
    /// `config.morphism`.
    pub fn enumerate_all<GD, GC, VP, EP>(
        g_dom: &GD,
        g_codom: &GC,
        vertex_pred: VP,
        edge_pred: EP,
        config: &Config,
    ) -> MatchSet
    where
        GD: MorphismGraph,
        GC: MorphismGraph,
        VP: Predicate<GD, GC, VertexIdx>,
        EP: Predicate<GD, GC, EdgeIdx>,
    {
        let start = Instant::now();
        let mut items = Vec::new();
        let outcome = MorphismSearch::new(g_dom, g_codom, config.morphism, vertex_pred, edge_pred)
            .with_vertex_order(config.vertex_order)
            .run(limited::<GD, GC, _>(config, start, collect_into(&mut items)));
        info!(
            "{:?}: {} matches in {:?} (truncated: {})",
            config.morphism,
            items.len(),
            start.elapsed(),
            outcome.cancelled
        );
        MatchSet { items, outcome }
    }

    /// Enumerates common subgraphs, filtered by `config.subgraphs` and
    /// restricted to connected ones if `config.only_connected`.
    ///
    /// The match limit and deadline apply to the maps that reach the caller.
    /// For the maximum selections those are only handed over after the full
    /// search, so a deadline there only trims the delivery.
    pub fn common_subgraphs<GD, GC, VP, EP>(
        g_dom: &GD,
        g_codom: &GC,
        vertex_pred: VP,
        edge_pred: EP,
        config: &Config,
    ) -> MatchSet
    where
        GD: MorphismGraph,
        GC: MorphismGraph,
        VP: Predicate<GD, GC, VertexIdx>,
        EP: Predicate<GD, GC, EdgeIdx>,
    {
        let start = Instant::now();
        let only_connected = config.only_connected;
        let mut items = Vec::new();
        let cb = limited::<GD, GC, _>(config, start, collect_into(&mut items));
        let outcome = match config.subgraphs {
            SubgraphSelection::All => enumerate_common_subgraphs(
                g_dom,
                g_codom,
                only_connected,
                edge_pred,
                vertex_pred,
                cb,
            ),
            SubgraphSelection::Unique => enumerate_common_subgraphs_unique(
                g_dom,
                g_codom,
                only_connected,
                edge_pred,
                vertex_pred,
                cb,
            ),
            SubgraphSelection::Maximum => enumerate_common_subgraphs_maximum(
                g_dom,
                g_codom,
                only_connected,
                edge_pred,
                vertex_pred,
                cb,
            ),
            SubgraphSelection::MaximumUnique => enumerate_common_subgraphs_maximum_unique(
                g_dom,
                g_codom,
                only_connected,
                edge_pred,
                vertex_pred,
                cb,
            ),
        };
        info!(
            "common subgraphs ({:?}, connected: {only_connected}): {} reported in {:?}",
            config.subgraphs,
            items.len(),
            start.elapsed()
        );
        MatchSet { items, outcome }
    }
}

/// Wraps `sink` in the match limit and deadline from `config`. Absent
/// settings never cancel.
fn limited<GD, GC, S>(config: &Config, start: Instant, sink: S) -> impl MatchCallback<GD, GC>
where
    S: MatchCallback<GD, GC>,
{
    let max = config.max_matches.unwrap_or(usize::MAX);
    let at = config.time_limit.map(|budget| start + budget);
    guard(move || at.is_none_or(|at| Instant::now() < at), limit(max, sink))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;
    use morph_common::graph::generators;
    use morph_common::{LabelledGraph, VertexOrder};
    use rstest::rstest;

    type G = LabelledGraph<(), ()>;

    fn single_edge() -> G {
        generators::path(2)
    }

    #[test]
    fn star_scenario() {
        let path = generators::path(3);
        let star = generators::star(3);
        let mut out = Vec::new();
        let outcome =
            enumerate_monomorphisms(&path, &star, AlwaysTrue, AlwaysTrue, collect_into(&mut out));
        assert_eq!(outcome.matches, 6);
        let centre_images: HashSet<_> = out
            .iter()
            .map(|m| m.get(&path, &star, VertexIdx::new(1)))
            .collect();
        assert_eq!(centre_images, HashSet::from([Some(VertexIdx::new(0))]));
    }

    #[test]
    fn triangle_has_six_automorphisms() {
        let triangle = generators::cycle(3);
        let mut out = Vec::new();
        enumerate_isomorphisms(&triangle, &triangle, AlwaysTrue, AlwaysTrue, collect_into(&mut out));
        assert_eq!(out.len(), 6);
    }

    #[rstest]
    #[case::zero(0, 0)]
    #[case::one(1, 1)]
    #[case::below_total(5, 5)]
    #[case::above_total(100, 24)]
    fn count_up_to_caps(#[case] max: usize, #[case] expected: usize) {
        let k4 = generators::complete(4);
        assert_eq!(count_up_to(&k4, &k4, MorphismKind::Isomorphism, AlwaysTrue, AlwaysTrue, max), expected);
    }

    #[rstest]
    #[case::all(SubgraphSelection::All, 8)]
    #[case::unique(SubgraphSelection::Unique, 6)]
    #[case::maximum(SubgraphSelection::Maximum, 4)]
    #[case::maximum_unique(SubgraphSelection::MaximumUnique, 2)]
    fn common_subgraph_selection(#[case] selection: SubgraphSelection, #[case] expected: usize) {
        let (a, b) = (single_edge(), single_edge());
        let config = Config::builder().subgraphs(selection).build();
        let found = SubgraphMatcher::common_subgraphs(&a, &b, AlwaysTrue, AlwaysTrue, &config);
        assert_eq!(found.len(), expected);
        assert!(!found.is_truncated());
    }

    #[test]
    fn maximum_selection_keeps_only_full_edges() {
        let (a, b) = (single_edge(), single_edge());
        let config = Config::builder().subgraphs(SubgraphSelection::MaximumUnique).build();
        let found = SubgraphMatcher::common_subgraphs(&a, &b, AlwaysTrue, AlwaysTrue, &config);
        assert!(found.items.iter().all(|m| m.pre_image_size() == 2));
    }

    #[test]
    fn matcher_applies_max_matches() {
        let k4 = generators::complete(4);
        let config = Config::builder()
            .morphism(MorphismKind::Isomorphism)
            .max_matches(Some(3))
            .build();
        let found = SubgraphMatcher::enumerate_all(&k4, &k4, AlwaysTrue, AlwaysTrue, &config);
        assert_eq!(found.len(), 3);
        assert!(found.is_truncated());
    }

    #[test]
    fn matcher_vertex_order_keeps_the_match_set() {
        let dom = generators::star(2);
        let codom = generators::complete(4);
        let signatures = |order| {
            let config = Config::builder().vertex_order(order).build();
            SubgraphMatcher::enumerate_all(&dom, &codom, AlwaysTrue, AlwaysTrue, &config)
                .items
                .into_iter()
                .collect::<HashSet<_>>()
        };
        let native = signatures(VertexOrder::Native);
        assert_eq!(native.len(), 4 * 3 * 2);
        assert_eq!(native, signatures(VertexOrder::ByMultiplicity));
    }

    #[test]
    fn expired_deadline_cancels_at_the_first_match() {
        let k4 = generators::complete(4);
        let config = Config::builder()
            .morphism(MorphismKind::Isomorphism)
            .time_limit(Some(Duration::ZERO))
            .build();
        let found = SubgraphMatcher::enumerate_all(&k4, &k4, AlwaysTrue, AlwaysTrue, &config);
        assert!(found.is_empty());
        assert!(found.is_truncated());
        assert_eq!(found.outcome.matches, 1);
    }

    #[test]
    fn match_set_survives_json() {
        let triangle = generators::cycle(3);
        let found =
            SubgraphMatcher::enumerate_all(&triangle, &triangle, AlwaysTrue, AlwaysTrue, &Config::default());
        let json = serde_json::to_string(&found).unwrap();
        let back: MatchSet = serde_json::from_str(&json).unwrap();
        assert_eq!(found, back);
    }
}
