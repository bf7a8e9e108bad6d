//! Automorphism groups and isomorphism tests on top of the morphism driver.

use morph_common::{EdgeIdx, MorphismGraph, MorphismKind, VertexIdx};

use crate::callback::{collect_into, count_into};
use crate::predicate::Predicate;
use crate::search::MorphismSearch;
use crate::vertex_map::InvertibleVertexMap;

/// Every automorphism of `g` that respects both predicates.
///
/// The identity is always among them when the predicates are reflexive.
pub fn automorphisms<G, VP, EP>(g: &G, vertex_pred: VP, edge_pred: EP) -> Vec<InvertibleVertexMap>
where
    G: MorphismGraph,
    VP: Predicate<G, G, VertexIdx>,
    EP: Predicate<G, G, EdgeIdx>,
{
    let mut out = Vec::new();
    MorphismSearch::new(g, g, MorphismKind::Isomorphism, vertex_pred, edge_pred)
        .run(collect_into(&mut out));
    out
}

/// Order of the automorphism group of `g` under both predicates.
pub fn count_automorphisms<G, VP, EP>(g: &G, vertex_pred: VP, edge_pred: EP) -> usize
where
    G: MorphismGraph,
    VP: Predicate<G, G, VertexIdx>,
    EP: Predicate<G, G, EdgeIdx>,
{
    let mut count = 0;
    MorphismSearch::new(g, g, MorphismKind::Isomorphism, vertex_pred, edge_pred)
        .run(count_into(&mut count));
    count
}

/// Whether at least one isomorphism from `g1` to `g2` exists. Stops at the
/// first one found.
///
/// Graphs that disagree on directedness are never isomorphic.
pub fn are_isomorphic<GD, GC, VP, EP>(g1: &GD, g2: &GC, vertex_pred: VP, edge_pred: EP) -> bool
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    VP: Predicate<GD, GC, VertexIdx>,
    EP: Predicate<GD, GC, EdgeIdx>,
{
    if g1.is_directed() != g2.is_directed() {
        return false;
    }
    crate::count_up_to(g1, g2, MorphismKind::Isomorphism, vertex_pred, edge_pred, 1) == 1
}
