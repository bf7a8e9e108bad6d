//! Root-split parallel enumeration.
//!
//! The first domain vertex is pre-pushed onto each of its possible images,
//! and every branch runs on its own [`MorphismSearch`] with its own state.
//! Only the graphs and the predicates are shared between threads.

use morph_common::{EdgeIdx, MorphismGraph, MorphismKind, VertexIdx};
use rayon::prelude::*;
use tracing::debug;

use crate::callback::collect_into;
use crate::predicate::Predicate;
use crate::search::MorphismSearch;
use crate::vertex_map::InvertibleVertexMap;

/// Parallel counterpart of [`crate::enumerate_monomorphisms`] that collects
/// every match.
pub fn par_enumerate_monomorphisms<GD, GC, VP, EP>(
    g_dom: &GD,
    g_codom: &GC,
    vertex_pred: VP,
    edge_pred: EP,
) -> Vec<InvertibleVertexMap>
where
    GD: MorphismGraph + Sync,
    GC: MorphismGraph + Sync,
    VP: Predicate<GD, GC, VertexIdx> + Sync,
    EP: Predicate<GD, GC, EdgeIdx> + Sync,
{
    par_enumerate(g_dom, g_codom, MorphismKind::Monomorphism, vertex_pred, edge_pred)
}

/// Parallel counterpart of [`crate::enumerate_isomorphisms`] that collects
/// every match.
pub fn par_enumerate_isomorphisms<GD, GC, VP, EP>(
    g_dom: &GD,
    g_codom: &GC,
    vertex_pred: VP,
    edge_pred: EP,
) -> Vec<InvertibleVertexMap>
where
    GD: MorphismGraph + Sync,
    GC: MorphismGraph + Sync,
    VP: Predicate<GD, GC, VertexIdx> + Sync,
    EP: Predicate<GD, GC, EdgeIdx> + Sync,
{
    par_enumerate(g_dom, g_codom, MorphismKind::Isomorphism, vertex_pred, edge_pred)
}

fn par_enumerate<GD, GC, VP, EP>(
    g_dom: &GD,
    g_codom: &GC,
    kind: MorphismKind,
    vertex_pred: VP,
    edge_pred: EP,
) -> Vec<InvertibleVertexMap>
where
    GD: MorphismGraph + Sync,
    GC: MorphismGraph + Sync,
    VP: Predicate<GD, GC, VertexIdx> + Sync,
    EP: Predicate<GD, GC, EdgeIdx> + Sync,
{
    let vp = |a: VertexIdx, b: VertexIdx, gd: &GD, gc: &GC| vertex_pred.test(a, b, gd, gc);
    let ep = |a: EdgeIdx, b: EdgeIdx, gd: &GD, gc: &GC| edge_pred.test(a, b, gd, gc);

    let Some(root) = g_dom.vertices().next() else {
        let mut out = Vec::new();
        MorphismSearch::new(g_dom, g_codom, kind, vp, ep).run(collect_into(&mut out));
        return out;
    };

    let images: Vec<VertexIdx> = g_codom.vertices().collect();
    debug!("{kind:?} parallel search: splitting {root} over {} images", images.len());

    images
        .into_par_iter()
        .flat_map_iter(|v| {
            let mut out = Vec::new();
            let mut search = MorphismSearch::new(g_dom, g_codom, kind, vp, ep);
            if search.state_mut().pre_try_push(root, v) {
                search.run(collect_into(&mut out));
                search.state_mut().pre_pop();
            }
            out
        })
        .collect()
}
