#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Once;

use morph_common::{LabelledGraph, MorphismGraph, VertexIdx};
use morph_subgraph::{InvertibleVertexMap, VertexMapping};
use quickcheck::{Arbitrary, Gen};

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Graph type used by the property tests: two vertex colours, unlabelled
/// edges.
pub type Colored = LabelledGraph<u8, ()>;

/// A random undirected graph on at most `MAX` vertices.
#[derive(Clone, Debug)]
pub struct SmallGraph<const MAX: usize>(pub Colored);

/// A random directed graph on at most `MAX` vertices.
#[derive(Clone, Debug)]
pub struct SmallDigraph<const MAX: usize>(pub Colored);

fn random_graph(g: &mut Gen, max: usize, mut graph: Colored) -> Colored {
    let n = usize::arbitrary(g) % (max + 1);
    let vs: Vec<VertexIdx> = (0..n).map(|_| graph.add_vertex(u8::arbitrary(g) % 2)).collect();
    if n == 0 {
        return graph;
    }
    let attempts = usize::arbitrary(g) % (n * n + 1);
    for _ in 0..attempts {
        let u = vs[usize::arbitrary(g) % n];
        let v = vs[usize::arbitrary(g) % n];
        // Self-loops are rare in chemistry graphs; keep them rare here too.
        if u == v && u8::arbitrary(g) % 8 != 0 {
            continue;
        }
        // Parallel edges are rejected, which is fine for a random graph.
        let _ = graph.add_edge(u, v, ());
    }
    graph
}

impl<const MAX: usize> Arbitrary for SmallGraph<MAX> {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(random_graph(g, MAX, LabelledGraph::new_undirected()))
    }
}

impl<const MAX: usize> Arbitrary for SmallDigraph<MAX> {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(random_graph(g, MAX, LabelledGraph::new_directed()))
    }
}

/// `g` with its vertices renumbered by `perm` (vertex `i` becomes
/// `perm[i]`). Labels travel with their vertices.
pub fn permuted(g: &Colored, perm: &[usize]) -> Colored {
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    let mut out = if g.is_directed() {
        LabelledGraph::new_directed()
    } else {
        LabelledGraph::new_undirected()
    };
    for &old in &inverse {
        out.add_vertex(*g.vertex_label(VertexIdx::from(old)));
    }
    for e in g.edges() {
        let (u, v) = (g.source(e), g.target(e));
        out.add_edge(VertexIdx::from(perm[u.as_usize()]), VertexIdx::from(perm[v.as_usize()]), ())
            .expect("a permutation keeps edges distinct");
    }
    out
}

/// A permutation of `0..n` that sorts the vertices by `keys` (missing keys
/// count as zero, ties keep index order).
pub fn permutation(n: usize, keys: &[u32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (keys.get(i).copied().unwrap_or(0), i));
    let mut perm = vec![0; n];
    for (new, &old) in order.iter().enumerate() {
        perm[old] = new;
    }
    perm
}

/// No two domain vertices share an image.
pub fn is_injective<GD: MorphismGraph, GC: MorphismGraph>(
    m: &InvertibleVertexMap,
    g_dom: &GD,
    g_codom: &GC,
) -> bool {
    let mut seen = vec![false; g_codom.vertex_count()];
    for u in g_dom.vertices() {
        if let Some(v) = m.get(g_dom, g_codom, u) {
            if std::mem::replace(&mut seen[v.as_usize()], true) {
                return false;
            }
        }
    }
    true
}

/// Every domain edge between mapped endpoints has a codomain counterpart.
pub fn preserves_edges<GD: MorphismGraph, GC: MorphismGraph>(
    m: &InvertibleVertexMap,
    g_dom: &GD,
    g_codom: &GC,
) -> bool {
    g_dom.edges().all(|e| {
        let (u, v) = (g_dom.source(e), g_dom.target(e));
        match (m.get(g_dom, g_codom, u), m.get(g_dom, g_codom, v)) {
            (Some(mu), Some(mv)) => g_codom.edge_between(mu, mv).is_some(),
            _ => true,
        }
    })
}

/// Edges and non-edges both correspond, for every ordered pair of mapped
/// vertices.
pub fn reflects_edges<GD: MorphismGraph, GC: MorphismGraph>(
    m: &InvertibleVertexMap,
    g_dom: &GD,
    g_codom: &GC,
) -> bool {
    let pairs: Vec<_> = m.pairs().collect();
    pairs.iter().all(|&(u, mu)| {
        pairs.iter().all(|&(v, mv)| {
            g_dom.edge_between(u, v).is_some() == g_codom.edge_between(mu, mv).is_some()
        })
    })
}

/// The mapped domain vertices form one component when linked by edges that
/// both graphs share (same direction on both sides).
pub fn mapped_part_is_connected<GD: MorphismGraph, GC: MorphismGraph>(
    m: &InvertibleVertexMap,
    g_dom: &GD,
    g_codom: &GC,
) -> bool {
    let pairs: Vec<_> = m.pairs().collect();
    let Some(&first) = pairs.first() else {
        return true;
    };
    let shared = |(a, ma): (VertexIdx, VertexIdx), (b, mb): (VertexIdx, VertexIdx)| {
        (g_dom.edge_between(a, b).is_some() && g_codom.edge_between(ma, mb).is_some())
            || (g_dom.edge_between(b, a).is_some() && g_codom.edge_between(mb, ma).is_some())
    };

    let mut reached = vec![first];
    let mut frontier = vec![first];
    while let Some(p) = frontier.pop() {
        for &q in &pairs {
            if !reached.contains(&q) && shared(p, q) {
                reached.push(q);
                frontier.push(q);
            }
        }
    }
    reached.len() == pairs.len()
}

/// Every total injective map from `g_dom` into `g_codom`, found by trying all
/// assignments. Vertex labels must agree, domain edges must have a codomain
/// counterpart, and with `iso` the map must also be onto and reflect edges.
/// Each map is listed as the image of each domain vertex in index order.
pub fn brute_force_morphisms(
    g_dom: &Colored,
    g_codom: &Colored,
    iso: bool,
) -> HashSet<Vec<VertexIdx>> {
    let mut found = HashSet::new();
    if iso && g_dom.vertex_count() != g_codom.vertex_count() {
        return found;
    }
    let mut images = Vec::with_capacity(g_dom.vertex_count());
    assign(g_dom, g_codom, iso, &mut images, &mut found);
    found
}

fn assign(
    g_dom: &Colored,
    g_codom: &Colored,
    iso: bool,
    images: &mut Vec<VertexIdx>,
    found: &mut HashSet<Vec<VertexIdx>>,
) {
    if images.len() == g_dom.vertex_count() {
        if accepts(g_dom, g_codom, iso, images) {
            found.insert(images.clone());
        }
        return;
    }
    for w in g_codom.vertices() {
        if !images.contains(&w) {
            images.push(w);
            assign(g_dom, g_codom, iso, images, found);
            images.pop();
        }
    }
}

fn accepts(g_dom: &Colored, g_codom: &Colored, iso: bool, images: &[VertexIdx]) -> bool {
    let labels_agree = g_dom
        .vertices()
        .zip(images)
        .all(|(u, &w)| g_dom.vertex_label(u) == g_codom.vertex_label(w));
    let edges_agree = g_dom.vertices().zip(images).all(|(u, &mu)| {
        g_dom.vertices().zip(images).all(|(v, &mv)| {
            let in_dom = g_dom.edge_between(u, v).is_some();
            let in_codom = g_codom.edge_between(mu, mv).is_some();
            if iso { in_dom == in_codom } else { !in_dom || in_codom }
        })
    });
    labels_agree && edges_agree
}

/// The images of a reported map in the layout [`brute_force_morphisms`] uses.
/// Unmapped domain vertices are dropped.
pub fn images_of(m: &InvertibleVertexMap, g_dom: &Colored, g_codom: &Colored) -> Vec<VertexIdx> {
    g_dom.vertices().filter_map(|u| m.get(g_dom, g_codom, u)).collect()
}
