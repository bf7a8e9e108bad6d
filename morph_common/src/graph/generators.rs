//! Small graph families used as fixtures.
//!
//! All generators build undirected graphs. Vertex `i` is created `i`-th, so
//! its index is `VertexIdx::new(i)`.

use super::{LabelledGraph, VertexIdx};

/// Path `v0 - v1 - ... - v(n-1)` with unit labels.
#[must_use]
pub fn path(n: usize) -> LabelledGraph<(), ()> {
    path_labelled(n, |_| ())
}

/// Path with vertex labels produced by `label`.
pub fn path_labelled<V>(n: usize, label: impl Fn(usize) -> V) -> LabelledGraph<V, ()> {
    let mut g = LabelledGraph::new_undirected();
    let vs: Vec<VertexIdx> = (0..n).map(|i| g.add_vertex(label(i))).collect();
    for pair in vs.windows(2) {
        connect(&mut g, pair[0], pair[1]);
    }
    g
}

/// Cycle on `n` vertices. For `n < 3` this degenerates to a path.
#[must_use]
pub fn cycle(n: usize) -> LabelledGraph<(), ()> {
    let mut g = path(n);
    if n >= 3 {
        connect(&mut g, VertexIdx::from(n - 1), VertexIdx::new(0));
    }
    g
}

/// Star with centre `v0` and `leaves` leaves `v1..=v(leaves)`.
#[must_use]
pub fn star(leaves: usize) -> LabelledGraph<(), ()> {
    let mut g = LabelledGraph::new_undirected();
    let centre = g.add_vertex(());
    for _ in 0..leaves {
        let leaf = g.add_vertex(());
        connect(&mut g, centre, leaf);
    }
    g
}

/// Complete graph on `n` vertices.
#[must_use]
pub fn complete(n: usize) -> LabelledGraph<(), ()> {
    let mut g = LabelledGraph::new_undirected();
    let vs: Vec<VertexIdx> = (0..n).map(|_| g.add_vertex(())).collect();
    for (i, &u) in vs.iter().enumerate() {
        for &v in &vs[i + 1..] {
            connect(&mut g, u, v);
        }
    }
    g
}

/// Both endpoints exist and each pair is connected once.
fn connect<V>(g: &mut LabelledGraph<V, ()>, u: VertexIdx, v: VertexIdx) {
    let added = g.add_edge(u, v, ());
    debug_assert!(added.is_ok(), "generator produced an invalid edge {u}-{v}");
}
