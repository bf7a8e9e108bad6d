//! Domain vertex orderings for the morphism driver.

use itertools::Itertools;
use morph_common::{MorphismGraph, VertexIdx, VertexOrder};

/// Domain vertices in the order the morphism driver should fix them.
pub fn domain_order<G: MorphismGraph>(g: &G, order: VertexOrder) -> Vec<VertexIdx> {
    match order {
        VertexOrder::Native => g.vertices().collect(),
        VertexOrder::ByMultiplicity => vertex_order_by_mult(g),
    }
}

/// Vertices sorted by how common their (in-degree, out-degree) class is,
/// then by total degree.
///
/// Vertices in rare degree classes have few plausible images, so fixing them
/// first prunes the search tree early. Ties keep the native order.
pub fn vertex_order_by_mult<G: MorphismGraph>(g: &G) -> Vec<VertexIdx> {
    let degree_class = |v: VertexIdx| (g.in_degree(v), g.out_degree(v));
    let frequency = g.vertices().map(degree_class).counts();

    let mut order: Vec<VertexIdx> = g.vertices().collect();
    order.sort_by_key(|&v| {
        let (in_deg, out_deg) = degree_class(v);
        (frequency[&(in_deg, out_deg)], in_deg + out_deg)
    });
    order
}
