#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod test_harness;

use std::collections::HashSet;

use morph_common::graph::generators;
use morph_common::{LabelledGraph, MorphismGraph, MorphismKind, VertexIdx, VertexOrder};
use morph_subgraph::{
    AlwaysTrue, InvertibleVertexMap, LabelEquality, MorphismSearch, VertexMapping, collect_into,
    count_automorphisms, count_up_to, enumerate_isomorphisms, enumerate_monomorphisms, limit,
};
use lazy_static::lazy_static;
use quickcheck::quickcheck;
use rstest::rstest;
use test_harness::{
    Colored, SmallDigraph, SmallGraph, brute_force_morphisms, images_of, is_injective,
    permutation, permuted, preserves_edges, reflects_edges, setup_test_logging,
};

fn monomorphisms(dom: &Colored, codom: &Colored) -> Vec<InvertibleVertexMap> {
    let mut out = Vec::new();
    enumerate_monomorphisms(dom, codom, LabelEquality, AlwaysTrue, collect_into(&mut out));
    out
}

fn isomorphisms(dom: &Colored, codom: &Colored) -> Vec<InvertibleVertexMap> {
    let mut out = Vec::new();
    enumerate_isomorphisms(dom, codom, LabelEquality, AlwaysTrue, collect_into(&mut out));
    out
}

fn is_identity(m: &InvertibleVertexMap) -> bool {
    m.pairs().all(|(u, v)| u == v)
}

fn monomorphisms_are_sound(dom: &Colored, codom: &Colored) -> bool {
    monomorphisms(dom, codom).iter().all(|m| {
        m.is_total()
            && is_injective(m, dom, codom)
            && preserves_edges(m, dom, codom)
            && dom
                .vertices()
                .all(|u| m.get(dom, codom, u).is_some_and(|v| dom.vertex_label(u) == codom.vertex_label(v)))
    })
}

/// The engine reports exactly the maps an exhaustive search over all
/// injective assignments accepts, each once.
fn agrees_with_brute_force(dom: &Colored, codom: &Colored, iso: bool) -> bool {
    let found = if iso { isomorphisms(dom, codom) } else { monomorphisms(dom, codom) };
    let reported: HashSet<Vec<VertexIdx>> =
        found.iter().map(|m| images_of(m, dom, codom)).collect();
    reported.len() == found.len() && reported == brute_force_morphisms(dom, codom, iso)
}

quickcheck! {
    fn prop_monomorphisms_are_complete(dom: SmallGraph<4>, codom: SmallGraph<5>) -> bool {
        setup_test_logging();
        agrees_with_brute_force(&dom.0, &codom.0, false)
    }

    fn prop_directed_monomorphisms_are_complete(dom: SmallDigraph<4>, codom: SmallDigraph<5>) -> bool {
        agrees_with_brute_force(&dom.0, &codom.0, false)
    }

    fn prop_isomorphisms_are_complete(a: SmallGraph<5>, b: SmallGraph<5>) -> bool {
        agrees_with_brute_force(&a.0, &b.0, true)
    }

    fn prop_isomorphisms_of_a_relabelled_copy_are_complete(g: SmallDigraph<5>, keys: Vec<u32>) -> bool {
        let g = g.0;
        let h = permuted(&g, &permutation(g.vertex_count(), &keys));
        let complete = agrees_with_brute_force(&g, &h, true);
        complete
    }

    fn prop_monomorphisms_are_sound(dom: SmallGraph<4>, codom: SmallGraph<6>) -> bool {
        setup_test_logging();
        monomorphisms_are_sound(&dom.0, &codom.0)
    }

    fn prop_directed_monomorphisms_are_sound(dom: SmallDigraph<4>, codom: SmallDigraph<6>) -> bool {
        setup_test_logging();
        monomorphisms_are_sound(&dom.0, &codom.0)
    }

    fn prop_isomorphisms_of_a_relabelled_copy(g: SmallDigraph<5>, keys: Vec<u32>) -> bool {
        setup_test_logging();
        let g = g.0;
        let h = permuted(&g, &permutation(g.vertex_count(), &keys));
        let found = isomorphisms(&g, &h);

        // Isomorphic graphs have exactly |Aut(g)| isomorphisms between them.
        !found.is_empty()
            && found.len() == count_automorphisms(&g, LabelEquality, AlwaysTrue)
            && found.iter().all(|m| {
                m.is_total() && is_injective(m, &g, &h) && reflects_edges(m, &g, &h)
            })
    }

    fn prop_identity_is_reported(g: SmallGraph<5>) -> bool {
        let g = g.0;
        monomorphisms(&g, &g).iter().any(is_identity) && isomorphisms(&g, &g).iter().any(is_identity)
    }

    fn prop_identity_is_reported_directed(g: SmallDigraph<5>) -> bool {
        let g = g.0;
        monomorphisms(&g, &g).iter().any(is_identity) && isomorphisms(&g, &g).iter().any(is_identity)
    }

    fn prop_limit_is_respected(dom: SmallGraph<3>, codom: SmallGraph<5>, k: u8) -> bool {
        let k = usize::from(k % 8);
        let total = monomorphisms(&dom.0, &codom.0).len();

        let mut out = Vec::new();
        let outcome = enumerate_monomorphisms(
            &dom.0,
            &codom.0,
            LabelEquality,
            AlwaysTrue,
            limit(k, collect_into(&mut out)),
        );
        // The k-th delivery cancels, even when it happens to be the last match.
        out.len() == k.min(total) && outcome.cancelled == (total > 0 && total >= k)
    }

    fn prop_count_up_to_is_capped(dom: SmallGraph<3>, codom: SmallGraph<5>, k: u8) -> bool {
        let k = usize::from(k % 8);
        let total = monomorphisms(&dom.0, &codom.0).len();
        count_up_to(&dom.0, &codom.0, MorphismKind::Monomorphism, LabelEquality, AlwaysTrue, k)
            == k.min(total)
    }

    fn prop_state_is_clean_after_any_run(dom: SmallGraph<3>, codom: SmallGraph<5>, k: u8) -> bool {
        let mut out = Vec::new();
        let mut search =
            MorphismSearch::new(&dom.0, &codom.0, MorphismKind::Monomorphism, LabelEquality, AlwaysTrue);
        search.run(limit(usize::from(k % 4), collect_into(&mut out)));
        search.state().is_idle() && search.state().vertex_map().is_empty()
    }

    fn prop_vertex_order_keeps_the_match_set(dom: SmallDigraph<4>, codom: SmallDigraph<5>) -> bool {
        let run = |order| {
            let mut out = Vec::new();
            MorphismSearch::new(&dom.0, &codom.0, MorphismKind::Monomorphism, LabelEquality, AlwaysTrue)
                .with_vertex_order(order)
                .run(collect_into(&mut out));
            out.into_iter().collect::<HashSet<_>>()
        };
        run(VertexOrder::Native) == run(VertexOrder::ByMultiplicity)
    }
}

#[test]
fn path_into_star_goes_through_the_centre() {
    setup_test_logging();
    let path = generators::path(3);
    let star = generators::star(3);
    let mut out = Vec::new();
    enumerate_monomorphisms(&path, &star, AlwaysTrue, AlwaysTrue, collect_into(&mut out));

    // Ordered pairs of distinct leaves for the path ends.
    assert_eq!(out.len(), 6);
    let centres: HashSet<_> = out
        .iter()
        .map(|m| m.get(&path, &star, VertexIdx::new(1)))
        .collect();
    assert_eq!(centres, HashSet::from([Some(VertexIdx::new(0))]));

    let end_images: HashSet<_> = out
        .iter()
        .map(|m| (m.get(&path, &star, VertexIdx::new(0)), m.get(&path, &star, VertexIdx::new(2))))
        .collect();
    assert_eq!(end_images.len(), 6);
}

#[rstest]
#[case::triangle(generators::cycle(3), 6)]
#[case::pentagon(generators::cycle(5), 10)]
#[case::k5(generators::complete(5), 120)]
fn automorphism_counts(#[case] g: LabelledGraph<(), ()>, #[case] expected: usize) {
    setup_test_logging();
    let mut out = Vec::new();
    let outcome = enumerate_isomorphisms(&g, &g, AlwaysTrue, AlwaysTrue, collect_into(&mut out));
    assert_eq!(outcome.matches, expected);
    assert_eq!(out.iter().collect::<HashSet<_>>().len(), expected);
}

type Molecule = LabelledGraph<&'static str, u8>;

lazy_static! {
    static ref ACETIC_ACID: Molecule = acetic_acid();
    static ref CARBOXYL: Molecule = carboxyl();
}

/// Acetic acid, CH3-C(=O)-OH, heavy atoms and the acidic hydrogen only.
fn acetic_acid() -> Molecule {
    let mut g = LabelledGraph::new_undirected();
    let c1 = g.add_vertex("C");
    let c2 = g.add_vertex("C");
    let o1 = g.add_vertex("O");
    let o2 = g.add_vertex("O");
    let h = g.add_vertex("H");
    g.add_edge(c1, c2, 1).unwrap();
    g.add_edge(c2, o1, 2).unwrap();
    g.add_edge(c2, o2, 1).unwrap();
    g.add_edge(o2, h, 1).unwrap();
    g
}

/// Carboxyl pattern C(=O)O.
fn carboxyl() -> Molecule {
    let mut g = LabelledGraph::new_undirected();
    let c = g.add_vertex("C");
    let o1 = g.add_vertex("O");
    let o2 = g.add_vertex("O");
    g.add_edge(c, o1, 2).unwrap();
    g.add_edge(c, o2, 1).unwrap();
    g
}

#[rstest]
#[case::elements_only(false, 2)]
#[case::elements_and_bonds(true, 1)]
fn carboxyl_group_in_acetic_acid(#[case] check_bonds: bool, #[case] expected: usize) {
    setup_test_logging();
    let (pattern, host): (&Molecule, &Molecule) = (&*CARBOXYL, &*ACETIC_ACID);
    let mut out = Vec::new();
    let outcome = if check_bonds {
        enumerate_monomorphisms(pattern, host, LabelEquality, LabelEquality, collect_into(&mut out))
    } else {
        enumerate_monomorphisms(pattern, host, LabelEquality, AlwaysTrue, collect_into(&mut out))
    };
    assert_eq!(outcome.matches, expected);
    for m in &out {
        assert_eq!(m.get(pattern, host, VertexIdx::new(0)), Some(VertexIdx::new(1)));
    }
}

#[test]
fn rule_side_does_not_fit_a_smaller_host() {
    setup_test_logging();
    let (pattern, host): (&Molecule, &Molecule) = (&*ACETIC_ACID, &*CARBOXYL);
    let mut out = Vec::new();
    let outcome =
        enumerate_monomorphisms(pattern, host, LabelEquality, LabelEquality, collect_into(&mut out));
    assert_eq!(outcome.matches, 0);
    assert!(!outcome.cancelled);
    assert!(out.is_empty());
}
