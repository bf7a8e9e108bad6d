//! Vertex and edge compatibility predicates.
//!
//! A predicate compares one domain element with one codomain element. It is
//! called from inside the feasibility check, so it must be pure and total.
//! Closures `Fn(a, b, &g_dom, &g_codom) -> bool` are predicates as they are.

use std::marker::PhantomData;

use morph_common::{EdgeIdx, LabelledGraph, VertexIdx};

/// Compatibility test between a domain element and a codomain element.
///
/// `T` is [`VertexIdx`] for vertex predicates and [`EdgeIdx`] for edge
/// predicates.
pub trait Predicate<GD, GC, T> {
    /// Returns true if `a` (in `g_dom`) may correspond to `b` (in `g_codom`).
    fn test(&self, a: T, b: T, g_dom: &GD, g_codom: &GC) -> bool;
}

impl<GD, GC, T, F> Predicate<GD, GC, T> for F
where
    F: Fn(T, T, &GD, &GC) -> bool,
{
    #[inline]
    fn test(&self, a: T, b: T, g_dom: &GD, g_codom: &GC) -> bool {
        self(a, b, g_dom, g_codom)
    }
}

/// The neutral predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysTrue;

impl<GD, GC, T> Predicate<GD, GC, T> for AlwaysTrue {
    #[inline]
    fn test(&self, _: T, _: T, _: &GD, _: &GC) -> bool {
        true
    }
}

/// Equality of a property evaluated on both sides.
///
/// Built by [`property_equality`].
#[derive(Clone, Copy)]
pub struct PropertyEquality<FD, FC, K> {
    prop_dom: FD,
    prop_codom: FC,
    _key: PhantomData<fn() -> K>,
}

/// Predicate comparing `prop_dom(g_dom, a) == prop_codom(g_codom, b)`.
///
/// ```
/// use morph_common::{LabelledGraph, VertexIdx};
/// use morph_subgraph::predicate::{Predicate, property_equality};
///
/// let mut g: LabelledGraph<char, ()> = LabelledGraph::new_undirected();
/// let c = g.add_vertex('C');
/// let o = g.add_vertex('O');
///
/// let element = |g: &LabelledGraph<char, ()>, v: VertexIdx| *g.vertex_label(v);
/// let same = property_equality(element, element);
/// assert!(same.test(c, c, &g, &g));
/// assert!(!same.test(c, o, &g, &g));
/// ```
pub fn property_equality<GD, GC, T, K, FD, FC>(
    prop_dom: FD,
    prop_codom: FC,
) -> PropertyEquality<FD, FC, K>
where
    FD: Fn(&GD, T) -> K,
    FC: Fn(&GC, T) -> K,
    K: PartialEq,
{
    PropertyEquality {
        prop_dom,
        prop_codom,
        _key: PhantomData,
    }
}

impl<GD, GC, T, K, FD, FC> Predicate<GD, GC, T> for PropertyEquality<FD, FC, K>
where
    FD: Fn(&GD, T) -> K,
    FC: Fn(&GC, T) -> K,
    K: PartialEq,
{
    #[inline]
    fn test(&self, a: T, b: T, g_dom: &GD, g_codom: &GC) -> bool {
        (self.prop_dom)(g_dom, a) == (self.prop_codom)(g_codom, b)
    }
}

/// A caller-supplied relation between properties of both sides.
///
/// Built by [`property_relation`].
#[derive(Clone, Copy)]
pub struct PropertyRelation<FD, FC, R, KD, KC> {
    prop_dom: FD,
    prop_codom: FC,
    relation: R,
    _keys: PhantomData<fn() -> (KD, KC)>,
}

/// Predicate testing `relation(&prop_dom(g_dom, a), &prop_codom(g_codom, b))`.
///
/// Used when plain equality is too strict, e.g. when a domain label may be a
/// wildcard or a less specific term than the codomain label.
pub fn property_relation<GD, GC, T, KD, KC, FD, FC, R>(
    prop_dom: FD,
    prop_codom: FC,
    relation: R,
) -> PropertyRelation<FD, FC, R, KD, KC>
where
    FD: Fn(&GD, T) -> KD,
    FC: Fn(&GC, T) -> KC,
    R: Fn(&KD, &KC) -> bool,
{
    PropertyRelation {
        prop_dom,
        prop_codom,
        relation,
        _keys: PhantomData,
    }
}

impl<GD, GC, T, KD, KC, FD, FC, R> Predicate<GD, GC, T> for PropertyRelation<FD, FC, R, KD, KC>
where
    FD: Fn(&GD, T) -> KD,
    FC: Fn(&GC, T) -> KC,
    R: Fn(&KD, &KC) -> bool,
{
    #[inline]
    fn test(&self, a: T, b: T, g_dom: &GD, g_codom: &GC) -> bool {
        (self.relation)(&(self.prop_dom)(g_dom, a), &(self.prop_codom)(g_codom, b))
    }
}

/// Label equality on [`LabelledGraph`]s, for vertices and edges alike.
///
/// Compares labels by reference, so labels need not be `Clone`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelEquality;

impl<VD, ED, VC, EC> Predicate<LabelledGraph<VD, ED>, LabelledGraph<VC, EC>, VertexIdx>
    for LabelEquality
where
    VD: PartialEq<VC>,
{
    #[inline]
    fn test(
        &self,
        a: VertexIdx,
        b: VertexIdx,
        g_dom: &LabelledGraph<VD, ED>,
        g_codom: &LabelledGraph<VC, EC>,
    ) -> bool {
        g_dom.vertex_label(a) == g_codom.vertex_label(b)
    }
}

impl<VD, ED, VC, EC> Predicate<LabelledGraph<VD, ED>, LabelledGraph<VC, EC>, EdgeIdx>
    for LabelEquality
where
    ED: PartialEq<EC>,
{
    #[inline]
    fn test(
        &self,
        a: EdgeIdx,
        b: EdgeIdx,
        g_dom: &LabelledGraph<VD, ED>,
        g_codom: &LabelledGraph<VC, EC>,
    ) -> bool {
        g_dom.edge_label(a) == g_codom.edge_label(b)
    }
}

/// Both predicates, left first.
#[derive(Clone, Copy, Debug, Default)]
pub struct And<A, B>(pub A, pub B);

impl<GD, GC, T, A, B> Predicate<GD, GC, T> for And<A, B>
where
    T: Copy,
    A: Predicate<GD, GC, T>,
    B: Predicate<GD, GC, T>,
{
    #[inline]
    fn test(&self, a: T, b: T, g_dom: &GD, g_codom: &GC) -> bool {
        self.0.test(a, b, g_dom, g_codom) && self.1.test(a, b, g_dom, g_codom)
    }
}

/// A runtime list of predicates, ANDed left to right with short-circuit.
///
/// An empty chain accepts everything.
pub struct AllOf<'a, GD, GC, T> {
    preds: Vec<Box<dyn Predicate<GD, GC, T> + 'a>>,
}

impl<'a, GD, GC, T> AllOf<'a, GD, GC, T> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { preds: Vec::new() }
    }

    /// Appends a predicate to the end of the chain.
    #[must_use]
    pub fn with(mut self, pred: impl Predicate<GD, GC, T> + 'a) -> Self {
        self.preds.push(Box::new(pred));
        self
    }

    /// Number of chained predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.preds.len()
    }

    /// Returns true if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preds.is_empty()
    }
}

impl<GD, GC, T> Default for AllOf<'_, GD, GC, T> {
    fn default() -> Self {
        Self { preds: Vec::new() }
    }
}

impl<GD, GC, T: Copy> Predicate<GD, GC, T> for AllOf<'_, GD, GC, T> {
    fn test(&self, a: T, b: T, g_dom: &GD, g_codom: &GC) -> bool {
        self.preds.iter().all(|p| p.test(a, b, g_dom, g_codom))
    }
}
