//! Make/unmake of domain–codomain vertex pairs under injectivity.
//!
//! The pair stack has three sections, bottom to top:
//!
//! 1. force-pushed pairs, placed by the caller without any check,
//! 2. pre-pushed pairs, placed by the caller through the feasibility check,
//! 3. dynamic pairs, placed and removed by a search driver.
//!
//! Drivers only ever touch the third section, so the first two are part of
//! every match they report.

use contracts::*;
use morph_common::{MorphismGraph, VertexIdx};
use tracing::trace;

use crate::vertex_map::{
    InvertibleVertexMap, InvertibleVertexMapping, VertexMapping, WritableVertexMapping,
};

/// Structural feasibility hook consulted by [`EnumerationState::try_push`].
///
/// Called only for pairs whose vertices are both still unmapped. `map` is the
/// assignment before the pair is added.
pub trait PushCheck<GD, GC> {
    /// Returns true if `(u, v)` may extend `map`.
    fn admits(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        map: &InvertibleVertexMap,
        u: VertexIdx,
        v: VertexIdx,
    ) -> bool;
}

impl<GD, GC, F> PushCheck<GD, GC> for F
where
    F: Fn(&GD, &GC, &InvertibleVertexMap, VertexIdx, VertexIdx) -> bool,
{
    fn admits(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        map: &InvertibleVertexMap,
        u: VertexIdx,
        v: VertexIdx,
    ) -> bool {
        self(g_dom, g_codom, map, u, v)
    }
}

/// Accepts every pair. Only injectivity is enforced.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconstrained;

impl<GD, GC> PushCheck<GD, GC> for Unconstrained {
    fn admits(&self, _: &GD, _: &GC, _: &InvertibleVertexMap, _: VertexIdx, _: VertexIdx) -> bool {
        true
    }
}

/// Partial injective assignment plus the stack of pairs that built it.
#[derive(Debug)]
pub struct EnumerationState<'g, GD, GC, C> {
    g_dom: &'g GD,
    g_codom: &'g GC,
    check: C,
    map: InvertibleVertexMap,
    stack: Vec<(VertexIdx, VertexIdx)>,
    /// End of the force-pushed section.
    unchecked_end: usize,
    /// End of the pre-pushed section.
    checked_end: usize,
}

impl<'g, GD, GC, C> EnumerationState<'g, GD, GC, C>
where
    GD: MorphismGraph,
    GC: MorphismGraph,
    C: PushCheck<GD, GC>,
{
    /// An idle state over the two graphs.
    #[debug_ensures(ret.is_idle())]
    pub fn new(g_dom: &'g GD, g_codom: &'g GC, check: C) -> Self {
        Self {
            g_dom,
            g_codom,
            check,
            map: InvertibleVertexMap::new(g_dom, g_codom),
            stack: Vec::new(),
            unchecked_end: 0,
            checked_end: 0,
        }
    }

    /// Domain graph.
    pub const fn g_dom(&self) -> &'g GD {
        self.g_dom
    }

    /// Codomain graph.
    pub const fn g_codom(&self) -> &'g GC {
        self.g_codom
    }

    /// The feasibility hook.
    pub const fn check(&self) -> &C {
        &self.check
    }

    /// The live assignment. Never hand this to a callback; use
    /// [`Self::sized_vertex_map`].
    pub const fn vertex_map(&self) -> &InvertibleVertexMap {
        &self.map
    }

    /// Image of a domain vertex.
    pub fn right_from_left(&self, u: VertexIdx) -> Option<VertexIdx> {
        self.map.get(self.g_dom, self.g_codom, u)
    }

    /// Pre-image of a codomain vertex.
    pub fn left_from_right(&self, v: VertexIdx) -> Option<VertexIdx> {
        self.map.get_inverse(self.g_dom, self.g_codom, v)
    }

    /// Number of pairs on the whole stack.
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Number of force-pushed pairs.
    pub const fn pre_forced_size(&self) -> usize {
        self.unchecked_end
    }

    /// Number of force-pushed plus pre-pushed pairs.
    pub const fn pre_size(&self) -> usize {
        self.checked_end
    }

    /// Pairs in push order.
    pub fn pairs(&self) -> &[(VertexIdx, VertexIdx)] {
        &self.stack
    }

    /// Returns true if nothing at all is mapped.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty() && self.map.is_empty()
    }

    /// Returns true if the driver-owned section is empty.
    pub fn is_at_base(&self) -> bool {
        self.stack.len() == self.checked_end
    }

    /// Independent copy of the current assignment, tagged with its size.
    #[debug_ensures(ret.pre_image_size() == self.stack.len())]
    pub fn sized_vertex_map(&self) -> InvertibleVertexMap {
        InvertibleVertexMap::from_map(&self.map, self.g_dom, self.g_codom)
    }

    /// Checks that the stack and the assignment describe the same pairs.
    pub fn is_consistent(&self) -> bool {
        self.unchecked_end <= self.checked_end
            && self.checked_end <= self.stack.len()
            && self.map.pre_image_size() == self.stack.len()
            && self
                .stack
                .iter()
                .all(|&(u, v)| self.right_from_left(u) == Some(v))
    }

    /// Attempts to map `u` to `v`.
    ///
    /// Fails without touching anything if either vertex is already mapped or
    /// the feasibility hook rejects the pair.
    #[debug_ensures(self.is_consistent())]
    #[debug_ensures(ret -> self.stack.len() == old(self.stack.len()) + 1)]
    #[debug_ensures(!ret -> self.stack.len() == old(self.stack.len()))]
    pub fn try_push(&mut self, u: VertexIdx, v: VertexIdx) -> bool {
        if self.right_from_left(u).is_some() || self.left_from_right(v).is_some() {
            trace!("try_push({u}, {v}): already mapped");
            return false;
        }
        if !self.check.admits(self.g_dom, self.g_codom, &self.map, u, v) {
            trace!("try_push({u}, {v}): infeasible");
            return false;
        }
        self.push_unchecked(u, v);
        trace!("try_push({u}, {v}): depth {}", self.stack.len());
        true
    }

    /// Removes the most recent driver-owned pair and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the driver-owned section of the stack is empty.
    #[debug_requires(self.stack.len() > self.checked_end, "pop below the pre-pushed pairs")]
    #[debug_ensures(self.is_consistent())]
    pub fn pop(&mut self) -> (VertexIdx, VertexIdx) {
        let pair = self.pop_unchecked();
        trace!("pop({}, {})", pair.0, pair.1);
        pair
    }

    /// Maps `u` to `v` without consulting the feasibility hook.
    ///
    /// Only legal before any pre-push and outside enumeration.
    #[debug_requires(self.unchecked_end == self.checked_end, "force push after pre_try_push")]
    #[debug_requires(self.stack.len() == self.unchecked_end, "force push during enumeration")]
    #[debug_requires(self.right_from_left(u).is_none() && self.left_from_right(v).is_none())]
    #[debug_ensures(self.is_consistent())]
    pub fn pre_force_push(&mut self, u: VertexIdx, v: VertexIdx) {
        self.push_unchecked(u, v);
        self.unchecked_end += 1;
        self.checked_end += 1;
    }

    /// Undoes the last [`Self::pre_force_push`].
    #[debug_requires(self.stack.len() == self.unchecked_end, "force pop during enumeration")]
    #[debug_requires(self.unchecked_end == self.checked_end, "force pop above pre-pushed pairs")]
    #[debug_requires(self.unchecked_end > 0, "nothing was force pushed")]
    #[debug_ensures(self.is_consistent())]
    pub fn pre_force_pop(&mut self) -> (VertexIdx, VertexIdx) {
        self.unchecked_end -= 1;
        self.checked_end -= 1;
        self.pop_unchecked()
    }

    /// Like [`Self::try_push`], but the pair becomes a fixed part of every
    /// later match. Only legal outside enumeration.
    #[debug_requires(self.stack.len() == self.checked_end, "pre push during enumeration")]
    #[debug_ensures(self.is_consistent())]
    pub fn pre_try_push(&mut self, u: VertexIdx, v: VertexIdx) -> bool {
        let pushed = self.try_push(u, v);
        if pushed {
            self.checked_end += 1;
        }
        pushed
    }

    /// Undoes the last successful [`Self::pre_try_push`].
    #[debug_requires(self.stack.len() == self.checked_end, "pre pop during enumeration")]
    #[debug_requires(self.checked_end > self.unchecked_end, "nothing was pre pushed")]
    #[debug_ensures(self.is_consistent())]
    pub fn pre_pop(&mut self) -> (VertexIdx, VertexIdx) {
        self.checked_end -= 1;
        self.pop_unchecked()
    }

    fn push_unchecked(&mut self, u: VertexIdx, v: VertexIdx) {
        self.map.put(self.g_dom, self.g_codom, u, Some(v));
        self.stack.push((u, v));
    }

    fn pop_unchecked(&mut self) -> (VertexIdx, VertexIdx) {
        let Some((u, v)) = self.stack.pop() else {
            unreachable!("pop on an empty enumeration stack");
        };
        self.map.put(self.g_dom, self.g_codom, u, None);
        (u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_common::LabelledGraph;
    use morph_common::graph::generators;

    type G = LabelledGraph<(), ()>;

    fn v(i: u32) -> VertexIdx {
        VertexIdx::new(i)
    }

    #[test]
    fn push_pop_restores_the_map() {
        let dom = generators::path(3);
        let codom = generators::path(3);
        let mut st = EnumerationState::new(&dom, &codom, Unconstrained);

        assert!(st.try_push(v(0), v(2)));
        assert!(st.try_push(v(1), v(1)));
        assert_eq!(st.stack_size(), 2);
        assert_eq!(st.right_from_left(v(0)), Some(v(2)));
        assert_eq!(st.left_from_right(v(1)), Some(v(1)));

        assert_eq!(st.pop(), (v(1), v(1)));
        assert_eq!(st.right_from_left(v(1)), None);
        assert_eq!(st.pop(), (v(0), v(2)));
        assert!(st.is_idle());
    }

    #[test]
    fn injectivity_is_enforced() {
        let dom = generators::path(3);
        let codom = generators::path(3);
        let mut st = EnumerationState::new(&dom, &codom, Unconstrained);

        assert!(st.try_push(v(0), v(0)));
        assert!(!st.try_push(v(0), v(1)), "domain vertex reused");
        assert!(!st.try_push(v(1), v(0)), "codomain vertex reused");
        assert_eq!(st.stack_size(), 1);
    }

    #[test]
    fn rejected_push_does_not_mutate() {
        let dom = generators::path(2);
        let codom = generators::path(2);
        let never = |_: &G, _: &G, _: &InvertibleVertexMap, _: VertexIdx, _: VertexIdx| false;
        let mut st = EnumerationState::new(&dom, &codom, never);

        assert!(!st.try_push(v(0), v(0)));
        assert!(st.is_idle());
    }

    #[test]
    fn check_sees_the_map_before_the_push() {
        let dom = generators::path(2);
        let codom = generators::path(2);
        // Only allow a push when something is already mapped, or onto v0.
        let check = |_: &G, _: &G, m: &InvertibleVertexMap, _: VertexIdx, w: VertexIdx| {
            !m.is_empty() || w == VertexIdx::new(0)
        };
        let mut st = EnumerationState::new(&dom, &codom, check);

        assert!(!st.try_push(v(0), v(1)));
        assert!(st.try_push(v(0), v(0)));
        assert!(st.try_push(v(1), v(1)));
    }

    #[test]
    fn snapshot_outlives_mutation() {
        let dom = generators::path(2);
        let codom = generators::path(2);
        let mut st = EnumerationState::new(&dom, &codom, Unconstrained);
        assert!(st.try_push(v(0), v(1)));

        let snapshot = st.sized_vertex_map();
        st.pop();

        assert_eq!(snapshot.pre_image_size(), 1);
        assert_eq!(snapshot.get(&dom, &codom, v(0)), Some(v(1)));
        assert!(st.is_idle());
    }

    #[test]
    fn pre_pushed_sections_stack_up() {
        let dom = generators::path(3);
        let codom = generators::path(3);
        let mut st = EnumerationState::new(&dom, &codom, Unconstrained);

        st.pre_force_push(v(0), v(0));
        assert!(st.pre_try_push(v(1), v(1)));
        assert_eq!(st.pre_forced_size(), 1);
        assert_eq!(st.pre_size(), 2);
        assert!(st.is_at_base());

        assert!(st.try_push(v(2), v(2)));
        assert!(!st.is_at_base());
        st.pop();

        assert_eq!(st.pre_pop(), (v(1), v(1)));
        assert_eq!(st.pre_force_pop(), (v(0), v(0)));
        assert!(st.is_idle());
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn pop_cannot_reach_pre_pushed_pairs() {
        let dom = generators::path(2);
        let codom = generators::path(2);
        let mut st = EnumerationState::new(&dom, &codom, Unconstrained);
        assert!(st.pre_try_push(v(0), v(0)));
        st.pop();
    }
}
