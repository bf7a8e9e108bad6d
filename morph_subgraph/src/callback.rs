//! Per-match callbacks and their decorators.
//!
//! A callback receives an independently owned snapshot of every match. Its
//! return value decides whether the search continues: `false` cancels the
//! whole enumeration, not just the current branch. Decorators wrap an inner
//! callback and see matches outside-in, so `filter(p, limit(2, collect))`
//! stops after two matches that passed `p`, while `limit(2, filter(p, ..))`
//! stops after two matches of any kind.

use std::time::Instant;

use crate::vertex_map::InvertibleVertexMap;

/// Receives matches from a search driver.
pub trait MatchCallback<GD, GC> {
    /// Handles one match. Return `false` to cancel the remaining search.
    fn on_match(&mut self, map: InvertibleVertexMap, g_dom: &GD, g_codom: &GC) -> bool;
}

impl<GD, GC, F> MatchCallback<GD, GC> for F
where
    F: FnMut(InvertibleVertexMap, &GD, &GC) -> bool,
{
    #[inline]
    fn on_match(&mut self, map: InvertibleVertexMap, g_dom: &GD, g_codom: &GC) -> bool {
        self(map, g_dom, g_codom)
    }
}

/// Appends every match to a caller-owned vector. Never cancels.
#[derive(Debug)]
pub struct Collect<'a> {
    out: &'a mut Vec<InvertibleVertexMap>,
}

/// See [`Collect`].
pub fn collect_into(out: &mut Vec<InvertibleVertexMap>) -> Collect<'_> {
    Collect { out }
}

impl<GD, GC> MatchCallback<GD, GC> for Collect<'_> {
    fn on_match(&mut self, map: InvertibleVertexMap, _: &GD, _: &GC) -> bool {
        self.out.push(map);
        true
    }
}

/// Counts matches into a caller-owned counter. Never cancels.
#[derive(Debug)]
pub struct Count<'a> {
    count: &'a mut usize,
}

/// See [`Count`].
pub fn count_into(count: &mut usize) -> Count<'_> {
    Count { count }
}

impl<GD, GC> MatchCallback<GD, GC> for Count<'_> {
    fn on_match(&mut self, _: InvertibleVertexMap, _: &GD, _: &GC) -> bool {
        *self.count += 1;
        true
    }
}

/// Delivers at most `n` matches to the inner callback, then cancels.
#[derive(Debug)]
pub struct Limit<C> {
    remaining: usize,
    inner: C,
}

/// See [`Limit`].
///
/// The search is cancelled as soon as the `n`-th match has been delivered,
/// or immediately on the first match when `n == 0`. An inner `false` also
/// cancels.
pub const fn limit<C>(n: usize, inner: C) -> Limit<C> {
    Limit {
        remaining: n,
        inner,
    }
}

impl<C> Limit<C> {
    /// Matches that may still be delivered.
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Unwraps the inner callback.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<GD, GC, C: MatchCallback<GD, GC>> MatchCallback<GD, GC> for Limit<C> {
    fn on_match(&mut self, map: InvertibleVertexMap, g_dom: &GD, g_codom: &GC) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        let go_on = self.inner.on_match(map, g_dom, g_codom);
        go_on && self.remaining > 0
    }
}

/// Forwards only matches accepted by a predicate on the snapshot.
///
/// Rejected matches never cancel the search.
#[derive(Debug)]
pub struct Filter<P, C> {
    pred: P,
    inner: C,
}

/// See [`Filter`].
pub const fn filter<P, C>(pred: P, inner: C) -> Filter<P, C>
where
    P: FnMut(&InvertibleVertexMap) -> bool,
{
    Filter { pred, inner }
}

impl<GD, GC, P, C> MatchCallback<GD, GC> for Filter<P, C>
where
    P: FnMut(&InvertibleVertexMap) -> bool,
    C: MatchCallback<GD, GC>,
{
    fn on_match(&mut self, map: InvertibleVertexMap, g_dom: &GD, g_codom: &GC) -> bool {
        if (self.pred)(&map) {
            self.inner.on_match(map, g_dom, g_codom)
        } else {
            true
        }
    }
}

/// Cancels as soon as a condition stops holding, checked before each match.
#[derive(Debug)]
pub struct Guard<G, C> {
    condition: G,
    inner: C,
}

/// See [`Guard`].
pub const fn guard<G, C>(condition: G, inner: C) -> Guard<G, C>
where
    G: FnMut() -> bool,
{
    Guard { condition, inner }
}

/// A [`Guard`] that cancels once `deadline` has passed.
///
/// The engine has no clock of its own; the check happens only when a match
/// is found.
pub fn deadline<C>(at: Instant, inner: C) -> Guard<impl FnMut() -> bool, C> {
    guard(move || Instant::now() < at, inner)
}

impl<GD, GC, G, C> MatchCallback<GD, GC> for Guard<G, C>
where
    G: FnMut() -> bool,
    C: MatchCallback<GD, GC>,
{
    fn on_match(&mut self, map: InvertibleVertexMap, g_dom: &GD, g_codom: &GC) -> bool {
        if !(self.condition)() {
            tracing::debug!("guard condition failed, cancelling search");
            return false;
        }
        self.inner.on_match(map, g_dom, g_codom)
    }
}
