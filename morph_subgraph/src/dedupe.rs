//! Post-filters for the common-subgraph driver.
//!
//! In connected mode the driver reaches the same vertex map through several
//! push orders, and it reports every prefix. [`UniqueVertexMaps`] drops
//! repeats online; [`MaximumSubgraphs`] keeps only the largest maps and hands
//! them over once the search is done.

use std::collections::HashSet;

use tracing::trace;

use crate::callback::MatchCallback;
use crate::search::SearchOutcome;
use crate::vertex_map::InvertibleVertexMap;

/// Forwards each distinct vertex map once, as it is first seen.
#[derive(Debug)]
pub struct UniqueVertexMaps<C> {
    seen: HashSet<InvertibleVertexMap>,
    inner: C,
}

impl<C> UniqueVertexMaps<C> {
    /// Wraps `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            seen: HashSet::new(),
            inner,
        }
    }

    /// Number of distinct maps seen so far.
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }
}

impl<GD, GC, C: MatchCallback<GD, GC>> MatchCallback<GD, GC> for UniqueVertexMaps<C> {
    fn on_match(&mut self, map: InvertibleVertexMap, g_dom: &GD, g_codom: &GC) -> bool {
        if self.seen.contains(&map) {
            return true;
        }
        self.seen.insert(map.clone());
        self.inner.on_match(map, g_dom, g_codom)
    }
}

/// Cache of the largest vertex maps offered so far.
///
/// All cached maps have the same pre-image size. A larger map evicts the
/// whole cache; a smaller one is ignored.
#[derive(Clone, Debug, Default)]
pub struct MaximumSubgraphs {
    unique: bool,
    cache: Vec<InvertibleVertexMap>,
}

impl MaximumSubgraphs {
    /// Keeps every maximum map, including repeats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps each maximum map once.
    #[must_use]
    pub fn unique() -> Self {
        Self {
            unique: true,
            cache: Vec::new(),
        }
    }

    /// Size of the cached maps, or `None` if nothing was offered yet.
    pub fn size(&self) -> Option<usize> {
        self.cache.first().map(InvertibleVertexMap::pre_image_size)
    }

    /// The cached maps.
    pub fn maps(&self) -> &[InvertibleVertexMap] {
        &self.cache
    }

    /// Offers one map to the cache.
    pub fn offer(&mut self, map: InvertibleVertexMap) {
        let size = map.pre_image_size();
        match self.size() {
            Some(best) if size < best => return,
            Some(best) if size > best => {
                trace!("MaximumSubgraphs: new best size {size}, evicting {}", self.cache.len());
                self.cache.clear();
            }
            _ => {}
        }
        if self.unique && self.cache.contains(&map) {
            return;
        }
        self.cache.push(map);
    }

    /// A callback that offers every match to this cache and never cancels.
    pub fn recorder<GD, GC>(&mut self) -> impl FnMut(InvertibleVertexMap, &GD, &GC) -> bool + '_ {
        move |map: InvertibleVertexMap, _: &GD, _: &GC| {
            self.offer(map);
            true
        }
    }

    /// Hands the cached maps to `callback`, stopping if it cancels.
    pub fn finish<GD, GC, C>(self, g_dom: &GD, g_codom: &GC, mut callback: C) -> SearchOutcome
    where
        C: MatchCallback<GD, GC>,
    {
        let mut outcome = SearchOutcome::EMPTY;
        for map in self.cache {
            outcome.matches += 1;
            if !callback.on_match(map, g_dom, g_codom) {
                outcome.cancelled = true;
                break;
            }
        }
        outcome
    }
}
