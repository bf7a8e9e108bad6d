//! Partial maps between the vertex sets of two graphs.
//!
//! Both representations are dense arrays indexed through the graphs' own
//! [`MorphismGraph::vertex_index`], so every lookup and update is O(1). The
//! maps do not enforce injectivity on their own; the enumeration state does.

use contracts::*;
use morph_common::{MorphismGraph, VertexIdx};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read access to a partial map from domain vertices to codomain vertices.
pub trait VertexMapping {
    /// Image of `v`, or `None` if `v` is unmapped.
    fn get<GD: MorphismGraph, GC: MorphismGraph>(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        v: VertexIdx,
    ) -> Option<VertexIdx>;
}

/// A vertex map that can also answer pre-image queries.
pub trait InvertibleVertexMapping: VertexMapping {
    /// Pre-image of `w`, or `None` if nothing maps to `w`.
    fn get_inverse<GD: MorphismGraph, GC: MorphismGraph>(
        &self,
        g_dom: &GD,
        g_codom: &GC,
        w: VertexIdx,
    ) -> Option<VertexIdx>;
}

/// A vertex map that can be updated in place.
pub trait WritableVertexMapping: VertexMapping {
    /// Set the image of `v` to `w`, or unmap `v` when `w` is `None`.
    fn put<GD: MorphismGraph, GC: MorphismGraph>(
        &mut self,
        g_dom: &GD,
        g_codom: &GC,
        v: VertexIdx,
        w: Option<VertexIdx>,
    );
}

/// Non-invertible vertex map: one slot per domain vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorVertexMap {
    forward: Vec<Option<VertexIdx>>,
}

impl VectorVertexMap {
    /// An empty map sized for `g_dom`.
    #[must_use]
    pub fn new<GD: MorphismGraph, GC: MorphismGraph>(g_dom: &GD, _g_codom: &GC) -> Self {
        Self {
            forward: vec![None; g_dom.vertex_count()],
        }
    }

    /// Number of domain slots.
    #[must_use]
    pub fn domain_len(&self) -> usize {
        self.forward.len()
    }

    /// Number of mapped domain vertices.
    #[must_use]
    pub fn pre_image_size(&self) -> usize {
        self.forward.iter().filter(|w| w.is_some()).count()
    }
}

impl VertexMapping for VectorVertexMap {
    fn get<GD: MorphismGraph, GC: MorphismGraph>(
        &self,
        g_dom: &GD,
        _g_codom: &GC,
        v: VertexIdx,
    ) -> Option<VertexIdx> {
        let idx = g_dom.vertex_index(v);
        debug_assert!(idx < self.forward.len(), "{v} is not a domain vertex");
        self.forward[idx]
    }
}

impl WritableVertexMapping for VectorVertexMap {
    fn put<GD: MorphismGraph, GC: MorphismGraph>(
        &mut self,
        g_dom: &GD,
        g_codom: &GC,
        v: VertexIdx,
        w: Option<VertexIdx>,
    ) {
        let idx = g_dom.vertex_index(v);
        debug_assert!(idx < self.forward.len(), "{v} is not a domain vertex");
        debug_assert!(
            w.is_none_or(|w| g_codom.vertex_index(w) < g_codom.vertex_count()),
            "image is not a codomain vertex"
        );
        self.forward[idx] = w;
    }
}

impl From<InvertibleVertexMap> for VectorVertexMap {
    fn from(m: InvertibleVertexMap) -> Self {
        Self { forward: m.forward }
    }
}

/// Bidirectional vertex map.
///
/// `forward[v] = Some(w)` holds exactly when `backward[w] = Some(v)`. The
/// single mutator [`WritableVertexMapping::put`] keeps both arrays in step.
/// This is the snapshot type handed to match callbacks. Deserialising checks
/// the same invariant and rejects maps that break it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "InvertibleVertexMapParts")]
pub struct InvertibleVertexMap {
    forward: Vec<Option<VertexIdx>>,
    backward: Vec<Option<VertexIdx>>,
    /// Number of mapped domain vertices.
    size: usize,
}

/// Serialised form of [`InvertibleVertexMap`], before validation.
#[derive(Deserialize)]
struct InvertibleVertexMapParts {
    forward: Vec<Option<VertexIdx>>,
    backward: Vec<Option<VertexIdx>>,
    size: usize,
}

/// A deserialised vertex map whose halves or size disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inconsistent vertex map: {mapped} mapped domain vertices, size {size}, forward and backward agree: {agree}")]
pub struct InconsistentVertexMap {
    /// Domain vertices with an image.
    pub mapped: usize,
    /// The recorded size.
    pub size: usize,
    /// Whether every pair reads the same in both directions.
    pub agree: bool,
}

impl TryFrom<InvertibleVertexMapParts> for InvertibleVertexMap {
    type Error = InconsistentVertexMap;

    fn try_from(parts: InvertibleVertexMapParts) -> Result<Self, Self::Error> {
        let map = Self {
            forward: parts.forward,
            backward: parts.backward,
            size: parts.size,
        };
        if map.is_consistent() {
            return Ok(map);
        }
        let mapped = map.forward.iter().filter(|w| w.is_some()).count();
        Err(InconsistentVertexMap {
            mapped,
            size: map.size,
            agree: map.halves_agree(),
        })
    }
}

impl InvertibleVertexMap {
    /// An empty map between `g_dom` and `g_codom`.
    #[must_use]
    #[debug_ensures(ret.size == 0)]
    pub fn new<GD: MorphismGraph, GC: MorphismGraph>(g_dom: &GD, g_codom: &GC) -> Self {
        Self {
            forward: vec![None; g_dom.vertex_count()],
            backward: vec![None; g_codom.vertex_count()],
            size: 0,
        }
    }

    /// Snapshot any invertible map into a fresh, independently owned one.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `m` is not consistent: some forward entry,
    /// followed back through the inverse, does not return to its origin.
    #[must_use]
    #[debug_ensures(ret.is_consistent())]
    pub fn from_map<M, GD, GC>(m: &M, g_dom: &GD, g_codom: &GC) -> Self
    where
        M: InvertibleVertexMapping,
        GD: MorphismGraph,
        GC: MorphismGraph,
    {
        let mut out = Self::new(g_dom, g_codom);
        for v_dom in g_dom.vertices() {
            let w = m.get(g_dom, g_codom, v_dom);
            out.forward[g_dom.vertex_index(v_dom)] = w;
            out.size += usize::from(w.is_some());
        }
        for v_codom in g_codom.vertices() {
            out.backward[g_codom.vertex_index(v_codom)] = m.get_inverse(g_dom, g_codom, v_codom);
        }

        for v_dom in g_dom.vertices() {
            if let Some(w) = out.get(g_dom, g_codom, v_dom) {
                debug_assert_eq!(out.get_inverse(g_dom, g_codom, w), Some(v_dom));
            }
        }
        for v_codom in g_codom.vertices() {
            if let Some(v) = out.get_inverse(g_dom, g_codom, v_codom) {
                debug_assert_eq!(out.get(g_dom, g_codom, v), Some(v_codom));
            }
        }
        out
    }

    /// Checks that the forward and backward arrays describe the same pairs
    /// and that the cached size matches.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let counted = self.forward.iter().filter(|w| w.is_some()).count();
        self.halves_agree() && counted == self.size
    }

    fn halves_agree(&self) -> bool {
        let forward_ok = self.forward.iter().enumerate().all(|(v, w)| match w {
            Some(w) => self.backward.get(w.as_usize()) == Some(&Some(VertexIdx::from(v))),
            None => true,
        });
        let backward_ok = self.backward.iter().enumerate().all(|(w, v)| match v {
            Some(v) => self.forward.get(v.as_usize()) == Some(&Some(VertexIdx::from(w))),
            None => true,
        });
        forward_ok && backward_ok
    }

    /// Number of mapped domain vertices.
    #[must_use]
    pub const fn pre_image_size(&self) -> usize {
        self.size
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns true if every domain vertex has an image.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.size == self.forward.len()
    }

    /// Number of domain slots.
    #[must_use]
    pub fn domain_len(&self) -> usize {
        self.forward.len()
    }

    /// Number of codomain slots.
    #[must_use]
    pub fn codomain_len(&self) -> usize {
        self.backward.len()
    }

    /// Mapped pairs in domain index order.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexIdx, VertexIdx)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(v, w)| w.map(|w| (VertexIdx::from(v), w)))
    }

    /// Sorted codomain vertices hit by the map.
    #[must_use]
    pub fn image_signature(&self) -> Vec<VertexIdx> {
        let mut sig: Vec<VertexIdx> = self.forward.iter().flatten().copied().collect();
        sig.sort_unstable();
        sig
    }

    fn clear_forward(&mut self, v: usize) {
        if let Some(old_w) = self.forward[v].take() {
            self.backward[old_w.as_usize()] = None;
            self.size -= 1;
        }
    }

    fn clear_backward(&mut self, w: usize) {
        if let Some(old_v) = self.backward[w].take() {
            self.forward[old_v.as_usize()] = None;
            self.size -= 1;
        }
    }
}

impl VertexMapping for InvertibleVertexMap {
    fn get<GD: MorphismGraph, GC: MorphismGraph>(
        &self,
        g_dom: &GD,
        _g_codom: &GC,
        v: VertexIdx,
    ) -> Option<VertexIdx> {
        let idx = g_dom.vertex_index(v);
        debug_assert!(idx < self.forward.len(), "{v} is not a domain vertex");
        self.forward[idx]
    }
}

impl InvertibleVertexMapping for InvertibleVertexMap {
    fn get_inverse<GD: MorphismGraph, GC: MorphismGraph>(
        &self,
        _g_dom: &GD,
        g_codom: &GC,
        w: VertexIdx,
    ) -> Option<VertexIdx> {
        let idx = g_codom.vertex_index(w);
        debug_assert!(idx < self.backward.len(), "{w} is not a codomain vertex");
        self.backward[idx]
    }
}

impl WritableVertexMapping for InvertibleVertexMap {
    #[debug_ensures(self.is_consistent())]
    #[debug_ensures(self.get(g_dom, g_codom, v) == w)]
    fn put<GD: MorphismGraph, GC: MorphismGraph>(
        &mut self,
        g_dom: &GD,
        g_codom: &GC,
        v: VertexIdx,
        w: Option<VertexIdx>,
    ) {
        let v_idx = g_dom.vertex_index(v);
        debug_assert!(v_idx < self.forward.len(), "{v} is not a domain vertex");
        self.clear_forward(v_idx);
        if let Some(w) = w {
            let w_idx = g_codom.vertex_index(w);
            debug_assert!(w_idx < self.backward.len(), "{w} is not a codomain vertex");
            self.clear_backward(w_idx);
            self.forward[v_idx] = Some(w);
            self.backward[w_idx] = Some(v);
            self.size += 1;
        }
    }
}
