//! Configuration for the morphism search facade.
//!
//! The enumeration entry points take their predicates and callbacks
//! explicitly; `Config` only drives the convenience layer that picks the
//! driver, the vertex order and the callback decorators (limit, deadline,
//! unique/maximum filtering) for a caller.
//!
//! ```
//! use morph_common::{Config, MorphismKind, SubgraphSelection};
//!
//! let cfg = Config::builder()
//!     .morphism(MorphismKind::Isomorphism)
//!     .max_matches(Some(1))
//!     .subgraphs(SubgraphSelection::MaximumUnique)
//!     .build();
//! assert_eq!(cfg.max_matches, Some(1));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which structure-preserving maps the morphism driver enumerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MorphismKind {
    /// Injective, edge-preserving maps. The codomain may have extra edges.
    #[default]
    Monomorphism,
    /// Monomorphisms where non-edges also map to non-edges, between graphs of
    /// equal size.
    Isomorphism,
}

/// Order in which the morphism driver fixes domain vertices.
///
/// Affects the order in which matches are reported and the size of the
/// explored search tree, never the set of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexOrder {
    /// The graph's own vertex order.
    #[default]
    Native,
    /// Rare (in-degree, out-degree) classes first, ties by total degree.
    ByMultiplicity,
}

/// Which common subgraphs reach the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubgraphSelection {
    /// Every extension step, as discovered.
    #[default]
    All,
    /// Each distinct vertex map once, as discovered.
    Unique,
    /// Only the largest maps, reported after the search space is exhausted.
    Maximum,
    /// Only the largest maps, each once.
    MaximumUnique,
}

/// Global search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    /// Monomorphism or isomorphism.
    pub morphism: MorphismKind,
    /// Domain vertex order for the morphism driver.
    pub vertex_order: VertexOrder,
    /// Stop after this many reported matches.
    pub max_matches: Option<usize>,
    /// Stop reporting (and cancel the search) once this much time has passed.
    pub time_limit: Option<Duration>,
    /// Require common subgraphs to be connected.
    pub only_connected: bool,
    /// Post-filtering of common subgraphs.
    pub subgraphs: SubgraphSelection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            morphism: MorphismKind::default(),
            vertex_order: VertexOrder::default(),
            max_matches: None,
            time_limit: None,
            only_connected: true,
            subgraphs: SubgraphSelection::default(),
        }
    }
}

impl Config {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Select monomorphism or isomorphism search.
    #[must_use]
    pub const fn morphism(mut self, morphism: MorphismKind) -> Self {
        self.config.morphism = morphism;
        self
    }

    /// Select the domain vertex order.
    #[must_use]
    pub const fn vertex_order(mut self, order: VertexOrder) -> Self {
        self.config.vertex_order = order;
        self
    }

    /// Limit the number of reported matches.
    #[must_use]
    pub const fn max_matches(mut self, max: Option<usize>) -> Self {
        self.config.max_matches = max;
        self
    }

    /// Limit the wall-clock time spent reporting matches.
    #[must_use]
    pub const fn time_limit(mut self, limit: Option<Duration>) -> Self {
        self.config.time_limit = limit;
        self
    }

    /// Require connected common subgraphs.
    #[must_use]
    pub const fn only_connected(mut self, only_connected: bool) -> Self {
        self.config.only_connected = only_connected;
        self
    }

    /// Select which common subgraphs are reported.
    #[must_use]
    pub const fn subgraphs(mut self, selection: SubgraphSelection) -> Self {
        self.config.subgraphs = selection;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
