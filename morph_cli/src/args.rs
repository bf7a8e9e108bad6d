use std::time::Duration;

use clap::Parser;
use morph_common::graph::generators;
use morph_common::*;

/// Morph - enumerate graph morphisms between generated graphs
#[derive(Parser, Debug)]
#[command(name = "morph")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// What to enumerate
    #[arg(long, value_enum, default_value = "monomorphisms")]
    pub mode: ModeArg,

    /// Graph family of the pattern (domain)
    #[arg(short = 'p', long, value_enum, default_value = "path")]
    pub pattern: FamilyArg,
    /// Size parameter of the pattern (vertices, or leaves for a star)
    #[arg(long, default_value_t = 3)]
    pub pattern_size: usize,

    /// Graph family of the host (codomain)
    #[arg(short = 'H', long, value_enum, default_value = "complete")]
    pub host: FamilyArg,
    /// Size parameter of the host (vertices, or leaves for a star)
    #[arg(long, default_value_t = 4)]
    pub host_size: usize,

    /// Domain vertex order for the morphism search
    #[arg(long, value_enum, default_value = "native")]
    pub order: OrderArg,
    /// Which common subgraphs to report
    #[arg(long, value_enum, default_value = "all")]
    pub subgraphs: SelectionArg,
    /// Allow disconnected common subgraphs
    #[arg(long, default_value_t = false)]
    pub unconnected: bool,

    /// Stop after this many matches
    #[arg(short = 'n', long)]
    pub max_matches: Option<usize>,
    /// Stop reporting after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Print every match as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        let morphism = match self.mode {
            ModeArg::Isomorphisms => MorphismKind::Isomorphism,
            _ => MorphismKind::Monomorphism,
        };
        Config::builder()
            .morphism(morphism)
            .vertex_order(self.order.clone().into())
            .subgraphs(self.subgraphs.clone().into())
            .only_connected(!self.unconnected)
            .max_matches(self.max_matches)
            .time_limit(self.time_limit_ms.map(Duration::from_millis))
            .build()
    }

    /// Build the pattern graph
    pub fn pattern_graph(&self) -> LabelledGraph<(), ()> {
        self.pattern.build(self.pattern_size)
    }

    /// Build the host graph
    pub fn host_graph(&self) -> LabelledGraph<(), ()> {
        self.host.build(self.host_size)
    }
}

/// What the binary enumerates
#[derive(Debug, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Pattern embeddings into the host
    #[value(name = "monomorphisms")]
    Monomorphisms,
    /// Bijections between pattern and host
    #[value(name = "isomorphisms")]
    Isomorphisms,
    /// Common subgraphs of pattern and host
    #[value(name = "common")]
    Common,
    /// Automorphism group order of the pattern
    #[value(name = "automorphisms")]
    Automorphisms,
}

/// Generated graph families
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum FamilyArg {
    /// v0 - v1 - ... - v(n-1)
    #[value(name = "path")]
    Path,
    /// Closed path
    #[value(name = "cycle")]
    Cycle,
    /// One centre, n leaves
    #[value(name = "star")]
    Star,
    /// Every pair connected
    #[value(name = "complete")]
    Complete,
}

impl FamilyArg {
    fn build(&self, size: usize) -> LabelledGraph<(), ()> {
        match self {
            Self::Path => generators::path(size),
            Self::Cycle => generators::cycle(size),
            Self::Star => generators::star(size),
            Self::Complete => generators::complete(size),
        }
    }
}

/// Command-line argument wrapper for VertexOrder
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OrderArg {
    /// Graph order
    #[value(name = "native")]
    Native,
    /// Rare degree classes first
    #[value(name = "by-multiplicity")]
    ByMultiplicity,
}

impl From<OrderArg> for VertexOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Native => VertexOrder::Native,
            OrderArg::ByMultiplicity => VertexOrder::ByMultiplicity,
        }
    }
}

/// Command-line argument wrapper for SubgraphSelection
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum SelectionArg {
    /// Every extension step
    #[value(name = "all")]
    All,
    /// Each distinct map once
    #[value(name = "unique")]
    Unique,
    /// Largest maps only
    #[value(name = "maximum")]
    Maximum,
    /// Largest maps, each once
    #[value(name = "maximum-unique")]
    MaximumUnique,
}

impl From<SelectionArg> for SubgraphSelection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::All => SubgraphSelection::All,
            SelectionArg::Unique => SubgraphSelection::Unique,
            SelectionArg::Maximum => SubgraphSelection::Maximum,
            SelectionArg::MaximumUnique => SubgraphSelection::MaximumUnique,
        }
    }
}
