//! Morph CLI
//!
//! Builds a pattern and a host graph from generated families and reports the
//! morphisms, common subgraphs or automorphisms between them.

mod args;

use clap::Parser;
use morph_common::MorphismGraph;
use morph_subgraph::{AlwaysTrue, MatchSet, SubgraphMatcher, count_automorphisms};
use tracing::info;

use args::{Args, ModeArg};

/// Runs one enumeration and prints the result.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.to_config();
    let pattern = args.pattern_graph();

    if args.mode == ModeArg::Automorphisms {
        info!(
            "Counting automorphisms of {:?}({})",
            args.pattern, args.pattern_size
        );
        let count = count_automorphisms(&pattern, AlwaysTrue, AlwaysTrue);
        println!("{count}");
        return Ok(());
    }

    let host = args.host_graph();
    info!(
        "Pattern {:?}({}): {} vertices, {} edges",
        args.pattern,
        args.pattern_size,
        pattern.vertex_count(),
        pattern.edge_count()
    );
    info!(
        "Host {:?}({}): {} vertices, {} edges",
        args.host,
        args.host_size,
        host.vertex_count(),
        host.edge_count()
    );

    let set: MatchSet = match args.mode {
        ModeArg::Common => {
            SubgraphMatcher::common_subgraphs(&pattern, &host, AlwaysTrue, AlwaysTrue, &config)
        }
        _ => SubgraphMatcher::enumerate_all(&pattern, &host, AlwaysTrue, AlwaysTrue, &config),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    println!("=== {:?} ===", args.mode);
    for (i, map) in set.items.iter().enumerate() {
        let pairs: Vec<String> = map.pairs().map(|(u, v)| format!("{u}->{v}")).collect();
        println!("{i}: {}", pairs.join(" "));
    }
    println!(
        "{} reported{}",
        set.len(),
        if set.is_truncated() { " (truncated)" } else { "" }
    );

    Ok(())
}
