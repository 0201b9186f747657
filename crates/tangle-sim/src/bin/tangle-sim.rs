//! Tangle simulation runner
//!
//! Usage: `tangle-sim [node_count] [strategy] [seed] [--config file.json] [--json]`

use std::env;

use tangle_graph::NodeId;
use tangle_sim::{
    recompute_confidence, recompute_exit_probabilities, recompute_weights, TangleBuilder,
    TangleConfig, TangleSnapshot, TipSelection,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tangle_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse command line args
    let mut json = false;
    let mut config_path = None;
    let mut positional = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => config_path = Some(args.next().ok_or("--config needs a file")?),
            _ => positional.push(arg),
        }
    }

    let mut config = match config_path {
        Some(path) => TangleConfig::from_json_file(path)?,
        None => TangleConfig::default(),
    };
    if let Some(count) = positional.first() {
        config.node_count = count.parse()?;
    }
    if let Some(strategy) = positional.get(1) {
        config.strategy = strategy.parse::<TipSelection>()?;
    }
    if let Some(seed) = positional.get(2) {
        config.seed = seed.parse()?;
    }

    let mut builder = TangleBuilder::new(config.clone())?;
    builder.run_to_completion()?;
    let event_count = builder.events().len();
    let (mut graph, _) = builder.finish();

    let weighted = config.strategy == TipSelection::WeightedWalk;
    recompute_weights(&mut graph)?;
    recompute_exit_probabilities(&mut graph, weighted, config.alpha)?;
    recompute_confidence(&mut graph)?;

    if json {
        let snapshot = TangleSnapshot::of(&graph.view());
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let view = graph.view();
    println!("Tangle Simulation");
    println!("=================");
    println!();
    println!("  Strategy:   {}", config.strategy);
    println!("  Nodes:      {}", graph.len());
    println!("  Approvals:  {}", graph.edges().len());
    println!("  Tips:       {}", view.tips().len());
    println!("  Milestones: {}", view.milestones().len());
    println!("  Events:     {}", event_count);
    println!();
    println!(
        "  Genesis weight:     {}",
        graph.cumulative_weight(NodeId::GENESIS)?
    );
    println!(
        "  Genesis confidence: {:.4}",
        graph.confidence(NodeId::GENESIS)?
    );

    Ok(())
}
