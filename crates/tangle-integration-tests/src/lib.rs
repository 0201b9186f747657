//! Shared fixtures for the cross-crate tangle tests.

use tangle_graph::Graph;
use tangle_sim::{build, Result, TangleConfig, TipSelection};
use tangle_weights::{recompute_all, ExitModel};

pub const STRATEGIES: [TipSelection; 3] = [
    TipSelection::UniformRandom,
    TipSelection::UnweightedWalk,
    TipSelection::WeightedWalk,
];

/// Build a tangle and bring every metric up to date.
pub fn build_with_metrics(config: TangleConfig, model: ExitModel) -> Result<Graph> {
    let mut graph = build(config)?;
    recompute_all(&mut graph, model)?;
    Ok(graph)
}

/// Exit model that matches the walker a strategy uses.
pub fn exit_model_for(config: &TangleConfig) -> ExitModel {
    match config.strategy {
        TipSelection::UniformRandom => ExitModel::Uniform,
        TipSelection::UnweightedWalk => ExitModel::Unweighted,
        TipSelection::WeightedWalk => ExitModel::Weighted {
            alpha: config.alpha,
        },
    }
}
