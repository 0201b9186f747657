//! Tip-selection strategies.
//!
//! Every strategy receives the candidate view (transactions old enough to be
//! approved) and the current walk anchor, and returns up to two selections.
//! Duplicate selections are collapsed by the builder, not here.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tangle_graph::{NodeId, TangleView};
use tangle_weights::{cumulative_weights, transition_probabilities, Bias};
use tracing::trace;

use crate::config::WalkAnchor;

/// A chosen approval target and the walk that reached it.
///
/// `path` runs from the walk start to `tip` inclusive. Strategies that do
/// not walk leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub tip: NodeId,
    pub path: Vec<NodeId>,
}

/// A tip-selection policy.
pub trait TipSelector {
    /// Pick 0, 1 or 2 approval targets from `view`.
    ///
    /// Returns nothing when the view is empty.
    fn select(&self, view: &TangleView<'_>, walk_start: NodeId, rng: &mut StdRng) -> Vec<Selection>;

    fn name(&self) -> &'static str;
}

/// Two independent uniform draws, with replacement, from the tips of the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl TipSelector for UniformRandom {
    fn select(&self, view: &TangleView<'_>, _walk_start: NodeId, rng: &mut StdRng) -> Vec<Selection> {
        let tips = view.tips();
        (0..2)
            .filter_map(|_| tips.choose(rng).copied())
            .map(|tip| Selection {
                tip,
                path: Vec::new(),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "uniform-random"
    }
}

/// Two unbiased random walks towards the tips.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnweightedWalk {
    pub anchor: WalkAnchor,
}

impl TipSelector for UnweightedWalk {
    fn select(&self, view: &TangleView<'_>, walk_start: NodeId, rng: &mut StdRng) -> Vec<Selection> {
        if view.is_empty() {
            return Vec::new();
        }
        self.anchor
            .starts(walk_start)
            .into_iter()
            .map(|start| random_walk(view, clamp_start(view, start), Bias::Uniform, rng))
            .collect()
    }

    fn name(&self) -> &'static str {
        "unweighted-walk"
    }
}

/// Two random walks biased towards approvers with high cumulative weight.
///
/// Cumulative weights are recomputed over the candidate view on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedWalk {
    pub alpha: f64,
    pub anchor: WalkAnchor,
}

impl TipSelector for WeightedWalk {
    fn select(&self, view: &TangleView<'_>, walk_start: NodeId, rng: &mut StdRng) -> Vec<Selection> {
        if view.is_empty() {
            return Vec::new();
        }
        let weights = cumulative_weights(view);
        let bias = Bias::Weighted {
            weights: &weights,
            alpha: self.alpha,
        };
        self.anchor
            .starts(walk_start)
            .into_iter()
            .map(|start| random_walk(view, clamp_start(view, start), bias, rng))
            .collect()
    }

    fn name(&self) -> &'static str {
        "weighted-walk"
    }
}

/// Walks never start outside the candidate view.
fn clamp_start(view: &TangleView<'_>, start: NodeId) -> NodeId {
    if view.contains(start) {
        start
    } else {
        NodeId::GENESIS
    }
}

/// Step from `start` to a random direct approver until reaching a tip of
/// the view.
pub fn random_walk<R: Rng + ?Sized>(
    view: &TangleView<'_>,
    start: NodeId,
    bias: Bias<'_>,
    rng: &mut R,
) -> Selection {
    let mut particle = start;
    let mut path = vec![start];

    loop {
        let steps = transition_probabilities(view, particle, bias);
        let Some(next) = choose_step(&steps, bias, rng) else {
            break;
        };
        trace!(from = %particle, to = %next, "walk step");
        particle = next;
        path.push(next);
    }

    Selection {
        tip: particle,
        path,
    }
}

fn choose_step<R: Rng + ?Sized>(steps: &[(NodeId, f64)], bias: Bias<'_>, rng: &mut R) -> Option<NodeId> {
    if let Bias::Weighted { .. } = bias {
        if let Ok(dist) = WeightedIndex::new(steps.iter().map(|&(_, p)| p)) {
            return Some(steps[dist.sample(rng)].0);
        }
    }
    steps.choose(rng).map(|&(node, _)| node)
}
