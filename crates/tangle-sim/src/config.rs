//! Simulation configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tangle_graph::NodeId;

use crate::error::{Error, Result};
use crate::selection::{TipSelector, UniformRandom, UnweightedWalk, WeightedWalk};

/// Which tip-selection strategy new transactions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TipSelection {
    /// Two uniform draws from the current tips
    UniformRandom,
    /// Two unbiased random walks
    #[default]
    UnweightedWalk,
    /// Two cumulative-weight biased random walks
    WeightedWalk,
}

impl TipSelection {
    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            TipSelection::UniformRandom => "Uniform Random",
            TipSelection::UnweightedWalk => "Unweighted Random Walk",
            TipSelection::WeightedWalk => "Weighted Random Walk",
        }
    }

    /// Instantiate the strategy for a configuration.
    pub fn selector(&self, config: &TangleConfig) -> Box<dyn TipSelector> {
        match self {
            TipSelection::UniformRandom => Box::new(UniformRandom),
            TipSelection::UnweightedWalk => Box::new(UnweightedWalk {
                anchor: config.walk_anchor,
            }),
            TipSelection::WeightedWalk => Box::new(WeightedWalk {
                alpha: config.alpha,
                anchor: config.walk_anchor,
            }),
        }
    }
}

impl fmt::Display for TipSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TipSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ur" | "uniform" | "uniformrandom" | "uniform-random" => Ok(TipSelection::UniformRandom),
            "uwrw" | "unweighted" | "unweightedwalk" | "unweighted-walk" => {
                Ok(TipSelection::UnweightedWalk)
            }
            "wrw" | "weighted" | "weightedwalk" | "weighted-walk" => Ok(TipSelection::WeightedWalk),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown tip selection strategy '{}'",
                other
            ))),
        }
    }
}

/// Where the two walks of a walk-based strategy start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WalkAnchor {
    /// First walk from the latest milestone, second from genesis
    #[default]
    Dual,
    /// Both walks from the latest milestone
    AnchorOnly,
    /// Both walks from genesis
    GenesisOnly,
}

impl WalkAnchor {
    /// Start nodes for the two walks given the current milestone anchor.
    pub fn starts(&self, anchor: NodeId) -> [NodeId; 2] {
        match self {
            WalkAnchor::Dual => [anchor, NodeId::GENESIS],
            WalkAnchor::AnchorOnly => [anchor, anchor],
            WalkAnchor::GenesisOnly => [NodeId::GENESIS, NodeId::GENESIS],
        }
    }
}

/// Where the arrival clock starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClockStart {
    /// At genesis time; transactions arriving within `h` of genesis find no
    /// candidates and stay unattached
    #[default]
    Genesis,
    /// At `h`, so genesis is a candidate for every arrival
    AfterLag,
}

impl ClockStart {
    /// Time of the last arrival before the first generated transaction.
    pub fn origin(&self, h: f64) -> f64 {
        match self {
            ClockStart::Genesis => 0.0,
            ClockStart::AfterLag => h,
        }
    }
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TangleConfig {
    /// Total number of transactions, genesis included
    pub node_count: usize,
    /// Arrival rate; mean inter-arrival time is `1 / lambda`
    pub lambda: f64,
    /// Milestone interval in time units (0 disables milestones)
    pub beta: f64,
    /// Minimum age of an approval target relative to the approver
    pub h: f64,
    /// Bias strength of the weighted walk
    pub alpha: f64,
    /// Tip-selection strategy
    pub strategy: TipSelection,
    /// Start policy for walk-based strategies
    pub walk_anchor: WalkAnchor,
    /// Start of the arrival clock
    pub clock_start: ClockStart,
    /// Seed for deterministic runs
    pub seed: u64,
}

impl Default for TangleConfig {
    fn default() -> Self {
        Self {
            node_count: 50,
            lambda: 2.0,
            beta: 1.0,
            h: 1.0,
            alpha: 0.5,
            strategy: TipSelection::default(),
            walk_anchor: WalkAnchor::default(),
            clock_start: ClockStart::default(),
            seed: 42,
        }
    }
}

impl TangleConfig {
    #[must_use]
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    #[must_use]
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    #[must_use]
    pub fn with_h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: TipSelection) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_walk_anchor(mut self, anchor: WalkAnchor) -> Self {
        self.walk_anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_clock_start(mut self, clock_start: ClockStart) -> Self {
        self.clock_start = clock_start;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no run can honour.
    pub fn validate(&self) -> Result<()> {
        if self.node_count < 1 {
            return Err(invalid("node_count must be at least 1"));
        }
        if !(self.lambda.is_finite() && self.lambda > 0.0) {
            return Err(invalid(format!("lambda must be positive, got {}", self.lambda)));
        }
        for (name, value) in [("beta", self.beta), ("h", self.h), ("alpha", self.alpha)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfiguration(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(TangleConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            TangleConfig::default().with_node_count(0),
            TangleConfig::default().with_lambda(0.0),
            TangleConfig::default().with_lambda(-1.0),
            TangleConfig::default().with_lambda(f64::NAN),
            TangleConfig::default().with_beta(-0.1),
            TangleConfig::default().with_h(-1.0),
            TangleConfig::default().with_alpha(-2.0),
            TangleConfig::default().with_alpha(f64::INFINITY),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn zero_beta_h_alpha_are_allowed() {
        let config = TangleConfig::default()
            .with_beta(0.0)
            .with_h(0.0)
            .with_alpha(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn strategy_parsing() {
        assert_eq!("UR".parse::<TipSelection>().unwrap(), TipSelection::UniformRandom);
        assert_eq!("unweighted".parse::<TipSelection>().unwrap(), TipSelection::UnweightedWalk);
        assert_eq!("WeightedWalk".parse::<TipSelection>().unwrap(), TipSelection::WeightedWalk);
        assert!("sideways".parse::<TipSelection>().is_err());
    }

    #[test]
    fn walk_anchor_starts() {
        let anchor = NodeId(7);
        assert_eq!(WalkAnchor::Dual.starts(anchor), [anchor, NodeId::GENESIS]);
        assert_eq!(WalkAnchor::AnchorOnly.starts(anchor), [anchor, anchor]);
        assert_eq!(
            WalkAnchor::GenesisOnly.starts(anchor),
            [NodeId::GENESIS, NodeId::GENESIS]
        );
    }

    #[test]
    fn clock_origin() {
        assert_eq!(ClockStart::Genesis.origin(1.5), 0.0);
        assert_eq!(ClockStart::AfterLag.origin(1.5), 1.5);
        assert_eq!(TangleConfig::default().clock_start, ClockStart::Genesis);
    }

    #[test]
    fn json_fills_missing_fields() {
        let config: TangleConfig =
            serde_json::from_str(r#"{"node_count": 12, "strategy": "WeightedWalk"}"#).unwrap();
        assert_eq!(config.node_count, 12);
        assert_eq!(config.strategy, TipSelection::WeightedWalk);
        assert_eq!(config.lambda, TangleConfig::default().lambda);
    }
}
