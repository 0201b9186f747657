//! Tangle Growth Simulation
//!
//! Grows a tangle from genesis under a Poisson arrival process and records
//! every step so it can be replayed.
//!
//! # Architecture
//!
//! - **Arrival process**: exponential inter-arrival gaps, periodic milestones
//! - **Tip selection**: uniform random, unweighted walk, weighted walk
//! - **Builder**: attaches one transaction (and its approvals) per step
//! - **Playback**: scrub through the finished tangle frame by frame
//!
//! Every run is deterministic given [`TangleConfig::seed`].
//!
//! # Usage
//!
//! ```
//! use tangle_sim::{build, recompute_confidence, recompute_exit_probabilities, recompute_weights};
//! use tangle_sim::{TangleConfig, TipSelection};
//!
//! let config = TangleConfig::default()
//!     .with_node_count(100)
//!     .with_strategy(TipSelection::WeightedWalk);
//! let mut graph = build(config)?;
//!
//! recompute_weights(&mut graph)?;
//! recompute_exit_probabilities(&mut graph, true, 0.5)?;
//! recompute_confidence(&mut graph)?;
//! assert!(graph.confidence(tangle_graph::NodeId::GENESIS)? > 0.999);
//! # Ok::<(), tangle_sim::Error>(())
//! ```

mod api;
mod arrival;
mod builder;
mod config;
mod error;
mod events;
mod playback;
mod selection;

pub use api::{
    ancestors_of, build, descendants_of, direct_approvers, direct_children, milestones,
    recompute_confidence, recompute_exit_probabilities, recompute_weights, tips,
};
pub use arrival::{exponential_delay, Arrival, ArrivalProcess};
pub use builder::TangleBuilder;
pub use config::{ClockStart, TangleConfig, TipSelection, WalkAnchor};
pub use error::{Error, Result};
pub use events::{NodeState, TangleEvent, TangleSnapshot};
pub use playback::{Playback, PlaybackStatus};
pub use selection::{random_walk, Selection, TipSelector, UniformRandom, UnweightedWalk, WeightedWalk};
