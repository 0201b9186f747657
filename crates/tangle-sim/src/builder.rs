//! Incremental tangle construction.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tangle_graph::{Graph, NodeId, TangleView};
use tracing::{debug, info};

use crate::arrival::ArrivalProcess;
use crate::config::TangleConfig;
use crate::error::Result;
use crate::events::{TangleEvent, TangleSnapshot};
use crate::selection::TipSelector;

/// Grows a tangle one transaction at a time and records what happened.
///
/// Each [`step`](Self::step) attaches exactly one transaction together with
/// all of its approvals, so the graph is never observed half-attached.
pub struct TangleBuilder {
    config: TangleConfig,
    selector: Box<dyn TipSelector>,
    arrivals: ArrivalProcess,
    rng: StdRng,
    graph: Graph,
    events: Vec<TangleEvent>,
    start_point: NodeId,
}

impl TangleBuilder {
    /// Validate `config` and start from a genesis-only tangle.
    pub fn new(config: TangleConfig) -> Result<Self> {
        config.validate()?;

        let graph = Graph::new();
        let genesis = graph.genesis();
        let events = vec![TangleEvent::NodeArrived {
            node: genesis.id(),
            arrival_time: genesis.arrival_time(),
            is_milestone: genesis.is_milestone(),
            step: 0,
        }];

        Ok(Self {
            selector: config.strategy.selector(&config),
            arrivals: ArrivalProcess::new(config.lambda, config.beta)
                .starting_at(config.clock_start.origin(config.h)),
            rng: StdRng::seed_from_u64(config.seed),
            graph,
            events,
            start_point: NodeId::GENESIS,
            config,
        })
    }

    pub fn config(&self) -> &TangleConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn events(&self) -> &[TangleEvent] {
        &self.events
    }

    /// Most recent milestone seen so far.
    pub fn start_point(&self) -> NodeId {
        self.start_point
    }

    /// Whether the configured number of transactions has been reached.
    pub fn is_complete(&self) -> bool {
        self.graph.len() >= self.config.node_count
    }

    /// Attach the next transaction. Returns `None` once the run is complete.
    pub fn step(&mut self) -> Result<Option<NodeId>> {
        if self.is_complete() {
            return Ok(None);
        }

        let arrival = self.arrivals.next_arrival(&mut self.rng);
        let node = self.graph.push_node(arrival.time, arrival.is_milestone);
        let step = node.value();
        self.events.push(TangleEvent::NodeArrived {
            node,
            arrival_time: arrival.time,
            is_milestone: arrival.is_milestone,
            step,
        });

        let (candidates, selections) = {
            let view = self.graph.view_before(arrival.time - self.config.h);
            let anchor = walk_anchor(&view, self.start_point);
            let selections = self.selector.select(&view, anchor, &mut self.rng);
            (view.len(), selections)
        };

        let mut approved = 0;
        for selection in selections {
            let tip = selection.tip;
            self.events.push(TangleEvent::TipSelected {
                node,
                tip,
                path: selection.path,
                step,
            });
            if self.graph.add_edge(node, tip)? {
                approved += 1;
                self.events.push(TangleEvent::ApprovalAttached {
                    source: node,
                    target: tip,
                    step,
                });
            }
        }

        if arrival.is_milestone {
            self.start_point = node;
        }

        debug!(
            node = %node,
            time = arrival.time,
            milestone = arrival.is_milestone,
            candidates,
            approved,
            "attached transaction"
        );

        Ok(Some(node))
    }

    /// Attach transactions until the configured count is reached.
    pub fn run_to_completion(&mut self) -> Result<()> {
        while self.step()?.is_some() {}

        info!(
            nodes = self.graph.len(),
            edges = self.graph.edges().len(),
            strategy = self.selector.name(),
            "tangle complete"
        );
        Ok(())
    }

    /// Read-only copy of the current tangle.
    pub fn snapshot(&self) -> TangleSnapshot {
        TangleSnapshot::of(&self.graph.view())
    }

    /// Hand over the graph and the event log.
    pub fn finish(self) -> (Graph, Vec<TangleEvent>) {
        (self.graph, self.events)
    }
}

/// The walk start for a candidate view: the tracked milestone if it is old
/// enough to be a candidate, else the latest milestone that is.
fn walk_anchor(view: &TangleView<'_>, start_point: NodeId) -> NodeId {
    if view.contains(start_point) {
        start_point
    } else {
        view.latest_milestone().unwrap_or(NodeId::GENESIS)
    }
}
