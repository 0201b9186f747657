//! Playback cursor over a finished tangle.
//!
//! Frame `k` shows the first `k` transactions with all of their approvals.
//! Pacing is left to whoever drives the cursor.

use serde::{Deserialize, Serialize};
use tangle_graph::{Graph, NodeId};

use crate::events::{TangleEvent, TangleSnapshot};
use crate::selection::Selection;

/// Playback cursor over a tangle and its construction events.
pub struct Playback {
    graph: Graph,
    events: Vec<TangleEvent>,
    current_frame: usize,
    loop_enabled: bool,
}

impl Playback {
    /// `events` must be ordered by step, as a builder records them.
    pub fn new(graph: Graph, events: Vec<TangleEvent>) -> Self {
        Self {
            graph,
            events,
            current_frame: 0,
            loop_enabled: false,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of transactions currently shown.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Get the total number of frames.
    pub fn total_frames(&self) -> usize {
        self.graph.len()
    }

    /// Whether every transaction is shown.
    pub fn is_at_end(&self) -> bool {
        self.current_frame >= self.total_frames()
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// Jump to a frame, clamped to the last one.
    pub fn seek(&mut self, frame: usize) {
        self.current_frame = frame.min(self.total_frames());
    }

    /// Return to frame zero.
    pub fn rewind(&mut self) {
        self.current_frame = 0;
    }

    /// With looping on, stepping forward from the last frame starts over.
    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Show one more transaction and return the events that attached it.
    ///
    /// At the last frame this returns `None`, unless looping is on: then the
    /// cursor starts over and shows the first transaction again.
    pub fn step_forward(&mut self) -> Option<&[TangleEvent]> {
        if self.is_at_end() {
            if !self.loop_enabled || self.total_frames() == 0 {
                return None;
            }
            self.current_frame = 0;
        }
        let step = self.current_frame as u64;
        self.current_frame += 1;
        Some(self.events_of(step))
    }

    /// Hide the most recent transaction.
    pub fn step_backward(&mut self) {
        self.current_frame = self.current_frame.saturating_sub(1);
    }

    /// Events recorded while attaching transaction `step`.
    pub fn events_of(&self, step: u64) -> &[TangleEvent] {
        let start = self.events.partition_point(|e| e.step() < step);
        let end = self.events.partition_point(|e| e.step() <= step);
        &self.events[start..end]
    }

    /// Events of every transaction shown so far.
    pub fn events_to_current(&self) -> &[TangleEvent] {
        let end = self
            .events
            .partition_point(|e| e.step() < self.current_frame as u64);
        &self.events[..end]
    }

    /// Walks taken by the most recently shown transaction.
    pub fn current_walks(&self) -> Vec<Selection> {
        let Some(last) = self.current_frame.checked_sub(1) else {
            return Vec::new();
        };
        self.events_of(last as u64)
            .iter()
            .filter_map(|event| match event {
                TangleEvent::TipSelected { tip, path, .. } => Some(Selection {
                    tip: *tip,
                    path: path.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// The most recently shown transaction.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current_frame
            .checked_sub(1)
            .map(|last| NodeId::new(last as u64))
    }

    /// The tangle as of the current frame.
    pub fn snapshot(&self) -> TangleSnapshot {
        TangleSnapshot::of(&self.graph.view_prefix(self.current_frame))
    }

    /// Progress as a fraction in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_frames() == 0 {
            0.0
        } else {
            self.current_frame as f64 / self.total_frames() as f64
        }
    }
}

/// Playback status for a presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub current_frame: usize,
    pub total_frames: usize,
    pub at_end: bool,
    pub progress: f64,
    pub loop_enabled: bool,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            current_frame: playback.current_frame,
            total_frames: playback.total_frames(),
            at_end: playback.is_at_end(),
            progress: playback.progress(),
            loop_enabled: playback.loop_enabled,
        }
    }
}
