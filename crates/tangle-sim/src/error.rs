//! Error types for tangle-sim.

use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration was rejected before any node was created.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Graph mutation or metric access failed.
    #[error("graph error: {0}")]
    Graph(#[from] tangle_graph::Error),

    /// Configuration or snapshot (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
