//! Error types for swarm-core

use crate::state::StateField;
use thiserror::Error;

/// Result type alias for swarm-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for graph and node operations
#[derive(Error, Debug)]
pub enum Error {
    /// Graph construction failed (missing role, duplicate node name)
    #[error("Graph construction failed: {0}")]
    Build(String),

    /// A node failed outside of its own recovery policy
    #[error("Node '{node}' failed: {reason}")]
    NodeFailed { node: String, reason: String },

    /// Model invocation failed; fatal for the whole request
    #[error("Model invocation failed: {0}")]
    Model(String),

    /// A node returned an update touching a field it does not own
    #[error("Node '{node}' wrote field '{field}' outside its contract")]
    OwnershipViolation { node: String, field: StateField },
}
