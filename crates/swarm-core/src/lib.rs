//! Core abstractions for swarm-rs
//!
//! This crate defines the shared analysis state threaded through a swarm
//! run, the merge-patch type nodes return, and the node contract the graph
//! executor enforces.

pub mod error;
pub mod node;
pub mod state;

pub use error::{Error, Result};
pub use node::GraphNode;
pub use state::{StateField, StateUpdate, TradingState};
