//! Orchestration graph for swarm-rs
//!
//! Wires the analysis nodes into the fixed DAG
//! `supervisor → {analysts in parallel} → judge` and executes it with a
//! strict sequential barrier before the fan-out and a counting join barrier
//! before the judge. Execution is exposed in two modes: run-to-completion
//! ([`AnalysisGraph::invoke`]) and step-wise event emission
//! ([`AnalysisGraph::stream`]).

pub mod executor;
pub mod graph;

pub use executor::NodeEvent;
pub use graph::{AnalysisGraph, GraphBuilder};
