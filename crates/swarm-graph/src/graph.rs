//! Graph definition and construction

use std::collections::HashSet;
use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result};

/// The compiled analysis graph.
///
/// Topology is fixed: one supervisor, a set of analysts that fan out after
/// the supervisor completes, and one judge behind the join barrier. The
/// compiled graph carries no per-request state, so one instance can be
/// built at process start and shared across requests behind an `Arc`.
pub struct AnalysisGraph {
    pub(crate) supervisor: Arc<dyn GraphNode>,
    pub(crate) analysts: Vec<Arc<dyn GraphNode>>,
    pub(crate) judge: Arc<dyn GraphNode>,
}

impl AnalysisGraph {
    /// Create a new graph builder
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Node names in declaration order: supervisor, analysts, judge.
    pub fn node_names(&self) -> Vec<&str> {
        let mut names = vec![self.supervisor.name()];
        names.extend(self.analysts.iter().map(|n| n.name()));
        names.push(self.judge.name());
        names
    }
}

/// Builder for [`AnalysisGraph`]
#[derive(Default)]
pub struct GraphBuilder {
    supervisor: Option<Arc<dyn GraphNode>>,
    analysts: Vec<Arc<dyn GraphNode>>,
    judge: Option<Arc<dyn GraphNode>>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the supervisor node (entry point, runs before any analyst)
    pub fn supervisor(mut self, node: Arc<dyn GraphNode>) -> Self {
        self.supervisor = Some(node);
        self
    }

    /// Add an analyst node to the fan-out stage
    pub fn analyst(mut self, node: Arc<dyn GraphNode>) -> Self {
        self.analysts.push(node);
        self
    }

    /// Set the judge node (runs after every analyst has completed)
    pub fn judge(mut self, node: Arc<dyn GraphNode>) -> Self {
        self.judge = Some(node);
        self
    }

    /// Build the graph, validating the topology
    pub fn build(self) -> Result<AnalysisGraph> {
        let supervisor = self
            .supervisor
            .ok_or_else(|| Error::Build("supervisor node not set".to_string()))?;
        let judge = self
            .judge
            .ok_or_else(|| Error::Build("judge node not set".to_string()))?;

        if self.analysts.is_empty() {
            return Err(Error::Build("at least one analyst node required".to_string()));
        }

        let mut seen = HashSet::new();
        for node in std::iter::once(&supervisor)
            .chain(self.analysts.iter())
            .chain(std::iter::once(&judge))
        {
            if !seen.insert(node.name().to_string()) {
                return Err(Error::Build(format!("duplicate node name '{}'", node.name())));
            }
        }

        Ok(AnalysisGraph {
            supervisor,
            analysts: self.analysts,
            judge,
        })
    }
}
