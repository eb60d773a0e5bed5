//! The six graph nodes: supervisor, four analysts, judge
//!
//! Every node follows the same template: guard, fetch, serialize a compact
//! data slice, one model round-trip at a role-fixed temperature, and a
//! sparse state update under the node's own field. Fetch problems become
//! explanatory text; only model failures abort the request.

mod fundamental;
mod judge;
mod risk;
mod sentiment;
mod supervisor;
mod technical;

pub use fundamental::FundamentalAnalystNode;
pub use judge::JudgeNode;
pub use risk::RiskAnalystNode;
pub use sentiment::SentimentAnalystNode;
pub use supervisor::SupervisorNode;
pub use technical::TechnicalAnalystNode;

use std::sync::Arc;

use swarm_graph::AnalysisGraph;
use swarm_llm::LlmProvider;

use crate::config::SwarmConfig;
use crate::market::{MarketData, NewsSearch};

/// Wire the six nodes into the compiled analysis graph.
///
/// The graph is stateless once built; callers construct it once at process
/// start and share it behind an `Arc`.
pub fn build_graph(
    provider: Arc<dyn LlmProvider>,
    market: Arc<dyn MarketData>,
    news: Arc<dyn NewsSearch>,
    config: Arc<SwarmConfig>,
) -> swarm_core::Result<AnalysisGraph> {
    AnalysisGraph::builder()
        .supervisor(Arc::new(SupervisorNode::new(
            Arc::clone(&provider),
            Arc::clone(&config),
        )))
        .analyst(Arc::new(TechnicalAnalystNode::new(
            Arc::clone(&provider),
            Arc::clone(&market),
            Arc::clone(&config),
        )))
        .analyst(Arc::new(FundamentalAnalystNode::new(
            Arc::clone(&provider),
            Arc::clone(&market),
            Arc::clone(&config),
        )))
        .analyst(Arc::new(SentimentAnalystNode::new(
            Arc::clone(&provider),
            news,
            Arc::clone(&config),
        )))
        .analyst(Arc::new(RiskAnalystNode::new(
            Arc::clone(&provider),
            market,
            Arc::clone(&config),
        )))
        .judge(Arc::new(JudgeNode::new(provider, config)))
        .build()
}
