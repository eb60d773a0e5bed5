//! Graph execution: sequential supervisor barrier, analyst fan-out with a
//! counting join barrier, then the judge.
//!
//! Merge semantics: every node returns a sparse [`StateUpdate`]; the
//! executor validates it against the node's declared field contract, then
//! merges it into the canonical state. Merges happen one at a time in the
//! drain loop, so trace-log appends need no extra synchronization and
//! their order equals node completion order.

use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result, StateUpdate, TradingState};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::graph::AnalysisGraph;

/// Emitted once per node completion, in completion order.
#[derive(Debug, Clone)]
pub struct NodeEvent {
    /// Name of the node that completed
    pub node: String,

    /// The update the node produced (already merged into the state)
    pub update: StateUpdate,
}

impl AnalysisGraph {
    /// Run the graph to completion and return the final merged state.
    pub async fn invoke(&self, initial: TradingState) -> Result<TradingState> {
        self.execute(initial, None).await
    }

    /// Run the graph, emitting a [`NodeEvent`] per node completion.
    ///
    /// Events arrive in completion order; the four analysts may finish in
    /// any order. The final merged state is still returned once the judge
    /// completes, so callers can consume events progressively and keep the
    /// terminal state.
    pub async fn stream(
        &self,
        initial: TradingState,
        events: mpsc::Sender<NodeEvent>,
    ) -> Result<TradingState> {
        self.execute(initial, Some(events)).await
    }

    async fn execute(
        &self,
        mut state: TradingState,
        events: Option<mpsc::Sender<NodeEvent>>,
    ) -> Result<TradingState> {
        // Supervisor: strict sequential barrier. No analyst may start until
        // the ticker resolution round-trip has fully completed.
        let update = self.supervisor.run(&state).await?;
        self.merge(&*self.supervisor, update, &mut state, &events).await?;

        // Fan-out: all analysts start unconditionally on a shared snapshot
        // of the post-supervisor state. Invalid tickers are handled by the
        // analysts' own guards, not by routing.
        let snapshot = Arc::new(state.clone());
        let mut tasks = JoinSet::new();
        for node in &self.analysts {
            let node = Arc::clone(node);
            let snapshot = Arc::clone(&snapshot);
            tasks.spawn(async move {
                let result = node.run(&snapshot).await;
                (node, result)
            });
        }

        // Join barrier: drain every analyst before the judge may start. A
        // failed analyst is recorded but does not block the other three;
        // its error surfaces only after the barrier is fully drained.
        let mut first_error: Option<Error> = None;
        while let Some(joined) = tasks.join_next().await {
            let (node, result) = joined.map_err(|e| Error::NodeFailed {
                node: "analyst".to_string(),
                reason: e.to_string(),
            })?;

            match result {
                Ok(update) => {
                    self.merge(&*node, update, &mut state, &events).await?;
                }
                Err(e) => {
                    warn!(node = node.name(), error = %e, "analyst failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        // Judge: runs exactly once, after the barrier has fully drained.
        let update = self.judge.run(&state).await?;
        self.merge(&*self.judge, update, &mut state, &events).await?;

        info!(ticker = %state.ticker, "analysis run complete");
        Ok(state)
    }

    /// Validate a node's update against its field contract and merge it.
    async fn merge(
        &self,
        node: &dyn GraphNode,
        update: StateUpdate,
        state: &mut TradingState,
        events: &Option<mpsc::Sender<NodeEvent>>,
    ) -> Result<()> {
        for field in update.touched() {
            if !node.writes().contains(&field) {
                return Err(Error::OwnershipViolation {
                    node: node.name().to_string(),
                    field,
                });
            }
        }

        debug!(node = node.name(), "node completed");
        state.apply(update.clone());

        if let Some(tx) = events {
            let event = NodeEvent {
                node: node.name().to_string(),
                update,
            };
            if tx.send(event).await.is_err() {
                warn!(node = node.name(), "event receiver dropped");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use swarm_core::StateField;

    /// Node double that returns a canned update and counts invocations.
    struct StubNode {
        name: &'static str,
        writes: &'static [StateField],
        update: StateUpdate,
        calls: AtomicUsize,
        delay_ms: u64,
    }

    impl StubNode {
        fn new(name: &'static str, writes: &'static [StateField], update: StateUpdate) -> Arc<Self> {
            Arc::new(Self {
                name,
                writes,
                update,
                calls: AtomicUsize::new(0),
                delay_ms: 0,
            })
        }

        fn with_delay(
            name: &'static str,
            writes: &'static [StateField],
            update: StateUpdate,
            delay_ms: u64,
        ) -> Arc<Self> {
            Arc::new(Self {
                name,
                writes,
                update,
                calls: AtomicUsize::new(0),
                delay_ms,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GraphNode for StubNode {
        fn name(&self) -> &str {
            self.name
        }

        fn writes(&self) -> &'static [StateField] {
            self.writes
        }

        async fn run(&self, _state: &TradingState) -> Result<StateUpdate> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            Ok(self.update.clone())
        }
    }

    /// Analyst double that always fails with a model error.
    struct FailingNode;

    #[async_trait]
    impl GraphNode for FailingNode {
        fn name(&self) -> &str {
            "failing_analyst"
        }

        fn writes(&self) -> &'static [StateField] {
            &[StateField::SentimentAnalysis]
        }

        async fn run(&self, _state: &TradingState) -> Result<StateUpdate> {
            Err(Error::Model("connection reset".to_string()))
        }
    }

    /// Judge double that records whether all analyst fields were populated
    /// at the moment it ran.
    struct ProbeJudge {
        saw_complete_state: AtomicUsize,
    }

    #[async_trait]
    impl GraphNode for ProbeJudge {
        fn name(&self) -> &str {
            "judge"
        }

        fn writes(&self) -> &'static [StateField] {
            &[StateField::FinalRecommendation]
        }

        async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
            if state.analysts_complete() {
                self.saw_complete_state.fetch_add(1, Ordering::SeqCst);
            }
            Ok(StateUpdate::recommendation("FINAL RECOMMENDATION: HOLD"))
        }
    }

    fn supervisor_stub() -> Arc<StubNode> {
        StubNode::new(
            "supervisor",
            &[StateField::Ticker],
            StateUpdate::ticker("RELIANCE.NS"),
        )
    }

    fn analyst_stubs() -> Vec<Arc<StubNode>> {
        vec![
            StubNode::with_delay(
                "technical_analyst",
                &[StateField::TechnicalAnalysis],
                StateUpdate::technical("Bullish"),
                30,
            ),
            StubNode::new(
                "fundamental_analyst",
                &[StateField::FundamentalAnalysis],
                StateUpdate::fundamental("Undervalued"),
            ),
            StubNode::with_delay(
                "sentiment_analyst",
                &[StateField::SentimentAnalysis],
                StateUpdate::sentiment("Bullish Sentiment"),
                10,
            ),
            StubNode::new(
                "risk_analyst",
                &[StateField::RiskAnalysis],
                StateUpdate::risk("Low Risk"),
            ),
        ]
    }

    #[tokio::test]
    async fn test_invoke_merges_all_fields() {
        let judge = Arc::new(ProbeJudge {
            saw_complete_state: AtomicUsize::new(0),
        });
        let mut builder = AnalysisGraph::builder()
            .supervisor(supervisor_stub())
            .judge(Arc::clone(&judge) as Arc<dyn GraphNode>);
        for analyst in analyst_stubs() {
            builder = builder.analyst(analyst);
        }
        let graph = builder.build().unwrap();

        let state = graph
            .invoke(TradingState::from_query("Should I buy RELIANCE.NS?"))
            .await
            .unwrap();

        assert_eq!(state.ticker, "RELIANCE.NS");
        assert_eq!(state.technical_analysis, "Bullish");
        assert_eq!(state.fundamental_analysis, "Undervalued");
        assert_eq!(state.sentiment_analysis, "Bullish Sentiment");
        assert_eq!(state.risk_analysis, "Low Risk");
        assert_eq!(state.final_recommendation, "FINAL RECOMMENDATION: HOLD");
    }

    #[tokio::test]
    async fn test_join_barrier_judge_sees_complete_state() {
        let judge = Arc::new(ProbeJudge {
            saw_complete_state: AtomicUsize::new(0),
        });
        let mut builder = AnalysisGraph::builder()
            .supervisor(supervisor_stub())
            .judge(Arc::clone(&judge) as Arc<dyn GraphNode>);
        for analyst in analyst_stubs() {
            builder = builder.analyst(analyst);
        }
        let graph = builder.build().unwrap();

        graph.invoke(TradingState::default()).await.unwrap();
        assert_eq!(judge.saw_complete_state.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stream_emits_supervisor_first_judge_last() {
        let judge = Arc::new(ProbeJudge {
            saw_complete_state: AtomicUsize::new(0),
        });
        let mut builder = AnalysisGraph::builder()
            .supervisor(supervisor_stub())
            .judge(judge as Arc<dyn GraphNode>);
        for analyst in analyst_stubs() {
            builder = builder.analyst(analyst);
        }
        let graph = builder.build().unwrap();

        let (tx, mut rx) = mpsc::channel(16);
        let state = graph.stream(TradingState::default(), tx).await.unwrap();
        assert!(!state.final_recommendation.is_empty());

        let mut order = Vec::new();
        while let Some(event) = rx.recv().await {
            order.push(event.node);
        }

        assert_eq!(order.len(), 6);
        assert_eq!(order.first().map(String::as_str), Some("supervisor"));
        assert_eq!(order.last().map(String::as_str), Some("judge"));
    }

    #[tokio::test]
    async fn test_analyst_failure_fails_request_but_not_siblings() {
        let analysts = analyst_stubs();
        let mut builder = AnalysisGraph::builder()
            .supervisor(supervisor_stub())
            .analyst(Arc::new(FailingNode))
            .judge(Arc::new(ProbeJudge {
                saw_complete_state: AtomicUsize::new(0),
            }) as Arc<dyn GraphNode>);
        // Skip the stub that owns sentiment: FailingNode declares that field.
        let siblings: Vec<_> = analysts
            .iter()
            .filter(|a| a.name != "sentiment_analyst")
            .map(Arc::clone)
            .collect();
        for analyst in &siblings {
            builder = builder.analyst(Arc::clone(analyst) as Arc<dyn GraphNode>);
        }
        let graph = builder.build().unwrap();

        let result = graph.invoke(TradingState::default()).await;
        assert!(matches!(result, Err(Error::Model(_))));

        // The join barrier drained before surfacing the failure, so every
        // sibling analyst still ran exactly once.
        for analyst in &siblings {
            assert_eq!(analyst.calls(), 1, "{} did not run", analyst.name);
        }
    }

    #[tokio::test]
    async fn test_ownership_violation_rejected() {
        // Declares ticker ownership but writes a ticker AND a technical
        // analysis it does not own.
        let rogue = StubNode::new(
            "rogue_supervisor",
            &[StateField::Ticker],
            StateUpdate {
                ticker: Some("RELIANCE.NS".to_string()),
                technical_analysis: Some("smuggled".to_string()),
                ..StateUpdate::default()
            },
        );

        let mut builder = AnalysisGraph::builder()
            .supervisor(rogue)
            .judge(Arc::new(ProbeJudge {
                saw_complete_state: AtomicUsize::new(0),
            }) as Arc<dyn GraphNode>);
        for analyst in analyst_stubs() {
            builder = builder.analyst(analyst);
        }
        let graph = builder.build().unwrap();

        let result = graph.invoke(TradingState::default()).await;
        assert!(matches!(
            result,
            Err(Error::OwnershipViolation {
                field: StateField::TechnicalAnalysis,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_builder_rejects_incomplete_topology() {
        let result = AnalysisGraph::builder()
            .supervisor(supervisor_stub())
            .build();
        assert!(matches!(result, Err(Error::Build(_))));
    }

    #[tokio::test]
    async fn test_builder_rejects_duplicate_names() {
        let result = AnalysisGraph::builder()
            .supervisor(supervisor_stub())
            .analyst(StubNode::new(
                "technical_analyst",
                &[StateField::TechnicalAnalysis],
                StateUpdate::technical("a"),
            ))
            .analyst(StubNode::new(
                "technical_analyst",
                &[StateField::TechnicalAnalysis],
                StateUpdate::technical("b"),
            ))
            .judge(Arc::new(ProbeJudge {
                saw_complete_state: AtomicUsize::new(0),
            }) as Arc<dyn GraphNode>)
            .build();
        assert!(matches!(result, Err(Error::Build(_))));
    }
}
