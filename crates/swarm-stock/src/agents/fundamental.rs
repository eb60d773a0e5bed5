//! Fundamental analyst node

use async_trait::async_trait;
use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result, StateField, StateUpdate, TradingState};
use swarm_llm::{ChatRequest, LlmProvider};

use crate::config::SwarmConfig;
use crate::market::MarketData;

const SYSTEM_PROMPT: &str = r"You are an expert Fundamental Analyst for Indian Stock Markets.
Your job is to evaluate a company's financial health based on core metrics (P/E, EPS, Margins, Debt, ROE).
Compare valuation, profitability, and growth.
Conclude with a clear 'Undervalued', 'Overvalued', or 'Fairly Valued' assessment.
Be concise but highly analytical.";

const TEMPERATURE: f32 = 0.1;

/// Evaluates financial health from the fundamental metric subset.
///
/// Hard-fail policy: a metric set without market cap is treated as wholly
/// unavailable and the model is never invoked. (The risk analyst
/// deliberately does the opposite on a missing beta.)
pub struct FundamentalAnalystNode {
    provider: Arc<dyn LlmProvider>,
    market: Arc<dyn MarketData>,
    config: Arc<SwarmConfig>,
}

impl FundamentalAnalystNode {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        market: Arc<dyn MarketData>,
        config: Arc<SwarmConfig>,
    ) -> Self {
        Self {
            provider,
            market,
            config,
        }
    }
}

#[async_trait]
impl GraphNode for FundamentalAnalystNode {
    fn name(&self) -> &str {
        "fundamental_analyst"
    }

    fn writes(&self) -> &'static [StateField] {
        &[StateField::FundamentalAnalysis]
    }

    async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
        let ticker = state.ticker.as_str();
        if ticker.is_empty() {
            return Ok(StateUpdate::fundamental("Error: No ticker provided."));
        }

        let metrics = self.market.metrics(ticker).await;
        if !metrics.has_fundamental_core() {
            return Ok(StateUpdate::fundamental(format!(
                "Could not retrieve fundamental metrics for {ticker}."
            )));
        }

        let metrics_str = serde_json::to_string_pretty(&metrics).map_err(|e| Error::NodeFailed {
            node: self.name().to_string(),
            reason: e.to_string(),
        })?;

        let request = ChatRequest::builder(self.config.model.as_str())
            .system(SYSTEM_PROMPT)
            .prompt(format!(
                "Analyze the following financial metrics for {ticker}:\n{metrics_str}"
            ))
            .temperature(TEMPERATURE)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(StateUpdate::fundamental(response.text)
            .with_message(format!("fundamental_analyst: drafted summary for {ticker}")))
    }
}
