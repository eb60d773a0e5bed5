//! Supervisor node: ticker resolution

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use swarm_core::{Error, GraphNode, Result, StateField, StateUpdate, TradingState};
use swarm_llm::{ChatRequest, LlmProvider};

use crate::config::SwarmConfig;

const SYSTEM_PROMPT: &str = r"You are the Supervisor of a Trading Analysis Swarm.
Your ONLY job is to extract the stock ticker from the user query.
If the user provides an Indian stock name, attempt to append the correct Yahoo Finance suffix (.NS for NSE, .BO for BSE) if missing.
Respond ONLY with the exact ticker string (e.g. 'RELIANCE.NS'). Do not include any other text, reasoning, or markdown formatting.
If you cannot determine a ticker, output 'UNKNOWN'.";

// Zero temperature for strict string extraction
const TEMPERATURE: f32 = 0.0;

/// Parses the free-text user query into a canonical ticker symbol.
///
/// Idempotent: a pre-seeded ticker is returned unchanged without any model
/// call, so callers that resolve the symbol themselves pay nothing here.
/// A sentinel `UNKNOWN` or empty result is not retried; the analysts treat
/// it through their own guards.
pub struct SupervisorNode {
    provider: Arc<dyn LlmProvider>,
    config: Arc<SwarmConfig>,
}

impl SupervisorNode {
    pub fn new(provider: Arc<dyn LlmProvider>, config: Arc<SwarmConfig>) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl GraphNode for SupervisorNode {
    fn name(&self) -> &str {
        "supervisor"
    }

    fn writes(&self) -> &'static [StateField] {
        &[StateField::Ticker]
    }

    async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
        // Bypass the model if the ticker is already defined
        if !state.ticker.is_empty() {
            debug!(ticker = %state.ticker, "ticker pre-seeded, skipping extraction");
            return Ok(StateUpdate::ticker(state.ticker.clone()));
        }

        let request = ChatRequest::builder(self.config.model.as_str())
            .system(SYSTEM_PROMPT)
            .prompt(state.user_query.clone())
            .temperature(TEMPERATURE)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::Model(e.to_string()))?;

        let ticker = response.text.trim().to_string();
        debug!(%ticker, "supervisor extracted ticker");

        Ok(StateUpdate::ticker(ticker.clone())
            .with_message(format!("supervisor: resolved ticker '{ticker}'")))
    }
}
