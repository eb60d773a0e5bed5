//! Technical analyst node

use async_trait::async_trait;
use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result, StateField, StateUpdate, TradingState};
use swarm_llm::{ChatRequest, LlmProvider};

use crate::config::SwarmConfig;
use crate::indicators;
use crate::market::MarketData;

const SYSTEM_PROMPT: &str = r"You are an expert Technical Analyst for Indian Stock Markets.
Your job is to analyze the price action, volume, and technical indicators of a stock and provide a technical analysis summary.
Include insights on Moving Averages (SMA, EMA), RSI, and MACD.
Conclude with a clear 'Bullish', 'Bearish', or 'Neutral' technical signal.
Be concise but highly analytical.";

const TEMPERATURE: f32 = 0.1;
const HISTORY_RANGE: &str = "3mo";
const HISTORY_INTERVAL: &str = "1d";
// Only the most recent rows go to the model to bound prompt size
const RECENT_ROWS: usize = 10;

/// Analyzes three months of daily price action through derived indicators.
pub struct TechnicalAnalystNode {
    provider: Arc<dyn LlmProvider>,
    market: Arc<dyn MarketData>,
    config: Arc<SwarmConfig>,
}

impl TechnicalAnalystNode {
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
impl GraphNode for TechnicalAnalystNode {
    fn name(&self) -> &str {
        "technical_analyst"
    }

    fn writes(&self) -> &'static [StateField] {
        &[StateField::TechnicalAnalysis]
    }

    async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
        let ticker = state.ticker.as_str();
        if ticker.is_empty() {
            return Ok(StateUpdate::technical(
                "Error: No ticker provided for technical analysis.",
            ));
        }

        let candles = self
            .market
            .history(ticker, HISTORY_RANGE, HISTORY_INTERVAL)
            .await;
        if candles.is_empty() {
            return Ok(StateUpdate::technical(format!(
                "Could not retrieve historical data for {ticker}."
            )));
        }

        let rows = match indicators::enrich(&candles) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(StateUpdate::technical(format!(
                    "Could not compute indicators for {ticker}: {e}."
                )));
            }
        };

        let recent = indicators::recent_window(&rows, RECENT_ROWS);
        let data = serde_json::to_string(recent).map_err(|e| Error::NodeFailed {
            node: self.name().to_string(),
            reason: e.to_string(),
        })?;

        let request = ChatRequest::builder(self.config.model.as_str())
            .system(SYSTEM_PROMPT)
            .prompt(format!(
                "Analyze the following recent technical data for {ticker}:\n{data}"
            ))
            .temperature(TEMPERATURE)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(StateUpdate::technical(response.text)
            .with_message(format!("technical_analyst: drafted summary for {ticker}")))
    }
}
