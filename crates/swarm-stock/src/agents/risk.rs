//! Risk analyst node

use async_trait::async_trait;
use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result, StateField, StateUpdate, TradingState};
use swarm_llm::{ChatRequest, LlmProvider};

use crate::config::SwarmConfig;
use crate::market::{MarketData, StockMetrics};

const SYSTEM_PROMPT: &str = r"You are an expert Risk Management Analyst for Indian Markets.
Your job is to evaluate the risk of investing in a given stock.
Analyze the Beta (volatility compared to the market), and 52-week range.
Conclude with a clear 'High Risk', 'Medium Risk', or 'Low Risk' rating.
Provide a concise risk assessment.";

const TEMPERATURE: f32 = 0.1;

/// Assesses volatility and leverage risk.
///
/// Soft-degrade policy: a missing beta does not abort the node; the model
/// still runs against a placeholder data block. This asymmetry with the
/// fundamental analyst's hard fail is intentional.
pub struct RiskAnalystNode {
    provider: Arc<dyn LlmProvider>,
    market: Arc<dyn MarketData>,
    config: Arc<SwarmConfig>,
}

impl RiskAnalystNode {
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

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "Data Unavailable".to_string(), |v| v.to_string())
}

/// Build the compact risk data block handed to the model.
fn risk_data_block(ticker: &str, metrics: &StockMetrics) -> String {
    if metrics.has_risk_core() {
        format!(
            "Ticker: {ticker}\n\
             Beta: {}\n\
             52-Week High: {}\n\
             52-Week Low: {}\n\
             Debt to Equity: {}\n",
            format_optional(metrics.beta),
            format_optional(metrics.fifty_two_week_high),
            format_optional(metrics.fifty_two_week_low),
            format_optional(metrics.debt_to_equity),
        )
    } else {
        // Fallback if no beta
        format!("Ticker: {ticker}\nBeta: Data Unavailable\n")
    }
}

#[async_trait]
impl GraphNode for RiskAnalystNode {
    fn name(&self) -> &str {
        "risk_analyst"
    }

    fn writes(&self) -> &'static [StateField] {
        &[StateField::RiskAnalysis]
    }

    async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
        let ticker = state.ticker.as_str();
        if ticker.is_empty() {
            return Ok(StateUpdate::risk("Error: No ticker provided."));
        }

        let metrics = self.market.metrics(ticker).await;
        let risk_data = risk_data_block(ticker, &metrics);

        let request = ChatRequest::builder(self.config.model.as_str())
            .system(SYSTEM_PROMPT)
            .prompt(format!(
                "Evaluate the risk for {ticker} based on this data:\n{risk_data}"
            ))
            .temperature(TEMPERATURE)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(StateUpdate::risk(response.text)
            .with_message(format!("risk_analyst: drafted summary for {ticker}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_block_with_full_metrics() {
        let metrics = StockMetrics {
            beta: Some(1.2),
            fifty_two_week_high: Some(1500.0),
            fifty_two_week_low: Some(1000.0),
            debt_to_equity: Some(41.5),
            ..StockMetrics::default()
        };

        let block = risk_data_block("RELIANCE.NS", &metrics);
        assert!(block.contains("Beta: 1.2"));
        assert!(block.contains("52-Week High: 1500"));
        assert!(block.contains("Debt to Equity: 41.5"));
    }

    #[test]
    fn test_risk_block_degrades_without_beta() {
        let block = risk_data_block("RELIANCE.NS", &StockMetrics::default());
        assert!(block.contains("Beta: Data Unavailable"));
    }
}
