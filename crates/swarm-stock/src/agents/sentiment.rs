//! Sentiment analyst node

use async_trait::async_trait;
use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result, StateField, StateUpdate, TradingState};
use swarm_llm::{ChatRequest, LlmProvider};

use crate::config::SwarmConfig;
use crate::market::NewsSearch;

const SYSTEM_PROMPT: &str = r"You are an expert Market Sentiment Analyst.
Your job is to read recent news headlines and snippets about a specific stock and gauge the market's mood.
Identify any major catalysts, positive news, or concerning events.
Conclude with a clear 'Bullish', 'Bearish', or 'Neutral' sentiment rating.
Be concise.";

// Slightly higher temperature: news interpretation, not metric extraction
const TEMPERATURE: f32 = 0.2;
const MAX_NEWS_ITEMS: usize = 5;
const SEARCH_QUALIFIER: &str = " share news Indian stock market";

/// Gauges market mood from recent news about the stock.
pub struct SentimentAnalystNode {
    provider: Arc<dyn LlmProvider>,
    news: Arc<dyn NewsSearch>,
    config: Arc<SwarmConfig>,
}

impl SentimentAnalystNode {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        news: Arc<dyn NewsSearch>,
        config: Arc<SwarmConfig>,
    ) -> Self {
        Self {
            provider,
            news,
            config,
        }
    }
}

/// Search term for a ticker: exchange suffix stripped, locale qualifier
/// appended ("RELIANCE.NS" -> "RELIANCE share news Indian stock market").
fn search_term(ticker: &str) -> String {
    let base = ticker.split('.').next().unwrap_or(ticker);
    format!("{base}{SEARCH_QUALIFIER}")
}

#[async_trait]
impl GraphNode for SentimentAnalystNode {
    fn name(&self) -> &str {
        "sentiment_analyst"
    }

    fn writes(&self) -> &'static [StateField] {
        &[StateField::SentimentAnalysis]
    }

    async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
        let ticker = state.ticker.as_str();
        if ticker.is_empty() {
            return Ok(StateUpdate::sentiment("Error: No ticker provided."));
        }

        let items = self.news.news(&search_term(ticker), MAX_NEWS_ITEMS).await;
        if items.is_empty() {
            return Ok(StateUpdate::sentiment(format!(
                "Could not find recent news for {ticker}."
            )));
        }

        let news_str = serde_json::to_string_pretty(&items).map_err(|e| Error::NodeFailed {
            node: self.name().to_string(),
            reason: e.to_string(),
        })?;

        let request = ChatRequest::builder(self.config.model.as_str())
            .system(SYSTEM_PROMPT)
            .prompt(format!(
                "Analyze the following recent news for {ticker}:\n{news_str}"
            ))
            .temperature(TEMPERATURE)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(StateUpdate::sentiment(response.text)
            .with_message(format!("sentiment_analyst: drafted summary for {ticker}")))
    }
}
