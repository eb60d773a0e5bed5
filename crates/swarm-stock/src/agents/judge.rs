//! Judge node: synthesis and final recommendation

use async_trait::async_trait;
use std::sync::Arc;

use swarm_core::{Error, GraphNode, Result, StateField, StateUpdate, TradingState};
use swarm_llm::{ChatRequest, LlmProvider};

use crate::config::SwarmConfig;

const SYSTEM_PROMPT: &str = r"You are the Lead Portfolio Manager and Final Judge.
You are reviewing a comprehensive report on an Indian Stock compiled by 4 expert analysts: Technical, Fundamental, Sentiment, and Risk.
Your job is to synthesize these 4 perspectives, resolve any conflicts (e.g., strong fundamentals but bearish technicals might mean 'Hold' or 'Wait for better entry'), and make a final investment decision.

Your output MUST end with a clear, definitive recommendation formatted exactly as one of the following:
FINAL RECOMMENDATION: BUY
FINAL RECOMMENDATION: HOLD
FINAL RECOMMENDATION: SELL

Keep your synthesis concise, highlighting the most heavily weighted factors.";

const TEMPERATURE: f32 = 0.3;

/// Synthesizes the four analyst perspectives into one verdict.
///
/// The node does not validate that the model actually emitted one of the
/// three recommendation lines; callers treat a malformed tail as a quality
/// defect, not an error.
pub struct JudgeNode {
    provider: Arc<dyn LlmProvider>,
    config: Arc<SwarmConfig>,
}

impl JudgeNode {
    pub fn new(provider: Arc<dyn LlmProvider>, config: Arc<SwarmConfig>) -> Self {
        Self { provider, config }
    }
}

/// Assemble the labeled multi-section report, sections in fixed order.
fn synthesis_report(state: &TradingState) -> String {
    let ticker = if state.ticker.is_empty() {
        "Unknown"
    } else {
        state.ticker.as_str()
    };

    format!(
        "--- STOCK: {ticker} ---\n\n\
         [TECHNICAL ANALYSIS]\n{}\n\n\
         [FUNDAMENTAL ANALYSIS]\n{}\n\n\
         [SENTIMENT ANALYSIS]\n{}\n\n\
         [RISK ANALYSIS]\n{}\n",
        state.technical_analysis,
        state.fundamental_analysis,
        state.sentiment_analysis,
        state.risk_analysis,
    )
}

#[async_trait]
impl GraphNode for JudgeNode {
    fn name(&self) -> &str {
        "judge"
    }

    fn writes(&self) -> &'static [StateField] {
        &[StateField::FinalRecommendation]
    }

    async fn run(&self, state: &TradingState) -> Result<StateUpdate> {
        let report = synthesis_report(state);

        let request = ChatRequest::builder(self.config.model.as_str())
            .system(SYSTEM_PROMPT)
            .prompt(format!(
                "Here are the analyst reports to synthesize:\n{report}"
            ))
            .temperature(TEMPERATURE)
            .max_tokens(self.config.max_tokens)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::Model(e.to_string()))?;

        Ok(StateUpdate::recommendation(response.text)
            .with_message("judge: final recommendation drafted".to_string()))
    }
}
