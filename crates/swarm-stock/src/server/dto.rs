//! Request and response DTOs for the REST surface

use serde::{Deserialize, Serialize};
use swarm_core::TradingState;

/// Body of `POST /analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text query about a stock
    pub query: String,

    /// Optional per-request model credential override
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Response of `POST /analyze`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub ticker: String,
    pub technical_analysis: String,
    pub fundamental_analysis: String,
    pub sentiment_analysis: String,
    pub risk_analysis: String,
    pub final_recommendation: String,
}

impl From<TradingState> for AnalyzeResponse {
    fn from(state: TradingState) -> Self {
        Self {
            ticker: state.ticker,
            technical_analysis: state.technical_analysis,
            fundamental_analysis: state.fundamental_analysis,
            sentiment_analysis: state.sentiment_analysis,
            risk_analysis: state.risk_analysis,
            final_recommendation: state.final_recommendation,
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub graph_initialized: bool,
}
