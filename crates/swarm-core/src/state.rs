//! Shared analysis state and the merge-patch type nodes return
//!
//! A [`TradingState`] is created fresh per request, flows through the graph,
//! and is discarded once the judge has written the final recommendation.
//! Nodes never mutate it directly: each returns a sparse [`StateUpdate`]
//! which the executor merges with a deterministic per-field rule (overwrite
//! for scalar fields, append for the trace log).

use serde::{Deserialize, Serialize};

/// The writable fields of [`TradingState`], one owner per field.
///
/// `user_query` is immutable after initialization and `messages` is an
/// append-only trace every node may extend, so neither appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    Ticker,
    TechnicalAnalysis,
    FundamentalAnalysis,
    SentimentAnalysis,
    RiskAnalysis,
    FinalRecommendation,
}

impl std::fmt::Display for StateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ticker => "ticker",
            Self::TechnicalAnalysis => "technical_analysis",
            Self::FundamentalAnalysis => "fundamental_analysis",
            Self::SentimentAnalysis => "sentiment_analysis",
            Self::RiskAnalysis => "risk_analysis",
            Self::FinalRecommendation => "final_recommendation",
        };
        f.write_str(name)
    }
}

/// State of one trading-analysis run, shared by every node in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingState {
    /// Free-text user query; immutable after initialization
    pub user_query: String,

    /// Canonical exchange-suffixed symbol, or the `UNKNOWN` sentinel
    pub ticker: String,

    /// Output of the technical analyst
    pub technical_analysis: String,

    /// Output of the fundamental analyst
    pub fundamental_analysis: String,

    /// Output of the sentiment analyst
    pub sentiment_analysis: String,

    /// Output of the risk analyst
    pub risk_analysis: String,

    /// Output of the judge; contains the trailing recommendation line
    pub final_recommendation: String,

    /// Append-only trace of node activity, in execution order
    pub messages: Vec<String>,
}

impl TradingState {
    /// Create a fresh state from a free-text query.
    pub fn from_query(query: impl Into<String>) -> Self {
        Self {
            user_query: query.into(),
            ..Self::default()
        }
    }

    /// Create a state with a pre-resolved ticker.
    ///
    /// The supervisor short-circuits on a non-empty ticker, so callers that
    /// already know the symbol skip the extraction model call entirely.
    pub fn with_ticker(query: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            user_query: query.into(),
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Merge a node's sparse update into this state.
    ///
    /// Scalar fields overwrite; `messages` appends in the order updates are
    /// applied, which the executor keeps equal to node completion order.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(ticker) = update.ticker {
            self.ticker = ticker;
        }
        if let Some(text) = update.technical_analysis {
            self.technical_analysis = text;
        }
        if let Some(text) = update.fundamental_analysis {
            self.fundamental_analysis = text;
        }
        if let Some(text) = update.sentiment_analysis {
            self.sentiment_analysis = text;
        }
        if let Some(text) = update.risk_analysis {
            self.risk_analysis = text;
        }
        if let Some(text) = update.final_recommendation {
            self.final_recommendation = text;
        }
        self.messages.extend(update.messages);
    }

    /// True once all four analyst fields are populated.
    pub fn analysts_complete(&self) -> bool {
        !self.technical_analysis.is_empty()
            && !self.fundamental_analysis.is_empty()
            && !self.sentiment_analysis.is_empty()
            && !self.risk_analysis.is_empty()
    }
}

/// Sparse merge-patch returned by a node: only the fields it changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_analysis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fundamental_analysis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_analysis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_recommendation: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl StateUpdate {
    /// Update carrying only a resolved ticker.
    pub fn ticker(value: impl Into<String>) -> Self {
        Self {
            ticker: Some(value.into()),
            ..Self::default()
        }
    }

    /// Update carrying only a technical analysis.
    pub fn technical(value: impl Into<String>) -> Self {
        Self {
            technical_analysis: Some(value.into()),
            ..Self::default()
        }
    }

    /// Update carrying only a fundamental analysis.
    pub fn fundamental(value: impl Into<String>) -> Self {
        Self {
            fundamental_analysis: Some(value.into()),
            ..Self::default()
        }
    }

    /// Update carrying only a sentiment analysis.
    pub fn sentiment(value: impl Into<String>) -> Self {
        Self {
            sentiment_analysis: Some(value.into()),
            ..Self::default()
        }
    }

    /// Update carrying only a risk analysis.
    pub fn risk(value: impl Into<String>) -> Self {
        Self {
            risk_analysis: Some(value.into()),
            ..Self::default()
        }
    }

    /// Update carrying only a final recommendation.
    pub fn recommendation(value: impl Into<String>) -> Self {
        Self {
            final_recommendation: Some(value.into()),
            ..Self::default()
        }
    }

    /// Attach a trace message to this update.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Which scalar fields this update writes.
    ///
    /// The executor checks this against the node's declared contract before
    /// merging; trace messages are always allowed.
    pub fn touched(&self) -> Vec<StateField> {
        let mut fields = Vec::new();
        if self.ticker.is_some() {
            fields.push(StateField::Ticker);
        }
        if self.technical_analysis.is_some() {
            fields.push(StateField::TechnicalAnalysis);
        }
        if self.fundamental_analysis.is_some() {
            fields.push(StateField::FundamentalAnalysis);
        }
        if self.sentiment_analysis.is_some() {
            fields.push(StateField::SentimentAnalysis);
        }
        if self.risk_analysis.is_some() {
            fields.push(StateField::RiskAnalysis);
        }
        if self.final_recommendation.is_some() {
            fields.push(StateField::FinalRecommendation);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_overwrite() {
        let mut state = TradingState::from_query("Should I buy RELIANCE.NS?");
        state.apply(StateUpdate::ticker("RELIANCE.NS"));
        state.apply(StateUpdate::technical("Bullish"));
        state.apply(StateUpdate::technical("Neutral"));

        assert_eq!(state.ticker, "RELIANCE.NS");
        assert_eq!(state.technical_analysis, "Neutral");
        assert_eq!(state.user_query, "Should I buy RELIANCE.NS?");
    }

    #[test]
    fn test_messages_append() {
        let mut state = TradingState::default();
        state.apply(StateUpdate::ticker("TCS.NS").with_message("supervisor: resolved TCS.NS"));
        state.apply(StateUpdate::risk("Low Risk").with_message("risk_analyst: done"));

        assert_eq!(
            state.messages,
            vec!["supervisor: resolved TCS.NS", "risk_analyst: done"]
        );
    }

    #[test]
    fn test_disjoint_merges_commute() {
        let updates = [
            StateUpdate::technical("Bullish"),
            StateUpdate::fundamental("Undervalued"),
            StateUpdate::sentiment("Bullish Sentiment"),
            StateUpdate::risk("Low Risk"),
        ];

        let mut forward = TradingState::with_ticker("", "INFY.NS");
        for update in updates.clone() {
            forward.apply(update);
        }

        let mut reversed = TradingState::with_ticker("", "INFY.NS");
        for update in updates.into_iter().rev() {
            reversed.apply(update);
        }

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_touched_fields() {
        let update = StateUpdate::ticker("RELIANCE.NS").with_message("trace");
        assert_eq!(update.touched(), vec![StateField::Ticker]);

        assert!(StateUpdate::default().with_message("only trace").touched().is_empty());
    }

    #[test]
    fn test_analysts_complete() {
        let mut state = TradingState::with_ticker("", "RELIANCE.NS");
        assert!(!state.analysts_complete());

        state.apply(StateUpdate::technical("a"));
        state.apply(StateUpdate::fundamental("b"));
        state.apply(StateUpdate::sentiment("c"));
        assert!(!state.analysts_complete());

        state.apply(StateUpdate::risk("d"));
        assert!(state.analysts_complete());
    }

    #[test]
    fn test_update_serialization_is_sparse() {
        let update = StateUpdate::risk("Low Risk");
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"risk_analysis":"Low Risk"}"#);
    }
}
